use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fleetops_auth::{Guard, Permission, Role};
use fleetops_core::{ActorId, TenantId};

/// Passive notification payload recorded on every store mutation.
///
/// Changes are facts: immutable, timestamped, named with a stable type
/// string. Consumers (audit projections, cache invalidation hooks) read
/// them; nothing on the check path does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RbacChange {
    RoleDefined {
        tenant_id: TenantId,
        guard: Guard,
        role: Role,
        occurred_at: DateTime<Utc>,
    },
    RoleAssigned {
        tenant_id: TenantId,
        actor_id: ActorId,
        guard: Guard,
        role: Role,
        occurred_at: DateTime<Utc>,
    },
    RoleUnassigned {
        tenant_id: TenantId,
        actor_id: ActorId,
        guard: Guard,
        role: Role,
        occurred_at: DateTime<Utc>,
    },
    PermissionGrantedToRole {
        tenant_id: TenantId,
        guard: Guard,
        role: Role,
        permission: String,
        occurred_at: DateTime<Utc>,
    },
    PermissionRevokedFromRole {
        tenant_id: TenantId,
        guard: Guard,
        role: Role,
        permission: String,
        occurred_at: DateTime<Utc>,
    },
    PermissionGranted {
        tenant_id: TenantId,
        actor_id: ActorId,
        permission: Permission,
        occurred_at: DateTime<Utc>,
    },
    PermissionRevoked {
        tenant_id: TenantId,
        actor_id: ActorId,
        permission: Permission,
        occurred_at: DateTime<Utc>,
    },
}

impl RbacChange {
    /// Stable change name (e.g. `"rbac.role.assigned"`).
    pub fn change_type(&self) -> &'static str {
        match self {
            RbacChange::RoleDefined { .. } => "rbac.role.defined",
            RbacChange::RoleAssigned { .. } => "rbac.role.assigned",
            RbacChange::RoleUnassigned { .. } => "rbac.role.unassigned",
            RbacChange::PermissionGrantedToRole { .. } => "rbac.role.permission_granted",
            RbacChange::PermissionRevokedFromRole { .. } => "rbac.role.permission_revoked",
            RbacChange::PermissionGranted { .. } => "rbac.actor.permission_granted",
            RbacChange::PermissionRevoked { .. } => "rbac.actor.permission_revoked",
        }
    }

    /// When the change occurred (business time).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            RbacChange::RoleDefined { occurred_at, .. }
            | RbacChange::RoleAssigned { occurred_at, .. }
            | RbacChange::RoleUnassigned { occurred_at, .. }
            | RbacChange::PermissionGrantedToRole { occurred_at, .. }
            | RbacChange::PermissionRevokedFromRole { occurred_at, .. }
            | RbacChange::PermissionGranted { occurred_at, .. }
            | RbacChange::PermissionRevoked { occurred_at, .. } => *occurred_at,
        }
    }
}
