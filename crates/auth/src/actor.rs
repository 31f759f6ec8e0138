use serde::{Deserialize, Serialize};

use fleetops_core::{ActorId, TenantId};

use crate::Guard;

/// The resolved identity an authorization decision is evaluated for.
///
/// Construction is intentionally decoupled from transport and storage: an
/// API layer derives this from session/token claims, a worker from job
/// metadata. The checker never looks past these three fields; everything
/// else (roles, grants) lives behind the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identity whose access is being checked.
    pub actor_id: ActorId,

    /// Tenant context the check runs in. Grants are tenant-isolated.
    pub tenant_id: TenantId,

    /// Authentication context the actor signed in under.
    #[serde(default)]
    pub guard: Guard,
}

impl Actor {
    /// Actor under the default guard.
    pub fn new(actor_id: ActorId, tenant_id: TenantId) -> Self {
        Self {
            actor_id,
            tenant_id,
            guard: Guard::default(),
        }
    }

    pub fn with_guard(actor_id: ActorId, tenant_id: TenantId, guard: Guard) -> Self {
        Self {
            actor_id,
            tenant_id,
            guard,
        }
    }
}
