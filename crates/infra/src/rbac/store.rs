use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use fleetops_auth::{Actor, Guard, Permission, PermissionResolver, ResolveError, Role};
use fleetops_core::{ActorId, TenantId};

use super::change::RbacChange;

/// Key of a role *definition*: roles are unique by (tenant, guard, name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RoleKey {
    tenant_id: TenantId,
    guard: Guard,
    role: Role,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RbacStoreError {
    #[error("role '{0}' is already defined for this tenant and guard")]
    DuplicateRole(String),

    #[error("role '{0}' is not defined for this tenant and guard")]
    UnknownRole(String),

    #[error("rbac store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Default)]
struct StoreState {
    /// Role definitions: permission names bundled by each role.
    roles: HashMap<RoleKey, HashSet<String>>,

    /// Which roles each actor holds, per guard.
    assignments: HashMap<(TenantId, ActorId), HashSet<(Guard, Role)>>,

    /// Directly-granted permissions per actor.
    grants: HashMap<(TenantId, ActorId), HashSet<Permission>>,

    /// Change log, append-only, in mutation order.
    changes: Vec<RbacChange>,
}

/// In-memory role/permission assignment store.
///
/// Tenant- and guard-isolated. Intended for tests/dev and as the reference
/// behavior for a persistent policy source. The check path reads through the
/// [`PermissionResolver`] impl; administrative mutations each append an
/// [`RbacChange`].
///
/// Mutations are idempotent where re-applying would be harmless (re-granting,
/// re-assigning, revoking something absent); a change is recorded only when
/// state actually moved.
#[derive(Debug, Default)]
pub struct InMemoryRbacStore {
    inner: RwLock<StoreState>,
}

impl InMemoryRbacStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, RbacStoreError> {
        self.inner.read().map_err(|_| RbacStoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, RbacStoreError> {
        self.inner.write().map_err(|_| RbacStoreError::Poisoned)
    }

    /// Define a new role and the permission names it bundles.
    pub fn define_role(
        &self,
        tenant_id: TenantId,
        guard: Guard,
        role: Role,
        permissions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<(), RbacStoreError> {
        let mut state = self.write()?;

        let key = RoleKey {
            tenant_id,
            guard: guard.clone(),
            role: role.clone(),
        };
        if state.roles.contains_key(&key) {
            return Err(RbacStoreError::DuplicateRole(role.as_str().to_string()));
        }

        let permissions: HashSet<String> = permissions.into_iter().map(Into::into).collect();
        debug!(%tenant_id, %guard, %role, count = permissions.len(), "role defined");

        state.roles.insert(key, permissions);
        state.changes.push(RbacChange::RoleDefined {
            tenant_id,
            guard,
            role,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Add a permission name to an existing role definition.
    pub fn grant_to_role(
        &self,
        tenant_id: TenantId,
        guard: Guard,
        role: Role,
        permission: impl Into<String>,
    ) -> Result<(), RbacStoreError> {
        let mut state = self.write()?;

        let key = RoleKey {
            tenant_id,
            guard: guard.clone(),
            role: role.clone(),
        };
        let permission = permission.into();
        let inserted = state
            .roles
            .get_mut(&key)
            .ok_or_else(|| RbacStoreError::UnknownRole(role.as_str().to_string()))?
            .insert(permission.clone());

        if inserted {
            debug!(%tenant_id, %guard, %role, %permission, "permission granted to role");
            state.changes.push(RbacChange::PermissionGrantedToRole {
                tenant_id,
                guard,
                role,
                permission,
                occurred_at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Remove a permission name from an existing role definition.
    pub fn revoke_from_role(
        &self,
        tenant_id: TenantId,
        guard: Guard,
        role: Role,
        permission: &str,
    ) -> Result<(), RbacStoreError> {
        let mut state = self.write()?;

        let key = RoleKey {
            tenant_id,
            guard: guard.clone(),
            role: role.clone(),
        };
        let removed = state
            .roles
            .get_mut(&key)
            .ok_or_else(|| RbacStoreError::UnknownRole(role.as_str().to_string()))?
            .remove(permission);

        if removed {
            debug!(%tenant_id, %guard, %role, %permission, "permission revoked from role");
            state.changes.push(RbacChange::PermissionRevokedFromRole {
                tenant_id,
                guard,
                role,
                permission: permission.to_string(),
                occurred_at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Assign a defined role to an actor within a tenant.
    pub fn assign_role(
        &self,
        tenant_id: TenantId,
        actor_id: ActorId,
        guard: Guard,
        role: Role,
    ) -> Result<(), RbacStoreError> {
        let mut state = self.write()?;

        let key = RoleKey {
            tenant_id,
            guard: guard.clone(),
            role: role.clone(),
        };
        if !state.roles.contains_key(&key) {
            return Err(RbacStoreError::UnknownRole(role.as_str().to_string()));
        }

        let inserted = state
            .assignments
            .entry((tenant_id, actor_id))
            .or_default()
            .insert((guard.clone(), role.clone()));

        if inserted {
            debug!(%tenant_id, %actor_id, %guard, %role, "role assigned");
            state.changes.push(RbacChange::RoleAssigned {
                tenant_id,
                actor_id,
                guard,
                role,
                occurred_at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Remove a role assignment from an actor.
    pub fn unassign_role(
        &self,
        tenant_id: TenantId,
        actor_id: ActorId,
        guard: Guard,
        role: Role,
    ) -> Result<(), RbacStoreError> {
        let mut state = self.write()?;

        let removed = state
            .assignments
            .get_mut(&(tenant_id, actor_id))
            .is_some_and(|assigned| assigned.remove(&(guard.clone(), role.clone())));

        if removed {
            debug!(%tenant_id, %actor_id, %guard, %role, "role unassigned");
            state.changes.push(RbacChange::RoleUnassigned {
                tenant_id,
                actor_id,
                guard,
                role,
                occurred_at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Grant a permission directly to an actor, bypassing roles.
    pub fn grant_direct(
        &self,
        tenant_id: TenantId,
        actor_id: ActorId,
        permission: Permission,
    ) -> Result<(), RbacStoreError> {
        let mut state = self.write()?;

        let inserted = state
            .grants
            .entry((tenant_id, actor_id))
            .or_default()
            .insert(permission.clone());

        if inserted {
            debug!(%tenant_id, %actor_id, %permission, "permission granted");
            state.changes.push(RbacChange::PermissionGranted {
                tenant_id,
                actor_id,
                permission,
                occurred_at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Revoke a directly-granted permission from an actor.
    pub fn revoke_direct(
        &self,
        tenant_id: TenantId,
        actor_id: ActorId,
        permission: &Permission,
    ) -> Result<(), RbacStoreError> {
        let mut state = self.write()?;

        let removed = state
            .grants
            .get_mut(&(tenant_id, actor_id))
            .is_some_and(|granted| granted.remove(permission));

        if removed {
            debug!(%tenant_id, %actor_id, %permission, "permission revoked");
            state.changes.push(RbacChange::PermissionRevoked {
                tenant_id,
                actor_id,
                permission: permission.clone(),
                occurred_at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Permission names bundled by a role definition, sorted.
    pub fn role_permissions(
        &self,
        tenant_id: TenantId,
        guard: &Guard,
        role: &Role,
    ) -> Result<Vec<String>, RbacStoreError> {
        let state = self.read()?;

        let key = RoleKey {
            tenant_id,
            guard: guard.clone(),
            role: role.clone(),
        };
        let permissions = state
            .roles
            .get(&key)
            .ok_or_else(|| RbacStoreError::UnknownRole(role.as_str().to_string()))?;

        let mut out: Vec<String> = permissions.iter().cloned().collect();
        out.sort();
        Ok(out)
    }

    /// Every permission name the actor effectively holds under its guard
    /// (direct grants ∪ role grants), sorted and deduplicated.
    pub fn effective_permissions(&self, actor: &Actor) -> Result<Vec<String>, RbacStoreError> {
        let state = self.read()?;
        let key = (actor.tenant_id, actor.actor_id);

        let mut effective: HashSet<String> = HashSet::new();

        if let Some(granted) = state.grants.get(&key) {
            for permission in granted {
                if permission.guard() == &actor.guard {
                    effective.insert(permission.name().to_string());
                }
            }
        }

        if let Some(assigned) = state.assignments.get(&key) {
            for (guard, role) in assigned {
                if guard != &actor.guard {
                    continue;
                }
                let role_key = RoleKey {
                    tenant_id: actor.tenant_id,
                    guard: guard.clone(),
                    role: role.clone(),
                };
                if let Some(permissions) = state.roles.get(&role_key) {
                    effective.extend(permissions.iter().cloned());
                }
            }
        }

        let mut out: Vec<String> = effective.into_iter().collect();
        out.sort();
        Ok(out)
    }

    /// Snapshot of the change log, in mutation order.
    pub fn changes(&self) -> Result<Vec<RbacChange>, RbacStoreError> {
        Ok(self.read()?.changes.clone())
    }

    /// Take the change log, leaving it empty (for consumers that dispatch).
    pub fn drain_changes(&self) -> Result<Vec<RbacChange>, RbacStoreError> {
        Ok(std::mem::take(&mut self.write()?.changes))
    }
}

impl PermissionResolver for InMemoryRbacStore {
    /// Union of direct grants and one level of role grants, scoped to the
    /// actor's tenant and guard. A poisoned lock is a resolution failure,
    /// never a deny.
    fn has_permission(
        &self,
        actor: &Actor,
        permission: &Permission,
    ) -> Result<bool, ResolveError> {
        let state = self
            .inner
            .read()
            .map_err(|_| ResolveError::unavailable("rbac store lock poisoned"))?;

        let key = (actor.tenant_id, actor.actor_id);

        if let Some(granted) = state.grants.get(&key) {
            if granted.contains(permission) {
                return Ok(true);
            }
        }

        if let Some(assigned) = state.assignments.get(&key) {
            for (guard, role) in assigned {
                if guard != permission.guard() {
                    continue;
                }
                let role_key = RoleKey {
                    tenant_id: actor.tenant_id,
                    guard: guard.clone(),
                    role: role.clone(),
                };
                if let Some(permissions) = state.roles.get(&role_key) {
                    if permissions.contains(permission.name()) {
                        return Ok(true);
                    }
                }
            }
        }

        Ok(false)
    }
}
