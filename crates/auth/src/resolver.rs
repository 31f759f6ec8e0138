use std::sync::Arc;

use thiserror::Error;

use crate::{Actor, Permission};

/// Failure to determine an actor's permission set.
///
/// This is *not* a deny. The checker propagates it so callers can tell
/// "denied" from "undetermined".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The assignment store could not be reached or read.
    #[error("permission store unavailable: {0}")]
    Unavailable(String),
}

impl ResolveError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Capability contract against the role/permission assignment store.
///
/// `has_permission` answers whether `actor` holds `permission` within the
/// actor's tenant and guard, unioning directly-granted permissions with the
/// permissions of every role assigned to the actor. Resolution is transitive
/// through exactly one level: roles bundle permissions, never other roles.
///
/// Implementations must report a broken store as an error, never as `false`.
pub trait PermissionResolver {
    fn has_permission(&self, actor: &Actor, permission: &Permission)
    -> Result<bool, ResolveError>;
}

impl<R> PermissionResolver for Arc<R>
where
    R: PermissionResolver + ?Sized,
{
    fn has_permission(
        &self,
        actor: &Actor,
        permission: &Permission,
    ) -> Result<bool, ResolveError> {
        (**self).has_permission(actor, permission)
    }
}
