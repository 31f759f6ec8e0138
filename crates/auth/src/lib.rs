//! `fleetops-auth` — pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it defines
//! the vocabulary of an authorization decision (actors, guards, permissions,
//! roles), the static action→permission catalog, and the checker itself.
//! Resolving which permissions an actor actually holds is delegated to a
//! [`PermissionResolver`] supplied by the caller.

pub mod actor;
pub mod authorize;
pub mod catalog;
pub mod permissions;
pub mod resolver;
pub mod roles;

pub use actor::Actor;
pub use authorize::{AuthzError, Decision, authorize, require};
pub use catalog::{Action, Resource, permission_name};
pub use permissions::{Guard, Permission};
pub use resolver::{PermissionResolver, ResolveError};
pub use roles::Role;
