//! Infrastructure layer: reference role/permission assignment store.
//!
//! The check path (`fleetops-auth`) stays storage-agnostic; this crate
//! supplies the store it resolves against, plus the administrative flows
//! that create/update roles and grants.

pub mod rbac;

pub use rbac::{InMemoryRbacStore, RbacChange, RbacStoreError};
