//! The authorization checker.
//!
//! A pure predicate: map `(resource, action)` to a permission name through
//! the catalog, then ask the resolver whether the actor holds it. No IO of
//! its own, no caching (role and permission assignment can change between
//! calls), and deny by default: only an explicit grant allows.

use thiserror::Error;

use crate::catalog::{Action, Resource, permission_name};
use crate::resolver::{PermissionResolver, ResolveError};
use crate::{Actor, Permission};

/// Outcome of an authorization check.
///
/// Failures (unresolvable permission set, unmapped action) are *not*
/// decisions; they surface as [`AuthzError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    /// The caller asked for an action the resource does not define. This is
    /// a programming error at the call site, not a deny.
    #[error("action '{action}' is not defined for resource '{resource}'")]
    UnsupportedAction { resource: Resource, action: Action },

    /// The actor's permission set could not be determined.
    #[error(transparent)]
    Resolution(#[from] ResolveError),
}

/// Authorize `actor` to perform `action` on `resource`.
///
/// - No IO beyond the single resolver call
/// - No panics
/// - No business logic (pure policy check)
///
/// A resolver failure propagates; it is never collapsed into `Deny`.
pub fn authorize<R>(
    resolver: &R,
    actor: &Actor,
    action: Action,
    resource: Resource,
) -> Result<Decision, AuthzError>
where
    R: PermissionResolver + ?Sized,
{
    let Some(name) = permission_name(resource, action) else {
        return Err(AuthzError::UnsupportedAction { resource, action });
    };

    let permission = Permission::with_guard(name, actor.guard.clone());
    if resolver.has_permission(actor, &permission)? {
        Ok(Decision::Allow)
    } else {
        Ok(Decision::Deny)
    }
}

/// Enforce authorization at a call boundary.
///
/// Same check as [`authorize`], but a deny becomes a typed
/// [`AuthzError::Forbidden`] carrying the missing permission name. Intended
/// for request/command handlers that want to bail with `?`.
pub fn require<R>(
    resolver: &R,
    actor: &Actor,
    action: Action,
    resource: Resource,
) -> Result<(), AuthzError>
where
    R: PermissionResolver + ?Sized,
{
    let Some(name) = permission_name(resource, action) else {
        return Err(AuthzError::UnsupportedAction { resource, action });
    };

    let permission = Permission::with_guard(name, actor.guard.clone());
    if resolver.has_permission(actor, &permission)? {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use fleetops_core::{ActorId, TenantId};

    use super::*;
    use crate::Guard;
    use crate::catalog::entries;

    /// Resolver over a fixed permission set, ignoring the actor.
    struct FixedResolver {
        granted: HashSet<Permission>,
    }

    impl FixedResolver {
        fn empty() -> Self {
            Self {
                granted: HashSet::new(),
            }
        }

        fn granting(names: &[&'static str]) -> Self {
            Self {
                granted: names.iter().map(|n| Permission::new(*n)).collect(),
            }
        }
    }

    impl PermissionResolver for FixedResolver {
        fn has_permission(
            &self,
            _actor: &Actor,
            permission: &Permission,
        ) -> Result<bool, ResolveError> {
            Ok(self.granted.contains(permission))
        }
    }

    /// Resolver whose backing store is down.
    struct UnavailableResolver;

    impl PermissionResolver for UnavailableResolver {
        fn has_permission(
            &self,
            _actor: &Actor,
            _permission: &Permission,
        ) -> Result<bool, ResolveError> {
            Err(ResolveError::unavailable("store offline"))
        }
    }

    fn test_actor() -> Actor {
        Actor::new(ActorId::new(), TenantId::new())
    }

    #[test]
    fn empty_permission_set_denies_every_defined_pair() {
        let resolver = FixedResolver::empty();
        let actor = test_actor();

        for (resource, action, _) in entries() {
            let decision = authorize(&resolver, &actor, action, resource).unwrap();
            assert_eq!(decision, Decision::Deny, "{resource}/{action}");
        }
    }

    #[test]
    fn mapped_permission_allows() {
        let resolver = FixedResolver::granting(&["orders.cancel"]);
        let actor = test_actor();

        let decision = authorize(&resolver, &actor, Action::Cancel, Resource::Orders).unwrap();
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn holding_only_orders_view_allows_view_but_not_cancel() {
        let resolver = FixedResolver::granting(&["orders.view"]);
        let actor = test_actor();

        assert_eq!(
            authorize(&resolver, &actor, Action::View, Resource::Orders).unwrap(),
            Decision::Allow
        );
        assert_eq!(
            authorize(&resolver, &actor, Action::ViewAny, Resource::Orders).unwrap(),
            Decision::Allow
        );
        assert_eq!(
            authorize(&resolver, &actor, Action::Cancel, Resource::Orders).unwrap(),
            Decision::Deny
        );
    }

    #[test]
    fn grants_do_not_leak_across_resources() {
        let resolver = FixedResolver::granting(&["customers.delete"]);
        let actor = test_actor();

        assert_eq!(
            authorize(&resolver, &actor, Action::Delete, Resource::Vehicles).unwrap(),
            Decision::Deny
        );
        assert_eq!(
            authorize(&resolver, &actor, Action::Delete, Resource::Customers).unwrap(),
            Decision::Allow
        );
    }

    #[test]
    fn grants_do_not_leak_across_guards() {
        let resolver = FixedResolver::granting(&["payments.refund"]);
        let api_actor = Actor::with_guard(ActorId::new(), TenantId::new(), Guard::new("api"));

        // The fixed grant lives under the default "web" guard.
        assert_eq!(
            authorize(&resolver, &api_actor, Action::Refund, Resource::Payments).unwrap(),
            Decision::Deny
        );
    }

    #[test]
    fn unsupported_action_is_an_error_not_a_decision() {
        let resolver = FixedResolver::granting(&["customers.view"]);
        let actor = test_actor();

        let err = authorize(&resolver, &actor, Action::Refund, Resource::Customers).unwrap_err();
        assert_eq!(
            err,
            AuthzError::UnsupportedAction {
                resource: Resource::Customers,
                action: Action::Refund,
            }
        );

        let err = authorize(&resolver, &actor, Action::Create, Resource::Permissions).unwrap_err();
        assert!(matches!(err, AuthzError::UnsupportedAction { .. }));
    }

    #[test]
    fn resolver_failure_propagates() {
        let actor = test_actor();

        let err = authorize(&UnavailableResolver, &actor, Action::View, Resource::Orders)
            .unwrap_err();
        assert_eq!(
            err,
            AuthzError::Resolution(ResolveError::unavailable("store offline"))
        );
    }

    #[test]
    fn repeated_checks_over_unchanged_grants_agree() {
        let resolver = FixedResolver::granting(&["inventory.adjust"]);
        let actor = test_actor();

        let first = authorize(&resolver, &actor, Action::Adjust, Resource::Inventory).unwrap();
        for _ in 0..10 {
            let again =
                authorize(&resolver, &actor, Action::Adjust, Resource::Inventory).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn require_maps_deny_to_forbidden() {
        let resolver = FixedResolver::granting(&["orders.view"]);
        let actor = test_actor();

        assert!(require(&resolver, &actor, Action::View, Resource::Orders).is_ok());

        let err = require(&resolver, &actor, Action::Cancel, Resource::Orders).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("orders.cancel".to_string()));
    }

    #[test]
    fn require_keeps_resolution_failures_distinct_from_forbidden() {
        let actor = test_actor();

        let err = require(&UnavailableResolver, &actor, Action::View, Resource::Orders)
            .unwrap_err();
        assert!(matches!(err, AuthzError::Resolution(_)));
    }

    mod proptest_tests {
        use proptest::prelude::*;
        use proptest::sample::select;

        use super::*;

        fn catalog_entry() -> impl Strategy<Value = (Resource, Action, &'static str)> {
            let all: Vec<_> = entries().collect();
            select(all)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: granting exactly entry A's permission allows entry B
            /// iff both map to the same permission name; everything else denies.
            #[test]
            fn single_grant_allows_exactly_its_own_name(
                granted in catalog_entry(),
                checked in catalog_entry(),
            ) {
                let (_, _, granted_name) = granted;
                let (resource, action, checked_name) = checked;

                let resolver = FixedResolver::granting(&[granted_name]);
                let actor = test_actor();

                let decision = authorize(&resolver, &actor, action, resource).unwrap();
                let expected = if granted_name == checked_name {
                    Decision::Allow
                } else {
                    Decision::Deny
                };
                prop_assert_eq!(decision, expected);
            }
        }
    }
}
