//! Black-box tests: the checker wired to the reference store, exercising the
//! full action→permission contract the way an API layer would.

use std::sync::Arc;

use fleetops_auth::{
    Action, Actor, AuthzError, Decision, Guard, Permission, PermissionResolver, ResolveError,
    Resource, Role, authorize, catalog, require,
};
use fleetops_core::{ActorId, TenantId};
use fleetops_infra::InMemoryRbacStore;

fn fresh_actor(tenant_id: TenantId) -> Actor {
    // Idempotent; lets RUST_LOG surface store/checker activity during runs.
    fleetops_observability::init();
    Actor::new(ActorId::new(), tenant_id)
}

#[test]
fn warehouse_role_grants_inventory_adjust_with_zero_direct_permissions() {
    let store = InMemoryRbacStore::new();
    let tenant_id = TenantId::new();
    let actor = fresh_actor(tenant_id);

    store
        .define_role(
            tenant_id,
            Guard::default(),
            Role::new("warehouse"),
            ["inventory.view", "inventory.adjust", "inventory.transfer"],
        )
        .unwrap();
    store
        .assign_role(tenant_id, actor.actor_id, Guard::default(), Role::new("warehouse"))
        .unwrap();

    assert_eq!(
        authorize(&store, &actor, Action::Adjust, Resource::Inventory).unwrap(),
        Decision::Allow
    );
    assert_eq!(
        authorize(&store, &actor, Action::Delete, Resource::Inventory).unwrap(),
        Decision::Deny
    );
}

#[test]
fn each_catalog_permission_allows_exactly_its_own_pairs() {
    let store = InMemoryRbacStore::new();
    let tenant_id = TenantId::new();

    for (resource, action, name) in catalog::entries() {
        let actor = fresh_actor(tenant_id);
        store
            .grant_direct(tenant_id, actor.actor_id, Permission::new(name))
            .unwrap();

        assert_eq!(
            authorize(&store, &actor, action, resource).unwrap(),
            Decision::Allow,
            "{name} should allow {resource}/{action}"
        );

        for (other_resource, other_action, other_name) in catalog::entries() {
            if other_name == name {
                continue;
            }
            assert_eq!(
                authorize(&store, &actor, other_action, other_resource).unwrap(),
                Decision::Deny,
                "{name} should not allow {other_resource}/{other_action}"
            );
        }
    }
}

#[test]
fn revoking_a_grant_denies_subsequent_checks() {
    let store = InMemoryRbacStore::new();
    let tenant_id = TenantId::new();
    let actor = fresh_actor(tenant_id);
    let permission = Permission::new("orders.cancel");

    store
        .grant_direct(tenant_id, actor.actor_id, permission.clone())
        .unwrap();
    assert_eq!(
        authorize(&store, &actor, Action::Cancel, Resource::Orders).unwrap(),
        Decision::Allow
    );

    store
        .revoke_direct(tenant_id, actor.actor_id, &permission)
        .unwrap();
    assert_eq!(
        authorize(&store, &actor, Action::Cancel, Resource::Orders).unwrap(),
        Decision::Deny
    );
}

#[test]
fn grants_in_one_tenant_never_satisfy_checks_in_another() {
    let store = InMemoryRbacStore::new();
    let home = TenantId::new();
    let other = TenantId::new();
    let actor_id = ActorId::new();

    store
        .define_role(home, Guard::default(), Role::new("manager"), ["customers.update"])
        .unwrap();
    store
        .assign_role(home, actor_id, Guard::default(), Role::new("manager"))
        .unwrap();

    let at_home = Actor::new(actor_id, home);
    let elsewhere = Actor::new(actor_id, other);

    assert_eq!(
        authorize(&store, &at_home, Action::Update, Resource::Customers).unwrap(),
        Decision::Allow
    );
    assert_eq!(
        authorize(&store, &elsewhere, Action::Update, Resource::Customers).unwrap(),
        Decision::Deny
    );
}

#[test]
fn shared_store_behind_arc_resolves_like_the_store_itself() {
    let store = Arc::new(InMemoryRbacStore::new());
    let tenant_id = TenantId::new();
    let actor = fresh_actor(tenant_id);

    store
        .grant_direct(tenant_id, actor.actor_id, Permission::new("invoices.view"))
        .unwrap();

    assert_eq!(
        authorize(&store, &actor, Action::ViewAny, Resource::Invoices).unwrap(),
        Decision::Allow
    );
    assert!(require(&store, &actor, Action::View, Resource::Invoices).is_ok());

    let err = require(&store, &actor, Action::Delete, Resource::Invoices).unwrap_err();
    assert_eq!(err, AuthzError::Forbidden("invoices.delete".to_string()));
}

#[test]
fn an_unreachable_store_fails_the_check_instead_of_denying() {
    struct OfflineStore;

    impl PermissionResolver for OfflineStore {
        fn has_permission(
            &self,
            _actor: &Actor,
            _permission: &Permission,
        ) -> Result<bool, ResolveError> {
            Err(ResolveError::unavailable("connection refused"))
        }
    }

    let actor = fresh_actor(TenantId::new());
    let err = authorize(&OfflineStore, &actor, Action::View, Resource::Customers).unwrap_err();
    assert!(matches!(err, AuthzError::Resolution(_)));
}
