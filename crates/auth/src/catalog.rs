//! Static action→permission catalog.
//!
//! Every protected resource family maps each of its actions to exactly one
//! permission name of the form `"<resource_plural>.<verb>"`. The string
//! values are a compatibility contract shared with the assignment store and
//! with seeded role definitions; they are spelled out literally here rather
//! than assembled at call sites.

use serde::{Deserialize, Serialize};

/// Protected resource families exposed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Customers,
    Inventory,
    Invoices,
    Orders,
    Payments,
    Products,
    Tenants,
    Users,
    Vehicles,
    Permissions,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Customers,
        Resource::Inventory,
        Resource::Invoices,
        Resource::Orders,
        Resource::Payments,
        Resource::Products,
        Resource::Tenants,
        Resource::Users,
        Resource::Vehicles,
        Resource::Permissions,
    ];

    /// Plural segment used in permission names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Customers => "customers",
            Resource::Inventory => "inventory",
            Resource::Invoices => "invoices",
            Resource::Orders => "orders",
            Resource::Payments => "payments",
            Resource::Products => "products",
            Resource::Tenants => "tenants",
            Resource::Users => "users",
            Resource::Vehicles => "vehicles",
            Resource::Permissions => "permissions",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions checkable against a resource.
///
/// `ViewAny` (listing) and `View` (single record) are distinct actions that
/// deliberately share one permission name per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    ViewAny,
    View,
    Create,
    Update,
    Delete,
    Restore,
    Cancel,
    Complete,
    Refund,
    Adjust,
    Transfer,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::ViewAny,
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Restore,
        Action::Cancel,
        Action::Complete,
        Action::Refund,
        Action::Adjust,
        Action::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewAny => "viewAny",
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Restore => "restore",
            Action::Cancel => "cancel",
            Action::Complete => "complete",
            Action::Refund => "refund",
            Action::Adjust => "adjust",
            Action::Transfer => "transfer",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission name a given `(resource, action)` pair checks against.
///
/// Returns `None` for pairs the application does not define (e.g. `refund`
/// on customers, or any mutation of the read-only permissions resource).
pub fn permission_name(resource: Resource, action: Action) -> Option<&'static str> {
    use Action::*;
    use Resource::*;

    match (resource, action) {
        (Customers, ViewAny | View) => Some("customers.view"),
        (Customers, Create) => Some("customers.create"),
        (Customers, Update) => Some("customers.update"),
        (Customers, Delete) => Some("customers.delete"),
        (Customers, Restore) => Some("customers.restore"),

        (Inventory, ViewAny | View) => Some("inventory.view"),
        (Inventory, Create) => Some("inventory.create"),
        (Inventory, Update) => Some("inventory.update"),
        (Inventory, Delete) => Some("inventory.delete"),
        (Inventory, Restore) => Some("inventory.restore"),
        (Inventory, Adjust) => Some("inventory.adjust"),
        (Inventory, Transfer) => Some("inventory.transfer"),

        (Invoices, ViewAny | View) => Some("invoices.view"),
        (Invoices, Create) => Some("invoices.create"),
        (Invoices, Update) => Some("invoices.update"),
        (Invoices, Delete) => Some("invoices.delete"),
        (Invoices, Restore) => Some("invoices.restore"),

        (Orders, ViewAny | View) => Some("orders.view"),
        (Orders, Create) => Some("orders.create"),
        (Orders, Update) => Some("orders.update"),
        (Orders, Delete) => Some("orders.delete"),
        (Orders, Restore) => Some("orders.restore"),
        (Orders, Cancel) => Some("orders.cancel"),
        (Orders, Complete) => Some("orders.complete"),

        (Payments, ViewAny | View) => Some("payments.view"),
        (Payments, Create) => Some("payments.create"),
        (Payments, Update) => Some("payments.update"),
        (Payments, Delete) => Some("payments.delete"),
        (Payments, Restore) => Some("payments.restore"),
        (Payments, Complete) => Some("payments.complete"),
        (Payments, Refund) => Some("payments.refund"),
        (Payments, Cancel) => Some("payments.cancel"),

        (Products, ViewAny | View) => Some("products.view"),
        (Products, Create) => Some("products.create"),
        (Products, Update) => Some("products.update"),
        (Products, Delete) => Some("products.delete"),
        (Products, Restore) => Some("products.restore"),

        (Tenants, ViewAny | View) => Some("tenants.view"),
        (Tenants, Create) => Some("tenants.create"),
        (Tenants, Update) => Some("tenants.update"),
        (Tenants, Delete) => Some("tenants.delete"),
        (Tenants, Restore) => Some("tenants.restore"),

        (Users, ViewAny | View) => Some("users.view"),
        (Users, Create) => Some("users.create"),
        (Users, Update) => Some("users.update"),
        (Users, Delete) => Some("users.delete"),
        (Users, Restore) => Some("users.restore"),

        (Vehicles, ViewAny | View) => Some("vehicles.view"),
        (Vehicles, Create) => Some("vehicles.create"),
        (Vehicles, Update) => Some("vehicles.update"),
        (Vehicles, Delete) => Some("vehicles.delete"),
        (Vehicles, Restore) => Some("vehicles.restore"),

        // Permissions are administered out of band; the UI only lists them.
        (Permissions, ViewAny | View) => Some("permissions.view"),

        _ => None,
    }
}

/// Every defined `(resource, action)` pair with its permission name.
///
/// Derived from [`permission_name`]; useful for seeding stores and for
/// exhaustive test sweeps.
pub fn entries() -> impl Iterator<Item = (Resource, Action, &'static str)> {
    Resource::ALL.into_iter().flat_map(|resource| {
        Action::ALL
            .into_iter()
            .filter_map(move |action| permission_name(resource, action).map(|name| (resource, action, name)))
    })
}
