//! Static role-permission matrix
//!
//! One boolean per (role, resource, action). The table is a fixed-size array
//! indexed by the enums, so adding a role, resource or action without filling
//! in its grants fails to compile.

use super::resolver::EffectivePermissions;
use super::types::{Action, Resource, Role};

type Grants = [bool; Action::COUNT];

const CRUD: Grants = [true, true, true, true];
const READ: Grants = [true, false, false, false];
const READ_UPDATE: Grants = [true, false, true, false];
const READ_CREATE_UPDATE: Grants = [true, true, true, false];
const NONE: Grants = [false, false, false, false];

// Columns follow `Resource::ALL`:
// users, products, categories, brands, orders, settings, locations, shipping
static ROWS: [EffectivePermissions; Role::COUNT] = [
    // ADMIN
    EffectivePermissions::from_table([CRUD, CRUD, CRUD, CRUD, CRUD, CRUD, CRUD, CRUD]),
    // EDITOR
    EffectivePermissions::from_table([NONE, CRUD, CRUD, CRUD, READ, NONE, READ, READ]),
    // SALES
    EffectivePermissions::from_table([
        NONE,
        READ,
        READ,
        READ,
        READ_CREATE_UPDATE,
        NONE,
        READ,
        READ_CREATE_UPDATE,
    ]),
    // SHIPPER
    EffectivePermissions::from_table([NONE, READ, NONE, NONE, READ_UPDATE, NONE, NONE, READ]),
];

/// Build-time grant table for every back-office role
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Grants held by a single role
    pub fn row(role: Role) -> &'static EffectivePermissions {
        &ROWS[role.index()]
    }

    /// Whether `role` alone grants `action` on `resource`
    pub fn grant(role: Role, resource: Resource, action: Action) -> bool {
        Self::row(role).allows(resource, action)
    }
}
