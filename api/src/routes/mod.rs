//! Route handlers and their authorization metadata
//!
//! - Health check
//! - User registration, lookup, listing, update and deletion

pub mod health;
pub mod users;

use ks_core::auth::{roles, AuthorizationRegistry, RouteAuth};

/// Stable identifiers the authorization registry is keyed by
pub mod handler_ids {
    pub const HEALTH: &str = "health";
    pub const USERS_ME: &str = "users.me";
    pub const USERS_LIST: &str = "users.list";
    pub const USERS_GET: &str = "users.get";
    pub const USERS_CREATE: &str = "users.create";
    pub const USERS_UPDATE: &str = "users.update";
    pub const USERS_DELETE: &str = "users.delete";
}

/// Authorization metadata for every route the API serves
pub fn authorization_registry() -> AuthorizationRegistry {
    AuthorizationRegistry::new()
        .register(handler_ids::HEALTH, RouteAuth::public())
        .register(handler_ids::USERS_ME, RouteAuth::public())
        .register(handler_ids::USERS_LIST, RouteAuth::roles([roles::ADMIN]))
        .register(handler_ids::USERS_GET, RouteAuth::authenticated())
        .register(handler_ids::USERS_CREATE, RouteAuth::public())
        .register(handler_ids::USERS_UPDATE, RouteAuth::authenticated())
        .register(handler_ids::USERS_DELETE, RouteAuth::roles([roles::ADMIN]))
}
