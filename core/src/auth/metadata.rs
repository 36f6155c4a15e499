//! Declarative authorization metadata for request handlers.
//!
//! Handlers are identified by a stable string id (`"users.list"`). The
//! [`AuthorizationRegistry`] maps each id to a [`RouteAuth`] at registration
//! time; the transport guard reads it and applies [`authorize`].

use std::collections::{BTreeSet, HashMap};

use super::principal::AuthenticatedUser;

/// Well-known role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
}

/// Authorization requirements attached to one handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteAuth {
    /// Skip every authentication and role check
    pub public: bool,
    /// Principal must hold at least one of these; empty means any
    /// authenticated principal is accepted
    pub required_roles: BTreeSet<String>,
}

impl RouteAuth {
    /// Reachable without a principal
    pub fn public() -> Self {
        Self {
            public: true,
            required_roles: BTreeSet::new(),
        }
    }

    /// Any authenticated principal
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Authenticated principal holding at least one of `roles`
    pub fn roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            public: false,
            required_roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of checking a principal against a [`RouteAuth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow,
    /// No principal was attached to the request
    Unauthenticated,
    /// A principal was attached but lacks every required role
    Forbidden,
}

impl AuthorizationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthorizationDecision::Allow)
    }
}

/// Decide whether `principal` may reach a handler guarded by `route`
pub fn authorize(route: &RouteAuth, principal: Option<&AuthenticatedUser>) -> AuthorizationDecision {
    if route.public {
        return AuthorizationDecision::Allow;
    }
    let Some(principal) = principal else {
        return AuthorizationDecision::Unauthenticated;
    };
    if route.required_roles.is_empty() || principal.has_any_role(&route.required_roles) {
        AuthorizationDecision::Allow
    } else {
        AuthorizationDecision::Forbidden
    }
}

/// Handler id to [`RouteAuth`] mapping
#[derive(Debug, Clone, Default)]
pub struct AuthorizationRegistry {
    routes: HashMap<&'static str, RouteAuth>,
}

impl AuthorizationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `auth` to `handler_id`, replacing any earlier entry
    pub fn register(mut self, handler_id: &'static str, auth: RouteAuth) -> Self {
        if self.routes.insert(handler_id, auth).is_some() {
            tracing::warn!(handler_id, "authorization metadata replaced");
        }
        self
    }

    pub fn get(&self, handler_id: &str) -> Option<&RouteAuth> {
        self.routes.get(handler_id)
    }

    /// Metadata for `handler_id`; unregistered handlers require authentication
    pub fn resolve(&self, handler_id: &str) -> RouteAuth {
        self.get(handler_id).cloned().unwrap_or_else(RouteAuth::authenticated)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
