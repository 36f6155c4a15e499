//! Access to the authenticated principal from inside handlers.

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use serde_json::Value;
use std::future::{ready, Ready};

use ks_core::auth::AuthenticatedUser;

/// The principal attached by [`JwtAuth`](crate::middleware::JwtAuth), if any.
///
/// Extraction never fails; routes that require a principal say so through
/// their [`AuthGuard`](crate::middleware::AuthGuard).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentUser(pub Option<AuthenticatedUser>);

impl CurrentUser {
    /// One field of the principal, `None` when there is no principal or the
    /// field is absent
    pub fn field(&self, name: &str) -> Option<Value> {
        self.0.as_ref().and_then(|user| user.field(name))
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<AuthenticatedUser> {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(CurrentUser(current_user(req))))
    }
}

pub fn current_user(req: &HttpRequest) -> Option<AuthenticatedUser> {
    req.extensions().get::<AuthenticatedUser>().cloned()
}

pub fn current_user_field(req: &HttpRequest, name: &str) -> Option<Value> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .and_then(|user| user.field(name))
}
