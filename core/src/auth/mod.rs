//! Principal model and declarative authorization metadata.

pub mod metadata;
pub mod principal;

pub use metadata::{authorize, roles, AuthorizationDecision, AuthorizationRegistry, RouteAuth};
pub use principal::AuthenticatedUser;
