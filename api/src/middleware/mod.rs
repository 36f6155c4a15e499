pub mod auth;
pub mod error_handler;
pub mod guard;

pub use auth::{encode_token, verify_token, Claims, JwtAuth};
pub use error_handler::PolicyErrorInterceptor;
pub use guard::{AuthGuard, RegistryGuardExt};
