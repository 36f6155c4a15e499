//! Business services containing domain logic and use cases.

pub mod transaction;
pub mod user;

// Re-export commonly used types
pub use transaction::{EventPublisher, TransactionCoordinator};
pub use user::UserService;
