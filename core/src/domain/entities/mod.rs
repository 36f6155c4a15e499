//! Domain entities representing core business objects.

pub mod user;

// Re-export commonly used types
pub use user::{User, UserEvent, UserRecord, MAX_DISPLAY_NAME_LENGTH};
