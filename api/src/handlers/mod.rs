pub mod error;

pub use error::{default_error_response, validation_error_response};
