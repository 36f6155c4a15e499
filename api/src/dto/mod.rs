pub mod error;
pub mod pagination;
pub mod users;

pub use error::{ErrorResponse, ErrorResponseExt};
pub use pagination::PaginationQuery;
pub use users::{RegisterUserRequest, UpdateUserRequest, UserResponse};
