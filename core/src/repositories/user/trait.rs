//! User repository trait defining the interface to the policy-enforcing
//! persistence engine.
//!
//! Every operation receives the acting principal (`None` for anonymous
//! requests). The engine evaluates its row policies against that principal
//! and reports refusals as [`PersistenceError`]s with reason
//! `rejected-by-policy`; rows that do not exist, are soft-deleted, or are
//! invisible to the principal are reported as `not-found`.

use async_trait::async_trait;
use uuid::Uuid;

use ks_shared::PaginationRequest;

use crate::auth::AuthenticatedUser;
use crate::domain::entities::user::User;
use crate::errors::PersistenceError;

/// Repository trait for User aggregate persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load one user visible to `actor`
    ///
    /// # Returns
    /// * `Ok(User)` - User found and visible
    /// * `Err(PersistenceError)` with reason `not-found` - missing, deleted or hidden
    async fn find_by_id(
        &self,
        actor: Option<&AuthenticatedUser>,
        id: Uuid,
    ) -> Result<User, PersistenceError>;

    /// List the users visible to `actor`, ordered by creation time.
    ///
    /// Returns the requested window and the total number of visible rows,
    /// both computed from the same `page`.
    async fn list(
        &self,
        actor: Option<&AuthenticatedUser>,
        page: &PaginationRequest,
    ) -> Result<(Vec<User>, u64), PersistenceError>;

    /// Insert or update a user's row
    async fn save(
        &self,
        actor: Option<&AuthenticatedUser>,
        user: &User,
    ) -> Result<(), PersistenceError>;
}
