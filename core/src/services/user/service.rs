//! User service: CRUD use cases over the policy-enforcing repository

use std::sync::Arc;
use uuid::Uuid;

use ks_shared::{Page, PaginationRequest};

use crate::auth::AuthenticatedUser;
use crate::domain::aggregate::Aggregate;
use crate::domain::entities::user::{User, UserEvent};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::transaction::{EventPublisher, TransactionCoordinator};

/// User service orchestrating repository writes and event delivery
pub struct UserService<R, P>
where
    R: UserRepository,
    P: EventPublisher<UserEvent>,
{
    /// Policy-enforcing user repository
    repository: Arc<R>,
    /// Delivers events once a write has been accepted
    coordinator: TransactionCoordinator<P>,
}

impl<R, P> UserService<R, P>
where
    R: UserRepository,
    P: EventPublisher<UserEvent>,
{
    /// Create a new user service
    ///
    /// # Arguments
    ///
    /// * `repository` - Policy-enforcing persistence for users
    /// * `publisher` - Destination for committed user events
    pub fn new(repository: Arc<R>, publisher: Arc<P>) -> Self {
        Self {
            repository,
            coordinator: TransactionCoordinator::new(publisher),
        }
    }

    /// Register a new user
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        email: &str,
        display_name: &str,
    ) -> DomainResult<User> {
        let mut user = User::register(email, display_name)?;
        self.persist(actor, &mut user).await?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    /// Load a single user
    pub async fn get(&self, actor: Option<&AuthenticatedUser>, id: Uuid) -> DomainResult<User> {
        Ok(self.repository.find_by_id(actor, id).await?)
    }

    /// List users visible to `actor`
    pub async fn list(
        &self,
        actor: Option<&AuthenticatedUser>,
        page: &PaginationRequest,
    ) -> DomainResult<Page<User>> {
        page.validate().map_err(|e| DomainError::Validation {
            message: e.to_string(),
        })?;
        let (items, total) = self.repository.list(actor, page).await?;
        Ok(Page::new(items, total, page))
    }

    /// Apply a partial update in a single write.
    ///
    /// Both changes land on the same aggregate; if the repository refuses the
    /// write, neither is stored and no event is published. An update that
    /// changes nothing skips the write.
    pub async fn update(
        &self,
        actor: Option<&AuthenticatedUser>,
        id: Uuid,
        display_name: Option<&str>,
        grant_role: Option<&str>,
    ) -> DomainResult<User> {
        let mut user = self.repository.find_by_id(actor, id).await?;
        if let Some(display_name) = display_name {
            user.rename(display_name)?;
        }
        if let Some(role) = grant_role {
            user.grant_role(role)?;
        }

        if !user.pending_events().is_empty() {
            self.persist(actor, &mut user).await?;
        }
        Ok(user)
    }

    /// Change a user's display name
    pub async fn rename(
        &self,
        actor: Option<&AuthenticatedUser>,
        id: Uuid,
        display_name: &str,
    ) -> DomainResult<User> {
        self.update(actor, id, Some(display_name), None).await
    }

    /// Grant a role to a user
    pub async fn grant_role(
        &self,
        actor: Option<&AuthenticatedUser>,
        id: Uuid,
        role: &str,
    ) -> DomainResult<User> {
        self.update(actor, id, None, Some(role)).await
    }

    /// Soft delete a user
    pub async fn delete(&self, actor: Option<&AuthenticatedUser>, id: Uuid) -> DomainResult<()> {
        let mut user = self.repository.find_by_id(actor, id).await?;
        user.delete();
        self.persist(actor, &mut user).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Write `user` and deliver its events, or discard them if the write fails
    async fn persist(&self, actor: Option<&AuthenticatedUser>, user: &mut User) -> DomainResult<()> {
        if let Err(error) = self.repository.save(actor, user).await {
            self.coordinator.rollback(user);
            return Err(error.into());
        }

        // The row is already written; a delivery failure must not fail the request.
        if let Err(error) = self.coordinator.commit(user).await {
            tracing::error!(user_id = %user.id(), %error, "failed to publish user events");
        }
        Ok(())
    }
}
