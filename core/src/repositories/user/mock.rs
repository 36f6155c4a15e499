//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use ks_shared::PaginationRequest;

use crate::auth::AuthenticatedUser;
use crate::domain::entities::user::{User, UserRecord};
use crate::errors::PersistenceError;

use super::trait_::UserRepository;

/// Mock user repository with no policies; failures are scripted
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
    save_failure: Arc<RwLock<Option<PersistenceError>>>,
    save_count: Arc<RwLock<usize>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            save_failure: Arc::new(RwLock::new(None)),
            save_count: Arc::new(RwLock::new(0)),
        }
    }

    /// Make every subsequent `save` fail with `error`
    pub async fn fail_saves_with(&self, error: PersistenceError) {
        *self.save_failure.write().await = Some(error);
    }

    pub async fn save_count(&self) -> usize {
        *self.save_count.read().await
    }

    pub async fn insert(&self, user: &User) {
        self.users.write().await.insert(user.to_record().id, user.to_record());
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(
        &self,
        _actor: Option<&AuthenticatedUser>,
        id: Uuid,
    ) -> Result<User, PersistenceError> {
        let users = self.users.read().await;
        users
            .get(&id)
            .filter(|record| record.deleted_at.is_none())
            .cloned()
            .map(User::from_record)
            .ok_or_else(|| PersistenceError::not_found(format!("user {id}")))
    }

    async fn list(
        &self,
        _actor: Option<&AuthenticatedUser>,
        page: &PaginationRequest,
    ) -> Result<(Vec<User>, u64), PersistenceError> {
        let users = self.users.read().await;
        let mut visible: Vec<&UserRecord> =
            users.values().filter(|record| record.deleted_at.is_none()).collect();
        visible.sort_by_key(|record| (record.created_at, record.id));

        let items = page
            .slice(&visible)
            .iter()
            .map(|record| User::from_record((*record).clone()))
            .collect();
        Ok((items, visible.len() as u64))
    }

    async fn save(
        &self,
        _actor: Option<&AuthenticatedUser>,
        user: &User,
    ) -> Result<(), PersistenceError> {
        if let Some(error) = self.save_failure.read().await.clone() {
            return Err(error);
        }
        *self.save_count.write().await += 1;
        self.insert(user).await;
        Ok(())
    }
}
