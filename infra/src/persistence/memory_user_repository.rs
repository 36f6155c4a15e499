//! In-memory, policy-enforcing user store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use ks_core::auth::AuthenticatedUser;
use ks_core::domain::entities::{User, UserRecord};
use ks_core::errors::PersistenceError;
use ks_core::repositories::UserRepository;
use ks_shared::PaginationRequest;

use super::policy;

/// User rows kept in memory, guarded by the user table policies
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    rows: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert rows directly, bypassing policies (bootstrap and fixtures)
    pub async fn seed<I>(&self, records: I)
    where
        I: IntoIterator<Item = UserRecord>,
    {
        let mut rows = self.rows.write().await;
        for record in records {
            rows.insert(record.id, record);
        }
    }

    /// Raw row lookup, bypassing policies
    pub async fn record(&self, id: Uuid) -> Option<UserRecord> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(
        &self,
        actor: Option<&AuthenticatedUser>,
        id: Uuid,
    ) -> Result<User, PersistenceError> {
        let rows = self.rows.read().await;
        match rows.get(&id) {
            Some(row) if policy::can_read(actor, row) => Ok(User::from_record(row.clone())),
            _ => Err(PersistenceError::not_found(format!("user {id}"))),
        }
    }

    async fn list(
        &self,
        actor: Option<&AuthenticatedUser>,
        page: &PaginationRequest,
    ) -> Result<(Vec<User>, u64), PersistenceError> {
        let rows = self.rows.read().await;
        let mut visible: Vec<&UserRecord> =
            rows.values().filter(|row| policy::can_list(actor, row)).collect();
        visible.sort_by_key(|row| (row.created_at, row.id));

        let items = page
            .slice(&visible)
            .iter()
            .map(|row| User::from_record((*row).clone()))
            .collect();
        Ok((items, visible.len() as u64))
    }

    async fn save(
        &self,
        actor: Option<&AuthenticatedUser>,
        user: &User,
    ) -> Result<(), PersistenceError> {
        let next = user.to_record();
        let mut rows = self.rows.write().await;

        let current = rows.get(&next.id);
        if current.is_some_and(|row| row.deleted_at.is_some()) {
            return Err(PersistenceError::not_found(format!("user {}", next.id)));
        }
        policy::check_write(actor, current, &next)?;

        let duplicate = rows
            .values()
            .any(|row| row.id != next.id && row.deleted_at.is_none() && row.email == next.email);
        if duplicate {
            return Err(PersistenceError::unique_violation(format!(
                "email {} already registered",
                next.email
            )));
        }

        tracing::debug!(user_id = %next.id, "user row written");
        rows.insert(next.id, next);
        Ok(())
    }
}
