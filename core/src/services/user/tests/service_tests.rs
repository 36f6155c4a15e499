//! Unit tests for the user service

use std::sync::Arc;
use uuid::Uuid;

use ks_shared::PaginationRequest;

use crate::auth::AuthenticatedUser;
use crate::domain::aggregate::Aggregate;
use crate::errors::{DomainError, PersistenceError};
use crate::repositories::MockUserRepository;
use crate::services::user::UserService;

use super::mocks::{FailingPublisher, RecordingPublisher};

fn service() -> (
    UserService<MockUserRepository, RecordingPublisher>,
    Arc<MockUserRepository>,
    Arc<RecordingPublisher>,
) {
    let repository = Arc::new(MockUserRepository::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let service = UserService::new(Arc::clone(&repository), Arc::clone(&publisher));
    (service, repository, publisher)
}

#[tokio::test]
async fn test_register_persists_and_publishes() {
    let (service, repository, publisher) = service();

    let user = service.register(None, "Ada@Example.com", "Ada").await.unwrap();

    assert_eq!(user.email(), "ada@example.com");
    assert!(user.pending_events().is_empty());
    assert_eq!(publisher.names(), vec!["user.registered"]);
    assert_eq!(repository.save_count().await, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_email_without_writing() {
    let (service, repository, publisher) = service();

    let err = service.register(None, "not-an-email", "Ada").await.unwrap_err();

    assert!(matches!(err, DomainError::Validation { .. }));
    assert_eq!(repository.save_count().await, 0);
    assert!(publisher.names().is_empty());
}

#[tokio::test]
async fn test_policy_rejection_discards_events() {
    let (service, repository, publisher) = service();
    let actor = AuthenticatedUser::new("someone-else");

    let user = service.register(None, "ada@example.com", "Ada").await.unwrap();
    repository
        .fail_saves_with(PersistenceError::rejected_by_policy("owner_only"))
        .await;

    let err = service.rename(Some(&actor), user.id(), "Eve").await.unwrap_err();

    assert!(err.as_persistence().is_some_and(|e| e.is_policy_rejection()));
    assert_eq!(publisher.names(), vec!["user.registered"]);
    let stored = service.get(None, user.id()).await.unwrap();
    assert_eq!(stored.display_name(), "Ada");
}

#[tokio::test]
async fn test_get_missing_user_surfaces_not_found() {
    let (service, _, _) = service();
    let err = service.get(None, Uuid::new_v4()).await.unwrap_err();
    assert!(err.as_persistence().is_some_and(|e| e.is_not_found()));
}

#[tokio::test]
async fn test_list_pairs_items_with_meta() {
    let (service, _, _) = service();
    for n in 0..5 {
        service
            .register(None, &format!("user{n}@example.com"), &format!("User {n}"))
            .await
            .unwrap();
    }

    let page = service.list(None, &PaginationRequest::new(2, 2)).await.unwrap();

    assert_eq!(page.count(), 2);
    assert_eq!(page.pagination.total(), 5);
    assert_eq!(page.pagination.offset(), 2);
    assert!(page.pagination.has_more());

    let last = service.list(None, &PaginationRequest::new(2, 4)).await.unwrap();
    assert_eq!(last.count(), 1);
    assert!(!last.pagination.has_more());
}

#[tokio::test]
async fn test_list_rejects_out_of_range_limit() {
    let (service, _, _) = service();
    let err = service
        .list(None, &PaginationRequest { limit: 0, offset: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_delete_soft_deletes_and_hides_user() {
    let (service, _, publisher) = service();
    let user = service.register(None, "ada@example.com", "Ada").await.unwrap();

    service.delete(None, user.id()).await.unwrap();

    assert_eq!(publisher.names(), vec!["user.registered", "user.deleted"]);
    assert!(service
        .get(None, user.id())
        .await
        .unwrap_err()
        .as_persistence()
        .is_some_and(|e| e.is_not_found()));
}

#[tokio::test]
async fn test_grant_existing_role_skips_write() {
    let (service, repository, publisher) = service();
    let user = service.register(None, "ada@example.com", "Ada").await.unwrap();

    service.grant_role(None, user.id(), "admin").await.unwrap();
    service.grant_role(None, user.id(), "admin").await.unwrap();

    assert_eq!(repository.save_count().await, 2);
    assert_eq!(publisher.names(), vec!["user.registered", "user.role_granted"]);
}

#[tokio::test]
async fn test_publish_failure_does_not_fail_committed_write() {
    let repository = Arc::new(MockUserRepository::new());
    let service = UserService::new(Arc::clone(&repository), Arc::new(FailingPublisher));

    let user = service.register(None, "ada@example.com", "Ada").await.unwrap();

    assert!(service.get(None, user.id()).await.is_ok());
}

#[tokio::test]
async fn test_update_applies_both_changes_in_one_write() {
    let (service, repository, publisher) = service();
    let user = service.register(None, "ada@example.com", "Ada").await.unwrap();

    let updated = service
        .update(None, user.id(), Some("Countess"), Some("editor"))
        .await
        .unwrap();

    assert_eq!(updated.display_name(), "Countess");
    assert!(updated.roles().contains("editor"));
    assert_eq!(repository.save_count().await, 2);
    assert_eq!(
        publisher.names(),
        vec!["user.registered", "user.renamed", "user.role_granted"]
    );
}

#[tokio::test]
async fn test_refused_update_keeps_neither_change() {
    let (service, repository, publisher) = service();
    let user = service.register(None, "ada@example.com", "Ada").await.unwrap();
    repository
        .fail_saves_with(PersistenceError::rejected_by_policy("roles_admin_managed"))
        .await;

    let err = service
        .update(None, user.id(), Some("Countess"), Some("admin"))
        .await
        .unwrap_err();

    assert!(err.as_persistence().is_some_and(|e| e.is_policy_rejection()));
    assert_eq!(publisher.names(), vec!["user.registered"]);
    let stored = service.get(None, user.id()).await.unwrap();
    assert_eq!(stored.display_name(), "Ada");
    assert!(stored.roles().is_empty());
}

#[tokio::test]
async fn test_empty_update_skips_write() {
    let (service, repository, _) = service();
    let user = service.register(None, "ada@example.com", "Ada").await.unwrap();

    let unchanged = service.update(None, user.id(), Some("Ada"), None).await.unwrap();

    assert_eq!(unchanged.display_name(), "Ada");
    assert_eq!(repository.save_count().await, 1);
}
