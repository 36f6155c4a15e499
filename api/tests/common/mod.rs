//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;
use uuid::Uuid;

use ks_api::app::{AppSettings, AppState};
use ks_api::errors::PolicyErrorTranslator;
use ks_api::middleware::encode_token;
use ks_core::auth::{roles, AuthenticatedUser};
use ks_core::{Aggregate, User, UserEvent, UserService};
use ks_infra::{InMemoryUserRepository, RecordingEventPublisher};
use ks_shared::JwtConfig;

pub const SECRET: &str = "integration-test-secret";

pub type TestState = AppState<InMemoryUserRepository, RecordingEventPublisher<UserEvent>>;

pub struct TestContext {
    pub repository: InMemoryUserRepository,
    pub publisher: RecordingEventPublisher<UserEvent>,
    pub state: web::Data<TestState>,
    pub settings: AppSettings,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_translator(PolicyErrorTranslator::default())
    }

    pub fn with_translator(translator: PolicyErrorTranslator) -> Self {
        let repository = InMemoryUserRepository::new();
        let publisher = RecordingEventPublisher::new();
        let service = UserService::new(Arc::new(repository.clone()), Arc::new(publisher.clone()));
        Self {
            repository,
            publisher,
            state: web::Data::new(AppState::new(service)),
            settings: AppSettings::new(JwtConfig::new(SECRET)).with_translator(translator),
        }
    }

    /// Insert a user row directly and return its id
    pub async fn seed_user(&self, email: &str, display_name: &str) -> Uuid {
        let user = User::register(email, display_name).unwrap();
        let id = user.id();
        self.repository.seed([user.to_record()]).await;
        id
    }
}

pub fn member(id: Uuid) -> AuthenticatedUser {
    AuthenticatedUser::new(id.to_string()).with_claim("email", "member@example.com")
}

pub fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new("admin-1").with_role(roles::ADMIN)
}

/// `Authorization` header carrying a fresh token for `user`
pub fn bearer(user: &AuthenticatedUser) -> (&'static str, String) {
    let token = encode_token(&JwtConfig::new(SECRET), user, 300).unwrap();
    ("Authorization", format!("Bearer {token}"))
}
