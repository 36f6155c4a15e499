//! Application state and factory
//!
//! This module holds the state shared by every handler and provides the
//! factory for creating the Actix-web application.

use actix_web::{
    error::InternalError, middleware::Logger, web, App, HttpResponse,
};
use std::sync::Arc;

use ks_core::{EventPublisher, UserEvent, UserRepository, UserService};
use ks_shared::{AppConfig, ErrorResponse, JwtConfig};

use crate::dto::ErrorResponseExt;
use crate::errors::PolicyErrorTranslator;
use crate::middleware::{JwtAuth, PolicyErrorInterceptor, RegistryGuardExt};
use crate::routes::{self, handler_ids, health::health_check};

/// Application state that holds shared services
pub struct AppState<R, P>
where
    R: UserRepository,
    P: EventPublisher<UserEvent>,
{
    pub users: Arc<UserService<R, P>>,
}

impl<R, P> AppState<R, P>
where
    R: UserRepository,
    P: EventPublisher<UserEvent>,
{
    pub fn new(users: UserService<R, P>) -> Self {
        Self {
            users: Arc::new(users),
        }
    }
}

/// Transport settings the app factory needs
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub jwt: JwtConfig,
    pub translator: PolicyErrorTranslator,
}

impl AppSettings {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            translator: PolicyErrorTranslator::default(),
        }
    }

    pub fn with_translator(mut self, translator: PolicyErrorTranslator) -> Self {
        self.translator = translator;
        self
    }
}

impl From<&AppConfig> for AppSettings {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.auth.jwt.clone())
            .with_translator(PolicyErrorTranslator::new(config.policy.collapse_not_found))
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R, P>(
    app_state: web::Data<AppState<R, P>>,
    settings: &AppSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: UserRepository + 'static,
    P: EventPublisher<UserEvent> + 'static,
{
    let registry = routes::authorization_registry();

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        // Middleware runs bottom-up: log, authenticate, then translate
        // policy errors on the way out
        .wrap(PolicyErrorInterceptor::new(settings.translator))
        .wrap(JwtAuth::new(settings.jwt.clone()))
        .wrap(Logger::default())
        // Health check endpoint
        .route(
            "/health",
            web::get()
                .to(health_check)
                .wrap(registry.guard(handler_ids::HEALTH)),
        )
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .configure(|cfg| routes::users::configure::<R, P>(cfg, &registry)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = ErrorResponse::bad_request(err.to_string()).to_response();
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = ErrorResponse::bad_request(err.to_string()).to_response();
        InternalError::from_response(err, response).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, ErrorResponse::not_found().to_response()).into()
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::not_found().to_response()
}
