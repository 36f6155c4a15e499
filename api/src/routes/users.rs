//! User route handlers
//!
//! Every handler passes the request principal down to the service so the
//! persistence layer can apply its row policies. Errors are returned as
//! [`ApiError`] and rendered by the default handler, or by the policy
//! translator when the persistence layer refused the operation.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use ks_core::{Aggregate, AuthorizationRegistry, EventPublisher, UserEvent, UserRepository};
use ks_shared::Page;

use crate::app::AppState;
use crate::dto::{PaginationQuery, RegisterUserRequest, UpdateUserRequest, UserResponse};
use crate::errors::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::RegistryGuardExt;
use crate::routes::handler_ids;

/// Register the user routes, each wrapped in the guard its handler id
/// resolves to in `registry`
pub fn configure<R, P>(cfg: &mut web::ServiceConfig, registry: &AuthorizationRegistry)
where
    R: UserRepository + 'static,
    P: EventPublisher<UserEvent> + 'static,
{
    cfg.service(
        web::scope("/users")
            .route(
                "",
                web::get()
                    .to(list_users::<R, P>)
                    .wrap(registry.guard(handler_ids::USERS_LIST)),
            )
            .route(
                "",
                web::post()
                    .to(register_user::<R, P>)
                    .wrap(registry.guard(handler_ids::USERS_CREATE)),
            )
            .route(
                "/me",
                web::get()
                    .to(me)
                    .wrap(registry.guard(handler_ids::USERS_ME)),
            )
            .route(
                "/{id}",
                web::get()
                    .to(get_user::<R, P>)
                    .wrap(registry.guard(handler_ids::USERS_GET)),
            )
            .route(
                "/{id}",
                web::patch()
                    .to(update_user::<R, P>)
                    .wrap(registry.guard(handler_ids::USERS_UPDATE)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_user::<R, P>)
                    .wrap(registry.guard(handler_ids::USERS_DELETE)),
            ),
    );
}

/// Handler for GET /api/v1/users/me
///
/// Returns the request principal, or `null` for anonymous callers.
pub async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(user.into_inner())
}

/// Handler for GET /api/v1/users
///
/// # Query
///
/// `limit` (1..=100, default 20) and `offset` (default 0).
///
/// # Response
///
/// ```json
/// {
///     "pagination": { "total": 42, "limit": 20, "offset": 0, "hasMore": true },
///     "items": [ { "id": "...", "email": "...", "displayName": "..." } ]
/// }
/// ```
pub async fn list_users<R, P>(
    state: web::Data<AppState<R, P>>,
    user: CurrentUser,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    P: EventPublisher<UserEvent> + 'static,
{
    let request = query.into_inner().into_request()?;
    let page: Page<UserResponse> = state
        .users
        .list(user.user(), &request)
        .await?
        .map(UserResponse::from);

    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/v1/users/{id}
pub async fn get_user<R, P>(
    state: web::Data<AppState<R, P>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    P: EventPublisher<UserEvent> + 'static,
{
    let found = state.users.get(user.user(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

/// Handler for POST /api/v1/users
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "displayName": "Ada" }
/// ```
pub async fn register_user<R, P>(
    state: web::Data<AppState<R, P>>,
    user: CurrentUser,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    P: EventPublisher<UserEvent> + 'static,
{
    body.validate()?;
    let created = state
        .users
        .register(user.user(), &body.email, &body.display_name)
        .await?;

    log::info!("Registered user {}", created.id());
    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}

/// Handler for PATCH /api/v1/users/{id}
pub async fn update_user<R, P>(
    state: web::Data<AppState<R, P>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    P: EventPublisher<UserEvent> + 'static,
{
    body.validate()?;
    let id = path.into_inner();
    let actor = user.user();

    let updated = state
        .users
        .update(
            actor,
            id,
            body.display_name.as_deref(),
            body.grant_role.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// Handler for DELETE /api/v1/users/{id}
pub async fn delete_user<R, P>(
    state: web::Data<AppState<R, P>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    P: EventPublisher<UserEvent> + 'static,
{
    state.users.delete(user.user(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
