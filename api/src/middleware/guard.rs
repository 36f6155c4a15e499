//! Per-route authorization guard.
//!
//! Runs after [`JwtAuth`](super::auth::JwtAuth) has had its chance to attach
//! a principal, and applies the route's [`RouteAuth`] to it.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use ks_core::auth::{authorize, AuthenticatedUser, AuthorizationDecision, AuthorizationRegistry, RouteAuth};
use ks_shared::ErrorResponse;

use crate::dto::ErrorResponseExt;

/// Authorization guard middleware factory
#[derive(Debug, Clone)]
pub struct AuthGuard {
    handler_id: &'static str,
    route: Rc<RouteAuth>,
}

impl AuthGuard {
    pub fn new(handler_id: &'static str, route: RouteAuth) -> Self {
        Self {
            handler_id,
            route: Rc::new(route),
        }
    }
}

/// Builds guards from registered authorization metadata
pub trait RegistryGuardExt {
    /// Guard enforcing whatever is registered for `handler_id`
    fn guard(&self, handler_id: &'static str) -> AuthGuard;
}

impl RegistryGuardExt for AuthorizationRegistry {
    fn guard(&self, handler_id: &'static str) -> AuthGuard {
        AuthGuard::new(handler_id, self.resolve(handler_id))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service: Rc::new(service),
            handler_id: self.handler_id,
            route: Rc::clone(&self.route),
        }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: Rc<S>,
    handler_id: &'static str,
    route: Rc<RouteAuth>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let extensions = req.extensions();
            authorize(&self.route, extensions.get::<AuthenticatedUser>())
        };

        let body = match decision {
            AuthorizationDecision::Allow => {
                let service = Rc::clone(&self.service);
                return Box::pin(async move {
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                });
            }
            AuthorizationDecision::Unauthenticated => ErrorResponse::unauthorized(),
            AuthorizationDecision::Forbidden => ErrorResponse::forbidden(),
        };

        log::info!(
            "Denied {} {} ({}): {:?}",
            req.method(),
            req.path(),
            self.handler_id,
            decision
        );
        let response = body.to_response();
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}
