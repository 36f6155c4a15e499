//! Global fallback interceptor for persistence policy errors.
//!
//! Handlers return [`ApiError`]; actix renders it with the default handler
//! and keeps the error on the response. This middleware inspects that error
//! and, when the persistence layer refused or hid a row, replaces the
//! response with the translated one.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::errors::{ApiError, PolicyErrorTranslator};

/// Middleware registering a [`PolicyErrorTranslator`] for the whole app
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyErrorInterceptor {
    translator: PolicyErrorTranslator,
}

impl PolicyErrorInterceptor {
    pub fn new(translator: PolicyErrorTranslator) -> Self {
        Self { translator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for PolicyErrorInterceptor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PolicyErrorInterceptorService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PolicyErrorInterceptorService {
            service: Rc::new(service),
            translator: self.translator,
        }))
    }
}

pub struct PolicyErrorInterceptorService<S> {
    service: Rc<S>,
    translator: PolicyErrorTranslator,
}

impl<S, B> Service<ServiceRequest> for PolicyErrorInterceptorService<S>
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
        let service = Rc::clone(&self.service);
        let translator = self.translator;

        Box::pin(async move {
            let res = service.call(req).await?;

            let translated = res
                .response()
                .error()
                .and_then(|error| error.as_error::<ApiError>())
                .and_then(ApiError::domain)
                .and_then(|error| error.as_persistence())
                .and_then(|error| translator.translate(error).into_response());

            Ok(match translated {
                Some(response) => res.into_response(response).map_into_right_body(),
                None => res.map_into_left_body(),
            })
        })
    }
}
