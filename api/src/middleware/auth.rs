//! JWT authentication middleware.
//!
//! Extracts a bearer token from the Authorization header, verifies it and
//! attaches the resulting [`AuthenticatedUser`] to the request extensions.
//!
//! A missing or invalid token never fails the request here: the request
//! simply carries no principal, and the [`AuthGuard`](super::guard::AuthGuard)
//! attached to each route decides whether that is acceptable.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    collections::BTreeSet,
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use ks_core::auth::AuthenticatedUser;
use ks_shared::config::JwtConfig;

/// Registered claims that describe the token rather than the principal
const REGISTERED_CLAIMS: [&str; 6] = ["exp", "iat", "nbf", "iss", "aud", "jti"];

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's identifier
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Every other claim, registered or custom
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Turn verified claims into the request principal
    pub fn into_principal(self) -> AuthenticatedUser {
        let mut user = AuthenticatedUser::new(self.sub).with_roles(self.roles);
        user.claims = self
            .extra
            .into_iter()
            .filter(|(key, _)| !REGISTERED_CLAIMS.contains(&key.as_str()))
            .collect();
        user
    }
}

/// Sign an HS256 access token for `user`, valid for `ttl_seconds`
pub fn encode_token(
    config: &JwtConfig,
    user: &AuthenticatedUser,
    ttl_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut extra = user.claims.clone();
    if let Some(issuer) = &config.issuer {
        extra.insert("iss".to_string(), Value::String(issuer.clone()));
    }
    if let Some(audience) = &config.audience {
        extra.insert("aud".to_string(), Value::String(audience.clone()));
    }

    let claims = Claims {
        sub: user.id.clone(),
        exp: chrono::Utc::now().timestamp() + ttl_seconds,
        roles: user.roles.clone(),
        extra,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify `token` and return the principal it names
pub fn verify_token(
    config: &JwtConfig,
    token: &str,
) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.leeway_seconds;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims.into_principal())
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    config: Arc<JwtConfig>,
}

impl JwtAuth {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            config: Arc::clone(&self.config),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    config: Arc<JwtConfig>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if let Some(token) = extract_bearer_token(&req) {
            match verify_token(&self.config, &token) {
                Ok(user) => {
                    log::debug!("Authenticated principal {} for {}", user.id, req.path());
                    req.extensions_mut().insert(user);
                }
                Err(e) => log::info!("Ignoring invalid bearer token on {}: {}", req.path(), e),
            }
        }

        Box::pin(async move { service.call(req).await })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret")
    }

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_token_carries_roles_and_claims() {
        let user = AuthenticatedUser::new("u-1")
            .with_role("admin")
            .with_claim("tenant", "acme");
        let token = encode_token(&config(), &user, 60).unwrap();

        let verified = verify_token(&config(), &token).unwrap();
        assert_eq!(verified, user);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = encode_token(&config(), &AuthenticatedUser::new("u-1"), 60).unwrap();
        assert!(verify_token(&JwtConfig::new("other-secret"), &token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = encode_token(&config(), &AuthenticatedUser::new("u-1"), -3600).unwrap();
        assert!(verify_token(&config(), &token).is_err());
    }

    #[test]
    fn test_issuer_and_audience_are_checked() {
        let issuing = config().with_issuer("keystone").with_audience("web");
        let token = encode_token(&issuing, &AuthenticatedUser::new("u-1"), 60).unwrap();

        assert!(verify_token(&issuing, &token).is_ok());
        assert!(verify_token(&config().with_issuer("other"), &token).is_err());
    }
}
