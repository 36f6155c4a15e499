//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or_default;

/// Secret shipped for local development only
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to verify HS256 tokens
    pub secret: String,

    /// Expected issuer claim
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected audience claim
    #[serde(default)]
    pub audience: Option<String>,

    /// Clock skew tolerance in seconds
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_JWT_SECRET),
            issuer: None,
            audience: None,
            leeway_seconds: default_leeway(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_JWT_SECRET
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
                issuer: std::env::var("JWT_ISSUER").ok(),
                audience: std::env::var("JWT_AUDIENCE").ok(),
                leeway_seconds: env_or_default("JWT_LEEWAY_SECONDS", defaults.leeway_seconds),
            },
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

fn default_leeway() -> u64 {
    30
}
