//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT verification configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//!
//! Policy error translation settings live directly in this module.

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, DEVELOPMENT_JWT_SECRET};
pub use environment::{Environment, LoggingConfig, UnknownEnvironment};
pub use server::ServerConfig;

/// Errors raised while validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in {environment}")]
    DefaultJwtSecret { environment: Environment },

    #[error("JWT_SECRET must not be empty")]
    EmptyJwtSecret,
}

/// How persistence policy failures are reported to clients
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Report policy rejections as not-found so clients cannot tell a hidden
    /// resource from a missing one
    #[serde(default)]
    pub collapse_not_found: bool,
}

impl PolicyConfig {
    pub fn from_env() -> Self {
        Self {
            collapse_not_found: env_or_default("POLICY_COLLAPSE_NOT_FOUND", false),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Policy error reporting
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            policy: PolicyConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Reject configurations that must not be used to serve traffic
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt.secret.is_empty() {
            return Err(ConfigError::EmptyJwtSecret);
        }
        if self.environment.requires_explicit_secret() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultJwtSecret {
                environment: self.environment,
            });
        }
        Ok(())
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or unparsable.
pub(crate) fn env_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, ?default, "invalid configuration value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates_outside_production() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DefaultJwtSecret { .. })
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt.secret.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyJwtSecret)));
    }

    #[test]
    fn test_policy_config_default_keeps_distinct_outcomes() {
        assert!(!PolicyConfig::default().collapse_not_found);
    }
}
