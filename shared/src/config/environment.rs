//! Deployment environment and the logging defaults that follow from it

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown environment `{0}` (expected development, staging or production)")]
pub struct UnknownEnvironment(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    /// Shared environments must not run with the development JWT secret
    pub fn requires_explicit_secret(&self) -> bool {
        !self.is_development()
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Staging => "info",
            Environment::Production => "warn",
        }
    }

    /// Read `ENVIRONMENT`; unset or unknown values mean development
    pub fn from_env() -> Self {
        super::env_or_default("ENVIRONMENT", Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `env_logger` filter directive, e.g. `info` or `ks_api=debug,warn`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            level: environment.default_log_filter().to_string(),
        }
    }

    /// `RUST_LOG` when set, otherwise the environment's default filter
    pub fn from_env(environment: Environment) -> Self {
        match std::env::var("RUST_LOG") {
            Ok(level) if !level.trim().is_empty() => Self { level },
            _ => Self::for_environment(environment),
        }
    }
}
