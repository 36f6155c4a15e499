use ks_shared::{AppConfig, ConfigError};

/// Load configuration from the environment (and a `.env` file if present)
/// and refuse settings that are unsafe for the selected environment
pub fn load() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config.validate()?;
    Ok(config)
}
