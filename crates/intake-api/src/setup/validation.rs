//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use intake_core::Config;

/// Validate critical configuration values
///
/// Runs the value checks of [`Config::validate`] and then the rules that depend on
/// the environment.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    // Validate CORS configuration in production
    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    // Records must survive restarts in production
    if is_production && config.database_url().is_none() {
        return Err(anyhow::anyhow!(
            "DATABASE_URL must be set in production; the in-memory record store is for development only"
        ));
    }

    // Validate database connection settings
    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    Ok(())
}
