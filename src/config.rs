use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Process-scoped authentication configuration.
///
/// The signing secret is loaded once at startup and never rotated
/// mid-process; tests instantiate isolated configs per case instead of
/// sharing ambient global state.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret for token signing (at least 32 bytes for HS256).
    pub secret: String,

    /// Access token lifetime in minutes.
    #[serde(default = "default_access_expiration_minutes")]
    pub access_expiration_minutes: i64,

    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_expiration_days")]
    pub refresh_expiration_days: i64,

    /// Treat a revocation-store failure as "revoked" instead of
    /// propagating it. Off by default: fail-explicit, never fail-open.
    #[serde(default)]
    pub fail_closed: bool,
}

fn default_access_expiration_minutes() -> i64 {
    15
}

fn default_refresh_expiration_days() -> i64 {
    7
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__SECRET, AUTH__FAIL_CLOSED, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTH__ACCESS_EXPIRATION_MINUTES=5 overrides
            // access_expiration_minutes
            .add_source(Environment::with_prefix("AUTH").separator("__"))
            .build()?;

        let config: AuthConfig = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_to_partial_config() {
        let config: AuthConfig = ConfigBuilder::builder()
            .set_override("secret", "test_secret_key_at_least_32_bytes!")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.access_expiration_minutes, 15);
        assert_eq!(config.refresh_expiration_days, 7);
        assert!(!config.fail_closed);
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let config: AuthConfig = ConfigBuilder::builder()
            .set_override("secret", "test_secret_key_at_least_32_bytes!")
            .unwrap()
            .set_override("access_expiration_minutes", 5)
            .unwrap()
            .set_override("fail_closed", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.access_expiration_minutes, 5);
        assert!(config.fail_closed);
    }
}
