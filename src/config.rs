use crate::errors::{IdmError, Result};
use crate::observability::ClientLogger;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub credentials: CredentialsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Load configuration from built-in defaults and environment variables
    ///
    /// Credentials have no default: `KEYROCK__CREDENTIALS__USERNAME` and
    /// `KEYROCK__CREDENTIALS__PASSWORD` must be set.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::with_prefix("KEYROCK"))
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .set_default("connection.host", "localhost")
            .and_then(|b| b.set_default("connection.port", 3005))
            .and_then(|b| b.set_default("observability.log_level", "off"))
            .and_then(|b| b.set_default("observability.log_format", "pretty"))
            .map_err(|e| IdmError::Configuration(e.to_string()))?
            // e.g., KEYROCK__CONNECTION__PORT=3000
            .add_source(environment.separator("__").try_parsing(true))
            .build()
            .map_err(|e| IdmError::Configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| IdmError::Configuration(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.connection.host.trim().is_empty() {
            return Err(IdmError::Configuration("Host is required".to_string()));
        }

        if self.connection.port == 0 {
            return Err(IdmError::Configuration("Invalid port number".to_string()));
        }

        ClientLogger::from_level_name(&self.observability.log_level)?;

        Ok(())
    }

    /// Base URL of the administrative API
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.connection.host, self.connection.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const CREDENTIALS: [(&str, &str); 2] = [
        ("KEYROCK__CREDENTIALS__USERNAME", "admin@test.com"),
        ("KEYROCK__CREDENTIALS__PASSWORD", "1234"),
    ];

    fn load_from(vars: &[(&str, &str)]) -> Result<Config> {
        let source: HashMap<String, String> = CREDENTIALS
            .iter()
            .chain(vars)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_environment(
            config::Environment::with_prefix("KEYROCK").source(Some(source)),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[]).unwrap();
        assert_eq!(config.connection.host, "localhost");
        assert_eq!(config.connection.port, 3005);
        assert_eq!(config.credentials.username, "admin@test.com");
        assert_eq!(config.observability.log_level, "off");
        assert_eq!(config.base_url(), "http://localhost:3005");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_credentials() {
        let result = Config::from_environment(
            config::Environment::with_prefix("KEYROCK").source(Some(HashMap::new())),
        );
        assert!(matches!(result, Err(IdmError::Configuration(_))));

        let result = Config::from_environment(config::Environment::with_prefix("KEYROCK").source(
            Some(HashMap::from([(
                "KEYROCK__CREDENTIALS__USERNAME".to_string(),
                "admin@test.com".to_string(),
            )])),
        ));
        assert!(matches!(result, Err(IdmError::Configuration(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let config = load_from(&[
            ("KEYROCK__CONNECTION__HOST", "idm.local"),
            ("KEYROCK__CONNECTION__PORT", "3000"),
            ("KEYROCK__OBSERVABILITY__LOG_LEVEL", "debug"),
        ])
        .unwrap();
        assert_eq!(config.base_url(), "http://idm.local:3000");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_config_validation() {
        let mut config = load_from(&[]).unwrap();

        config.connection.port = 0;
        assert!(config.validate().is_err());

        config.connection.port = 3005;
        config.observability.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
