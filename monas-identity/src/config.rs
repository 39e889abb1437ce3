//! Identity service configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default environment variable holding the private key for `IdentitySource::PrivateKey`.
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "MONAS_IDENTITY_PRIVATE_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("private key env var {0} is not set")]
    MissingPrivateKey(String),
}

/// Where the identity of the service comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Generate a fresh key pair on every start
    #[default]
    Generate,
    /// Restore from the private key in `private_key_env`
    PrivateKey,
    /// Load from the sled store at `store_path`, generating and saving one if empty
    Store,
}

/// Configuration for `IdentityService::from_config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub source: IdentitySource,
    pub private_key_env: String,
    pub store_path: PathBuf,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            source: IdentitySource::Generate,
            private_key_env: DEFAULT_PRIVATE_KEY_ENV.to_string(),
            store_path: PathBuf::from("data/identity"),
        }
    }
}

impl IdentityConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Returns the private key from the configured environment variable
    pub fn private_key_from_env(&self) -> Result<String, ConfigError> {
        std::env::var(&self.private_key_env)
            .map_err(|_| ConfigError::MissingPrivateKey(self.private_key_env.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = IdentityConfig::from_toml_str("").unwrap();
        assert_eq!(config, IdentityConfig::default());
        assert_eq!(config.source, IdentitySource::Generate);
    }

    #[test]
    fn toml_overrides_fields() {
        let config = IdentityConfig::from_toml_str(
            r#"
            source = "store"
            store_path = "/var/lib/monas/identity"
            "#,
        )
        .unwrap();

        assert_eq!(config.source, IdentitySource::Store);
        assert_eq!(config.store_path, PathBuf::from("/var/lib/monas/identity"));
        assert_eq!(config.private_key_env, DEFAULT_PRIVATE_KEY_ENV);
    }

    #[test]
    fn unknown_source_is_a_parse_error() {
        let result = IdentityConfig::from_toml_str(r#"source = "kms""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("identity.toml");
        std::fs::write(&path, "source = \"private_key\"\nprivate_key_env = \"TEST_KEY\"\n").unwrap();

        let config = IdentityConfig::load(&path).unwrap();
        assert_eq!(config.source, IdentitySource::PrivateKey);
        assert_eq!(config.private_key_env, "TEST_KEY");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = IdentityConfig::load("/nonexistent/monas/identity.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn missing_env_var_is_reported() {
        let config = IdentityConfig {
            private_key_env: "MONAS_IDENTITY_TEST_UNSET_VAR".to_string(),
            ..IdentityConfig::default()
        };
        assert!(matches!(
            config.private_key_from_env(),
            Err(ConfigError::MissingPrivateKey(name)) if name == "MONAS_IDENTITY_TEST_UNSET_VAR"
        ));
    }
}
