//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::pix::{MAX_VALUE_LEN, Merchant, strip_diacritics};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "WEDDING_CONFIG";

/// Environment variable overriding `server.bind`
pub const BIND_ENV: &str = "WEDDING_BIND";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:3000")
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Photo upload settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding guest photos
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Base URL under which uploaded files are served
    pub public_base_url: String,

    /// Largest accepted upload, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// RSVP form settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpConfig {
    /// Most companions a single guest may bring
    #[serde(default = "default_max_plus_ones")]
    pub max_plus_ones: u32,
}

impl Default for RsvpConfig {
    fn default() -> Self {
        Self {
            max_plus_ones: default_max_plus_ones(),
        }
    }
}

/// Complete site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub server: ServerConfig,

    /// Payee printed into gift payment codes
    pub merchant: Merchant,

    pub storage: StorageConfig,

    #[serde(default)]
    pub rsvp: RsvpConfig,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_bucket() -> String {
    "wedding-photos".to_string()
}

fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_max_plus_ones() -> u32 {
    5
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `WEDDING_CONFIG` when set, otherwise use the defaults,
    /// then apply `WEDDING_BIND`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(path = %path, "Loading configuration");
                Self::from_yaml_file(path)?
            }
            Err(_) => {
                tracing::warn!("{} not set, using default configuration", CONFIG_PATH_ENV);
                Self::default_config()
            }
        };

        if let Ok(bind) = std::env::var(BIND_ENV) {
            tracing::info!(bind = %bind, "{} overrides server.bind", BIND_ENV);
            config.server.bind = bind;
        }

        Ok(config)
    }

    /// Check values the payment code cannot represent
    ///
    /// Merchant fields are length-prefixed with two digits once normalized,
    /// so each must fit in 99 characters and must not be empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("merchant.key", &self.merchant.key, self.merchant.key.clone()),
            (
                "merchant.name",
                &self.merchant.name,
                strip_diacritics(&self.merchant.name),
            ),
            (
                "merchant.city",
                &self.merchant.city,
                strip_diacritics(&self.merchant.city),
            ),
        ];

        for (field, raw, normalized) in fields {
            if normalized.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: raw.clone(),
                    message: "must not be empty".to_string(),
                });
            }
            if normalized.len() > MAX_VALUE_LEN || !normalized.is_ascii() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: raw.clone(),
                    message: format!("must be at most {} ASCII characters", MAX_VALUE_LEN),
                });
            }
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.max_upload_bytes".to_string(),
                value: "0".to_string(),
                message: "must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Create a default configuration for development and tests
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                bind: default_bind(),
            },
            merchant: Merchant::new("09261139680", "Pauline Cerqueira Barbosa", "Cataguases"),
            storage: StorageConfig {
                bucket: default_bucket(),
                public_base_url: "http://127.0.0.1:3000/files".to_string(),
                max_upload_bytes: default_max_upload_bytes(),
            },
            rsvp: RsvpConfig::default(),
        }
    }
}
