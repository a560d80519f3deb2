//! CLI configuration
//!
//! Read from a TOML file. Every key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use signage_core::errors::{ExError, ExErrorKind, ExResult};
use signage_core::logging_facility::Profile;
use signage_core::DEFAULT_FALLBACK_LAYOUT_ID;
use signage_engine::EngineConfig;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "signage.toml";

pub const DEFAULT_DATABASE_PATH: &str = ".signage/store.db";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub database_path: PathBuf,
    pub fallback_layout_id: i64,
    pub log_profile: Profile,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            fallback_layout_id: DEFAULT_FALLBACK_LAYOUT_ID,
            log_profile: Profile::Development,
        }
    }
}

impl CliConfig {
    /// Load `explicit`, else `signage.toml` if present, else defaults
    ///
    /// # Errors
    /// * `Io` - an explicit path cannot be read
    /// * `Config` - the file is not valid TOML for this schema
    pub fn load(explicit: Option<&Path>) -> ExResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// # Errors
    /// * `Io` - the file cannot be read
    /// * `Config` - the contents do not parse
    pub fn from_file(path: &Path) -> ExResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("config_load")
                .with_entity_id(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::parse(&raw).map_err(|e| e.with_entity_id(path.display().to_string()))
    }

    /// # Errors
    /// * `Config` - the contents do not parse
    pub fn parse(raw: &str) -> ExResult<Self> {
        toml::from_str(raw).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("config_load")
                .with_message(e.to_string())
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fallback_layout_id: self.fallback_layout_id,
        }
    }
}
