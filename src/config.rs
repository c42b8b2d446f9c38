//! Generator configuration
//!
//! Loaded from `helper-testgen.yaml` in the working directory. Every key is
//! optional:
//!
//! ```yaml
//! schema_dir: ./helpers
//! output_dir: ./generated
//! max_variadic_arguments: 40
//! asset_name: decoder/test/0
//! seed: 1234
//! log_level: 1
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE: &str = "helper-testgen.yaml";
/// Asset name used by every generated fixture
pub const DEFAULT_ASSET_NAME: &str = "decoder/test/0";

/// Generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory scanned for schema files
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Where output documents are written (default: next to each schema)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Argument limit assumed for variadic helpers
    #[serde(default = "default_max_variadic_arguments")]
    pub max_variadic_arguments: usize,

    /// `name` of every generated asset definition
    #[serde(default = "default_asset_name")]
    pub asset_name: String,

    /// Fixed RNG seed; literals vary between runs when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// 0 = warn, 1 = info, 2 = debug
    #[serde(default = "default_log_level")]
    pub log_level: u8,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_variadic_arguments() -> usize {
    40
}

fn default_asset_name() -> String {
    DEFAULT_ASSET_NAME.to_string()
}

fn default_log_level() -> u8 {
    1
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            output_dir: None,
            max_variadic_arguments: default_max_variadic_arguments(),
            asset_name: default_asset_name(),
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_norway::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `helper-testgen.yaml` from a directory; defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_file = dir.join(CONFIG_FILE);
        if !config_file.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_file).map_err(Error::Io)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_variadic_arguments == 0 {
            return Err(Error::Config(
                "max_variadic_arguments must be at least 1".to_string(),
            ));
        }

        if self.asset_name.trim().is_empty() {
            return Err(Error::Config("asset_name must not be empty".to_string()));
        }

        Ok(())
    }

    /// Override the scanned directory
    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = dir.into();
        self
    }
}
