use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shipped defaults; `build.rs` checks this parses before the crate compiles.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Replaces the leading `/` of root-relative `href` and `src` values.
    pub base_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub content: PathBuf,
    pub static_dir: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::compiled_default()
    }
}

impl Config {
    /// The configuration built into the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("default_config.toml is validated by build.rs")
    }

    /// Parse a config file body. Keys it leaves out keep their default values.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut merged: toml::Table = DEFAULT_CONFIG
            .parse()
            .expect("default_config.toml is validated by build.rs");
        let overrides: toml::Table = content.parse()?;
        merge_tables(&mut merged, overrides);
        toml::Value::Table(merged).try_into()
    }

    /// Load config from a TOML file, or return defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Overlay `overrides` onto `base`, descending into tables present in both.
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (Some(slot), value) => *slot = value,
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}
