// crates/preingest-rs/src/config.rs

//! Engine configuration.
//!
//! Every field has a default, so an absent or empty `preingest.toml` is valid.
//! Resolution order: explicit path, then `PREINGEST_CONFIG`, then defaults.

use crate::error::{PreingestError, Result};
use log::{debug, info};
use preingest_rs_metadata::ConversionSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "PREINGEST_CONFIG";

/// What to do when a chain cannot be discovered (missing sidecar, layout
/// error, unparseable ancestor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainErrorPolicy {
    /// Stop before any node is touched and report one failed run.
    #[default]
    AbortOperation,
    /// Report the broken chain as rejected and continue with the others.
    SkipChain,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixitySettings {
    /// `begripLabel` of the checksum algorithm written to MDTO, and the
    /// `algoritme` written to ToPX.
    pub algorithm_label: String,
    pub algorithm_list: String,
}

impl Default for FixitySettings {
    fn default() -> Self {
        Self {
            algorithm_label: "SHA-256".into(),
            algorithm_list: "Begrippenlijst Checksum Algoritme MDTO".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatSettings {
    /// Concept list name written next to enriched MDTO formats.
    pub register_name: String,
    /// Fixed DROID CSV location. When unset the newest `*.csv` in the
    /// working directory is used.
    pub table_path: Option<PathBuf>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            register_name: "PRONOM-register".into(),
            table_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreingestConfig {
    pub chain_error_policy: ChainErrorPolicy,
    /// Delete ToPX sidecars once their MDTO counterpart has been written.
    pub remove_converted_sources: bool,
    pub conversion: ConversionSettings,
    pub fixity: FixitySettings,
    pub format: FormatSettings,
}

impl PreingestConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| PreingestError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads the configuration from `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PreingestError::io(path, e))?;
        Self::from_toml_str(&content, path)
    }

    /// Resolves the configuration: explicit path, then `PREINGEST_CONFIG`,
    /// then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading configuration from {:?}", path);
            return Self::from_file(path);
        }
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?} ({})", path, CONFIG_ENV_VAR);
            return Self::from_file(&path);
        }
        debug!("No configuration file given; using defaults");
        Ok(Self::default())
    }
}
