//! Run configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.hdlsim/config.toml` - User-wide defaults
//! - Project: `.hdlsim/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Option names may be
//! written quoted (`"ghdl.a_flags" = [...]`) or as nested tables
//! (`[options.ghdl]` with `a_flags = [...]`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::options::{OptionError, OptionValues, PREFIX_SEPARATOR};
use crate::standard::StandardVersion;

/// Run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Simulator and standard selection
    pub run: RunSettings,

    /// Option values keyed by namespaced option name
    pub options: toml::Table,

    /// Values for backend-registered command-line arguments
    pub arguments: BTreeMap<String, String>,
}

/// Simulator and standard selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Backend name (xcelium, incisive, ghdl)
    pub simulator: Option<String>,

    /// VHDL standard
    pub standard: Option<StandardVersion>,
}

impl RunConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: RunConfig = toml::from_str(contents)?;
        config.options = flatten_options(std::mem::take(&mut config.options));
        Ok(config)
    }

    /// Load configuration, or defaults if the file doesn't exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {}", path.display());
            Ok(Self::default())
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: RunConfig) {
        if other.run.simulator.is_some() {
            self.run.simulator = other.run.simulator;
        }
        if other.run.standard.is_some() {
            self.run.standard = other.run.standard;
        }
        self.options.extend(other.options);
        self.arguments.extend(other.arguments);
    }

    /// Apply the options that belong to `values`' backend.
    ///
    /// Options namespaced for other backends are skipped, so one file can
    /// configure several simulators. Returns the number of options applied.
    pub fn apply_options(&self, values: &mut OptionValues) -> Result<usize, OptionError> {
        let prefix = format!("{}{}", values.schema().prefix(), PREFIX_SEPARATOR);
        let mut applied = 0;
        for (name, value) in &self.options {
            if !name.starts_with(&prefix) {
                tracing::debug!(option = %name, "skipping option for another simulator");
                continue;
            }
            values.set_from_toml(name, value)?;
            applied += 1;
        }
        Ok(applied)
    }
}

fn flatten_options(table: toml::Table) -> toml::Table {
    let mut flat = toml::Table::new();
    for (key, value) in table {
        match value {
            toml::Value::Table(inner) => {
                for (sub, v) in flatten_options(inner) {
                    flat.insert(format!("{}{}{}", key, PREFIX_SEPARATOR, sub), v);
                }
            }
            other => {
                flat.insert(key, other);
            }
        }
    }
    flat
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.hdlsim/config.toml)
/// 2. Global config (~/.hdlsim/config.toml)
/// 3. Defaults
pub fn load_run_config(global_path: Option<&Path>, project_path: &Path) -> Result<RunConfig> {
    let mut config = RunConfig::default();

    if let Some(global) = global_path {
        config.merge(RunConfig::load_or_default(global)?);
    }

    config.merge(RunConfig::load_or_default(project_path)?);

    Ok(config)
}

/// Get the global hdlsim config directory (~/.hdlsim).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".hdlsim"))
}

/// Get the global config path (~/.hdlsim/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.hdlsim/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".hdlsim").join("config.toml")
}
