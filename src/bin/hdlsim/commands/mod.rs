//! Command implementations

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use clap::parser::ValueSource;
use clap::ArgMatches;

use hdlsim::backend::{BackendRegistry, RecordingSink};
use hdlsim::util::config::{global_config_path, load_run_config, project_config_path};
use hdlsim::RunConfig;

pub mod backends;
pub mod completions;
pub mod flags;

/// State shared by all commands: the registry, the loaded config and the
/// values of backend-registered arguments.
pub struct Session {
    pub registry: BackendRegistry,
    pub config: RunConfig,
    pub arguments: BTreeMap<String, String>,
}

impl Session {
    pub fn new(
        registry: BackendRegistry,
        config_path: Option<&Path>,
        matches: &ArgMatches,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => RunConfig::load(path)?,
            None => {
                let cwd = std::env::current_dir().context("failed to read current directory")?;
                load_run_config(global_config_path().as_deref(), &project_config_path(&cwd))?
            }
        };

        // Command line beats config, config beats parser defaults
        let mut sink = RecordingSink::new();
        registry.register_arguments(&mut sink);
        let mut arguments = BTreeMap::new();
        for definition in sink.definitions() {
            let from_cli = matches
                .get_one::<String>(definition.name)
                .filter(|_| {
                    matches.value_source(definition.name) != Some(ValueSource::DefaultValue)
                });
            let value = from_cli
                .or_else(|| config.arguments.get(definition.name))
                .or_else(|| matches.get_one::<String>(definition.name));
            if let Some(value) = value {
                arguments.insert(definition.name.to_string(), value.clone());
            }
        }

        Ok(Session {
            registry,
            config,
            arguments,
        })
    }
}
