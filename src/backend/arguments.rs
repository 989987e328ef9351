//! Command-line argument hook.
//!
//! Backends contribute their own flags to the front end's parser through
//! an [`ArgumentSink`]. The sink only accepts definitions; it never
//! reports anything back to the backend.

use std::collections::HashSet;

use serde::Serialize;

/// A backend-specific command-line flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentDefinition {
    /// Long flag name without dashes (e.g., "cdslib")
    pub name: &'static str,
    /// Help text shown by `--help`
    pub help: &'static str,
    /// Default value, if any
    pub default: Option<&'static str>,
    /// Simulator flag the value is forwarded with (None = front end only)
    pub forward: Option<&'static str>,
}

impl ArgumentDefinition {
    /// Create a new argument definition.
    pub fn new(name: &'static str, help: &'static str) -> Self {
        ArgumentDefinition {
            name,
            help,
            default: None,
            forward: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Forward the value to the simulator as `flag value`.
    pub fn forwarded_as(mut self, flag: &'static str) -> Self {
        self.forward = Some(flag);
        self
    }

    /// Render a value for this argument as simulator tokens.
    pub fn render(&self, value: &str) -> Vec<String> {
        match self.forward {
            Some(flag) => vec![flag.to_string(), value.to_string()],
            None => Vec::new(),
        }
    }
}

/// Receiver of backend argument definitions.
pub trait ArgumentSink {
    /// Accept one flag definition.
    fn add_argument(&mut self, definition: ArgumentDefinition);
}

/// Signature of a backend's argument registration hook.
pub type RegisterArgumentsFn = fn(&mut dyn ArgumentSink);

/// Hook for backends that share their parent's arguments.
///
/// The parent registers the flags once; the derived backend adds nothing
/// so the parser never sees the same flag twice.
pub fn no_arguments(_sink: &mut dyn ArgumentSink) {}

/// Sink that collects definitions in registration order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    definitions: Vec<ArgumentDefinition>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Definitions received so far.
    pub fn definitions(&self) -> &[ArgumentDefinition] {
        &self.definitions
    }

    /// Consume the sink and return its definitions.
    pub fn into_definitions(self) -> Vec<ArgumentDefinition> {
        self.definitions
    }
}

impl ArgumentSink for RecordingSink {
    fn add_argument(&mut self, definition: ArgumentDefinition) {
        self.definitions.push(definition);
    }
}

/// Sink that adds global `--<name>` flags to a clap command.
///
/// Definitions whose id the command or one of its subcommands already uses
/// are skipped.
pub struct ClapSink {
    command: clap::Command,
    seen: HashSet<String>,
}

impl ClapSink {
    /// Wrap a clap command.
    pub fn new(command: clap::Command) -> Self {
        let mut seen = HashSet::new();
        collect_ids(&command, &mut seen);
        ClapSink { command, seen }
    }

    /// Return the augmented command.
    pub fn into_command(self) -> clap::Command {
        self.command
    }
}

impl ArgumentSink for ClapSink {
    fn add_argument(&mut self, definition: ArgumentDefinition) {
        // clap panics on duplicate ids
        if !self.seen.insert(definition.name.to_string()) {
            tracing::debug!(argument = definition.name, "argument already registered");
            return;
        }

        let mut arg = clap::Arg::new(definition.name)
            .long(definition.name)
            .help(definition.help)
            .value_name("VALUE")
            .global(true);
        if let Some(default) = definition.default {
            arg = arg.default_value(default);
        }

        let command = std::mem::replace(&mut self.command, clap::Command::new(""));
        self.command = command.arg(arg);
    }
}

fn collect_ids(command: &clap::Command, seen: &mut HashSet<String>) {
    for arg in command.get_arguments() {
        seen.insert(arg.get_id().as_str().to_string());
    }
    for sub in command.get_subcommands() {
        collect_ids(sub, seen);
    }
}
