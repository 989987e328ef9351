//! Static backend identity and capability facts.
//!
//! A descriptor is immutable once its backend is built. Derived backends
//! start from a copy of their parent's descriptor.

use serde::Serialize;

use crate::options::{OptionDeclaration, Phase};

/// Capability flags of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Supports VHDL-2008 context declarations
    pub extended_contexts: bool,
    /// Can open an interactive waveform GUI
    pub gui: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            extended_contexts: true,
            gui: false,
        }
    }
}

/// Static identity of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendDescriptor {
    /// Display name, also the registry key (e.g., "xcelium")
    pub name: String,

    /// Simulator executable name (e.g., "xrun")
    pub executable: String,

    /// Every option name must start with `<option_prefix>.`
    pub option_prefix: String,

    /// Capability flags
    pub capabilities: Capabilities,

    /// Options accepted by compile steps
    pub compile_options: Vec<OptionDeclaration>,

    /// Options accepted by simulate steps
    pub simulate_options: Vec<OptionDeclaration>,

    /// Fixed tokens placed after the executable in compile steps
    pub compile_prelude: Vec<String>,

    /// Fixed tokens placed after the executable in simulate steps
    pub simulate_prelude: Vec<String>,

    /// Phases that receive the translated standard flag
    pub standard_phases: Vec<Phase>,
}

impl BackendDescriptor {
    /// Create a descriptor with no options and default capabilities.
    pub fn new(
        name: impl Into<String>,
        executable: impl Into<String>,
        option_prefix: impl Into<String>,
    ) -> Self {
        BackendDescriptor {
            name: name.into(),
            executable: executable.into(),
            option_prefix: option_prefix.into(),
            capabilities: Capabilities::default(),
            compile_options: Vec::new(),
            simulate_options: Vec::new(),
            compile_prelude: Vec::new(),
            simulate_prelude: Vec::new(),
            standard_phases: vec![Phase::Compile],
        }
    }

    /// Declared options for one phase.
    pub fn options(&self, phase: Phase) -> &[OptionDeclaration] {
        match phase {
            Phase::Compile => &self.compile_options,
            Phase::Simulate => &self.simulate_options,
        }
    }

    /// Fixed tokens for one phase.
    pub fn prelude(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Compile => &self.compile_prelude,
            Phase::Simulate => &self.simulate_prelude,
        }
    }

    /// Check whether a phase receives the standard flag.
    pub fn standard_applies_to(&self, phase: Phase) -> bool {
        self.standard_phases.contains(&phase)
    }
}
