//! hdlsim - simulator backend abstraction for an HDL test runner
//!
//! This crate provides the backend capability tables, the typed option
//! system and the command assembly used to drive several HDL simulators
//! through one contract.

pub mod backend;
pub mod command;
pub mod options;
pub mod standard;
pub mod util;

pub use backend::{Backend, BackendDescriptor, BackendRegistry, UnsupportedStandard};
pub use command::{CommandBuilder, CommandSpec, CompileStep, SimulateStep};
pub use options::{OptionDeclaration, OptionError, OptionKind, OptionValue, OptionValues, Phase};
pub use standard::StandardVersion;
pub use util::RunConfig;
