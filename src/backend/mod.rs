//! Simulator backend abstraction.
//!
//! Every simulator adapter is a capability table: a static descriptor plus
//! function pointers for the operations that differ between tools. Related
//! tools share a table through derivation instead of subclassing.
//!
//! # Architecture
//!
//! ```text
//!              ┌──────────────────┐
//!              │  BackendRegistry │  (name -> Arc<Backend>, lineage)
//!              └────────┬─────────┘
//!          ┌────────────┼─────────────┐
//!          ▼            ▼             ▼
//!   ┌────────────┐ ┌────────────┐ ┌────────────┐
//!   │  xcelium   │ │  incisive  │ │    ghdl    │
//!   │   (root)   │◄┤ (derived)  │ │   (root)   │
//!   └────────────┘ └────────────┘ └────────────┘
//! ```
//!
//! # Key Concepts
//!
//! - **Descriptor** - identity, capabilities, option lists (in `descriptor.rs`)
//! - **Table** - the polymorphic operations and derivation (in `table.rs`)
//! - **Arguments** - parser hook contract (in `arguments.rs`)
//! - **Registry** - registration, lineage, selection (in `registry.rs`)
//!
//! # Usage
//!
//! ```ignore
//! use hdlsim::backend::BackendRegistry;
//! use hdlsim::StandardVersion;
//!
//! let registry = BackendRegistry::builtin()?;
//! let incisive = registry.get("incisive")?;
//! assert_eq!(incisive.translate_standard(StandardVersion::Vhdl2008)?, "-v200x -extv200x");
//! ```

pub mod arguments;
pub mod descriptor;
pub mod ghdl;
pub mod incisive;
pub mod registry;
pub mod table;
pub mod xcelium;

pub use arguments::{
    no_arguments, ArgumentDefinition, ArgumentSink, ClapSink, RecordingSink, RegisterArgumentsFn,
};
pub use descriptor::{BackendDescriptor, Capabilities};
pub use registry::{get_backend_summaries, BackendRegistry, BackendSummary, RegistryError};
pub use table::{
    Backend, BackendAvailability, BackendBuilder, BackendError, StepTokensFn, TranslateStandardFn,
    UnsupportedStandard,
};
