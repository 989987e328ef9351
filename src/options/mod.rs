//! Typed option system.
//!
//! - **Declarations** - named, typed option slots (in `declaration.rs`)
//! - **Schema** - the declarations of one backend, with naming rules (in `schema.rs`)
//! - **Values** - validated per-run values and their rendering (in `values.rs`)

pub mod declaration;
pub mod schema;
pub mod values;

pub use declaration::{OptionDeclaration, OptionKind, OptionValue, Phase, SourceLanguage};
pub use schema::{OptionError, OptionSchema, PREFIX_SEPARATOR};
pub use values::OptionValues;
