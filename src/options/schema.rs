//! Per-backend option schema.
//!
//! The schema owns every declaration a backend accepts, keyed by name in
//! declaration order. It is built once at registration and never mutated
//! after the backend is handed to the registry.

use indexmap::IndexMap;
use thiserror::Error;

use crate::options::declaration::{OptionDeclaration, OptionKind, Phase};

/// Separator between a backend's option prefix and the option suffix.
pub const PREFIX_SEPARATOR: char = '.';

/// Option configuration errors.
///
/// All of these are detected before any simulator process is started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option `{name}`")]
    UnknownOption { name: String },

    #[error("option `{name}` expects a {expected}, got a {found}")]
    TypeMismatch {
        name: String,
        expected: OptionKind,
        found: String,
    },

    #[error("option `{name}` is already declared")]
    DuplicateOption { name: String },

    #[error("option `{name}` must be named `{prefix}.<name>`")]
    NamingViolation { name: String, prefix: String },

    #[error("option `{name}` is not declared by backend with prefix `{prefix}`")]
    Schema { name: String, prefix: String },
}

/// Declared options of one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSchema {
    prefix: String,
    declarations: IndexMap<String, OptionDeclaration>,
}

impl OptionSchema {
    /// Create an empty schema whose options must start with `prefix.`.
    pub fn new(prefix: impl Into<String>) -> Self {
        OptionSchema {
            prefix: prefix.into(),
            declarations: IndexMap::new(),
        }
    }

    /// Build a schema from declaration lists, stopping at the first error.
    pub fn from_declarations<'a>(
        prefix: impl Into<String>,
        declarations: impl IntoIterator<Item = &'a OptionDeclaration>,
    ) -> Result<Self, OptionError> {
        let mut schema = OptionSchema::new(prefix);
        for decl in declarations {
            schema.declare(decl.clone())?;
        }
        Ok(schema)
    }

    /// The required option name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register one declaration.
    pub fn declare(&mut self, decl: OptionDeclaration) -> Result<(), OptionError> {
        let suffix = decl
            .name
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix(PREFIX_SEPARATOR));
        if !matches!(suffix, Some(s) if !s.is_empty()) {
            return Err(OptionError::NamingViolation {
                name: decl.name,
                prefix: self.prefix.clone(),
            });
        }

        if self.declarations.contains_key(&decl.name) {
            return Err(OptionError::DuplicateOption { name: decl.name });
        }

        self.declarations.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&OptionDeclaration> {
        self.declarations.get(name)
    }

    /// Check if an option is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Declarations for one phase, in declaration order.
    pub fn for_phase(&self, phase: Phase) -> impl Iterator<Item = &OptionDeclaration> + '_ {
        self.declarations.values().filter(move |d| d.phase == phase)
    }

    /// All declarations, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDeclaration> + '_ {
        self.declarations.values()
    }

    /// Get the number of declared options.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
