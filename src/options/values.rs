//! Per-run option values.
//!
//! Each run owns its own `OptionValues`. Values are written during the
//! single-threaded configuration phase and only read afterwards, so the
//! store can be shared across workers without locking.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::options::declaration::{OptionKind, OptionValue, Phase, SourceLanguage};
use crate::options::schema::{OptionError, OptionSchema};

/// Validated option values for one backend and one run.
#[derive(Debug, Clone)]
pub struct OptionValues {
    schema: Arc<OptionSchema>,
    values: IndexMap<String, OptionValue>,
}

impl OptionValues {
    /// Create an empty store validated against `schema`.
    pub fn new(schema: Arc<OptionSchema>) -> Self {
        OptionValues {
            schema,
            values: IndexMap::new(),
        }
    }

    /// The schema values are checked against.
    pub fn schema(&self) -> &OptionSchema {
        &self.schema
    }

    /// Store a value, replacing any earlier value for the same name.
    ///
    /// A replaced value keeps the position of the first `set`.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<(), OptionError> {
        let value = value.into();
        let decl = self
            .schema
            .get(name)
            .ok_or_else(|| OptionError::UnknownOption {
                name: name.to_string(),
            })?;

        if !value.matches(decl.kind) {
            return Err(OptionError::TypeMismatch {
                name: name.to_string(),
                expected: decl.kind,
                found: value.shape().to_string(),
            });
        }

        tracing::trace!(option = name, "set option value");
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Store a value read from a TOML configuration file.
    pub fn set_from_toml(&mut self, name: &str, value: &toml::Value) -> Result<(), OptionError> {
        let converted = match value {
            toml::Value::String(s) => OptionValue::String(s.clone()),
            toml::Value::Boolean(b) => OptionValue::Boolean(*b),
            toml::Value::Array(items) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(String::from))
                    .collect();
                match strings {
                    Some(list) => OptionValue::List(list),
                    None => return Err(self.mismatch(name, "array with non-string items")),
                }
            }
            other => return Err(self.mismatch(name, other.type_str())),
        };
        self.set(name, converted)
    }

    /// Store a value given as command-line text, interpreted by the declared kind.
    ///
    /// Lists are split on whitespace; booleans accept the usual spellings.
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<(), OptionError> {
        let kind = self
            .schema
            .get(name)
            .map(|decl| decl.kind)
            .ok_or_else(|| OptionError::UnknownOption {
                name: name.to_string(),
            })?;

        let value = match kind {
            OptionKind::String => OptionValue::String(text.to_string()),
            OptionKind::StringList => {
                OptionValue::List(text.split_whitespace().map(String::from).collect())
            }
            OptionKind::Boolean => match text.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => OptionValue::Boolean(true),
                "false" | "no" | "off" | "0" => OptionValue::Boolean(false),
                _ => return Err(self.mismatch(name, "string")),
            },
        };
        self.set(name, value)
    }

    /// Look up a value.
    ///
    /// Returns `Ok(None)` for a declared option that has not been set, and a
    /// schema error for a name the backend never declared.
    pub fn get(&self, name: &str) -> Result<Option<&OptionValue>, OptionError> {
        if !self.schema.contains(name) {
            return Err(OptionError::Schema {
                name: name.to_string(),
                prefix: self.schema.prefix().to_string(),
            });
        }
        Ok(self.values.get(name))
    }

    /// Every value set for a phase, in the order the options were first set.
    pub fn all_for(&self, phase: Phase) -> IndexMap<&str, &OptionValue> {
        self.values
            .iter()
            .filter(|(name, _)| {
                self.schema
                    .get(name)
                    .is_some_and(|decl| decl.phase == phase)
            })
            .map(|(name, value)| (name.as_str(), value))
            .collect()
    }

    /// Render the values for a phase as command-line tokens.
    ///
    /// Options scoped to another source language are skipped.
    pub fn render(&self, phase: Phase, language: Option<SourceLanguage>) -> Vec<String> {
        self.all_for(phase)
            .into_iter()
            .filter_map(|(name, value)| self.schema.get(name).map(|decl| (decl, value)))
            .filter(|(decl, _)| decl.applies_to(language))
            .flat_map(|(decl, value)| decl.render(value))
            .collect()
    }

    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no value has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn mismatch(&self, name: &str, found: &str) -> OptionError {
        match self.schema.get(name) {
            Some(decl) => OptionError::TypeMismatch {
                name: name.to_string(),
                expected: decl.kind,
                found: found.to_string(),
            },
            None => OptionError::UnknownOption {
                name: name.to_string(),
            },
        }
    }
}
