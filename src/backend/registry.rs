//! Backend registry - registration, derivation lineage and selection.
//!
//! Backends are validated when built and frozen when registered. A derived
//! backend can only be registered after its parent, so lineage always
//! forms a tree and is resolved once.

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::backend::arguments::{ArgumentDefinition, ArgumentSink, RecordingSink};
use crate::backend::table::{Backend, BackendAvailability, BackendError};
use crate::backend::{ghdl, incisive, xcelium};

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("backend `{name}` is already registered")]
    DuplicateBackend { name: String },

    #[error("backend `{name}` is derived from `{parent}`, which is not registered")]
    UnknownParent { name: String, parent: String },

    #[error("unknown simulator `{name}`, valid values: {}", .available.join(", "))]
    UnknownBackend {
        name: String,
        available: Vec<String>,
    },

    #[error("no simulator found on PATH, tried: {}", .tried.join(", "))]
    NoneAvailable { tried: Vec<String> },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Registry of simulator backends, in registration order.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: IndexMap<String, Arc<Backend>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in backends.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = BackendRegistry::new();

        let xcelium = registry.register(xcelium::backend()?)?;
        registry.register(incisive::backend(&xcelium)?)?;
        registry.register(ghdl::backend()?)?;

        Ok(registry)
    }

    /// Register a backend. Its parent, if any, must already be registered.
    pub fn register(&mut self, backend: Backend) -> Result<Arc<Backend>, RegistryError> {
        let name = backend.name().to_string();
        if self.backends.contains_key(&name) {
            return Err(RegistryError::DuplicateBackend { name });
        }
        if let Some(parent) = backend.parent() {
            if !self.backends.contains_key(parent) {
                return Err(RegistryError::UnknownParent {
                    name,
                    parent: parent.to_string(),
                });
            }
        }

        tracing::debug!(backend = %name, parent = ?backend.parent(), "registered backend");
        let backend = Arc::new(backend);
        self.backends.insert(name, Arc::clone(&backend));
        Ok(backend)
    }

    /// Get a backend by name.
    pub fn get(&self, name: &str) -> Result<&Arc<Backend>, RegistryError> {
        self.backends
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBackend {
                name: name.to_string(),
                available: self.names().map(String::from).collect(),
            })
    }

    /// Check if a backend is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Registered backend names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.backends.keys().map(String::as_str)
    }

    /// All registered backends, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<Backend>> + '_ {
        self.backends.values()
    }

    /// Get the number of registered backends.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// A backend followed by its ancestors, nearest first.
    pub fn lineage(&self, name: &str) -> Result<Vec<&Arc<Backend>>, RegistryError> {
        let mut chain = vec![self.get(name)?];
        while let Some(parent) = chain.last().copied().and_then(|b| b.parent()) {
            chain.push(self.get(parent)?);
        }
        Ok(chain)
    }

    /// Call every backend's argument hook once.
    pub fn register_arguments(&self, sink: &mut dyn ArgumentSink) {
        for backend in self.backends.values() {
            backend.register_arguments(sink);
        }
    }

    /// Arguments that apply to a backend, including those its ancestors
    /// register on its behalf. Nearest definition wins on a name clash.
    pub fn arguments_for(&self, name: &str) -> Result<Vec<ArgumentDefinition>, RegistryError> {
        let mut definitions: IndexMap<&'static str, ArgumentDefinition> = IndexMap::new();
        for backend in self.lineage(name)? {
            let mut sink = RecordingSink::new();
            backend.register_arguments(&mut sink);
            for definition in sink.into_definitions() {
                definitions.entry(definition.name).or_insert(definition);
            }
        }
        Ok(definitions.into_values().collect())
    }

    /// First registered backend whose executable can be found.
    pub fn detect(&self) -> Result<&Arc<Backend>, RegistryError> {
        self.backends
            .values()
            .find(|backend| backend.availability().is_available())
            .ok_or_else(|| RegistryError::NoneAvailable {
                tried: self
                    .backends
                    .values()
                    .map(|b| b.identity().executable.clone())
                    .collect(),
            })
    }

    /// Select a backend by name, or detect one when no name is given.
    pub fn select(&self, name: Option<&str>) -> Result<&Arc<Backend>, RegistryError> {
        match name {
            Some(name) => self.get(name),
            None => {
                let backend = self.detect()?;
                tracing::info!("auto-detected simulator `{}`", backend.name());
                Ok(backend)
            }
        }
    }
}

/// Summary of a backend for display purposes.
#[derive(Debug, Clone)]
pub struct BackendSummary {
    /// Backend name
    pub name: String,

    /// Executable name
    pub executable: String,

    /// Parent backend, for derived backends
    pub parent: Option<String>,

    /// Availability status
    pub availability: BackendAvailability,

    /// Whether VHDL-2008 contexts are supported
    pub extended_contexts: bool,
}

impl BackendSummary {
    /// Create a summary from a backend.
    pub fn from_backend(backend: &Backend) -> Self {
        BackendSummary {
            name: backend.name().to_string(),
            executable: backend.identity().executable.clone(),
            parent: backend.parent().map(String::from),
            availability: backend.availability(),
            extended_contexts: backend.supports_extended_contexts(),
        }
    }
}

/// Get all backend summaries.
pub fn get_backend_summaries(registry: &BackendRegistry) -> Vec<BackendSummary> {
    registry
        .all()
        .map(|backend| BackendSummary::from_backend(backend))
        .collect()
}
