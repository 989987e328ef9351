//! Backend capability table.
//!
//! A backend is plain data: a [`BackendDescriptor`] plus function pointers
//! for the operations that differ between simulators. Derivation copies a
//! parent's table and replaces selected entries, so every override is an
//! explicit builder call.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::backend::arguments::{no_arguments, ArgumentSink, RegisterArgumentsFn};
use crate::backend::descriptor::BackendDescriptor;
use crate::command::Step;
use crate::options::{
    OptionDeclaration, OptionError, OptionKind, OptionSchema, OptionValues, Phase,
};
use crate::standard::StandardVersion;

/// A valid standard that a backend does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{standard} is not supported by the {backend} simulator")]
pub struct UnsupportedStandard {
    pub backend: String,
    pub standard: StandardVersion,
}

impl UnsupportedStandard {
    /// Create the error for a backend descriptor.
    pub fn new(descriptor: &BackendDescriptor, standard: StandardVersion) -> Self {
        UnsupportedStandard {
            backend: descriptor.name.clone(),
            standard,
        }
    }
}

/// Errors detected while building a backend table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("backend is missing its {field}")]
    MissingIdentity { field: &'static str },

    #[error("backend `{backend}` maps {standard} to an empty flag")]
    EmptyStandardFlag {
        backend: String,
        standard: StandardVersion,
    },

    #[error("option `{name}` of `{backend}` applies to {declared} but is listed under {listed}")]
    MisplacedOption {
        backend: String,
        name: String,
        declared: Phase,
        listed: Phase,
    },

    #[error("{kind} option `{name}` of backend `{backend}` has no flag to render it with")]
    MissingFlag {
        backend: String,
        name: String,
        kind: OptionKind,
    },

    #[error("invalid option declaration in backend `{backend}`")]
    Options {
        backend: String,
        #[source]
        source: OptionError,
    },
}

/// Signature of the standard translation entry.
pub type TranslateStandardFn =
    fn(&BackendDescriptor, StandardVersion) -> Result<String, UnsupportedStandard>;

/// Signature of the step rendering entry.
pub type StepTokensFn = fn(&Step<'_>) -> Vec<String>;

/// Backend availability status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendAvailability {
    /// Executable was found
    Available {
        /// Resolved executable path
        path: PathBuf,
    },

    /// Executable is not on PATH or in the override directory
    NotInstalled {
        /// Name of the missing executable
        executable: String,
        /// Environment variable that can point at the install directory
        hint: String,
    },
}

impl BackendAvailability {
    /// Check if the backend is available.
    pub fn is_available(&self) -> bool {
        matches!(self, BackendAvailability::Available { .. })
    }

    /// Get error message if not available.
    pub fn error_message(&self) -> Option<String> {
        match self {
            BackendAvailability::Available { .. } => None,
            BackendAvailability::NotInstalled { executable, hint } => Some(format!(
                "{} not found on PATH. Set {} to its install directory",
                executable, hint
            )),
        }
    }
}

/// A registered simulator backend.
#[derive(Debug, Clone)]
pub struct Backend {
    descriptor: BackendDescriptor,
    parent: Option<String>,
    schema: Arc<OptionSchema>,
    register_arguments: RegisterArgumentsFn,
    translate_standard: TranslateStandardFn,
    step_tokens: StepTokensFn,
}

impl Backend {
    /// Start a family root from its descriptor and required operations.
    pub fn root(
        descriptor: BackendDescriptor,
        translate_standard: TranslateStandardFn,
        step_tokens: StepTokensFn,
    ) -> BackendBuilder {
        BackendBuilder {
            descriptor,
            parent: None,
            register_arguments: no_arguments,
            translate_standard,
            step_tokens,
        }
    }

    /// Start a backend based on `parent`, inheriting its whole table.
    pub fn derive(parent: &Backend) -> BackendBuilder {
        BackendBuilder {
            descriptor: parent.descriptor.clone(),
            parent: Some(parent.descriptor.name.clone()),
            register_arguments: parent.register_arguments,
            translate_standard: parent.translate_standard,
            step_tokens: parent.step_tokens,
        }
    }

    /// Static identity of this backend.
    pub fn identity(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    /// Backend name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Name of the backend this one was derived from.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Option slots accepted in one phase.
    pub fn declared_options(&self, phase: Phase) -> &[OptionDeclaration] {
        self.descriptor.options(phase)
    }

    /// The validated schema built from both declaration lists.
    pub fn schema(&self) -> &Arc<OptionSchema> {
        &self.schema
    }

    /// Create an empty per-run option store for this backend.
    pub fn new_option_values(&self) -> OptionValues {
        OptionValues::new(Arc::clone(&self.schema))
    }

    /// Contribute backend flags to the front end's parser.
    pub fn register_arguments(&self, sink: &mut dyn ArgumentSink) {
        (self.register_arguments)(sink)
    }

    /// Whether VHDL-2008 contexts are supported.
    pub fn supports_extended_contexts(&self) -> bool {
        self.descriptor.capabilities.extended_contexts
    }

    /// Whether an interactive GUI can be launched.
    pub fn supports_gui(&self) -> bool {
        self.descriptor.capabilities.gui
    }

    /// Translate a standard to the flag text the executable expects.
    pub fn translate_standard(
        &self,
        standard: StandardVersion,
    ) -> Result<String, UnsupportedStandard> {
        (self.translate_standard)(&self.descriptor, standard)
    }

    /// Translate a standard and split the flag text into tokens.
    pub fn standard_tokens(
        &self,
        standard: StandardVersion,
    ) -> Result<Vec<String>, UnsupportedStandard> {
        Ok(self
            .translate_standard(standard)?
            .split_whitespace()
            .map(String::from)
            .collect())
    }

    /// Render step inputs in the executable's syntax.
    pub fn step_tokens(&self, step: &Step<'_>) -> Vec<String> {
        (self.step_tokens)(step)
    }

    /// Look for the executable.
    ///
    /// `HDLSIM_<NAME>_PATH` names a directory searched instead of `PATH`.
    pub fn availability(&self) -> BackendAvailability {
        let hint = format!("HDLSIM_{}_PATH", self.name().to_uppercase().replace('-', "_"));
        let found = match std::env::var_os(&hint) {
            Some(dir) => which::which_in(&self.descriptor.executable, Some(dir), "."),
            None => which::which(&self.descriptor.executable),
        };

        match found {
            Ok(path) => BackendAvailability::Available { path },
            Err(e) => {
                tracing::debug!(backend = self.name(), "executable not found: {}", e);
                BackendAvailability::NotInstalled {
                    executable: self.descriptor.executable.clone(),
                    hint,
                }
            }
        }
    }
}

/// Builder that assembles and validates a backend table.
#[derive(Debug, Clone)]
pub struct BackendBuilder {
    descriptor: BackendDescriptor,
    parent: Option<String>,
    register_arguments: RegisterArgumentsFn,
    translate_standard: TranslateStandardFn,
    step_tokens: StepTokensFn,
}

impl BackendBuilder {
    /// Replace the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.descriptor.name = name.into();
        self
    }

    /// Replace the executable name.
    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.descriptor.executable = executable.into();
        self
    }

    /// Replace the option prefix. Inherited options must then be redeclared.
    pub fn option_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.descriptor.option_prefix = prefix.into();
        self
    }

    /// Replace the whole compile option list.
    pub fn compile_options(mut self, options: Vec<OptionDeclaration>) -> Self {
        self.descriptor.compile_options = options;
        self
    }

    /// Replace the whole simulate option list.
    pub fn simulate_options(mut self, options: Vec<OptionDeclaration>) -> Self {
        self.descriptor.simulate_options = options;
        self
    }

    /// Replace the compile prelude.
    pub fn compile_prelude<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor.compile_prelude = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the simulate prelude.
    pub fn simulate_prelude<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor.simulate_prelude = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the phases that receive the standard flag.
    pub fn standard_phases(mut self, phases: Vec<Phase>) -> Self {
        self.descriptor.standard_phases = phases;
        self
    }

    /// Override the VHDL-2008 context capability.
    pub fn extended_contexts(mut self, supported: bool) -> Self {
        self.descriptor.capabilities.extended_contexts = supported;
        self
    }

    /// Override the GUI capability.
    pub fn gui(mut self, supported: bool) -> Self {
        self.descriptor.capabilities.gui = supported;
        self
    }

    /// Replace the argument registration hook.
    pub fn register_arguments(mut self, hook: RegisterArgumentsFn) -> Self {
        self.register_arguments = hook;
        self
    }

    /// Replace the standard translation.
    pub fn translate_standard(mut self, translate: TranslateStandardFn) -> Self {
        self.translate_standard = translate;
        self
    }

    /// Replace the step rendering.
    pub fn step_tokens(mut self, render: StepTokensFn) -> Self {
        self.step_tokens = render;
        self
    }

    /// Validate the table and produce the backend.
    ///
    /// Checks identity fields, that every option sits in the list of its
    /// own phase and can be rendered, option naming and uniqueness, and that
    /// no standard translates to an empty flag.
    pub fn build(self) -> Result<Backend, BackendError> {
        let descriptor = self.descriptor;
        for (field, value) in [
            ("name", &descriptor.name),
            ("executable", &descriptor.executable),
            ("option prefix", &descriptor.option_prefix),
        ] {
            if value.trim().is_empty() {
                return Err(BackendError::MissingIdentity { field });
            }
        }

        for listed in [Phase::Compile, Phase::Simulate] {
            for decl in descriptor.options(listed) {
                if decl.phase != listed {
                    return Err(BackendError::MisplacedOption {
                        backend: descriptor.name.clone(),
                        name: decl.name.clone(),
                        declared: decl.phase,
                        listed,
                    });
                }
                if decl.kind != OptionKind::StringList && decl.flag.is_none() {
                    return Err(BackendError::MissingFlag {
                        backend: descriptor.name.clone(),
                        name: decl.name.clone(),
                        kind: decl.kind,
                    });
                }
            }
        }

        let schema = OptionSchema::from_declarations(
            descriptor.option_prefix.clone(),
            descriptor
                .compile_options
                .iter()
                .chain(descriptor.simulate_options.iter()),
        )
        .map_err(|source| BackendError::Options {
            backend: descriptor.name.clone(),
            source,
        })?;

        for standard in StandardVersion::ALL {
            if let Ok(flag) = (self.translate_standard)(&descriptor, standard) {
                if flag.trim().is_empty() {
                    return Err(BackendError::EmptyStandardFlag {
                        backend: descriptor.name.clone(),
                        standard,
                    });
                }
            }
        }

        tracing::debug!(
            backend = %descriptor.name,
            parent = self.parent.as_deref().unwrap_or("-"),
            options = schema.len(),
            "built backend table"
        );

        Ok(Backend {
            descriptor,
            parent: self.parent,
            schema: Arc::new(schema),
            register_arguments: self.register_arguments,
            translate_standard: self.translate_standard,
            step_tokens: self.step_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::arguments::{ArgumentDefinition, RecordingSink};

    fn translate(
        descriptor: &BackendDescriptor,
        standard: StandardVersion,
    ) -> Result<String, UnsupportedStandard> {
        match standard {
            StandardVersion::Vhdl1993 => Err(UnsupportedStandard::new(descriptor, standard)),
            StandardVersion::Vhdl2002 => Ok("--std=02".to_string()),
            StandardVersion::Vhdl2008 => Ok("--std=08".to_string()),
        }
    }

    fn step(step: &Step<'_>) -> Vec<String> {
        vec![step.library().to_string()]
    }

    fn args(sink: &mut dyn ArgumentSink) {
        sink.add_argument(ArgumentDefinition::new("work-dir", "Working directory"));
    }

    fn family() -> Backend {
        let mut descriptor = BackendDescriptor::new("family", "famsim", "family");
        descriptor.compile_options = vec![OptionDeclaration::list("family.flags", Phase::Compile)];
        descriptor.simulate_options =
            vec![OptionDeclaration::list("family.sim_flags", Phase::Simulate)];
        Backend::root(descriptor, translate, step)
            .register_arguments(args)
            .build()
            .unwrap()
    }

    #[test]
    fn test_root_defaults() {
        let backend = family();
        assert_eq!(backend.name(), "family");
        assert_eq!(backend.parent(), None);
        assert!(backend.supports_extended_contexts());
        assert!(!backend.supports_gui());
        assert_eq!(backend.schema().len(), 2);
    }

    #[test]
    fn test_translate_reports_backend_and_standard() {
        let backend = family();
        let err = backend.translate_standard(StandardVersion::Vhdl1993).unwrap_err();
        assert_eq!(err.backend, "family");
        assert_eq!(err.standard, StandardVersion::Vhdl1993);
        assert_eq!(
            err.to_string(),
            "VHDL-1993 is not supported by the family simulator"
        );
        assert_eq!(
            backend.standard_tokens(StandardVersion::Vhdl2008).unwrap(),
            vec!["--std=08"]
        );
    }

    #[test]
    fn test_derive_copies_whole_table() {
        let parent = family();
        let child = Backend::derive(&parent)
            .name("child")
            .executable("childsim")
            .build()
            .unwrap();

        assert_eq!(child.parent(), Some("family"));
        assert_eq!(child.identity().executable, "childsim");
        assert_eq!(
            child.declared_options(Phase::Compile),
            parent.declared_options(Phase::Compile)
        );
        assert_eq!(
            child.translate_standard(StandardVersion::Vhdl2002),
            parent.translate_standard(StandardVersion::Vhdl2002)
        );

        let mut sink = RecordingSink::new();
        child.register_arguments(&mut sink);
        assert_eq!(sink.definitions().len(), 1);
    }

    #[test]
    fn test_changed_prefix_requires_redeclared_options() {
        let parent = family();
        let err = Backend::derive(&parent)
            .name("renamed")
            .option_prefix("renamed")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::Options {
                source: OptionError::NamingViolation { .. },
                ..
            }
        ));

        let ok = Backend::derive(&parent)
            .name("renamed")
            .option_prefix("renamed")
            .compile_options(vec![OptionDeclaration::boolean(
                "renamed.debug",
                Phase::Compile,
                "-g",
            )])
            .simulate_options(Vec::new())
            .build()
            .unwrap();
        assert_eq!(ok.schema().get("renamed.debug").unwrap().kind, OptionKind::Boolean);
    }

    #[test]
    fn test_duplicate_across_phases_rejected() {
        let mut descriptor = BackendDescriptor::new("dup", "dup", "dup");
        descriptor.compile_options = vec![OptionDeclaration::list("dup.flags", Phase::Compile)];
        descriptor.simulate_options =
            vec![OptionDeclaration::list("dup.flags", Phase::Simulate)];
        let err = Backend::root(descriptor, translate, step).build().unwrap_err();
        assert!(matches!(
            err,
            BackendError::Options {
                source: OptionError::DuplicateOption { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_option_in_wrong_phase_list_rejected() {
        let mut descriptor = BackendDescriptor::new("p", "p", "p");
        descriptor.compile_options =
            vec![OptionDeclaration::list("p.sim_only", Phase::Simulate)];
        let err = Backend::root(descriptor, translate, step).build().unwrap_err();
        assert_eq!(
            err,
            BackendError::MisplacedOption {
                backend: "p".to_string(),
                name: "p.sim_only".to_string(),
                declared: Phase::Simulate,
                listed: Phase::Compile,
            }
        );

        let mut descriptor = BackendDescriptor::new("p", "p", "p");
        descriptor.simulate_options =
            vec![OptionDeclaration::boolean("p.g", Phase::Compile, "-g")];
        let err = Backend::root(descriptor, translate, step).build().unwrap_err();
        assert!(matches!(
            err,
            BackendError::MisplacedOption {
                listed: Phase::Simulate,
                ..
            }
        ));
    }

    #[test]
    fn test_flagless_scalar_options_rejected() {
        for kind in [OptionKind::Boolean, OptionKind::String] {
            let mut decl = OptionDeclaration::list("p.opt", Phase::Compile);
            decl.kind = kind;
            let mut descriptor = BackendDescriptor::new("p", "p", "p");
            descriptor.compile_options = vec![decl];

            let err = Backend::root(descriptor, translate, step).build().unwrap_err();
            assert_eq!(
                err,
                BackendError::MissingFlag {
                    backend: "p".to_string(),
                    name: "p.opt".to_string(),
                    kind,
                }
            );
        }

        // Lists without a flag pass through verbatim
        let mut descriptor = BackendDescriptor::new("p", "p", "p");
        descriptor.compile_options = vec![OptionDeclaration::list("p.flags", Phase::Compile)];
        assert!(Backend::root(descriptor, translate, step).build().is_ok());
    }

    #[test]
    fn test_empty_standard_flag_rejected() {
        fn blank(_: &BackendDescriptor, _: StandardVersion) -> Result<String, UnsupportedStandard> {
            Ok("  ".to_string())
        }
        let err = Backend::root(BackendDescriptor::new("blank", "blank", "blank"), blank, step)
            .build()
            .unwrap_err();
        assert!(matches!(err, BackendError::EmptyStandardFlag { .. }));
    }

    #[test]
    fn test_missing_identity_rejected() {
        let err = Backend::root(BackendDescriptor::new("x", "", "x"), translate, step)
            .build()
            .unwrap_err();
        assert_eq!(err, BackendError::MissingIdentity { field: "executable" });
    }

    #[test]
    fn test_availability_not_installed() {
        let backend = Backend::root(
            BackendDescriptor::new("nosuch", "hdlsim-test-no-such-simulator", "nosuch"),
            translate,
            step,
        )
        .build()
        .unwrap();

        match backend.availability() {
            BackendAvailability::NotInstalled { executable, hint } => {
                assert_eq!(executable, "hdlsim-test-no-such-simulator");
                assert_eq!(hint, "HDLSIM_NOSUCH_PATH");
            }
            other => panic!("unexpected availability: {:?}", other),
        }
    }
}
