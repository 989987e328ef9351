//! Command-line assembly for compile and simulate steps.
//!
//! The assembled [`CommandSpec`] is handed to the process executor as-is.
//! Token order is: executable, phase prelude, standard flag, option
//! values, forwarded backend arguments, step inputs.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::backend::{ArgumentDefinition, Backend, UnsupportedStandard};
use crate::options::{OptionValues, Phase, SourceLanguage};
use crate::standard::StandardVersion;

/// Errors raised while assembling a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Standard(#[from] UnsupportedStandard),

    #[error("compile step for library `{library}` has no source files")]
    NoSources { library: String },

    #[error("compile step mixes {first} and {second} sources; split it per language")]
    MixedLanguages {
        first: SourceLanguage,
        second: SourceLanguage,
    },

    #[error("option values use prefix `{found}`, backend `{backend}` expects `{expected}`")]
    SchemaMismatch {
        backend: String,
        expected: String,
        found: String,
    },
}

/// Inputs of one step, as seen by a backend's step renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Compile sources into a library
    Compile {
        library: &'a str,
        sources: &'a [PathBuf],
    },
    /// Simulate a top-level unit of a library
    Simulate { library: &'a str, top: &'a str },
}

impl Step<'_> {
    /// The work library of the step.
    pub fn library(&self) -> &str {
        match self {
            Step::Compile { library, .. } | Step::Simulate { library, .. } => library,
        }
    }

    /// The phase the step belongs to.
    pub fn phase(&self) -> Phase {
        match self {
            Step::Compile { .. } => Phase::Compile,
            Step::Simulate { .. } => Phase::Simulate,
        }
    }
}

/// A compile request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileStep {
    /// Target library name
    pub library: String,
    /// Source files, in compile order
    pub sources: Vec<PathBuf>,
    /// Source language (None = infer from extensions)
    pub language: Option<SourceLanguage>,
}

impl CompileStep {
    /// Create a compile step.
    pub fn new(library: impl Into<String>, sources: Vec<PathBuf>) -> Self {
        CompileStep {
            library: library.into(),
            sources,
            language: None,
        }
    }

    /// Set the language explicitly.
    pub fn with_language(mut self, language: SourceLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Resolve the source language.
    ///
    /// Files with unknown extensions are treated as VHDL.
    pub fn resolve_language(&self) -> Result<SourceLanguage, CommandError> {
        if let Some(language) = self.language {
            return Ok(language);
        }

        let mut resolved: Option<SourceLanguage> = None;
        for source in &self.sources {
            let language = language_of(source);
            match resolved {
                None => resolved = Some(language),
                Some(first) if first != language => {
                    return Err(CommandError::MixedLanguages {
                        first,
                        second: language,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(resolved.unwrap_or_default())
    }
}

fn language_of(path: &Path) -> SourceLanguage {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceLanguage::from_extension)
        .unwrap_or_default()
}

/// A simulate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateStep {
    /// Library holding the top-level unit
    pub library: String,
    /// Top-level entity or module name
    pub top: String,
}

impl SimulateStep {
    /// Create a simulate step.
    pub fn new(library: impl Into<String>, top: impl Into<String>) -> Self {
        SimulateStep {
            library: library.into(),
            top: top.into(),
        }
    }
}

/// A command to execute, with program and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "xrun")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// The full token list, program first.
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

/// Assembles commands for one backend and one run's option values.
#[derive(Debug, Clone)]
pub struct CommandBuilder<'a> {
    backend: &'a Backend,
    values: &'a OptionValues,
    standard: StandardVersion,
    program: Option<PathBuf>,
    forwarded: Vec<String>,
}

impl<'a> CommandBuilder<'a> {
    /// Create a builder; fails if `values` belong to another backend's schema.
    pub fn new(
        backend: &'a Backend,
        values: &'a OptionValues,
        standard: StandardVersion,
    ) -> Result<Self, CommandError> {
        let expected = &backend.identity().option_prefix;
        if values.schema().prefix() != expected {
            return Err(CommandError::SchemaMismatch {
                backend: backend.name().to_string(),
                expected: expected.clone(),
                found: values.schema().prefix().to_string(),
            });
        }

        Ok(CommandBuilder {
            backend,
            values,
            standard,
            program: None,
            forwarded: Vec::new(),
        })
    }

    /// Use a resolved executable path instead of the bare executable name.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Forward a backend argument value to the simulator.
    pub fn with_argument(mut self, definition: &ArgumentDefinition, value: &str) -> Self {
        self.forwarded.extend(definition.render(value));
        self
    }

    /// Assemble the compile command.
    pub fn compile(&self, step: &CompileStep) -> Result<CommandSpec, CommandError> {
        if step.sources.is_empty() {
            return Err(CommandError::NoSources {
                library: step.library.clone(),
            });
        }
        let language = step.resolve_language()?;

        self.assemble(
            &Step::Compile {
                library: &step.library,
                sources: &step.sources,
            },
            Some(language),
        )
    }

    /// Assemble the simulate command.
    pub fn simulate(&self, step: &SimulateStep) -> Result<CommandSpec, CommandError> {
        self.assemble(
            &Step::Simulate {
                library: &step.library,
                top: &step.top,
            },
            None,
        )
    }

    fn assemble(
        &self,
        step: &Step<'_>,
        language: Option<SourceLanguage>,
    ) -> Result<CommandSpec, CommandError> {
        let phase = step.phase();
        let descriptor = self.backend.identity();
        let program = self
            .program
            .clone()
            .unwrap_or_else(|| PathBuf::from(&descriptor.executable));

        let mut cmd = CommandSpec::new(program).args(descriptor.prelude(phase).iter().cloned());

        // The standard flag only concerns VHDL sources
        let wants_standard = descriptor.standard_applies_to(phase)
            && language.map_or(true, |l| l == SourceLanguage::Vhdl);
        if wants_standard {
            cmd = cmd.args(self.backend.standard_tokens(self.standard)?);
        }

        cmd = cmd
            .args(self.values.render(phase, language))
            .args(self.forwarded.iter().cloned())
            .args(self.backend.step_tokens(step));

        tracing::debug!(backend = self.backend.name(), %phase, "assembled command: {}", cmd);
        Ok(cmd)
    }
}
