//! Option declarations and values.
//!
//! A declaration is fixed when its backend is registered. Values are
//! created per run and checked against the declaration's kind.

use serde::{Deserialize, Serialize};

/// Which step an option applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Analysis/compilation of source files
    Compile,
    /// Elaboration and simulation of a top-level unit
    Simulate,
}

impl Phase {
    /// Get the phase name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Compile => "compile",
            Phase::Simulate => "simulate",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source language of the files handed to a compile step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    /// VHDL sources (default)
    #[default]
    Vhdl,
    /// Verilog/SystemVerilog sources
    Verilog,
}

impl SourceLanguage {
    /// Guess the language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "vhd" | "vhdl" => Some(SourceLanguage::Vhdl),
            "v" | "vp" | "sv" | "svh" | "vams" => Some(SourceLanguage::Verilog),
            _ => None,
        }
    }

    /// Get the language name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Vhdl => "vhdl",
            SourceLanguage::Verilog => "verilog",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape of the value an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// A single string
    String,
    /// An ordered list of strings
    StringList,
    /// A boolean switch
    Boolean,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKind::String => write!(f, "string"),
            OptionKind::StringList => write!(f, "list of strings"),
            OptionKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// A value bound to an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    List(Vec<String>),
    Boolean(bool),
}

impl OptionValue {
    /// Describe the shape of this value for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            OptionValue::String(_) => "string",
            OptionValue::List(_) => "list of strings",
            OptionValue::Boolean(_) => "boolean",
        }
    }

    /// Check whether this value has the shape a kind expects.
    pub fn matches(&self, kind: OptionKind) -> bool {
        matches!(
            (self, kind),
            (OptionValue::String(_), OptionKind::String)
                | (OptionValue::List(_), OptionKind::StringList)
                | (OptionValue::Boolean(_), OptionKind::Boolean)
        )
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::String(s)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Boolean(b)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(v: Vec<String>) -> Self {
        OptionValue::List(v)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(v: Vec<&str>) -> Self {
        OptionValue::List(v.into_iter().map(String::from).collect())
    }
}

/// A named option slot declared by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDeclaration {
    /// Namespaced name (`<prefix>.<suffix>`)
    pub name: String,
    /// Value shape
    pub kind: OptionKind,
    /// Step the option applies to
    pub phase: Phase,
    /// Token emitted before scalar values, or alone for a true boolean.
    /// Lists without a flag are passed through verbatim.
    pub flag: Option<String>,
    /// Restrict a compile option to one source language (None = all)
    pub language: Option<SourceLanguage>,
    /// One-line description
    pub help: String,
}

impl OptionDeclaration {
    fn new(name: impl Into<String>, kind: OptionKind, phase: Phase) -> Self {
        OptionDeclaration {
            name: name.into(),
            kind,
            phase,
            flag: None,
            language: None,
            help: String::new(),
        }
    }

    /// Declare a single-string option rendered as `flag value`.
    pub fn string(name: impl Into<String>, phase: Phase, flag: impl Into<String>) -> Self {
        Self::new(name, OptionKind::String, phase).with_flag(flag)
    }

    /// Declare a list option whose values are passed through as-is.
    pub fn list(name: impl Into<String>, phase: Phase) -> Self {
        Self::new(name, OptionKind::StringList, phase)
    }

    /// Declare a boolean option rendered as `flag` when true.
    pub fn boolean(name: impl Into<String>, phase: Phase, flag: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Boolean, phase).with_flag(flag)
    }

    /// Set the flag token.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Restrict the option to one source language.
    pub fn for_language(mut self, language: SourceLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Check whether the option applies to sources of the given language.
    pub fn applies_to(&self, language: Option<SourceLanguage>) -> bool {
        match (self.language, language) {
            (None, _) | (_, None) => true,
            (Some(own), Some(requested)) => own == requested,
        }
    }

    /// Render a value as command-line tokens.
    ///
    /// The value is assumed to match `self.kind`; shapes are checked when
    /// the value is stored.
    pub fn render(&self, value: &OptionValue) -> Vec<String> {
        match value {
            OptionValue::String(s) => match &self.flag {
                Some(flag) => vec![flag.clone(), s.clone()],
                None => vec![s.clone()],
            },
            OptionValue::List(items) => match &self.flag {
                Some(flag) => items
                    .iter()
                    .flat_map(|item| [flag.clone(), item.clone()])
                    .collect(),
                None => items.clone(),
            },
            OptionValue::Boolean(true) => self.flag.iter().cloned().collect(),
            OptionValue::Boolean(false) => Vec::new(),
        }
    }
}
