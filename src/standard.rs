//! VHDL language standards.
//!
//! The set is closed: every translation function matches on all members,
//! so adding a standard is a compile error until each backend handles it.

use serde::{Deserialize, Serialize};

/// VHDL standard revision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum StandardVersion {
    /// IEEE 1076-1993
    #[serde(rename = "1993", alias = "93", alias = "vhdl-93", alias = "vhdl-1993")]
    Vhdl1993,
    /// IEEE 1076-2002
    #[serde(rename = "2002", alias = "02", alias = "vhdl-02", alias = "vhdl-2002")]
    Vhdl2002,
    /// IEEE 1076-2008 (default)
    #[default]
    #[serde(rename = "2008", alias = "08", alias = "vhdl-08", alias = "vhdl-2008")]
    Vhdl2008,
}

impl StandardVersion {
    /// Every standard, oldest first.
    pub const ALL: [StandardVersion; 3] = [
        StandardVersion::Vhdl1993,
        StandardVersion::Vhdl2002,
        StandardVersion::Vhdl2008,
    ];

    /// Get the four-digit year of the standard.
    pub fn year(&self) -> &'static str {
        match self {
            StandardVersion::Vhdl1993 => "1993",
            StandardVersion::Vhdl2002 => "2002",
            StandardVersion::Vhdl2008 => "2008",
        }
    }

    /// Get the two-digit short form (e.g., "08").
    pub fn short(&self) -> &'static str {
        match self {
            StandardVersion::Vhdl1993 => "93",
            StandardVersion::Vhdl2002 => "02",
            StandardVersion::Vhdl2008 => "08",
        }
    }
}

impl std::str::FromStr for StandardVersion {
    type Err = StandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let bare = lower.strip_prefix("vhdl-").unwrap_or(&lower);
        match bare {
            "93" | "1993" => Ok(StandardVersion::Vhdl1993),
            "02" | "2002" => Ok(StandardVersion::Vhdl2002),
            "08" | "2008" => Ok(StandardVersion::Vhdl2008),
            _ => Err(StandardParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for StandardVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VHDL-{}", self.year())
    }
}

/// Error returned when text names no known VHDL standard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardParseError(pub String);

impl std::fmt::Display for StandardParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid VHDL standard '{}', valid values: 93, 02, 08, 1993, 2002, 2008",
            self.0
        )
    }
}

impl std::error::Error for StandardParseError {}
