//! Diagnostic classification axes: severity and originating stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a diagnostic, ordered least to most severe.
///
/// The derived `PartialOrd`/`Ord` follows declaration order, so severity
/// comparisons and "at least" counts fall out of the derive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Severity could not be determined (external-tool output).
    Unknown,
    /// An informational note.
    Info,
    /// A potential problem that does not fail the unit.
    Warning,
    /// A definite problem that fails the unit.
    Error,
}

impl Severity {
    /// The number of severity values, used to size per-severity count arrays.
    pub const COUNT: usize = 4;

    /// All severities in ascending order.
    pub const ALL: [Severity; Self::COUNT] = [
        Severity::Unknown,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Returns the ordinal used to index per-severity count arrays.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Unknown => write!(f, "unknown"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// The pipeline stage a diagnostic originated from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Stage {
    /// Produced while compiling a translation unit.
    Compile,
    /// Produced while linking compiled units.
    Link,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Compile => write!(f, "compile"),
            Stage::Link => write!(f, "link"),
        }
    }
}
