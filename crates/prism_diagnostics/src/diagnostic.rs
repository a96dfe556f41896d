//! Individual diagnostic records.

use crate::severity::{Severity, Stage};
use serde::{Deserialize, Serialize};

/// A source location within a file.
///
/// Line and column are 1-indexed; `0` means unknown. Columns count
/// characters, not bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Location {
    /// One-indexed line number, `0` if unknown.
    pub line: u32,
    /// One-indexed character column, `0` if unknown.
    pub column: u32,
}

impl Location {
    /// A location with unknown line and column.
    pub const UNKNOWN: Location = Location { line: 0, column: 0 };

    /// Creates a location from a 1-indexed line and column.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A structured diagnostic record.
///
/// Records carry the compiler-specific code and originating file path as
/// plain strings because they frequently come from external tools whose
/// vocabularies Prism does not control.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How severe the diagnostic is.
    pub severity: Severity,
    /// The stage that produced it.
    pub stage: Stage,
    /// The diagnostic message.
    pub text: String,
    /// The compiler-specific code, empty if none.
    pub code: String,
    /// The path the diagnostic originated from, empty if none.
    pub file_path: String,
    /// Where in the file the diagnostic points.
    pub location: Location,
}

impl Diagnostic {
    /// Creates a diagnostic with the given severity, stage, and message.
    pub fn new(severity: Severity, stage: Stage, text: impl Into<String>) -> Self {
        Self {
            severity,
            stage,
            text: text.into(),
            code: String::new(),
            file_path: String::new(),
            location: Location::UNKNOWN,
        }
    }

    /// Creates a compile-stage error diagnostic.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, Stage::Compile, text)
    }

    /// Creates a compile-stage warning diagnostic.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, Stage::Compile, text)
    }

    /// Creates a compile-stage informational note.
    pub fn note(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, Stage::Compile, text)
    }

    /// Sets the compiler-specific code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the originating file path and location.
    pub fn with_path(mut self, file_path: impl Into<String>, location: Location) -> Self {
        self.file_path = file_path.into();
        self.location = location;
        self
    }

    /// Sets the originating stage.
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructor() {
        let diag = Diagnostic::error("undefined symbol 'psMain'");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.stage, Stage::Compile);
        assert_eq!(diag.text, "undefined symbol 'psMain'");
        assert!(diag.code.is_empty());
        assert_eq!(diag.location, Location::UNKNOWN);
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning("implicit truncation")
            .with_code("W2301")
            .with_path("shader.hlsl", Location::new(14, 9))
            .with_stage(Stage::Link);
        assert_eq!(diag.code, "W2301");
        assert_eq!(diag.file_path, "shader.hlsl");
        assert_eq!(diag.location.line, 14);
        assert_eq!(diag.stage, Stage::Link);
    }

    #[test]
    fn serde_roundtrip() {
        let diag = Diagnostic::note("generated 3 kernels");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(diag, back);
    }
}
