//! Per-unit diagnostic accumulation and summary rendering.

use std::any::Any;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use prism_base::Blob;
use prism_cast::{Capability, CapabilityId, Castable};
use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::severity::{Severity, Stage};

/// The overall outcome of the unit a collection belongs to.
///
/// Negative values indicate failure, mirroring the result-code convention
/// of the external tools whose output lands in collections.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ResultCode(pub i32);

impl ResultCode {
    /// The unit succeeded.
    pub const OK: ResultCode = ResultCode(0);
    /// The unit failed with no more specific code.
    pub const FAIL: ResultCode = ResultCode(-1);

    /// Returns `true` if the code indicates failure.
    pub fn is_failure(self) -> bool {
        self.0 < 0
    }

    /// Returns `true` if the code indicates success.
    pub fn is_ok(self) -> bool {
        !self.is_failure()
    }
}

impl Default for ResultCode {
    fn default() -> Self {
        Self::OK
    }
}

/// Per-severity diagnostic counts for one stage.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StageCounts {
    /// Counts indexed by [`Severity::ordinal`].
    pub by_severity: [usize; Severity::COUNT],
}

impl StageCounts {
    /// Returns the count for one severity.
    pub fn get(&self, severity: Severity) -> usize {
        self.by_severity[severity.ordinal()]
    }

    /// Returns the total across severities.
    pub fn total(&self) -> usize {
        self.by_severity.iter().sum()
    }
}

#[derive(Default)]
struct State {
    diagnostics: Vec<Diagnostic>,
    raw: String,
    result: ResultCode,
}

/// An ordered collection of diagnostics for one compile or link unit.
///
/// Alongside structured records the collection carries a raw-text fallback
/// for diagnostics arriving as opaque external-tool output, and the unit's
/// overall [`ResultCode`]. Diagnostics are a non-fatal channel: warnings
/// and notes accumulate on success paths too, and a hard failure is always
/// signaled through an operation's result, never inferred from content.
///
/// State is mutex-guarded so a shared collection can serve as the
/// deserializer's sink while attached to an artifact as associated
/// metadata. Created per unit and [`reset`](Self::reset) or dropped when
/// the unit is reprocessed.
#[derive(Default)]
pub struct DiagnosticCollection {
    state: Mutex<State>,
}

impl DiagnosticCollection {
    /// Creates an empty collection with an `OK` result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn add(&self, diagnostic: Diagnostic) {
        self.state.lock().unwrap().diagnostics.push(diagnostic);
    }

    /// Returns the diagnostic at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Diagnostic> {
        self.state.lock().unwrap().diagnostics.get(index).cloned()
    }

    /// Returns the number of structured diagnostics.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().diagnostics.len()
    }

    /// Returns `true` if there are no structured diagnostics.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns the diagnostic at `index`, preserving the order
    /// of survivors. Returns `None` if out of bounds.
    pub fn remove_at(&self, index: usize) -> Option<Diagnostic> {
        let mut state = self.state.lock().unwrap();
        (index < state.diagnostics.len()).then(|| state.diagnostics.remove(index))
    }

    /// Returns a snapshot of all structured diagnostics in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.state.lock().unwrap().diagnostics.clone()
    }

    /// Counts diagnostics with severity at least `severity`.
    pub fn count_at_least_severity(&self, severity: Severity) -> usize {
        self.state
            .lock()
            .unwrap()
            .diagnostics
            .iter()
            .filter(|d| d.severity >= severity)
            .count()
    }

    /// Counts diagnostics with exactly `severity`.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.state
            .lock()
            .unwrap()
            .diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns `true` if any diagnostic has severity at least `severity`.
    /// Short-circuits on the first match.
    pub fn has_at_least_severity(&self, severity: Severity) -> bool {
        self.state
            .lock()
            .unwrap()
            .diagnostics
            .iter()
            .any(|d| d.severity >= severity)
    }

    /// Returns per-severity counts restricted to `stage`.
    pub fn count_by_stage(&self, stage: Stage) -> StageCounts {
        let state = self.state.lock().unwrap();
        let mut counts = StageCounts::default();
        for diag in state.diagnostics.iter().filter(|d| d.stage == stage) {
            counts.by_severity[diag.severity.ordinal()] += 1;
        }
        counts
    }

    /// Removes all diagnostics with exactly `severity`, preserving the
    /// order of survivors.
    pub fn remove_by_severity(&self, severity: Severity) {
        self.state
            .lock()
            .unwrap()
            .diagnostics
            .retain(|d| d.severity != severity);
    }

    /// Appends an informational note. Never affects the result code.
    pub fn maybe_add_note(&self, text: impl Into<String>) {
        self.add(Diagnostic::note(text));
    }

    /// Ensures a failing result is never unexplained: if no error-severity
    /// diagnostic exists, appends a generic one. Idempotent.
    pub fn require_error_diagnostic(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.diagnostics.iter().any(|d| d.severity.is_error()) {
            state
                .diagnostics
                .push(Diagnostic::error("an internal error occurred"));
        }
    }

    /// Returns the raw-text fallback.
    pub fn raw(&self) -> String {
        self.state.lock().unwrap().raw.clone()
    }

    /// Sets the raw-text fallback.
    pub fn set_raw(&self, raw: impl Into<String>) {
        self.state.lock().unwrap().raw = raw.into();
    }

    /// Returns the unit's overall result code.
    pub fn result(&self) -> ResultCode {
        self.state.lock().unwrap().result
    }

    /// Sets the unit's overall result code.
    pub fn set_result(&self, result: ResultCode) {
        self.state.lock().unwrap().result = result;
    }

    /// Clears structured records, raw text, and result code together.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = State::default();
    }

    /// Renders a human-readable aggregate with exact per-severity counts.
    pub fn summary(&self) -> Blob {
        let mut out = String::new();
        for severity in Severity::ALL.iter().rev() {
            let count = self.count_by_severity(*severity);
            if count > 0 {
                let plural = if count == 1 { "" } else { "s" };
                let _ = writeln!(out, "{count} {severity} diagnostic{plural}");
            }
        }
        Blob::from(out)
    }

    /// Renders an aggregate that reports only presence per severity.
    pub fn simplified_summary(&self) -> Blob {
        let mut out = String::new();
        for severity in Severity::ALL.iter().rev() {
            if self.count_by_severity(*severity) > 0 {
                let _ = writeln!(out, "{severity} diagnostics present");
            }
        }
        Blob::from(out)
    }
}

impl Capability for DiagnosticCollection {
    const ID: CapabilityId = CapabilityId::from_raw(0x91f9_b857_cd6b_45ca_8e03_8fa3_3c5c_f01a);
}

impl Castable for DiagnosticCollection {
    fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
        (id == Self::ID).then_some(self as &dyn Any)
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiagnosticCollection {
        let collection = DiagnosticCollection::new();
        collection.add(Diagnostic::error("e1"));
        collection.add(Diagnostic::warning("w1"));
        collection.add(Diagnostic::warning("w2").with_stage(Stage::Link));
        collection.add(Diagnostic::note("n1"));
        collection
    }

    #[test]
    fn counts_by_severity() {
        let collection = sample();
        assert_eq!(collection.count_by_severity(Severity::Error), 1);
        assert_eq!(collection.count_by_severity(Severity::Warning), 2);
        assert_eq!(collection.count_by_severity(Severity::Info), 1);
        assert_eq!(collection.count_by_severity(Severity::Unknown), 0);
    }

    #[test]
    fn at_least_severity_is_monotonic() {
        let collection = sample();
        let warnings = collection.count_at_least_severity(Severity::Warning);
        let errors = collection.count_at_least_severity(Severity::Error);
        assert!(warnings >= errors);
        assert_eq!(warnings, 3);
        assert_eq!(errors, 1);
    }

    #[test]
    fn has_at_least_severity() {
        let collection = sample();
        assert!(collection.has_at_least_severity(Severity::Error));
        collection.remove_by_severity(Severity::Error);
        assert!(!collection.has_at_least_severity(Severity::Error));
        assert!(collection.has_at_least_severity(Severity::Warning));
    }

    #[test]
    fn stage_totals_sum_to_collection_total() {
        let collection = sample();
        let compile = collection.count_by_stage(Stage::Compile).total();
        let link = collection.count_by_stage(Stage::Link).total();
        assert_eq!(compile + link, collection.len());
        assert_eq!(link, 1);
    }

    #[test]
    fn stage_counts_index_by_severity() {
        let collection = sample();
        let counts = collection.count_by_stage(Stage::Compile);
        assert_eq!(counts.get(Severity::Error), 1);
        assert_eq!(counts.get(Severity::Warning), 1);
        assert_eq!(counts.get(Severity::Info), 1);
    }

    #[test]
    fn remove_at_preserves_order() {
        let collection = sample();
        collection.remove_at(1);
        assert_eq!(collection.get(0).unwrap().text, "e1");
        assert_eq!(collection.get(1).unwrap().text, "w2");
        assert_eq!(collection.get(2).unwrap().text, "n1");
        assert!(collection.remove_at(9).is_none());
    }

    #[test]
    fn remove_by_severity_preserves_order() {
        let collection = sample();
        collection.remove_by_severity(Severity::Warning);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap().text, "e1");
        assert_eq!(collection.get(1).unwrap().text, "n1");
    }

    #[test]
    fn require_error_diagnostic_is_idempotent() {
        let collection = DiagnosticCollection::new();
        collection.require_error_diagnostic();
        assert_eq!(collection.count_by_severity(Severity::Error), 1);
        collection.require_error_diagnostic();
        collection.require_error_diagnostic();
        assert_eq!(collection.count_by_severity(Severity::Error), 1);
    }

    #[test]
    fn require_error_diagnostic_noop_when_error_exists() {
        let collection = sample();
        collection.require_error_diagnostic();
        assert_eq!(collection.count_by_severity(Severity::Error), 1);
        assert_eq!(collection.get(0).unwrap().text, "e1");
    }

    #[test]
    fn maybe_add_note_leaves_result_untouched() {
        let collection = DiagnosticCollection::new();
        collection.set_result(ResultCode::FAIL);
        collection.maybe_add_note("ignored include path");
        assert_eq!(collection.result(), ResultCode::FAIL);
        assert_eq!(collection.count_by_severity(Severity::Info), 1);
    }

    #[test]
    fn raw_and_reset() {
        let collection = sample();
        collection.set_raw("fxc: unresolved external");
        collection.set_result(ResultCode::FAIL);
        collection.reset();
        assert!(collection.is_empty());
        assert!(collection.raw().is_empty());
        assert_eq!(collection.result(), ResultCode::OK);
    }

    #[test]
    fn summary_counts() {
        let collection = sample();
        let summary = String::from_utf8(collection.summary().as_slice().to_vec()).unwrap();
        assert!(summary.contains("1 error diagnostic\n"));
        assert!(summary.contains("2 warning diagnostics\n"));
        assert!(!summary.contains("unknown"));
    }

    #[test]
    fn simplified_summary_reports_presence_only() {
        let collection = sample();
        let summary =
            String::from_utf8(collection.simplified_summary().as_slice().to_vec()).unwrap();
        assert!(summary.contains("error diagnostics present"));
        assert!(summary.contains("warning diagnostics present"));
        assert!(!summary.contains('2'));
    }

    #[test]
    fn result_code_predicates() {
        assert!(ResultCode::OK.is_ok());
        assert!(ResultCode::FAIL.is_failure());
        assert!(ResultCode(5).is_ok());
        assert!(ResultCode(-7).is_failure());
    }

    #[test]
    fn queryable_as_capability() {
        let collection: Arc<dyn Castable> = Arc::new(sample());
        assert!(collection.query(DiagnosticCollection::ID).is_some());
        let typed = prism_cast::cast_arc::<DiagnosticCollection>(&collection).unwrap();
        assert_eq!(typed.len(), 4);
    }
}
