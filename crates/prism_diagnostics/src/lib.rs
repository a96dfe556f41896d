//! Structured diagnostics for compile and link stages.
//!
//! A [`DiagnosticCollection`] accumulates [`Diagnostic`] records for one
//! compilation or link unit, alongside an unstructured raw-text fallback
//! for diagnostics arriving as opaque external-tool output and an overall
//! [`ResultCode`]. Collections implement the capability query so they can
//! ride on an artifact as associated metadata.

#![warn(missing_docs)]

pub mod collection;
pub mod diagnostic;
pub mod severity;

pub use collection::{DiagnosticCollection, ResultCode, StageCounts};
pub use diagnostic::{Diagnostic, Location};
pub use severity::{Severity, Stage};
