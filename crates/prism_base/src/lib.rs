//! Foundational types shared across the Prism shader compiler back end.
//!
//! This crate provides the immutable [`Blob`] byte buffer used to hand
//! compiled output between stages, and the [`NamePool`] interner backing
//! cheap [`Name`] identifiers for mangled symbols and module names.

#![warn(missing_docs)]

pub mod blob;
pub mod name;

pub use blob::Blob;
pub use name::{Name, NamePool};
