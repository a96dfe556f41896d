//! The artifact object model of the Prism back end.
//!
//! An [`Artifact`] is a named, described compilation output (a kernel
//! binary, a serialized container, a diagnostic set) that may exist in
//! several interchangeable materializations at once: an in-memory
//! [`BlobRepresentation`], an on-disk [`FileRepresentation`], or a parsed
//! form registered by a downstream loader. Callers ask for the
//! materialization they need ([`Artifact::load_blob`],
//! [`Artifact::require_file`]) and the artifact searches, derives, and,
//! under a caching [`Keep`] policy, remembers the result.

#![warn(missing_docs)]

pub mod artifact;
pub mod desc;
pub mod error;
pub mod keep;
pub mod list;
pub mod metadata;
pub mod representation;

pub use artifact::Artifact;
pub use desc::{ArtifactDesc, ArtifactFlags, ArtifactKind, ArtifactPayload};
pub use error::ArtifactError;
pub use keep::Keep;
pub use list::ArtifactList;
pub use metadata::{BindingCategory, BindingRange, PostEmitMetadata};
pub use representation::{BlobRepresentation, FileRepresentation};
