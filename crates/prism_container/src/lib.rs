//! Chunked-container serialization of compiled module libraries.
//!
//! A serialized module library travels as a RIFF-style container: tagged,
//! length-prefixed chunks with optional nesting. This crate owns the
//! structural parse ([`Container`]), the write side ([`ContainerWriter`]),
//! the schema records gated by [`SCHEMA_VERSION`], and the deserialization
//! pipeline that turns container bytes (or an [`Artifact`]'s bytes, with
//! caching) into an immutable [`ModuleLibrary`].
//!
//! [`Artifact`]: prism_artifact::Artifact

#![warn(missing_docs)]

pub mod chunk;
pub mod context;
pub mod error;
pub mod library;
pub mod loader;
pub mod schema;

pub use chunk::{Chunk, ChunkBody, ChunkTag, Container, ContainerWriter};
pub use context::{AstBuilder, Linkage, LoadContext, Session, SourceManager};
pub use error::ContainerError;
pub use library::{EntryPoint, IrModule, ModuleLibrary};
pub use loader::{load_module_library, load_module_library_from_artifact};
pub use schema::{EntryPointRecord, ModuleRecord, SCHEMA_VERSION};
