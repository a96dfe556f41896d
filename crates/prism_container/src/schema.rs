//! Schema records carried inside container chunks.
//!
//! The structural layer knows only tags and lengths; this module owns the
//! chunk vocabulary and the bincode-encoded records. A container's first
//! child must be a [`TAG_VERSION`] chunk matching [`SCHEMA_VERSION`];
//! module and entry-point records follow in any order, optionally grouped
//! under list chunks.

use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkTag, ContainerWriter};
use crate::error::ContainerError;

/// Current schema version. Increment on breaking record changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Tag of the schema-version chunk (4-byte little-endian version).
pub const TAG_VERSION: ChunkTag = ChunkTag(*b"VERS");

/// Tag of a serialized module record.
pub const TAG_MODULE: ChunkTag = ChunkTag(*b"MODL");

/// Tag of a serialized entry-point record.
pub const TAG_ENTRY_POINT: ChunkTag = ChunkTag(*b"ENTR");

/// A serialized IR module.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// The module's name.
    pub name: String,
    /// The path of the source the module was compiled from, empty if
    /// unknown.
    pub source_path: String,
    /// The module's serialized IR.
    pub ir: Vec<u8>,
}

/// A serialized entry-point descriptor.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EntryPointRecord {
    /// The target-level mangled name.
    pub mangled_name: String,
    /// The source-level name.
    pub name: String,
    /// The target profile, e.g. `cs_6_0`.
    pub profile: String,
}

pub(crate) fn encode_record<T: Serialize>(record: &T) -> Result<Vec<u8>, ContainerError> {
    bincode::serde::encode_to_vec(record, bincode::config::standard()).map_err(|e| {
        ContainerError::Schema {
            reason: format!("failed to encode record: {e}"),
        }
    })
}

pub(crate) fn decode_record<T: for<'de> Deserialize<'de>>(
    tag: ChunkTag,
    payload: &[u8],
) -> Result<T, ContainerError> {
    bincode::serde::decode_from_slice(payload, bincode::config::standard())
        .map(|(record, _)| record)
        .map_err(|e| ContainerError::Schema {
            reason: format!("undecodable '{tag}' record: {e}"),
        })
}

/// Serializes a module library into container bytes.
///
/// The inverse of [`load_module_library`](crate::load_module_library): a
/// version chunk followed by one chunk per module and entry point.
pub fn write_module_library(
    modules: &[ModuleRecord],
    entry_points: &[EntryPointRecord],
) -> Result<Vec<u8>, ContainerError> {
    let mut writer = ContainerWriter::new();
    writer.chunk(TAG_VERSION, &SCHEMA_VERSION.to_le_bytes());
    for module in modules {
        writer.chunk(TAG_MODULE, &encode_record(module)?);
    }
    for entry_point in entry_points {
        writer.chunk(TAG_ENTRY_POINT, &encode_record(entry_point)?);
    }
    Ok(writer.finish())
}
