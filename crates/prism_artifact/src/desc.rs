//! Artifact descriptors: what an artifact is, independent of how it is
//! currently materialized.

use serde::{Deserialize, Serialize};

/// The structural kind of an artifact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Kind could not be determined.
    Unknown,
    /// A chunked container holding other artifacts or serialized modules.
    Container,
    /// Human-readable text.
    Text,
    /// An opaque binary.
    Binary,
    /// Relocatable object code.
    ObjectCode,
    /// A runnable executable.
    Executable,
    /// A shared library / DLL.
    SharedLibrary,
    /// A static library.
    Library,
}

/// What the artifact's content actually is, for a given kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ArtifactPayload {
    /// Payload could not be determined.
    Unknown,
    /// The artifact deliberately has no content.
    None,
    /// DXIL kernel code.
    Dxil,
    /// SPIR-V kernel code.
    SpirV,
    /// PTX kernel code.
    Ptx,
    /// A Metal library.
    MetalLib,
    /// Source text.
    Source,
    /// Diagnostic output.
    Diagnostics,
    /// Reflection or binding metadata.
    Metadata,
    /// A serialized compiled module (IR container payload).
    CompiledModule,
}

/// Flag bits qualifying a descriptor. No flags are currently defined.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct ArtifactFlags(pub u32);

impl ArtifactFlags {
    /// No flags set.
    pub const NONE: ArtifactFlags = ArtifactFlags(0);
}

/// An immutable classification of an artifact, set once at construction.
///
/// The descriptor says what the artifact *is*; representations say how it
/// is currently materialized.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ArtifactDesc {
    /// The structural kind.
    pub kind: ArtifactKind,
    /// The content classification.
    pub payload: ArtifactPayload,
    /// Qualifying flags.
    pub flags: ArtifactFlags,
}

impl ArtifactDesc {
    /// Creates a descriptor with no flags.
    pub fn new(kind: ArtifactKind, payload: ArtifactPayload) -> Self {
        Self {
            kind,
            payload,
            flags: ArtifactFlags::NONE,
        }
    }
}
