//! Concrete materializations of artifact content.

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use prism_base::Blob;
use prism_cast::{Capability, CapabilityId, Castable};
use tempfile::TempPath;

/// An in-memory materialization: the artifact's exact bytes.
pub struct BlobRepresentation {
    blob: Blob,
}

impl BlobRepresentation {
    /// Creates a representation over `blob`.
    pub fn new(blob: Blob) -> Self {
        Self { blob }
    }

    /// Returns the bytes.
    pub fn blob(&self) -> &Blob {
        &self.blob
    }
}

impl Capability for BlobRepresentation {
    const ID: CapabilityId = CapabilityId::from_raw(0x3f8e_61a4_9b02_47dc_8c55_1e97_a6d0_42b9);
}

impl Castable for BlobRepresentation {
    fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
        (id == Self::ID).then_some(self as &dyn Any)
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

enum Backing {
    /// A caller-owned path; never deleted by Prism.
    Reference(PathBuf),
    /// A temp file deleted when the last handle to the representation drops.
    Owned(TempPath),
}

/// A filesystem-path-backed materialization.
///
/// An owned representation wraps a temporary file that is deleted when the
/// representation is released, so temp files materialized by
/// [`Artifact::require_file`](crate::Artifact::require_file) under an
/// ephemeral keep policy clean themselves up. A reference representation
/// points at a caller-managed path and never deletes it.
pub struct FileRepresentation {
    backing: Backing,
}

impl FileRepresentation {
    /// Creates a representation over a caller-managed path.
    pub fn reference(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::Reference(path.into()),
        }
    }

    /// Creates a representation owning a temp file; the file is deleted
    /// when the representation drops.
    pub fn owned(path: TempPath) -> Self {
        Self {
            backing: Backing::Owned(path),
        }
    }

    /// Returns the backing path.
    pub fn path(&self) -> &Path {
        match &self.backing {
            Backing::Reference(path) => path,
            Backing::Owned(path) => path,
        }
    }

    /// Returns `true` if the backing file currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}

impl Capability for FileRepresentation {
    const ID: CapabilityId = CapabilityId::from_raw(0xd2c7_03f1_5a88_4e16_9f3b_76c4_081d_ae52);
}

impl Castable for FileRepresentation {
    fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
        (id == Self::ID).then_some(self as &dyn Any)
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
