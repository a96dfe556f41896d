//! Immutable, cheaply clonable byte buffers.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable byte buffer shared between compilation stages.
///
/// A `Blob` is the unit of content exchanged by artifact representations:
/// kernel binaries, serialized containers, and diagnostic summaries are all
/// handed around as blobs. Cloning is O(1) and never copies the bytes, so a
/// blob can be cached as a representation and returned to callers at the
/// same time.
#[derive(Clone)]
pub struct Blob {
    bytes: Arc<[u8]>,
}

impl Blob {
    /// Creates a blob that takes ownership of `bytes`.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Creates a blob by copying `bytes`.
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the contents as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of bytes in the blob.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the blob contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from(bytes)
    }
}

impl From<String> for Blob {
    fn from(text: String) -> Self {
        Self::from_vec(text.into_bytes())
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Blob {}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob").field("len", &self.len()).finish()
    }
}
