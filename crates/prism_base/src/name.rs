//! Interned names for symbols, modules, and entry points.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// An interned name for a symbol, module, or entry point.
///
/// Names are `u32` indices into a [`NamePool`], giving O(1) equality and
/// O(1) cloning. Mangled names and module names produced during container
/// deserialization are interned so that repeated loads of the same library
/// deduplicate their strings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Name(u32);

impl Name {
    /// Creates a `Name` from a raw `u32` index.
    ///
    /// Intended for deserialization and tests; normal code obtains names
    /// through [`NamePool::intern`].
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index of this name.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Name` wraps a `u32`, which always fits in a `usize` on supported
// platforms. `try_from_usize` rejects indices that do not fit in `u32`.
unsafe impl lasso::Key for Name {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Name)
    }
}

/// A thread-safe string interner for [`Name`]s.
///
/// One pool is shared per compilation session; deserialization interns
/// every name it reads through the pool supplied in its load context.
pub struct NamePool {
    rodeo: ThreadedRodeo<Name>,
}

impl NamePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns `s`, returning its [`Name`]. Re-interning an existing string
    /// returns the same name without allocating.
    pub fn intern(&self, s: &str) -> Name {
        self.rodeo.get_or_intern(s)
    }

    /// Resolves a [`Name`] back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the name was not produced by this pool.
    pub fn resolve(&self, name: Name) -> &str {
        self.rodeo.resolve(&name)
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::new()
    }
}
