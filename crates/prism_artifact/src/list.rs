//! Owned, ordered sequences of artifacts.

use std::sync::{Arc, Mutex, Weak};

use crate::artifact::Artifact;

/// An owned, ordered sequence of artifacts with a weak link to the
/// artifact that owns the list.
///
/// Ownership runs from the list to its members; `add` points each member's
/// parent back at the list's owner. Removal clears a member's parent only
/// if it still points at this list's owner, so a parent pointer reassigned
/// by another list in the meantime is never clobbered.
pub struct ArtifactList {
    parent: Mutex<Weak<Artifact>>,
    items: Mutex<Vec<Arc<Artifact>>>,
}

impl ArtifactList {
    /// Creates an empty list with no owning artifact.
    pub fn new() -> Self {
        Self {
            parent: Mutex::new(Weak::new()),
            items: Mutex::new(Vec::new()),
        }
    }

    /// Creates an empty list owned by `parent`.
    pub fn with_parent(parent: &Arc<Artifact>) -> Self {
        Self {
            parent: Mutex::new(Arc::downgrade(parent)),
            items: Mutex::new(Vec::new()),
        }
    }

    /// Returns the owning artifact, if set and still alive.
    pub fn parent(&self) -> Option<Arc<Artifact>> {
        self.parent.lock().unwrap().upgrade()
    }

    /// Returns the number of artifacts in the list.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Returns the artifact at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Arc<Artifact>> {
        self.items.lock().unwrap().get(index).cloned()
    }

    /// Appends `artifact` and points its parent at this list's owner.
    pub fn add(&self, artifact: Arc<Artifact>) {
        artifact.set_parent(self.parent.lock().unwrap().clone());
        self.items.lock().unwrap().push(artifact);
    }

    /// Removes and returns the artifact at `index`, preserving the order
    /// of survivors and clearing the removed artifact's parent if it still
    /// points here. Returns `None` if out of bounds.
    pub fn remove_at(&self, index: usize) -> Option<Arc<Artifact>> {
        let removed = {
            let mut items = self.items.lock().unwrap();
            (index < items.len()).then(|| items.remove(index))?
        };
        removed.clear_parent_if(&self.parent.lock().unwrap());
        Some(removed)
    }

    /// Empties the list, clearing each member's parent if it still points
    /// here.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.items.lock().unwrap());
        let owner = self.parent.lock().unwrap().clone();
        for artifact in drained {
            artifact.clear_parent_if(&owner);
        }
    }

    /// Returns a snapshot of the artifacts in order.
    pub fn items(&self) -> Vec<Arc<Artifact>> {
        self.items.lock().unwrap().clone()
    }
}

impl Default for ArtifactList {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ArtifactList {
    fn drop(&mut self) {
        self.clear();
    }
}
