//! Adapter storing foreign objects in castable lists.

use std::any::Any;
use std::sync::{Arc, Mutex};

use crate::capability::{Capability, CapabilityId, Castable, Unknown};

/// Wraps an [`Unknown`] object so it can live in a castable list.
///
/// The adapter's own facet is checked before the contained object's, so a
/// query for [`UnknownCastableAdapter::ID`] always resolves to the adapter
/// itself. Queries that fall through go to the contained object's
/// [`query_facet`](Unknown::query_facet).
///
/// A single-entry cache remembers the most recent `(id, supported)` pair.
/// Repeated queries for an unsupported identifier short-circuit without
/// re-dispatching; a query for a different identifier replaces the entry.
/// The facet borrow itself cannot outlive a call, so hits re-derive the
/// pointer from the contained object.
pub struct UnknownCastableAdapter {
    contained: Arc<dyn Unknown>,
    memo: Mutex<Option<(CapabilityId, bool)>>,
}

impl UnknownCastableAdapter {
    /// Wraps `contained` in a new adapter.
    pub fn new(contained: Arc<dyn Unknown>) -> Self {
        Self {
            contained,
            memo: Mutex::new(None),
        }
    }

    /// Returns the wrapped foreign object.
    pub fn contained(&self) -> &Arc<dyn Unknown> {
        &self.contained
    }
}

impl Capability for UnknownCastableAdapter {
    const ID: CapabilityId = CapabilityId::from_raw(0x7c4b_92e1_0f6d_4a38_b1a5_d830_6e2f_95c7);
}

impl Castable for UnknownCastableAdapter {
    fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
        // Adapter facets take priority over the contained object's.
        if id == Self::ID {
            return Some(self as &dyn Any);
        }

        if let Some((last, supported)) = *self.memo.lock().unwrap() {
            if last == id && !supported {
                return None;
            }
        }

        let found = self.contained.query_facet(id);
        *self.memo.lock().unwrap() = Some((id, found.is_some()));
        found
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
