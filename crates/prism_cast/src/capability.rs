//! Capability identifiers and the query traits.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A globally unique token identifying a queryable facet.
///
/// Each capability-bearing type declares one as an associated constant via
/// [`Capability`]. Identifiers are 128-bit constants chosen at random per
/// type, so two independently authored capabilities never collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityId(u128);

impl CapabilityId {
    /// Creates an identifier from its raw 128-bit value.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw 128-bit value.
    pub const fn as_raw(self) -> u128 {
        self.0
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityId({:032x})", self.0)
    }
}

/// Ties a concrete type to the [`CapabilityId`] under which it is found.
///
/// Implemented by every type that can be stored in a castable list and
/// looked up by identifier: representations, associated metadata, and the
/// adapter itself.
pub trait Capability: Any + Send + Sync {
    /// The identifier answering queries for this type.
    const ID: CapabilityId;
}

/// A capability object: identity plus a uniform runtime query.
///
/// `query` returns a borrowed view of the facet matching `id`, or `None` if
/// the object does not support it. The returned pointer never transfers
/// ownership; it is valid for the lifetime of the borrow only.
/// Implementations may consult several sources (their own declared facets,
/// a wrapped foreign object) but must give their own facets priority.
pub trait Castable: Send + Sync + 'static {
    /// Returns the facet identified by `id`, or `None` if unsupported.
    fn query(&self, id: CapabilityId) -> Option<&dyn Any>;

    /// Upcasts a shared handle for typed downcasting. Implementations
    /// return `self`.
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// The query surface of a foreign reference-counted object that does not
/// implement [`Castable`] natively.
///
/// The default implementation supports no facets; foreign objects with a
/// native multi-facet lookup override [`query_facet`](Self::query_facet).
/// Wrap implementors in an
/// [`UnknownCastableAdapter`](crate::UnknownCastableAdapter) to store them
/// in castable lists.
pub trait Unknown: Send + Sync + 'static {
    /// Returns the foreign object's facet for `id`, or `None`.
    fn query_facet(&self, id: CapabilityId) -> Option<&dyn Any> {
        let _ = id;
        None
    }
}

/// Looks up `T`'s capability on a castable and downcasts the shared handle.
///
/// Returns `None` if the object does not answer `T::ID`, or if the facet is
/// provided by a wrapped object rather than the stored one (use
/// [`Castable::query`] directly for those).
pub fn cast_arc<T: Capability>(item: &Arc<dyn Castable>) -> Option<Arc<T>> {
    item.query(T::ID)?;
    item.clone().as_any_arc().downcast::<T>().ok()
}
