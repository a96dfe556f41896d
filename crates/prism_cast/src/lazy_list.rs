//! Castable lists that defer allocation until first insertion.

use std::sync::Arc;

use crate::capability::{CapabilityId, Castable, Unknown};
use crate::list::CastableList;

/// A castable list whose backing storage is absent until the first `add`.
///
/// Most artifacts carry no associated metadata and at most one
/// representation, so the default state allocates nothing. Queries against
/// an unallocated list report empty results without creating storage.
///
/// `clear` retains allocated storage for reuse; `clear_and_deallocate`
/// releases it, returning the list to its initial state.
#[derive(Default)]
pub struct LazyCastableList {
    inner: Option<CastableList>,
}

impl LazyCastableList {
    /// Creates a list with no backing storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the backing list, allocating it if absent.
    pub fn require_list(&mut self) -> &mut CastableList {
        self.inner.get_or_insert_with(CastableList::new)
    }

    /// Returns the backing list if it has been allocated.
    pub fn get_list(&self) -> Option<&CastableList> {
        self.inner.as_ref()
    }

    /// Appends a capability object, allocating storage on first use.
    pub fn add(&mut self, item: Arc<dyn Castable>) {
        self.require_list().add(item);
    }

    /// Wraps a foreign object in an adapter and appends it.
    pub fn add_wrapped(&mut self, unknown: Arc<dyn Unknown>) {
        self.require_list().add_wrapped(unknown);
    }

    /// Returns the number of stored objects; zero when unallocated.
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, CastableList::len)
    }

    /// Returns `true` if no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the object at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<&Arc<dyn Castable>> {
        self.inner.as_ref().and_then(|list| list.get(index))
    }

    /// Removes and returns the object at `index`, preserving survivor order.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc<dyn Castable>> {
        self.inner.as_mut().and_then(|list| list.remove_at(index))
    }

    /// Empties the list while keeping any allocated storage.
    pub fn clear(&mut self) {
        if let Some(list) = self.inner.as_mut() {
            list.clear();
        }
    }

    /// Empties the list and releases its backing storage.
    pub fn clear_and_deallocate(&mut self) {
        self.inner = None;
    }

    /// Returns the index of `item` by pointer identity.
    pub fn index_of(&self, item: &Arc<dyn Castable>) -> Option<usize> {
        self.inner.as_ref().and_then(|list| list.index_of(item))
    }

    /// Returns the first object answering `id`, without allocating.
    pub fn find(&self, id: CapabilityId) -> Option<&Arc<dyn Castable>> {
        self.inner.as_ref().and_then(|list| list.find(id))
    }

    /// Returns the stored objects in order; empty when unallocated.
    pub fn items(&self) -> &[Arc<dyn Castable>] {
        self.inner.as_ref().map_or(&[], CastableList::items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;
    use std::any::Any;

    struct Marker;

    impl Capability for Marker {
        const ID: CapabilityId = CapabilityId::from_raw(0x0f0f_1e1e_2d2d_3c3c_4b4b_5a5a_6969_7878);
    }

    impl Castable for Marker {
        fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
            (id == Self::ID).then_some(self as &dyn Any)
        }

        fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    #[test]
    fn empty_list_has_no_storage() {
        let list = LazyCastableList::new();
        assert_eq!(list.len(), 0);
        assert!(list.find(Marker::ID).is_none());
        assert!(list.items().is_empty());
        // Querying must not have allocated anything.
        assert!(list.get_list().is_none());
    }

    #[test]
    fn first_add_allocates() {
        let mut list = LazyCastableList::new();
        list.add(Arc::new(Marker));
        assert!(list.get_list().is_some());
        assert_eq!(list.len(), 1);
        assert!(list.find(Marker::ID).is_some());
    }

    #[test]
    fn clear_keeps_storage() {
        let mut list = LazyCastableList::new();
        list.add(Arc::new(Marker));
        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.get_list().is_some());
    }

    #[test]
    fn clear_and_deallocate_releases_storage() {
        let mut list = LazyCastableList::new();
        list.add(Arc::new(Marker));
        list.clear_and_deallocate();
        assert_eq!(list.len(), 0);
        assert!(list.get_list().is_none());
    }

    #[test]
    fn require_list_on_empty_allocates_empty() {
        let mut list = LazyCastableList::new();
        assert!(list.require_list().is_empty());
        assert!(list.get_list().is_some());
    }

    #[test]
    fn remove_preserves_order() {
        let mut list = LazyCastableList::new();
        let a: Arc<dyn Castable> = Arc::new(Marker);
        let b: Arc<dyn Castable> = Arc::new(Marker);
        let c: Arc<dyn Castable> = Arc::new(Marker);
        list.add(a.clone());
        list.add(b);
        list.add(c.clone());
        list.remove_at(1);
        assert_eq!(list.index_of(&a), Some(0));
        assert_eq!(list.index_of(&c), Some(1));
    }
}
