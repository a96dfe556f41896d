//! Ordered, duplicate-tolerant lists of capability objects.

use std::sync::Arc;

use crate::adapter::UnknownCastableAdapter;
use crate::capability::{Capability, CapabilityId, Castable, Unknown};

/// An ordered sequence of capability objects.
///
/// Lists are expected to stay small (an artifact rarely holds more than a
/// handful of representations), so lookups are linear scans. Removal shifts
/// survivors down, preserving their relative order. Duplicates are allowed.
#[derive(Default)]
pub struct CastableList {
    items: Vec<Arc<dyn Castable>>,
}

impl CastableList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of objects in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the object at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<&Arc<dyn Castable>> {
        self.items.get(index)
    }

    /// Appends a capability object.
    pub fn add(&mut self, item: Arc<dyn Castable>) {
        self.items.push(item);
    }

    /// Wraps a foreign object in an [`UnknownCastableAdapter`] and appends it.
    pub fn add_wrapped(&mut self, unknown: Arc<dyn Unknown>) {
        self.items.push(Arc::new(UnknownCastableAdapter::new(unknown)));
    }

    /// Removes and returns the object at `index`, shifting survivors down.
    /// Returns `None` if out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc<dyn Castable>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Empties the list. Backing storage is retained for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the index of `item` by pointer identity.
    pub fn index_of(&self, item: &Arc<dyn Castable>) -> Option<usize> {
        self.items.iter().position(|x| Arc::ptr_eq(x, item))
    }

    /// Returns the index of the adapter wrapping `unknown`, by pointer
    /// identity of the contained object.
    pub fn index_of_unknown(&self, unknown: &Arc<dyn Unknown>) -> Option<usize> {
        self.items.iter().position(|x| {
            x.query(UnknownCastableAdapter::ID)
                .and_then(|facet| facet.downcast_ref::<UnknownCastableAdapter>())
                .is_some_and(|adapter| Arc::ptr_eq(adapter.contained(), unknown))
        })
    }

    /// Returns the first object answering `id`, scanning in order.
    pub fn find(&self, id: CapabilityId) -> Option<&Arc<dyn Castable>> {
        self.items.iter().find(|x| x.query(id).is_some())
    }

    /// Returns the underlying objects in order.
    pub fn items(&self) -> &[Arc<dyn Castable>] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Tagged {
        tag: u32,
    }

    impl Capability for Tagged {
        const ID: CapabilityId = CapabilityId::from_raw(0x9999_8888_7777_6666_5555_4444_3333_2222);
    }

    impl Castable for Tagged {
        fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
            (id == Self::ID).then_some(self as &dyn Any)
        }

        fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    struct Plain;

    impl Unknown for Plain {}

    fn tagged(tag: u32) -> Arc<dyn Castable> {
        Arc::new(Tagged { tag })
    }

    fn tag_at(list: &CastableList, index: usize) -> u32 {
        list.get(index)
            .unwrap()
            .query(Tagged::ID)
            .unwrap()
            .downcast_ref::<Tagged>()
            .unwrap()
            .tag
    }

    #[test]
    fn add_and_get() {
        let mut list = CastableList::new();
        list.add(tagged(1));
        list.add(tagged(2));
        assert_eq!(list.len(), 2);
        assert_eq!(tag_at(&list, 0), 1);
        assert_eq!(tag_at(&list, 1), 2);
        assert!(list.get(2).is_none());
    }

    #[test]
    fn remove_preserves_order() {
        let mut list = CastableList::new();
        for tag in 0..5 {
            list.add(tagged(tag));
        }
        list.remove_at(1);
        list.remove_at(2);
        assert_eq!(list.len(), 3);
        assert_eq!(tag_at(&list, 0), 0);
        assert_eq!(tag_at(&list, 1), 2);
        assert_eq!(tag_at(&list, 2), 4);
    }

    #[test]
    fn remove_out_of_bounds_is_none() {
        let mut list = CastableList::new();
        list.add(tagged(0));
        assert!(list.remove_at(3).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn index_of_uses_identity() {
        let mut list = CastableList::new();
        let a = tagged(1);
        let b = tagged(1);
        list.add(a.clone());
        list.add(b.clone());
        assert_eq!(list.index_of(&a), Some(0));
        assert_eq!(list.index_of(&b), Some(1));
        assert_eq!(list.index_of(&tagged(1)), None);
    }

    #[test]
    fn find_returns_first_match() {
        let mut list = CastableList::new();
        list.add(Arc::new(UnknownCastableAdapter::new(Arc::new(Plain))));
        list.add(tagged(7));
        list.add(tagged(8));
        let found = list.find(Tagged::ID).unwrap();
        let found = found.query(Tagged::ID).unwrap();
        assert_eq!(found.downcast_ref::<Tagged>().unwrap().tag, 7);
    }

    #[test]
    fn find_miss_is_none() {
        let mut list = CastableList::new();
        list.add(tagged(1));
        assert!(list.find(CapabilityId::from_raw(0xbad)).is_none());
    }

    #[test]
    fn add_wrapped_and_index_of_unknown() {
        let mut list = CastableList::new();
        let foreign: Arc<dyn Unknown> = Arc::new(Plain);
        list.add(tagged(0));
        list.add_wrapped(foreign.clone());
        assert_eq!(list.index_of_unknown(&foreign), Some(1));

        let other: Arc<dyn Unknown> = Arc::new(Plain);
        assert_eq!(list.index_of_unknown(&other), None);
    }

    #[test]
    fn clear_empties() {
        let mut list = CastableList::new();
        list.add(tagged(1));
        list.clear();
        assert!(list.is_empty());
        assert!(list.find(Tagged::ID).is_none());
    }
}
