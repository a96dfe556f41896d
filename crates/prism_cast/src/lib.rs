//! Runtime capability queries over reference-counted objects.
//!
//! Artifacts hold heterogeneous collections of representations and
//! associated metadata. Rather than a static trait hierarchy, every stored
//! object answers a uniform [`Castable::query`] with a [`CapabilityId`],
//! returning a non-owning view of the requested facet or `None`. This crate
//! provides the query traits, the ordered [`CastableList`] container, its
//! allocation-deferring [`LazyCastableList`] variant, and an adapter that
//! lets foreign reference-counted objects ride in the same lists.

#![warn(missing_docs)]

pub mod adapter;
pub mod capability;
pub mod lazy_list;
pub mod list;

pub use adapter::UnknownCastableAdapter;
pub use capability::{cast_arc, Capability, CapabilityId, Castable, Unknown};
pub use lazy_list::LazyCastableList;
pub use list::CastableList;
