//! The in-memory result of deserializing a container.

use std::any::Any;
use std::sync::Arc;

use prism_base::{Blob, Name};
use prism_cast::{Capability, CapabilityId, Castable};

/// A parsed IR module reconstructed from a container.
#[derive(Clone, Debug)]
pub struct IrModule {
    /// The module's interned name.
    pub name: Name,
    /// The module's IR payload.
    pub ir: Blob,
}

/// An entry-point descriptor reconstructed from a container.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EntryPoint {
    /// The target-level mangled name.
    pub mangled_name: String,
    /// The interned source-level name.
    pub name: Name,
    /// The target profile, e.g. `cs_6_0`.
    pub profile: String,
}

/// An immutable library of parsed modules and entry points.
///
/// Created exactly once per successful deserialization. A library can be
/// attached to the artifact it was derived from as a representation, which
/// is how the artifact-backed loader short-circuits repeat loads.
pub struct ModuleLibrary {
    modules: Vec<IrModule>,
    entry_points: Vec<EntryPoint>,
}

impl ModuleLibrary {
    /// Assembles a library from parsed modules and entry points.
    pub fn new(modules: Vec<IrModule>, entry_points: Vec<EntryPoint>) -> Self {
        Self {
            modules,
            entry_points,
        }
    }

    /// Returns the parsed modules in container order.
    pub fn modules(&self) -> &[IrModule] {
        &self.modules
    }

    /// Returns the entry-point descriptors in container order.
    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }
}

impl Capability for ModuleLibrary {
    const ID: CapabilityId = CapabilityId::from_raw(0x2f7a_55c8_13d9_4b60_ae84_0c1f_b972_d4e6);
}

impl Castable for ModuleLibrary {
    fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
        (id == Self::ID).then_some(self as &dyn Any)
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
