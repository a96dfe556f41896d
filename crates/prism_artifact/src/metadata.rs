//! Post-emit reflection metadata riding alongside an artifact.

use std::any::Any;
use std::sync::Arc;

use prism_cast::{Capability, CapabilityId, Castable};
use serde::{Deserialize, Serialize};

/// The resource category of a binding range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BindingCategory {
    /// Constant/uniform buffers.
    ConstantBuffer,
    /// Read-only shader resources (textures, buffers).
    ShaderResource,
    /// Read-write resources.
    UnorderedAccess,
    /// Samplers.
    Sampler,
}

/// A contiguous range of shader resource bindings used by emitted code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BindingRange {
    /// The resource category.
    pub category: BindingCategory,
    /// The register space / descriptor set.
    pub space: u32,
    /// The first register in the range.
    pub register_index: u32,
    /// The number of registers covered.
    pub count: u32,
}

/// Binding metadata produced after code emission.
///
/// Attached to an artifact as associated metadata: it describes the
/// artifact's content but does not materialize it.
pub struct PostEmitMetadata {
    used_binding_ranges: Vec<BindingRange>,
}

impl PostEmitMetadata {
    /// Creates metadata over the given binding ranges.
    pub fn new(used_binding_ranges: Vec<BindingRange>) -> Self {
        Self {
            used_binding_ranges,
        }
    }

    /// Returns the binding ranges used by the emitted code.
    pub fn used_binding_ranges(&self) -> &[BindingRange] {
        &self.used_binding_ranges
    }
}

impl Capability for PostEmitMetadata {
    const ID: CapabilityId = CapabilityId::from_raw(0x5d03_bce9_afb1_4fc8_a46f_3ce0_7b06_1b1b);
}

impl Castable for PostEmitMetadata {
    fn query(&self, id: CapabilityId) -> Option<&dyn Any> {
        (id == Self::ID).then_some(self as &dyn Any)
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_preserved() {
        let meta = PostEmitMetadata::new(vec![BindingRange {
            category: BindingCategory::ShaderResource,
            space: 0,
            register_index: 4,
            count: 2,
        }]);
        assert_eq!(meta.used_binding_ranges().len(), 1);
        assert_eq!(meta.used_binding_ranges()[0].register_index, 4);
    }

    #[test]
    fn queryable_as_capability() {
        let meta: Arc<dyn Castable> = Arc::new(PostEmitMetadata::new(Vec::new()));
        assert!(meta.query(PostEmitMetadata::ID).is_some());
    }
}
