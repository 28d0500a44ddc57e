pub mod comparer;
pub mod conversion;

pub use comparer::ValueComparer;
pub use conversion::Conversion;

use crate::core::{Result, StoredValue};
use std::hash::Hash;

/// The full per-property mapping: how the value is converted to and from
/// its stored primitive, and how changes to it are detected.
pub struct PropertyMapping<M> {
    conversion: Conversion<M>,
    comparer: ValueComparer<M>,
}

impl<M> PropertyMapping<M> {
    pub fn new(conversion: Conversion<M>) -> Self
    where
        M: PartialEq + Hash + Clone + 'static,
    {
        Self {
            conversion,
            comparer: ValueComparer::structural(),
        }
    }

    /// Overrides the structural default, e.g. with a sequence comparer for
    /// a collection mutated in place.
    pub fn with_comparer(mut self, comparer: ValueComparer<M>) -> Self {
        self.comparer = comparer;
        self
    }

    pub fn encode(&self, model: &M) -> Result<StoredValue> {
        self.conversion.encode(model)
    }

    pub fn decode(&self, value: &StoredValue) -> Result<M> {
        self.conversion.decode(value)
    }

    pub fn snapshot(&self, value: &M) -> M {
        self.comparer.snapshot(value)
    }

    pub fn changed(&self, baseline: &M, current: &M) -> bool {
        self.comparer.changed(baseline, current)
    }
}
