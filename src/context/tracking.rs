//! Tracked entries and the snapshot-based dirty check.

use super::model::Mapped;
use crate::core::{Result, StoredValue};
use crate::mapping::PropertyMapping;
use crate::storage::Database;
use log::debug;
use std::any::Any;

/// One tracked entity plus the baseline snapshot its next save is compared
/// against. A `None` baseline marks a newly added entity.
pub(crate) struct Entry<E: Mapped> {
    pub(crate) entity: E,
    pub(crate) baseline: Option<E::Property>,
}

pub(crate) struct TrackedSet<E: Mapped> {
    pub(crate) mapping: PropertyMapping<E::Property>,
    pub(crate) entries: Vec<Entry<E>>,
}

impl<E: Mapped> TrackedSet<E> {
    pub(crate) fn new() -> Self {
        Self {
            mapping: E::property_mapping(),
            entries: Vec::new(),
        }
    }
}

/// Type-erased view of a tracked set, so the context can hold sets for
/// heterogeneous entity types and flush them all on save.
pub(crate) trait AnyTrackedSet {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Writes pending changes for this set into the database. Added entries
    /// are encoded and inserted; existing entries are re-encoded and
    /// updated only when the comparer reports the current value differs
    /// from the baseline. Baselines are refreshed after every write.
    fn flush(&mut self, db: &mut Database) -> Result<usize>;
}

impl<E: Mapped> AnyTrackedSet for TrackedSet<E> {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn flush(&mut self, db: &mut Database) -> Result<usize> {
        let table = db.table_mut(E::TABLE)?;
        let mut written = 0;

        for entry in &mut self.entries {
            match entry.baseline.as_ref() {
                None => {
                    let value = self.mapping.encode(entry.entity.property())?;
                    let id = table.insert(vec![StoredValue::Integer(entry.entity.id()), value])?;
                    entry.entity.set_id(id);
                    entry.baseline = Some(self.mapping.snapshot(entry.entity.property()));
                    written += 1;
                    debug!("inserted '{}' row {}", E::TABLE, id);
                }
                Some(baseline) => {
                    if !self.mapping.changed(baseline, entry.entity.property()) {
                        continue;
                    }
                    let id = entry.entity.id();
                    let value = self.mapping.encode(entry.entity.property())?;
                    table.update(id, vec![StoredValue::Integer(id), value])?;
                    entry.baseline = Some(self.mapping.snapshot(entry.entity.property()));
                    written += 1;
                    debug!("updated '{}' row {}", E::TABLE, id);
                }
            }
        }

        Ok(written)
    }
}
