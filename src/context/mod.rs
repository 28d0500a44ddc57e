//! The persistence boundary: a scoped unit of work that materializes
//! entities, tracks them against baseline snapshots, and writes only what
//! changed.

pub mod model;
mod tracking;

pub use model::{Mapped, Model, ModelBuilder};

use crate::core::{Result, Row, StoreError};
use crate::storage::{Database, FileStore};
use log::info;
use std::any::TypeId;
use std::collections::HashMap;
use std::path::Path;
use tracking::{AnyTrackedSet, Entry, TrackedSet};

/// A scoped unit of work over one store file.
///
/// Entities pass through three stages: transient (constructed in memory),
/// tracked (added to or materialized by a context, with a baseline
/// snapshot of the converted property), and persisted (written by
/// [`Context::save_changes`]). The context is single-threaded and releases
/// everything it holds when dropped.
pub struct Context {
    store: FileStore,
    model: Model,
    db: Database,
    tracked: HashMap<TypeId, Box<dyn AnyTrackedSet>>,
}

impl Context {
    /// Opens a context over the store file at `path`, loading the database
    /// if the file exists and starting from the model's fresh shape
    /// otherwise.
    pub fn open<P: AsRef<Path>>(path: P, model: Model) -> Result<Self> {
        let store = FileStore::new(path);
        let db = match store.load()? {
            Some(db) => db,
            None => model.create_database()?,
        };
        Ok(Self {
            store,
            model,
            db,
            tracked: HashMap::new(),
        })
    }

    /// Deletes the store file and resets the in-memory database and all
    /// tracked state. Returns whether a file was deleted.
    pub fn ensure_deleted(&mut self) -> Result<bool> {
        self.tracked.clear();
        self.db = self.model.create_database()?;
        self.store.ensure_deleted()
    }

    /// Creates the store file with the model's empty tables if it does not
    /// exist yet. Returns whether it was created.
    pub fn ensure_created(&mut self) -> Result<bool> {
        if self.store.exists() {
            return Ok(false);
        }
        self.db = self.model.create_database()?;
        self.store.save(&self.db)?;
        Ok(true)
    }

    /// Starts tracking a transient entity as added. Its identity is
    /// assigned on the next [`Context::save_changes`].
    pub fn add<E: Mapped>(&mut self, entity: E) {
        self.set_mut::<E>().entries.push(Entry {
            entity,
            baseline: None,
        });
    }

    /// Materializes the single row of `E`'s table, takes a baseline
    /// snapshot, and tracks the entity.
    pub fn single<E: Mapped>(&mut self) -> Result<&E> {
        let index = self.track_single::<E>()?;
        Ok(&self.set_mut::<E>().entries[index].entity)
    }

    /// Mutable variant of [`Context::single`], for callers that change the
    /// property in place before saving.
    pub fn single_mut<E: Mapped>(&mut self) -> Result<&mut E> {
        let index = self.track_single::<E>()?;
        Ok(&mut self.set_mut::<E>().entries[index].entity)
    }

    /// Materializes one row by identity and tracks it.
    pub fn find<E: Mapped>(&mut self, id: i64) -> Result<&E> {
        let row = self
            .db
            .table(E::TABLE)?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::EntityNotFound(E::TABLE.to_string()))?;
        let index = self.track_row::<E>(id, row)?;
        Ok(&self.set_mut::<E>().entries[index].entity)
    }

    /// Borrows the single already-tracked entity of type `E`, typically to
    /// mutate it between saves.
    pub fn tracked_single_mut<E: Mapped>(&mut self) -> Result<&mut E> {
        let set = self.set_mut::<E>();
        match set.entries.len() {
            1 => Ok(&mut set.entries[0].entity),
            0 => Err(StoreError::EntityNotFound(E::TABLE.to_string())),
            n => Err(StoreError::MultipleEntities(E::TABLE.to_string(), n)),
        }
    }

    /// Flushes every tracked set and persists the database file when
    /// anything was written. Added entries are inserted; materialized
    /// entries are compared against their baseline snapshot and re-encoded
    /// only on change. Returns the number of written rows.
    pub fn save_changes(&mut self) -> Result<usize> {
        let mut written = 0;
        for set in self.tracked.values_mut() {
            written += set.flush(&mut self.db)?;
        }
        if written > 0 {
            self.store.save(&self.db)?;
        }
        info!("save_changes wrote {} row(s)", written);
        Ok(written)
    }

    fn track_single<E: Mapped>(&mut self) -> Result<usize> {
        let rows = self.db.table(E::TABLE)?.scan();
        if rows.len() > 1 {
            return Err(StoreError::MultipleEntities(E::TABLE.to_string(), rows.len()));
        }
        let Some((id, row)) = rows.into_iter().next() else {
            return Err(StoreError::EntityNotFound(E::TABLE.to_string()));
        };
        self.track_row::<E>(id, row)
    }

    fn track_row<E: Mapped>(&mut self, id: i64, row: Row) -> Result<usize> {
        let value = row.into_iter().nth(1).ok_or_else(|| {
            StoreError::ColumnNotFound("value".to_string(), E::TABLE.to_string())
        })?;
        let set = self.set_mut::<E>();
        let property = set.mapping.decode(&value)?;
        // Baseline taken immediately after materialization.
        let baseline = set.mapping.snapshot(&property);
        set.entries.push(Entry {
            entity: E::from_parts(id, property),
            baseline: Some(baseline),
        });
        Ok(set.entries.len() - 1)
    }

    fn set_mut<E: Mapped>(&mut self) -> &mut TrackedSet<E> {
        self.tracked
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(TrackedSet::<E>::new()))
            .as_any_mut()
            .downcast_mut::<TrackedSet<E>>()
            .expect("tracked sets are keyed by entity TypeId")
    }
}
