// ============================================================================
// Convtrack Library
// ============================================================================

//! Per-property value conversion and snapshot-based change tracking over a
//! file-backed table store.
//!
//! An application declares, for each entity shape, a table with one
//! identity column and one converted value column, a [`Conversion`]
//! (encode/decode between the in-memory property type and a stored
//! primitive), and optionally a [`ValueComparer`] when structural equality
//! is not enough — e.g. a `Vec` mutated in place, where the persistence
//! boundary must compare a baseline snapshot against the current content
//! element by element.
//!
//! # Example
//!
//! ```
//! use convtrack::{
//!     Context, Conversion, DataType, Mapped, ModelBuilder, PropertyMapping, Result,
//!     TableSchema,
//! };
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Code(i64);
//!
//! struct Account {
//!     id: i64,
//!     code: Code,
//! }
//!
//! impl Mapped for Account {
//!     type Property = Code;
//!
//!     const TABLE: &'static str = "accounts";
//!
//!     fn table_schema() -> TableSchema {
//!         TableSchema::for_entity(Self::TABLE, "code", DataType::Integer)
//!     }
//!
//!     fn property_mapping() -> PropertyMapping<Code> {
//!         PropertyMapping::new(Conversion::integer(|c: &Code| c.0, Code))
//!     }
//!
//!     fn id(&self) -> i64 { self.id }
//!     fn set_id(&mut self, id: i64) { self.id = id; }
//!     fn property(&self) -> &Code { &self.code }
//!     fn property_mut(&mut self) -> &mut Code { &mut self.code }
//!     fn from_parts(id: i64, code: Code) -> Self { Self { id, code } }
//! }
//!
//! fn main() -> Result<()> {
//!     let dir = tempfile::tempdir()?;
//!     let path = dir.path().join("demo.db");
//!     let model = ModelBuilder::new().entity::<Account>().build()?;
//!
//!     let mut ctx = Context::open(&path, model.clone())?;
//!     ctx.ensure_created()?;
//!     ctx.add(Account { id: 0, code: Code(7) });
//!     ctx.save_changes()?;
//!
//!     let mut ctx = Context::open(&path, model)?;
//!     assert_eq!(ctx.single::<Account>()?.code, Code(7));
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod core;
pub mod mapping;
pub mod storage;

// Re-export main types for convenience
pub use context::{Context, Mapped, Model, ModelBuilder};
pub use core::{Column, DataType, Result, Row, StoreError, StoredValue, TableSchema};
pub use mapping::{Conversion, PropertyMapping, ValueComparer};
pub use storage::{Database, FileStore};
