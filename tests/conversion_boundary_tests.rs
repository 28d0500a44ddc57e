//! Decode failures surfacing through the persistence boundary.

use convtrack::core::Result;
use convtrack::{
    Context, Conversion, DataType, Database, FileStore, Mapped, Model, ModelBuilder,
    PropertyMapping, StoreError, StoredValue, TableSchema, ValueComparer,
};
use tempfile::TempDir;

struct Route {
    id: i64,
    stops: Vec<i64>,
}

impl Mapped for Route {
    type Property = Vec<i64>;

    const TABLE: &'static str = "routes";

    fn table_schema() -> TableSchema {
        TableSchema::for_entity(Self::TABLE, "stops", DataType::Text)
    }

    fn property_mapping() -> PropertyMapping<Vec<i64>> {
        PropertyMapping::new(Conversion::json_text()).with_comparer(ValueComparer::sequence())
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn property(&self) -> &Vec<i64> {
        &self.stops
    }

    fn property_mut(&mut self) -> &mut Vec<i64> {
        &mut self.stops
    }

    fn from_parts(id: i64, stops: Vec<i64>) -> Self {
        Self { id, stops }
    }
}

fn model() -> Model {
    ModelBuilder::new().entity::<Route>().build().unwrap()
}

fn seed_stops_column(dir: &TempDir, value: StoredValue) -> Result<std::path::PathBuf> {
    let path = dir.path().join("test.db");
    let mut db = Database::new();
    db.create_table(Route::table_schema())?;
    db.table_mut(Route::TABLE)?
        .insert(vec![StoredValue::Integer(0), value])?;
    FileStore::new(&path).save(&db)?;
    Ok(path)
}

#[test]
fn test_malformed_json_payload_fails_decode() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = seed_stops_column(&dir, StoredValue::Text("[1,2,".into()))?;

    let mut ctx = Context::open(&path, model())?;
    assert!(matches!(
        ctx.single::<Route>(),
        Err(StoreError::Conversion(_))
    ));
    Ok(())
}

#[test]
fn test_null_payload_fails_decode() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = seed_stops_column(&dir, StoredValue::Null)?;

    let mut ctx = Context::open(&path, model())?;
    assert!(matches!(
        ctx.single::<Route>(),
        Err(StoreError::TypeMismatch(_))
    ));
    Ok(())
}

#[test]
fn test_well_formed_payload_round_trips() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = seed_stops_column(&dir, StoredValue::Text("[5,4,3]".into()))?;

    let mut ctx = Context::open(&path, model())?;
    assert_eq!(ctx.single::<Route>()?.stops, vec![5, 4, 3]);
    Ok(())
}

#[test]
fn test_corrupt_store_file_fails_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    std::fs::write(&path, b"garbage").unwrap();

    assert!(matches!(
        Context::open(&path, model()),
        Err(StoreError::Corrupt(_))
    ));
}
