//! Per-entity configuration and model building.

use crate::core::{DataType, Result, StoreError, TableSchema};
use crate::mapping::PropertyMapping;
use crate::storage::Database;

/// The configuration an application declares for each persisted entity
/// shape: its table, and how its single value property is converted and
/// compared.
///
/// Every mapped entity has an integer identity (0 until first saved) and
/// exactly one converted property.
pub trait Mapped: Sized + 'static {
    type Property: 'static;

    const TABLE: &'static str;

    fn table_schema() -> TableSchema;

    fn property_mapping() -> PropertyMapping<Self::Property>;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn property(&self) -> &Self::Property;

    fn property_mut(&mut self) -> &mut Self::Property;

    fn from_parts(id: i64, property: Self::Property) -> Self;
}

/// The set of table schemas a context operates over.
#[derive(Debug, Clone)]
pub struct Model {
    tables: Vec<TableSchema>,
}

impl Model {
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub(crate) fn create_database(&self) -> Result<Database> {
        let mut db = Database::new();
        for schema in &self.tables {
            db.create_table(schema.clone())?;
        }
        Ok(db)
    }
}

#[derive(Debug, Default)]
pub struct ModelBuilder {
    tables: Vec<TableSchema>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity<E: Mapped>(mut self) -> Self {
        self.tables.push(E::table_schema());
        self
    }

    pub fn build(self) -> Result<Model> {
        for (i, schema) in self.tables.iter().enumerate() {
            if self.tables[..i].iter().any(|s| s.name() == schema.name()) {
                return Err(StoreError::Model(format!(
                    "table '{}' is mapped more than once",
                    schema.name()
                )));
            }
            validate_entity_schema(schema)?;
        }
        Ok(Model { tables: self.tables })
    }
}

fn validate_entity_schema(schema: &TableSchema) -> Result<()> {
    let columns = schema.schema().columns();
    if columns.len() != 2 {
        return Err(StoreError::Model(format!(
            "table '{}' must have an identity column and one value column",
            schema.name()
        )));
    }
    let id = &columns[0];
    if id.name != "id" || id.data_type != DataType::Integer || id.nullable {
        return Err(StoreError::Model(format!(
            "table '{}' must lead with a NOT NULL INTEGER 'id' column",
            schema.name()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Column;
    use crate::mapping::Conversion;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Code(i64);

    struct Account {
        id: i64,
        code: Code,
    }

    impl Mapped for Account {
        type Property = Code;

        const TABLE: &'static str = "accounts";

        fn table_schema() -> TableSchema {
            TableSchema::for_entity(Self::TABLE, "code", DataType::Integer)
        }

        fn property_mapping() -> PropertyMapping<Code> {
            PropertyMapping::new(Conversion::integer(|c: &Code| c.0, Code))
        }

        fn id(&self) -> i64 {
            self.id
        }

        fn set_id(&mut self, id: i64) {
            self.id = id;
        }

        fn property(&self) -> &Code {
            &self.code
        }

        fn property_mut(&mut self) -> &mut Code {
            &mut self.code
        }

        fn from_parts(id: i64, code: Code) -> Self {
            Self { id, code }
        }
    }

    #[test]
    fn test_builder_collects_entity_tables() {
        let model = ModelBuilder::new().entity::<Account>().build().unwrap();
        assert_eq!(model.tables().len(), 1);
        assert_eq!(model.tables()[0].name(), "accounts");
    }

    #[test]
    fn test_builder_rejects_duplicate_tables() {
        let err = ModelBuilder::new()
            .entity::<Account>()
            .entity::<Account>()
            .build()
            .unwrap_err();
        assert!(matches!(err, StoreError::Model(_)));
    }

    #[test]
    fn test_builder_rejects_bad_identity_column() {
        let mut builder = ModelBuilder::new();
        builder.tables.push(TableSchema::new(
            "bad",
            vec![
                Column::new("id", DataType::Text).not_null(),
                Column::new("code", DataType::Integer),
            ],
        ));
        assert!(matches!(builder.build(), Err(StoreError::Model(_))));
    }
}
