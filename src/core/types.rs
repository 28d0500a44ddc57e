use super::{DataType, Result, StoreError, StoredValue};
use serde::{Deserialize, Serialize};

pub type Row = Vec<StoredValue>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn validate(&self, value: &StoredValue) -> Result<()> {
        if value.is_null() {
            if !self.nullable {
                return Err(StoreError::ConstraintViolation(format!(
                    "Column '{}' cannot be NULL",
                    self.name
                )));
            }
            return Ok(());
        }

        if !self.data_type.is_compatible(value) {
            return Err(StoreError::TypeMismatch(format!(
                "Column '{}' expects type {}, got {}",
                self.name,
                self.data_type,
                value.type_name()
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn find_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// A named table schema. Mapped entity tables always carry an identity
/// column followed by exactly one converted value column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    schema: Schema,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            schema: Schema::new(columns),
        }
    }

    /// Identity column plus one converted value column, the shape every
    /// mapped entity table has.
    pub fn for_entity(
        name: impl Into<String>,
        value_column: impl Into<String>,
        value_type: DataType,
    ) -> Self {
        Self::new(
            name,
            vec![
                Column::new("id", DataType::Integer).not_null(),
                Column::new(value_column, value_type),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_validation() {
        let col = Column::new("code", DataType::Integer).not_null();
        assert!(col.validate(&StoredValue::Integer(1)).is_ok());
        assert!(col.validate(&StoredValue::Null).is_err());
        assert!(col.validate(&StoredValue::Text("x".into())).is_err());
    }

    #[test]
    fn test_entity_schema_shape() {
        let schema = TableSchema::for_entity("accounts", "code", DataType::Integer);
        assert_eq!(schema.name(), "accounts");
        assert_eq!(schema.schema().column_count(), 2);
        assert_eq!(schema.schema().find_column_index("id"), Some(0));
        assert_eq!(schema.schema().find_column_index("code"), Some(1));
        assert!(!schema.schema().columns()[0].nullable);
    }
}
