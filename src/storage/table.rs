use crate::core::{Result, Row, StoreError, StoredValue, TableSchema};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One table: a schema plus rows keyed by their integer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    schema: TableSchema,
    rows: BTreeMap<i64, Row>,
    next_id: i64,
}

impl Table {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Inserts a row, assigning the next identity when the row carries no
    /// positive id of its own. Returns the row's identity.
    pub fn insert(&mut self, mut row: Row) -> Result<i64> {
        self.validate_row(&row)?;

        let id = match row.first().and_then(StoredValue::as_i64) {
            Some(id) if id > 0 => id,
            _ => self.next_id,
        };
        if self.rows.contains_key(&id) {
            return Err(StoreError::ConstraintViolation(format!(
                "Table '{}' already contains a row with id {}",
                self.schema.name(),
                id
            )));
        }

        row[0] = StoredValue::Integer(id);
        self.next_id = self.next_id.max(id + 1);
        self.rows.insert(id, row);
        Ok(id)
    }

    pub fn update(&mut self, id: i64, mut row: Row) -> Result<()> {
        self.validate_row(&row)?;
        if !self.rows.contains_key(&id) {
            return Err(StoreError::EntityNotFound(self.schema.name().to_string()));
        }
        row[0] = StoredValue::Integer(id);
        self.rows.insert(id, row);
        Ok(())
    }

    pub fn get(&self, id: i64) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn scan(&self) -> Vec<(i64, Row)> {
        self.rows.iter().map(|(id, row)| (*id, row.clone())).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn validate_row(&self, row: &Row) -> Result<()> {
        let columns = self.schema.schema().columns();
        if row.len() != columns.len() {
            return Err(StoreError::ConstraintViolation(format!(
                "Table '{}' expects {} columns, got {}",
                self.schema.name(),
                columns.len(),
                row.len()
            )));
        }
        for (column, value) in columns.iter().zip(row.iter()) {
            column.validate(value)?;
        }
        Ok(())
    }
}

/// The whole store: named tables, serialized to disk as one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    tables: HashMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_table(&mut self, schema: TableSchema) -> Result<()> {
        let name = schema.name().to_string();
        if self.tables.contains_key(&name) {
            return Err(StoreError::TableExists(name));
        }
        self.tables.insert(name, Table::new(schema));
        Ok(())
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
