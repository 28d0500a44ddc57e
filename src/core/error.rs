use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Table '{0}' already exists")]
    TableExists(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{0}' not found in table '{1}'")]
    ColumnNotFound(String, String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("No '{0}' entity found")]
    EntityNotFound(String),

    #[error("Expected a single '{0}' entity, found {1}")]
    MultipleEntities(String, usize),

    #[error("Store file is corrupt: {0}")]
    Corrupt(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
