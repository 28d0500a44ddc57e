use serde::{Deserialize, Serialize};
use std::fmt;

/// A storage-representable primitive. Converted properties always land in
/// one of these variants before a row is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoredValue {
    Null,
    Integer(i64),
    Text(String),
}

impl StoredValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "INTEGER",
            Self::Text(_) => "TEXT",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for StoredValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<String> for StoredValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for StoredValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    pub fn is_compatible(&self, value: &StoredValue) -> bool {
        match (self, value) {
            (_, StoredValue::Null) => true,
            (Self::Integer, StoredValue::Integer(_)) => true,
            (Self::Text, StoredValue::Text(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "INTEGER"),
            Self::Text => write!(f, "TEXT"),
        }
    }
}
