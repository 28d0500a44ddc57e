//! The on-disk representation: one local file holding the whole database,
//! written atomically via a temp file rename.

use crate::storage::table::Database;
use crate::core::{Result, StoreError};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Option<Database>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.path)
            .map_err(|e| StoreError::Io(format!("Failed to read store file: {}", e)))?;
        let db = rmp_serde::from_slice(&data)
            .map_err(|e| StoreError::Corrupt(format!("Failed to deserialize store file: {}", e)))?;
        debug!("loaded database from {}", self.path.display());
        Ok(Some(db))
    }

    pub fn save(&self, db: &Database) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .map_err(|e| StoreError::Io(format!("Failed to create store directory: {}", e)))?;

        let serialized = rmp_serde::to_vec(db)
            .map_err(|e| StoreError::Io(format!("Failed to serialize database: {}", e)))?;

        let mut temp = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|e| StoreError::Io(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(&serialized)
            .map_err(|e| StoreError::Io(format!("Failed to write store file: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::Io(format!("Failed to sync store file: {}", e)))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::Io(format!("Failed to persist store file: {}", e)))?;
        debug!("saved database to {}", self.path.display());
        Ok(())
    }

    pub fn ensure_deleted(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .map_err(|e| StoreError::Io(format!("Failed to delete store file: {}", e)))?;
        debug!("deleted store file {}", self.path.display());
        Ok(true)
    }
}
