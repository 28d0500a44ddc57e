pub mod file;
pub mod table;

pub use file::FileStore;
pub use table::{Database, Table};
