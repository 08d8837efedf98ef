//! SQLite persistence for generated content.

pub mod error;
mod row;
pub mod schema;
mod sqlite;

pub use error::StorageError;
pub use sqlite::ContentStore;
