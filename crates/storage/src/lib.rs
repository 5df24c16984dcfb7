#![forbid(unsafe_code)]

pub mod fs;
pub mod repository;

pub use fs::FileStore;
pub use repository::{InMemoryStore, KeyValueStore, StorageError};
