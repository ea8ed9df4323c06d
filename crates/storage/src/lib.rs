#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, MASTERED_IDS_KEY, MasteryRepository, Storage, StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
