//! Storage domain - Generic persistence abstraction shared by the repositories

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;
