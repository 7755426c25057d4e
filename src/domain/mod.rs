//! Domain layer - Core business entities and repository contracts

pub mod error;
pub mod storage;
pub mod team;
pub mod team_admin;

pub use error::DomainError;
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{Team, TeamId, TeamRepository};
pub use team_admin::{TeamAdmin, TeamAdminRepository, TeamRole};
