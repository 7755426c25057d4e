//! Team-admin association infrastructure

mod repository;

pub use repository::StorageTeamAdminRepository;
