//! Team-admin association domain module
//!
//! Records which admin holds which role in which team. The admin that
//! creates a team always receives an active `Owner` association.

mod entity;
mod repository;

pub use entity::{TeamAdmin, TeamAdminKey, TeamRole};
pub use repository::TeamAdminRepository;

#[cfg(test)]
pub use repository::MockTeamAdminRepository;
