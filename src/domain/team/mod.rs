//! Team domain module
//!
//! A team is a named group owned by one or more admins. Ownership lives in
//! the separate [`team_admin`](crate::domain::team_admin) association.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamId};
pub use repository::TeamRepository;
pub use validation::{
    validate_team_id, validate_team_name, TeamValidationError, MAX_TEAM_NAME_LENGTH,
    MIN_TEAM_NAME_LENGTH,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
