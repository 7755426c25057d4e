//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID cannot be empty")]
    EmptyId,

    #[error("Team ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Team ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("Team ID cannot start or end with a hyphen")]
    InvalidIdFormat,

    #[error("Invalid team name. It must be between 3 and 30 characters.")]
    InvalidNameLength,
}

const MAX_TEAM_ID_LENGTH: usize = 50;

pub const MIN_TEAM_NAME_LENGTH: usize = 3;
pub const MAX_TEAM_NAME_LENGTH: usize = 30;

/// Validate a team ID
pub fn validate_team_id(id: &str) -> Result<(), TeamValidationError> {
    if id.is_empty() {
        return Err(TeamValidationError::EmptyId);
    }

    if id.len() > MAX_TEAM_ID_LENGTH {
        return Err(TeamValidationError::IdTooLong(MAX_TEAM_ID_LENGTH));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(TeamValidationError::InvalidIdCharacters);
    }

    if id.starts_with('-') || id.ends_with('-') {
        return Err(TeamValidationError::InvalidIdFormat);
    }

    Ok(())
}

/// Validate a team name: 3 to 30 characters inclusive
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    let length = name.chars().count();

    if !(MIN_TEAM_NAME_LENGTH..=MAX_TEAM_NAME_LENGTH).contains(&length) {
        return Err(TeamValidationError::InvalidNameLength);
    }

    Ok(())
}
