//! Team entity and identifier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_team_id, validate_team_name, TeamValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Team identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team, validating the name
    pub fn new(id: TeamId, name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the name.
    ///
    /// Unlike [`Team::new`], no length check is applied here: renames have
    /// never been validated and callers must not rely on it.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Team {
    type Key = TeamId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_valid() {
        let id = TeamId::new("alpha-squad").unwrap();
        assert_eq!(id.as_str(), "alpha-squad");
    }

    #[test]
    fn test_team_id_invalid() {
        assert!(TeamId::new("").is_err());
        assert!(TeamId::new("-team").is_err());
        assert!(TeamId::new("team_name").is_err());
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = TeamId::generate();
        let b = TeamId::generate();

        assert!(validate_team_id(a.as_str()).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_team_id_deserialization_validates() {
        let ok: Result<TeamId, _> = serde_json::from_str("\"team-1\"");
        assert!(ok.is_ok());

        let bad: Result<TeamId, _> = serde_json::from_str("\"team:1\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_team_creation() {
        let team = Team::new(TeamId::new("team-1").unwrap(), "Alpha").unwrap();

        assert_eq!(team.id().as_str(), "team-1");
        assert_eq!(team.name(), "Alpha");
        assert_eq!(team.created_at(), team.updated_at());
    }

    #[test]
    fn test_team_invalid_name() {
        let id = TeamId::new("team-1").unwrap();
        assert!(Team::new(id.clone(), "ab").is_err());
        assert!(Team::new(id, "x".repeat(31)).is_err());
    }

    #[test]
    fn test_rename_skips_validation() {
        let mut team = Team::new(TeamId::new("team-1").unwrap(), "Alpha").unwrap();
        let original_updated = team.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        team.rename("B");
        assert_eq!(team.name(), "B");
        assert!(team.updated_at() > original_updated);
    }

    #[test]
    fn test_team_serialization() {
        let team = Team::new(TeamId::new("team-1").unwrap(), "Alpha").unwrap();
        let json = serde_json::to_value(&team).unwrap();

        assert_eq!(json["id"], "team-1");
        assert_eq!(json["name"], "Alpha");
        assert!(json.get("created_at").is_some());
    }
}
