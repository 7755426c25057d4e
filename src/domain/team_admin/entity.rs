//! Team-admin association entity

use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// Role an admin holds within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TeamRole {
    /// Full control, including rename and deletion
    Owner,
    #[default]
    Member,
}

impl TeamRole {
    pub fn can_manage_team(&self) -> bool {
        matches!(self, Self::Owner)
    }
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "Owner"),
            Self::Member => write!(f, "Member"),
        }
    }
}

/// Storage key of an association: `{team_id}:{admin_id}`.
///
/// Team IDs never contain `:`, so the first colon always separates the two parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamAdminKey(String);

impl TeamAdminKey {
    pub fn new(team_id: &TeamId, admin_id: &str) -> Self {
        Self(format!("{}:{}", team_id.as_str(), admin_id))
    }
}

impl StorageKey for TeamAdminKey {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Links an admin account to a team with a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TeamAdminRecord")]
pub struct TeamAdmin {
    #[serde(skip_serializing)]
    key: TeamAdminKey,
    admin_id: String,
    team_id: TeamId,
    role: TeamRole,
    active: bool,
}

impl TeamAdmin {
    pub fn new(admin_id: impl Into<String>, team_id: TeamId, role: TeamRole, active: bool) -> Self {
        let admin_id = admin_id.into();

        Self {
            key: TeamAdminKey::new(&team_id, &admin_id),
            admin_id,
            team_id,
            role,
            active,
        }
    }

    /// Active owner association, as created alongside a new team
    pub fn owner(admin_id: impl Into<String>, team_id: TeamId) -> Self {
        Self::new(admin_id, team_id, TeamRole::Owner, true)
    }

    pub fn admin_id(&self) -> &str {
        &self.admin_id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn role(&self) -> TeamRole {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True when `admin_id` owns `team_id` through this association
    pub fn is_owner_of(&self, admin_id: &str, team_id: &TeamId) -> bool {
        self.admin_id == admin_id && &self.team_id == team_id && self.role.can_manage_team()
    }
}

impl StorageEntity for TeamAdmin {
    type Key = TeamAdminKey;

    fn key(&self) -> &Self::Key {
        &self.key
    }
}

/// Serialized form of [`TeamAdmin`]; the key is rebuilt on load
#[derive(Deserialize)]
struct TeamAdminRecord {
    admin_id: String,
    team_id: TeamId,
    role: TeamRole,
    active: bool,
}

impl From<TeamAdminRecord> for TeamAdmin {
    fn from(record: TeamAdminRecord) -> Self {
        Self::new(record.admin_id, record.team_id, record.role, record.active)
    }
}
