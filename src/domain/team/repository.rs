//! Team repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Persistence for team records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Check whether any team already uses this exact name
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    /// Insert a new team, fails with `Conflict` when the ID is taken
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Insert or overwrite a team
    async fn save(&self, team: Team) -> Result<Team, DomainError>;

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Delete a team by ID, returns true if it existed
    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError>;
}
