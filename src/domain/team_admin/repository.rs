//! Team-admin association repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::TeamAdmin;
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Persistence for (admin, team, role, active) associations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamAdminRepository: Send + Sync {
    /// Insert or overwrite an association
    async fn save(&self, association: TeamAdmin) -> Result<TeamAdmin, DomainError>;

    /// All associations attached to a team
    async fn find_by_team_id(&self, team_id: &TeamId) -> Result<Vec<TeamAdmin>, DomainError>;

    async fn find_by_admin_and_team(
        &self,
        admin_id: &str,
        team_id: &TeamId,
    ) -> Result<Option<TeamAdmin>, DomainError>;

    /// All associations held by an admin, in team ID order
    async fn find_all_by_admin_id(&self, admin_id: &str) -> Result<Vec<TeamAdmin>, DomainError>;

    /// Remove every association of a team, returns how many were removed
    async fn delete_by_team_id(&self, team_id: &TeamId) -> Result<usize, DomainError>;
}
