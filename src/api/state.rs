//! Application state for shared services

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::team::{Team, TeamRepository};
use crate::domain::team_admin::TeamAdminRepository;
use crate::domain::DomainError;
use crate::infrastructure::auth::TokenValidator;
use crate::infrastructure::team::{
    CreateTeamRequest, RenameTeamRequest, TeamDeletion, TeamListing, TeamService, TeamView,
};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    /// Cookie that carries the JWT
    pub cookie_name: Arc<str>,
}

impl AppState {
    pub fn new(team_service: Arc<dyn TeamServiceTrait>, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            team_service,
            cookie_name: cookie_name.into(),
        }
    }
}

/// Team operations as seen by the HTTP layer
#[async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn create_team(
        &self,
        request: CreateTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError>;
    async fn delete_team(
        &self,
        team_id: &str,
        token: Option<&str>,
    ) -> Result<TeamDeletion, DomainError>;
    async fn rename_team(
        &self,
        request: RenameTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError>;
    async fn list_teams(&self, token: Option<&str>) -> Result<TeamListing, DomainError>;
    async fn view_team(&self, team_id: &str, token: Option<&str>) -> TeamView;
}

#[async_trait]
impl<T, A, V> TeamServiceTrait for TeamService<T, A, V>
where
    T: TeamRepository + 'static,
    A: TeamAdminRepository + 'static,
    V: TokenValidator + 'static,
{
    async fn create_team(
        &self,
        request: CreateTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError> {
        TeamService::create_team(self, request, token).await
    }

    async fn delete_team(
        &self,
        team_id: &str,
        token: Option<&str>,
    ) -> Result<TeamDeletion, DomainError> {
        TeamService::delete_team(self, team_id, token).await
    }

    async fn rename_team(
        &self,
        request: RenameTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError> {
        TeamService::rename_team(self, request, token).await
    }

    async fn list_teams(&self, token: Option<&str>) -> Result<TeamListing, DomainError> {
        TeamService::list_teams(self, token).await
    }

    async fn view_team(&self, team_id: &str, token: Option<&str>) -> TeamView {
        TeamService::view_team(self, team_id, token).await
    }
}
