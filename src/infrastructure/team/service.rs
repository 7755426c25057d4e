//! Team service: create, delete, rename, list and view teams on behalf of an admin

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::team::{validate_team_name, Team, TeamId, TeamRepository, TeamValidationError};
use crate::domain::team_admin::{TeamAdmin, TeamAdminRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::TokenValidator;
use crate::infrastructure::observability::record_team_operation;

const INVALID_TOKEN: &str = "Invalid or missing JWT token.";
const UNIDENTIFIED_ADMIN: &str = "Unable to identify the admin from the JWT token.";
const DUPLICATE_NAME: &str = "A team with this name already exists.";
const DUPLICATE_ID: &str = "A team with this ID already exists.";
const EXPIRED_TOKEN: &str = "Invalid or expired token.";
const NO_TEAMS: &str = "No associated teams found.";

/// Request for creating a new team
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTeamRequest {
    /// Generated when absent or empty
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request for renaming a team
#[derive(Debug, Clone, Deserialize)]
pub struct RenameTeamRequest {
    pub team_id: String,
    pub new_name: String,
}

/// Confirmation of a team deletion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDeletion {
    pub team_id: TeamId,
    pub message: String,
}

/// Teams associated with the calling admin
#[derive(Debug, Clone, PartialEq)]
pub enum TeamListing {
    Empty,
    Teams(Vec<TeamAdmin>),
}

impl TeamListing {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Empty => Some(NO_TEAMS),
            Self::Teams(_) => None,
        }
    }
}

/// What to present for a single-team request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum TeamView {
    /// No token: redirect to the login page
    Login,
    Error { message: String },
    TeamDetail { team: Team },
}

/// Team service
///
/// Every mutating operation authenticates the caller through the token
/// validator; delete and rename also require an `Owner` association.
#[derive(Debug)]
pub struct TeamService<T, A, V>
where
    T: TeamRepository,
    A: TeamAdminRepository,
    V: TokenValidator,
{
    teams: Arc<T>,
    associations: Arc<A>,
    validator: Arc<V>,
}

impl<T, A, V> TeamService<T, A, V>
where
    T: TeamRepository,
    A: TeamAdminRepository,
    V: TokenValidator,
{
    pub fn new(teams: Arc<T>, associations: Arc<A>, validator: Arc<V>) -> Self {
        Self {
            teams,
            associations,
            validator,
        }
    }

    /// Create a team owned by the calling admin
    pub async fn create_team(
        &self,
        request: CreateTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError> {
        observe("create", self.create_team_inner(request, token).await)
    }

    /// Delete a team and all of its associations
    pub async fn delete_team(
        &self,
        team_id: &str,
        token: Option<&str>,
    ) -> Result<TeamDeletion, DomainError> {
        observe("delete", self.delete_team_inner(team_id, token).await)
    }

    /// Rename a team. The new name is stored as given.
    pub async fn rename_team(
        &self,
        request: RenameTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError> {
        observe("rename", self.rename_team_inner(request, token).await)
    }

    /// List every association held by the calling admin
    pub async fn list_teams(&self, token: Option<&str>) -> Result<TeamListing, DomainError> {
        observe("list", self.list_teams_inner(token).await)
    }

    /// Resolve the view for a single team. Never fails.
    pub async fn view_team(&self, team_id: &str, token: Option<&str>) -> TeamView {
        let Some(_token) = non_empty(token) else {
            record_team_operation("view", "login");
            return TeamView::Login;
        };

        let lookup = match TeamId::new(team_id) {
            Ok(id) => self.teams.find_by_id(&id).await,
            Err(_) => Ok(None),
        };

        let view = match lookup {
            Ok(Some(team)) => TeamView::TeamDetail { team },
            Ok(None) => team_not_found_view(team_id),
            Err(e) => {
                warn!(team_id = %team_id, error = %e, "Team lookup failed");
                team_not_found_view(team_id)
            }
        };

        let outcome = match view {
            TeamView::TeamDetail { .. } => "success",
            _ => "not_found",
        };
        record_team_operation("view", outcome);

        view
    }

    async fn create_team_inner(
        &self,
        request: CreateTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError> {
        let token = self.authenticate(token)?;

        let admin = self
            .identify(token)
            .ok_or_else(|| DomainError::validation(UNIDENTIFIED_ADMIN))?;

        let name = request
            .name
            .ok_or_else(|| DomainError::validation(TeamValidationError::InvalidNameLength.to_string()))?;

        validate_team_name(&name).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.teams.exists_by_name(&name).await? {
            return Err(DomainError::conflict(DUPLICATE_NAME));
        }

        let team_id = match non_empty(request.id.as_deref()) {
            Some(id) => TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?,
            None => TeamId::generate(),
        };

        info!(admin = %admin, team_id = %team_id, name = %name, "Creating team");

        let team = Team::new(team_id, name).map_err(|e| DomainError::validation(e.to_string()))?;
        let team = self.teams.create(team).await.map_err(|e| match e {
            DomainError::Conflict { .. } => DomainError::conflict(DUPLICATE_ID),
            other => other,
        })?;

        if let Err(e) = self
            .associations
            .save(TeamAdmin::owner(admin, team.id().clone()))
            .await
        {
            warn!(team_id = %team.id(), error = %e, "Owner association failed, removing team");

            if let Err(rollback) = self.teams.delete(team.id()).await {
                warn!(team_id = %team.id(), error = %rollback, "Failed to remove team after association failure");
            }

            return Err(e);
        }

        Ok(team)
    }

    async fn delete_team_inner(
        &self,
        team_id: &str,
        token: Option<&str>,
    ) -> Result<TeamDeletion, DomainError> {
        let team = self.owned_team(team_id, token, "delete").await?;

        info!(team_id = %team.id(), "Deleting team");

        self.teams.delete(team.id()).await?;
        let removed = self.associations.delete_by_team_id(team.id()).await?;

        debug!(team_id = %team.id(), associations = removed, "Team associations removed");

        Ok(TeamDeletion {
            message: format!("Team with ID '{}' deleted successfully.", team.id()),
            team_id: team.id().clone(),
        })
    }

    async fn rename_team_inner(
        &self,
        request: RenameTeamRequest,
        token: Option<&str>,
    ) -> Result<Team, DomainError> {
        let mut team = self.owned_team(&request.team_id, token, "modify").await?;

        info!(team_id = %team.id(), new_name = %request.new_name, "Renaming team");

        team.rename(request.new_name);
        self.teams.save(team).await
    }

    async fn list_teams_inner(&self, token: Option<&str>) -> Result<TeamListing, DomainError> {
        let admin = non_empty(token)
            .and_then(|token| self.identify(token))
            .ok_or_else(|| DomainError::unauthorized(EXPIRED_TOKEN))?;

        let associations = self
            .associations
            .find_all_by_admin_id(&admin)
            .await
            .map_err(|e| DomainError::internal(format!("Error retrieving teams: {}", e.message())))?;

        debug!(admin = %admin, count = associations.len(), "Listed teams");

        if associations.is_empty() {
            Ok(TeamListing::Empty)
        } else {
            Ok(TeamListing::Teams(associations))
        }
    }

    /// Token present and accepted by the validator
    fn authenticate<'t>(&self, token: Option<&'t str>) -> Result<&'t str, DomainError> {
        non_empty(token)
            .filter(|token| self.validator.is_valid(token))
            .ok_or_else(|| DomainError::unauthorized(INVALID_TOKEN))
    }

    fn identify(&self, token: &str) -> Option<String> {
        self.validator
            .extract_admin(token)
            .filter(|admin| !admin.is_empty())
    }

    /// Loads a team the caller owns, for the mutating operations
    async fn owned_team(
        &self,
        team_id: &str,
        token: Option<&str>,
        action: &str,
    ) -> Result<Team, DomainError> {
        let token = self.authenticate(token)?;

        let not_found = || DomainError::not_found(format!("Team with ID '{}' not found.", team_id));

        let id = TeamId::new(team_id).map_err(|_| not_found())?;
        let team = self.teams.find_by_id(&id).await?.ok_or_else(not_found)?;

        let forbidden = || {
            DomainError::forbidden(format!(
                "You do not have permission to {} this team.",
                action
            ))
        };

        let admin = self.identify(token).ok_or_else(forbidden)?;

        let is_owner = self
            .associations
            .find_by_admin_and_team(&admin, &id)
            .await?
            .is_some_and(|association| association.is_owner_of(&admin, &id));

        if !is_owner {
            warn!(admin = %admin, team_id = %id, action, "Admin is not an owner of the team");
            return Err(forbidden());
        }

        Ok(team)
    }
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.filter(|value| !value.is_empty())
}

fn team_not_found_view(team_id: &str) -> TeamView {
    TeamView::Error {
        message: format!("The team with ID {} was not found.", team_id),
    }
}

fn observe<R>(operation: &'static str, result: Result<R, DomainError>) -> Result<R, DomainError> {
    let outcome = match &result {
        Ok(_) => "success",
        Err(DomainError::Unauthorized { .. }) => "unauthorized",
        Err(DomainError::Forbidden { .. }) => "forbidden",
        Err(DomainError::NotFound { .. }) => "not_found",
        Err(
            DomainError::Validation { .. }
            | DomainError::InvalidId { .. }
            | DomainError::Conflict { .. },
        ) => "rejected",
        Err(_) => "error",
    };

    record_team_operation(operation, outcome);
    result
}
