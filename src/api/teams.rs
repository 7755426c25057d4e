//! Team endpoints
//!
//! The admin is identified by the JWT carried in the session cookie.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::Team;
use crate::domain::team_admin::TeamAdmin;
use crate::infrastructure::team::{CreateTeamRequest, RenameTeamRequest, TeamListing, TeamView};

/// Where a missing session is sent
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().to_string(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamAdminResponse {
    pub admin_id: String,
    pub team_id: String,
    pub role: String,
    pub active: bool,
}

impl From<&TeamAdmin> for TeamAdminResponse {
    fn from(association: &TeamAdmin) -> Self {
        Self {
            admin_id: association.admin_id().to_string(),
            team_id: association.team_id().to_string(),
            role: association.role().to_string(),
            active: association.is_active(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamAdminResponse>,
    pub total: usize,
}

/// Body of `PUT /teams/{team_id}/name`
#[derive(Debug, Clone, Deserialize)]
pub struct RenameBody {
    pub new_name: String,
}

fn session_token(state: &AppState, jar: &CookieJar) -> Option<String> {
    jar.get(&state.cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(name = ?request.name, "Creating team");

    let token = session_token(&state, &jar);
    let team = state
        .team_service
        .create_team(request, token.as_deref())
        .await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let token = session_token(&state, &jar);
    let deletion = state
        .team_service
        .delete_team(&team_id, token.as_deref())
        .await?;

    // 204 carries no body, the confirmation only goes to the log
    debug!(team_id = %deletion.team_id, "{}", deletion.message);

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /teams/{team_id}/name
pub async fn rename_team(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(team_id): Path<String>,
    Json(body): Json<RenameBody>,
) -> Result<Json<TeamResponse>, ApiError> {
    let request = RenameTeamRequest {
        team_id,
        new_name: body.new_name,
    };

    rename(state, jar, request).await
}

/// PUT /teams/rename
pub async fn rename_team_by_body(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RenameTeamRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    rename(state, jar, request).await
}

async fn rename(
    state: AppState,
    jar: CookieJar,
    request: RenameTeamRequest,
) -> Result<Json<TeamResponse>, ApiError> {
    let token = session_token(&state, &jar);
    let team = state
        .team_service
        .rename_team(request, token.as_deref())
        .await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let token = session_token(&state, &jar);

    match state.team_service.list_teams(token.as_deref()).await? {
        TeamListing::Empty => Ok(StatusCode::NO_CONTENT.into_response()),
        TeamListing::Teams(associations) => {
            let teams: Vec<TeamAdminResponse> =
                associations.iter().map(TeamAdminResponse::from).collect();
            let total = teams.len();

            Ok(Json(ListTeamsResponse { teams, total }).into_response())
        }
    }
}

/// GET /teams/{team_id}
pub async fn view_team(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(team_id): Path<String>,
) -> Response {
    let token = session_token(&state, &jar);

    match state
        .team_service
        .view_team(&team_id, token.as_deref())
        .await
    {
        TeamView::Login => Redirect::to(LOGIN_PATH).into_response(),
        view @ TeamView::Error { .. } => (StatusCode::NOT_FOUND, Json(view)).into_response(),
        view @ TeamView::TeamDetail { .. } => Json(view).into_response(),
    }
}
