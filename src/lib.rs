//! Team Admin API
//!
//! HTTP backend managing teams and the admins that own them:
//! - Team creation with an owner association for the calling admin
//! - Owner-only rename and deletion
//! - Per-admin team listing and single-team views
//! - In-memory or PostgreSQL storage, HS256 JWT session cookies

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::storage::Storage;
use domain::team::Team;
use domain::team_admin::TeamAdmin;
use infrastructure::{
    auth::{JwtConfig, JwtService},
    storage::{StorageConfig, StorageFactory},
    team::{StorageTeamRepository, TeamService},
    team_admin::StorageTeamAdminRepository,
};
use rand::Rng;
use tracing::{info, warn};

const TEAMS_TABLE: &str = "teams";
const TEAM_ADMINS_TABLE: &str = "team_admins";

/// Create the application state for the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::resolve(
        &config.storage.backend,
        config.storage.resolved_database_url().as_deref(),
        config.storage.max_connections,
    )?;

    info!("Storage backend: {:?}", storage_config.storage_type());

    let (team_storage, association_storage): (
        Arc<dyn Storage<Team>>,
        Arc<dyn Storage<TeamAdmin>>,
    ) = match &storage_config {
        StorageConfig::InMemory => (
            StorageFactory::create_in_memory::<Team>(),
            StorageFactory::create_in_memory::<TeamAdmin>(),
        ),
        StorageConfig::Postgres(pg_config) => {
            info!("Connecting to PostgreSQL...");
            let pool = pg_config.connect().await?;
            info!("PostgreSQL connection established");

            (
                StorageFactory::create_postgres_with_pool::<Team>(pool.clone(), TEAMS_TABLE)
                    .await?,
                StorageFactory::create_postgres_with_pool::<TeamAdmin>(pool, TEAM_ADMINS_TABLE)
                    .await?,
            )
        }
    };

    let jwt = create_jwt_service_from_secret(config);

    Ok(assemble_state(
        team_storage,
        association_storage,
        jwt,
        &config.auth.cookie_name,
    ))
}

/// Application state over fresh in-memory storage
pub fn create_in_memory_app_state(jwt: Arc<JwtService>, cookie_name: &str) -> AppState {
    assemble_state(
        StorageFactory::create_in_memory::<Team>(),
        StorageFactory::create_in_memory::<TeamAdmin>(),
        jwt,
        cookie_name,
    )
}

fn assemble_state(
    team_storage: Arc<dyn Storage<Team>>,
    association_storage: Arc<dyn Storage<TeamAdmin>>,
    jwt: Arc<JwtService>,
    cookie_name: &str,
) -> AppState {
    let service = TeamService::new(
        Arc::new(StorageTeamRepository::new(team_storage)),
        Arc::new(StorageTeamAdminRepository::new(association_storage)),
        jwt,
    );

    AppState::new(Arc::new(service), cookie_name)
}

/// Create the JWT service from the configured secret, falling back to a
/// random one that does not survive restarts
pub fn create_jwt_service_from_secret(config: &AppConfig) -> Arc<JwtService> {
    let secret = config.auth.resolved_jwt_secret().unwrap_or_else(|| {
        warn!(
            "No JWT secret configured. Generating random secret. \
            Tokens will NOT be valid across restarts. \
            Set JWT_SECRET or APP__AUTH__JWT_SECRET for persistent sessions."
        );
        generate_random_secret()
    });

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.jwt_expiration_hours,
    )))
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
