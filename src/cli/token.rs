//! Token command - signs a session token for local testing

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::auth::{JwtConfig, JwtService};

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Admin identity to embed as the token subject
    #[arg(long)]
    pub admin: String,
}

pub fn run(args: TokenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // A random secret would make the token useless to a running server
    let secret = config.auth.resolved_jwt_secret().ok_or_else(|| {
        anyhow::anyhow!("No JWT secret configured. Set JWT_SECRET or APP__AUTH__JWT_SECRET.")
    })?;

    let service = JwtService::new(JwtConfig::new(secret, config.auth.jwt_expiration_hours));
    println!("{}", service.generate(&args.admin)?);

    Ok(())
}
