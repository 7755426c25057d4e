//! Command line interface
//!
//! - `serve`: run the HTTP server
//! - `token`: print a signed session token for an admin

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Team Admin API - manage teams and their owning admins
#[derive(Parser)]
#[command(name = "team-admin-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print a signed JWT for the given admin using the configured secret
    Token(token::TokenArgs),
}
