//! Command-line interface.

mod commands;

use clap::{Parser, Subcommand};

/// Folio - personal portfolio site
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Connect to the database, create missing tables and print row counts
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// Create a site owner account
    AddUser {
        username: String,
        email: String,
        /// Stored as an Argon2 hash
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        admin: bool,
    },

    /// Add a portfolio project owned by an existing user
    AddProject {
        /// Owner's username
        owner: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated, e.g. "Rust, axum, SQLite"
        #[arg(long)]
        technologies: Option<String>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        live_url: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        featured: bool,
        /// Mark completed as of now
        #[arg(long)]
        completed: bool,
    },

    /// List stored projects
    #[command(alias = "ls")]
    Projects,
}

pub use commands::*;
