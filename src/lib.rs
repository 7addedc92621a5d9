pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod forms;
pub mod models;
pub mod state;
pub mod web;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, NewProject, NewUser};
pub use config::Config;
pub use state::AppState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(&config);

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }

        Commands::Check => cli::cmd_check(&config).await,

        Commands::AddUser {
            username,
            email,
            password,
            first_name,
            last_name,
            admin,
        } => {
            let new = NewUser {
                username,
                email,
                password,
                first_name,
                last_name,
                admin,
            };
            cli::cmd_add_user(&config, new).await
        }

        Commands::AddProject {
            owner,
            title,
            description,
            technologies,
            github_url,
            live_url,
            image_url,
            featured,
            completed,
        } => {
            let new = NewProject {
                owner,
                title,
                description,
                technologies,
                github_url,
                live_url,
                image_url,
                featured,
                completed,
            };
            cli::cmd_add_project(&config, new).await
        }

        Commands::Projects => cli::cmd_list_projects(&config).await,
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = if config.general.debug {
        "debug"
    } else {
        config.general.log_level.as_str()
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    info!(
        profile = ?config.general.profile,
        debug = config.general.debug,
        "Starting folio"
    );

    let addr = config.bind_address();
    let state = Arc::new(AppState::new(config).await?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
