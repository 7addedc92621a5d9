use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::prelude::*;

pub mod migrator;
pub mod repositories;
pub mod session;

pub use repositories::contact::ContactMessageRepository;
pub use repositories::project::ProjectRepository;
pub use repositories::user::UserRepository;
pub use session::{PendingChange, PersistError, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub projects: u64,
    pub contact_messages: u64,
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Connects and creates any missing tables.
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = is_memory_url(db_url);

        if !in_memory {
            let path_str = file_path_from_url(db_url);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Each pooled connection to an in-memory database would see its own
        // empty database.
        if in_memory {
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to database: {db_url}"))?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to create tables")?;

        info!(
            in_memory,
            "Database connected & tables ready (pool: {}-{})",
            if in_memory { 1 } else { min_connections },
            if in_memory { 1 } else { max_connections }
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn sqlite_version(&self) -> Result<String> {
        let backend = self.conn.get_database_backend();
        let row = self
            .conn
            .query_one(Statement::from_string(
                backend,
                "SELECT sqlite_version() AS version".to_string(),
            ))
            .await?
            .context("sqlite_version() returned no row")?;
        Ok(row.try_get::<String>("", "version")?)
    }

    pub async fn table_counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            users: Users::find().count(&self.conn).await?,
            projects: Projects::find().count(&self.conn).await?,
            contact_messages: ContactMessages::find().count(&self.conn).await?,
        })
    }

    /// A fresh write session. Hand one to each request.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.conn.clone())
    }

    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn contact_messages(&self) -> ContactMessageRepository {
        ContactMessageRepository::new(self.conn.clone())
    }
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

fn file_path_from_url(db_url: &str) -> &str {
    let path = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
    path.split_once('?').map_or(path, |(path, _)| path)
}
