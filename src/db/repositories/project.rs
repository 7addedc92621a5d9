use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::entities::projects;

pub struct ProjectRepository {
    conn: DatabaseConnection,
}

impl ProjectRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<projects::Model>> {
        projects::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query project by ID")
    }

    /// Completed projects, newest first.
    pub async fn list_completed(&self) -> Result<Vec<projects::Model>> {
        newest_first(projects::Entity::find().filter(projects::Column::Completed.eq(true)))
            .all(&self.conn)
            .await
            .context("Failed to list completed projects")
    }

    /// Projects that are both featured and completed, newest first.
    pub async fn list_featured(&self) -> Result<Vec<projects::Model>> {
        newest_first(
            projects::Entity::find()
                .filter(projects::Column::Featured.eq(true))
                .filter(projects::Column::Completed.eq(true)),
        )
        .all(&self.conn)
        .await
        .context("Failed to list featured projects")
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<projects::Model>> {
        newest_first(projects::Entity::find().filter(projects::Column::UserId.eq(user_id)))
            .all(&self.conn)
            .await
            .context("Failed to list projects for user")
    }
}

// Ties on created_at fall back to insertion order.
fn newest_first(select: Select<projects::Entity>) -> Select<projects::Entity> {
    select
        .order_by_desc(projects::Column::CreatedAt)
        .order_by_desc(projects::Column::Id)
}
