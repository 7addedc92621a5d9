use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::contact_messages;

pub struct ContactMessageRepository {
    conn: DatabaseConnection,
}

impl ContactMessageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<contact_messages::Model>> {
        contact_messages::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query contact message by ID")
    }

    /// All messages, newest first.
    pub async fn list(&self) -> Result<Vec<contact_messages::Model>> {
        contact_messages::Entity::find()
            .order_by_desc(contact_messages::Column::CreatedAt)
            .order_by_desc(contact_messages::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list contact messages")
    }

    pub async fn count_unread(&self) -> Result<u64> {
        contact_messages::Entity::find()
            .filter(contact_messages::Column::Read.eq(false))
            .count(&self.conn)
            .await
            .context("Failed to count unread contact messages")
    }
}
