//! Request-scoped write access to the store.
//!
//! Every write goes through a [`Session`]. Each call runs in its own
//! transaction: it either commits in full or is rolled back, and failures are
//! logged here and handed back as [`PersistError`] so callers can degrade to a
//! generic message instead of surfacing driver text.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityName, EntityTrait, IntoActiveModel, TransactionTrait,
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::entities::{contact_messages, projects, users};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("record not found")]
    NotFound,
}

/// A field update waiting for [`Session::commit_pending_changes`].
#[derive(Debug, Clone)]
pub enum PendingChange {
    User(users::ActiveModel),
    Project(projects::ActiveModel),
    ContactMessage(contact_messages::ActiveModel),
}

impl PendingChange {
    const fn table(&self) -> &'static str {
        match self {
            Self::User(_) => "users",
            Self::Project(_) => "projects",
            Self::ContactMessage(_) => "contact_messages",
        }
    }

    async fn apply(self, txn: &DatabaseTransaction) -> Result<(), DbErr> {
        match self {
            Self::User(model) => model.update(txn).await.map(|_| ()),
            Self::Project(model) => model.update(txn).await.map(|_| ()),
            Self::ContactMessage(model) => model.update(txn).await.map(|_| ()),
        }
    }
}

impl From<users::ActiveModel> for PendingChange {
    fn from(model: users::ActiveModel) -> Self {
        Self::User(model)
    }
}

impl From<projects::ActiveModel> for PendingChange {
    fn from(model: projects::ActiveModel) -> Self {
        Self::Project(model)
    }
}

impl From<contact_messages::ActiveModel> for PendingChange {
    fn from(model: contact_messages::ActiveModel) -> Self {
        Self::ContactMessage(model)
    }
}

pub struct Session {
    conn: DatabaseConnection,
    pending: Vec<PendingChange>,
}

impl Session {
    pub(crate) const fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            pending: Vec::new(),
        }
    }

    /// Inserts a new record and returns the stored row.
    pub async fn create<A>(
        &self,
        record: A,
    ) -> Result<<A::Entity as EntityTrait>::Model, PersistError>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        let entity = A::Entity::default();
        let table = entity.table_name();
        let txn = self.begin("create", table).await?;

        match record.insert(&txn).await {
            Ok(model) => {
                commit(txn, "create", table).await?;
                debug!(table, "Record created");
                Ok(model)
            }
            Err(err) => {
                rollback(txn, "create", table).await;
                error!(table, error = %err, "Failed to create record");
                Err(classify(err))
            }
        }
    }

    /// Deletes the row identified by the record's primary key.
    pub async fn delete<A>(&self, record: A) -> Result<(), PersistError>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
    {
        let entity = A::Entity::default();
        let table = entity.table_name();
        let txn = self.begin("delete", table).await?;

        match record.delete(&txn).await {
            Ok(result) if result.rows_affected == 0 => {
                rollback(txn, "delete", table).await;
                warn!(table, "Delete matched no rows");
                Err(PersistError::NotFound)
            }
            Ok(_) => {
                commit(txn, "delete", table).await?;
                debug!(table, "Record deleted");
                Ok(())
            }
            Err(err) => {
                rollback(txn, "delete", table).await;
                error!(table, error = %err, "Failed to delete record");
                Err(classify(err))
            }
        }
    }

    /// Queues an update. Nothing is written until
    /// [`commit_pending_changes`](Self::commit_pending_changes).
    pub fn stage(&mut self, change: impl Into<PendingChange>) {
        self.pending.push(change.into());
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Flushes every staged update in one transaction and returns how many
    /// were written. The queue is emptied whether or not the flush succeeds.
    pub async fn commit_pending_changes(&mut self) -> Result<usize, PersistError> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        let txn = self.begin("update", "pending").await?;

        for change in pending {
            let table = change.table();
            if let Err(err) = change.apply(&txn).await {
                rollback(txn, "update", table).await;
                error!(table, error = %err, "Failed to flush staged changes");
                return Err(classify(err));
            }
        }

        commit(txn, "update", "pending").await?;
        debug!(count, "Staged changes committed");
        Ok(count)
    }

    async fn begin(&self, op: &str, table: &str) -> Result<DatabaseTransaction, PersistError> {
        self.conn.begin().await.map_err(|err| {
            error!(op, table, error = %err, "Failed to open transaction");
            PersistError::Database(err)
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            warn!(
                discarded = self.pending.len(),
                "Session dropped with uncommitted changes"
            );
        }
    }
}

async fn commit(txn: DatabaseTransaction, op: &str, table: &str) -> Result<(), PersistError> {
    txn.commit().await.map_err(|err| {
        error!(op, table, error = %err, "Failed to commit transaction");
        PersistError::Database(err)
    })
}

async fn rollback(txn: DatabaseTransaction, op: &str, table: &str) {
    if let Err(err) = txn.rollback().await {
        error!(op, table, error = %err, "Rollback failed");
    }
}

fn classify(err: DbErr) -> PersistError {
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => PersistError::NotFound,
        other => PersistError::Database(other),
    }
}
