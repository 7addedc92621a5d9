use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(80))")]
    pub username: String,

    #[sea_orm(unique, column_type = "String(StringLen::N(120))")]
    pub email: String,

    /// Opaque; never serialized.
    #[sea_orm(column_type = "String(StringLen::N(128))", nullable)]
    pub password_hash: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub first_name: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub last_name: Option<String>,

    pub is_active: bool,

    /// Placeholder flag; nothing checks it yet.
    pub is_admin: bool,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModel {
    /// A new, unsaved user with both timestamps stamped.
    #[must_use]
    pub fn new_user(username: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            username: Set(username.into()),
            email: Set(email.into()),
            password_hash: Set(None),
            first_name: Set(None),
            last_name: Set(None),
            is_active: Set(true),
            is_admin: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
