use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Free-text tag list, e.g. "Python, Flask, SQLite".
    #[sea_orm(column_type = "String(StringLen::N(300))", nullable)]
    pub technologies: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(200))", nullable)]
    pub github_url: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(200))", nullable)]
    pub live_url: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(200))", nullable)]
    pub image_url: Option<String>,

    pub featured: bool,

    pub completed: bool,

    pub completion_date: Option<DateTimeUtc>,

    #[sea_orm(indexed)]
    pub user_id: i32,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModel {
    /// A new, unsaved project owned by `user_id`, with both timestamps stamped.
    #[must_use]
    pub fn new_project(user_id: i32, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: Set(title.into()),
            description: Set(None),
            technologies: Set(None),
            github_url: Set(None),
            live_url: Set(None),
            image_url: Set(None),
            featured: Set(false),
            completed: Set(false),
            completion_date: Set(None),
            user_id: Set(user_id),
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
