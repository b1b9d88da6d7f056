//! Post entity for SeaORM.
//!
//! Rows are owned by a user; deleting the user removes their posts.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    /// Generated by the application, never by the database.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owner. Always the authenticated caller at creation time.
    pub user_id: Uuid,
    pub title: String,
    /// Post bodies are unbounded, hence `TEXT` rather than `VARCHAR`.
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Listing order, newest first; indexed by the migration.
    pub created_at: DateTimeWithTimeZone,
    /// Only advances when a patch actually changes the post.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            content: model.content,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Every column is `Set`, so the same model serves both INSERT and UPDATE.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            user_id: Set(post.user_id),
            title: Set(post.title),
            content: Set(post.content),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
