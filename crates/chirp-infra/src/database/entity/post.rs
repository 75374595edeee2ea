//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

// author_id references a record in the external user directory, so there is
// no local user table to relate to.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain Post.
impl From<Model> for chirp_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            content: model.content,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from the domain Post to a SeaORM ActiveModel.
impl From<chirp_core::domain::Post> for ActiveModel {
    fn from(post: chirp_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            content: Set(post.content),
            created_at: Set(post.created_at.into()),
        }
    }
}
