//! Post entity for SeaORM.

use std::str::FromStr;

use sea_orm::Set;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use gazette_core::domain::{Category, Comment};

/// Comment sequence persisted as a JSON document column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CommentList(pub Vec<Comment>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub read_time: String,
    pub image_url: Option<String>,
    pub likes: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: CommentList,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
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

/// Conversion from SeaORM Model to Domain Post.
///
/// A category string that no longer parses (e.g. after a manual DB edit)
/// degrades to `Technology` rather than failing the whole read.
impl From<Model> for gazette_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            category: Category::from_str(&model.category).unwrap_or(Category::Technology),
            read_time: model.read_time,
            image_url: model.image_url,
            likes: model.likes,
            comments: model.comments.0,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<gazette_core::domain::Post> for ActiveModel {
    fn from(post: gazette_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            title: Set(post.title),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            category: Set(post.category.to_string()),
            read_time: Set(post.read_time),
            image_url: Set(post.image_url),
            likes: Set(post.likes),
            comments: Set(CommentList(post.comments)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
