// SeaORM entities for the blog schema. Tables are created by the
// migrations in `models::migrator`.

pub mod author;
pub mod comment;
pub mod group;
pub mod post;

#[cfg(test)]
mod tests;

use chrono::{DateTime, SecondsFormat, Utc};

/// Renders a timestamp the way every `*_at`/`pub_date` column stores it.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

pub mod prelude {
    pub use super::author::{
        ActiveModel as AuthorActiveModel, Column as AuthorColumn, Entity as Author,
        Model as AuthorModel,
    };
    pub use super::comment::{
        ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as Comment,
        Model as CommentModel,
    };
    pub use super::group::{
        ActiveModel as GroupActiveModel, Column as GroupColumn, Entity as Group,
        Model as GroupModel,
    };
    pub use super::post::{
        ActiveModel as PostActiveModel, Column as PostColumn, Entity as Post,
        Model as PostModel,
    };

    pub use sea_orm::{
        ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
        PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
    };
}
