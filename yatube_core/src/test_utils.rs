//! Fixtures shared by the unit tests here and the HTTP tests in
//! `yatube_web` (behind the `test-utils` feature).

use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use crate::{
    entity::{now_timestamp, prelude::*},
    ids::{AuthorId, GroupId, PostId},
    models::migrator::Migrator,
};

/// Fresh in-memory SQLite database with every migration applied.
///
/// # Example
/// ```ignore
/// #[tokio::test]
/// async fn my_test() {
///     let db = yatube_core::test_utils::setup_test_db().await;
///     // Database is ready to use!
/// }
/// ```
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn create_test_author(db: &DatabaseConnection, username: &str) -> AuthorModel {
    AuthorActiveModel {
        id: Set(AuthorId::new()),
        username: Set(username.to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to insert author")
}

pub async fn create_test_group(db: &DatabaseConnection, slug: &str) -> GroupModel {
    GroupActiveModel {
        id: Set(GroupId::new()),
        title: Set(format!("Group {slug}")),
        slug: Set(slug.to_string()),
        description: Set("Test description".to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to insert group")
}

pub async fn create_test_post(
    db: &DatabaseConnection,
    author: &AuthorModel,
    text: &str,
    group: Option<&GroupModel>,
) -> PostModel {
    PostActiveModel {
        id: Set(PostId::new()),
        text: Set(text.to_string()),
        pub_date: Set(now_timestamp()),
        author_id: Set(author.id),
        group_id: Set(group.map(|g| g.id)),
        image: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert post")
}
