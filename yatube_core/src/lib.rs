pub mod entity;
pub mod ids;
pub mod models;

use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::{
    config::YatubeConfig,
    error::StartupError,
    media::MediaStore,
    service::{
        authors::AuthorsService, comments::CommentsService, groups::GroupsService,
        listings::ListingsService, posts::PostsService,
    },
};

pub mod service;

pub mod error;

pub mod config;

pub mod forms;

pub mod media;

pub mod pagination;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Everything a request handler needs: configuration, the data store and
/// the services built on it. Handed to handlers explicitly, never global.
pub struct YatubeCore {
    pub config: YatubeConfig,

    pub db: DatabaseConnection,

    pub authors: AuthorsService,
    pub groups: GroupsService,
    pub posts: PostsService,
    pub comments: CommentsService,
    pub listings: ListingsService,
}

impl YatubeCore {
    /// Loads (or creates) the on-disk config and opens the data store.
    pub async fn start() -> Result<Self, StartupError> {
        let config = config::get_or_init().await?;
        Self::open(config).await
    }

    pub async fn open(config: YatubeConfig) -> Result<Self, StartupError> {
        tokio::fs::create_dir_all(&config.media_dir).await?;

        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;
        info!("database migrated");

        Ok(Self::with_connection(config, db))
    }

    /// Wires services onto an already migrated connection.
    pub fn with_connection(config: YatubeConfig, db: DatabaseConnection) -> Self {
        let media = MediaStore::new(config.media_dir.clone());

        Self {
            authors: AuthorsService::new(db.clone()),
            groups: GroupsService::new(db.clone()),
            posts: PostsService::new(db.clone(), media),
            comments: CommentsService::new(db.clone()),
            listings: ListingsService::new(db.clone()),
            config,
            db,
        }
    }

    pub async fn shutdown(self) -> Result<(), DbErr> {
        self.db.close().await
    }
}

pub mod prelude {
    pub use super::ids;
    pub use super::entity;
    pub use super::models;

    pub use super::service;

    pub use super::error;

    pub use super::config;

    pub use super::forms;

    pub use super::pagination;

    pub use super::YatubeCore;
}
