use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::info;

use crate::{entity::prelude::*, ids::AuthorId};

#[derive(Debug, Error)]
pub enum AuthorsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("author not found")]
    AuthorNotFound,

    #[error("username must not be empty")]
    EmptyUsername,
}

/// Author records mirror identities vouched for by the upstream identity
/// provider; nothing here authenticates anyone.
#[derive(Clone)]
pub struct AuthorsService {
    db: DatabaseConnection,
}

impl AuthorsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_author(&self, username: &str) -> Result<AuthorModel, AuthorsServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthorsServiceError::EmptyUsername);
        }

        let author = AuthorActiveModel {
            id: Set(AuthorId::new()),
            username: Set(username.to_string()),
        };
        let author = Author::insert(author).exec_with_returning(&self.db).await?;
        info!(username = %author.username, "provisioned author");

        Ok(author)
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AuthorModel>, AuthorsServiceError> {
        let author = Author::find()
            .filter(AuthorColumn::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(author)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<AuthorModel, AuthorsServiceError> {
        self.find_by_username(username)
            .await?
            .ok_or(AuthorsServiceError::AuthorNotFound)
    }

    /// Looks up the author for a vouched-for username, creating the record
    /// on first sight.
    pub async fn get_or_provision(&self, username: &str) -> Result<AuthorModel, AuthorsServiceError> {
        match self.find_by_username(username.trim()).await? {
            Some(author) => Ok(author),
            None => self.create_author(username).await,
        }
    }

    pub async fn count_posts(&self, author_id: AuthorId) -> Result<u64, AuthorsServiceError> {
        let count = Post::find()
            .filter(PostColumn::AuthorId.eq(author_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
