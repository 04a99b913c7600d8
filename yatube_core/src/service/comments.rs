use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::info;

use crate::{
    entity::{now_timestamp, prelude::*},
    error::FieldErrors,
    forms::CommentForm,
    ids::{CommentId, PostId},
};

#[derive(Debug, Error)]
pub enum CommentsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("post not found")]
    PostNotFound,

    #[error(transparent)]
    Invalid(#[from] FieldErrors),
}

#[derive(Clone)]
pub struct CommentsService {
    db: DatabaseConnection,
}

impl CommentsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a comment by `author` on `post_id`, linked to both.
    pub async fn create_comment(
        &self,
        author: &AuthorModel,
        post_id: PostId,
        form: &CommentForm,
    ) -> Result<CommentModel, CommentsServiceError> {
        let post_exists = Post::find_by_id(post_id).one(&self.db).await?.is_some();
        if !post_exists {
            return Err(CommentsServiceError::PostNotFound);
        }

        let clean = form.clean()?;

        let comment = CommentActiveModel {
            id: Set(CommentId::new()),
            post_id: Set(post_id),
            author_id: Set(author.id),
            text: Set(clean.text),
            created_at: Set(now_timestamp()),
        };
        let comment = Comment::insert(comment).exec_with_returning(&self.db).await?;
        info!(post = %post_id, author = %author.username, "added comment");

        Ok(comment)
    }

    /// Comments on a post, oldest first, with their authors.
    pub async fn list_for_post(
        &self,
        post_id: PostId,
    ) -> Result<Vec<(CommentModel, Option<AuthorModel>)>, DbErr> {
        Comment::find()
            .filter(CommentColumn::PostId.eq(post_id))
            .order_by_asc(CommentColumn::CreatedAt)
            .order_by_asc(CommentColumn::Id)
            .find_also_related(Author)
            .all(&self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn test_comment_is_linked_to_post_and_author() {
        let db = test_utils::setup_test_db().await;
        let service = CommentsService::new(db.clone());
        let author = test_utils::create_test_author(&db, "leo").await;
        let reader = test_utils::create_test_author(&db, "reader").await;
        let post = test_utils::create_test_post(&db, &author, "hello", None).await;

        let comment = service
            .create_comment(
                &reader,
                post.id,
                &CommentForm {
                    text: "great post".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(comment.post_id, post.id);
        assert_eq!(comment.author_id, reader.id);

        let listed = service.list_for_post(post.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0.text, "great post");
        assert_eq!(listed[0].1.as_ref().map(|a| a.username.as_str()), Some("reader"));
    }

    #[tokio::test]
    async fn test_empty_comment_is_not_stored() {
        let db = test_utils::setup_test_db().await;
        let service = CommentsService::new(db.clone());
        let author = test_utils::create_test_author(&db, "leo").await;
        let post = test_utils::create_test_post(&db, &author, "hello", None).await;

        let result = service
            .create_comment(&author, post.id, &CommentForm::default())
            .await;
        assert!(matches!(result, Err(CommentsServiceError::Invalid(_))));
        assert_eq!(Comment::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let db = test_utils::setup_test_db().await;
        let service = CommentsService::new(db.clone());
        let author = test_utils::create_test_author(&db, "leo").await;

        let result = service
            .create_comment(
                &author,
                PostId::new(),
                &CommentForm {
                    text: "hello?".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(CommentsServiceError::PostNotFound)));
    }

    #[tokio::test]
    async fn test_comments_listed_oldest_first() {
        let db = test_utils::setup_test_db().await;
        let service = CommentsService::new(db.clone());
        let author = test_utils::create_test_author(&db, "leo").await;
        let post = test_utils::create_test_post(&db, &author, "hello", None).await;

        for text in ["one", "two", "three"] {
            service
                .create_comment(
                    &author,
                    post.id,
                    &CommentForm {
                        text: text.to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let texts: Vec<String> = service
            .list_for_post(post.id)
            .await
            .unwrap()
            .into_iter()
            .map(|(comment, _)| comment.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
