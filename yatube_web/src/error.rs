use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use yatube_core::service::{
    authors::AuthorsServiceError, comments::CommentsServiceError, groups::GroupsServiceError,
    listings::ListingsServiceError, posts::PostsServiceError,
};

use crate::views::ErrorBody;

pub const NOT_FOUND_DETAIL: &str = "Page not found.";

#[derive(Debug, Error)]
pub enum WebError {
    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    detail: NOT_FOUND_DETAIL,
                }),
            )
                .into_response(),
            WebError::Internal(reason) => {
                error!(%reason, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        detail: "Internal server error.",
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ListingsServiceError> for WebError {
    fn from(error: ListingsServiceError) -> Self {
        match error {
            ListingsServiceError::GroupNotFound
            | ListingsServiceError::AuthorNotFound
            | ListingsServiceError::PostNotFound => WebError::NotFound,
            ListingsServiceError::DbError(error) => WebError::Internal(error.to_string()),
        }
    }
}

// Validation and authorship outcomes are handled by the handlers before
// they ever reach this conversion.
impl From<PostsServiceError> for WebError {
    fn from(error: PostsServiceError) -> Self {
        match error {
            PostsServiceError::PostNotFound => WebError::NotFound,
            other => WebError::Internal(format!("{other:?}")),
        }
    }
}

impl From<CommentsServiceError> for WebError {
    fn from(error: CommentsServiceError) -> Self {
        match error {
            CommentsServiceError::PostNotFound => WebError::NotFound,
            other => WebError::Internal(format!("{other:?}")),
        }
    }
}

impl From<GroupsServiceError> for WebError {
    fn from(error: GroupsServiceError) -> Self {
        match error {
            GroupsServiceError::GroupNotFound => WebError::NotFound,
            other => WebError::Internal(format!("{other:?}")),
        }
    }
}

impl From<AuthorsServiceError> for WebError {
    fn from(error: AuthorsServiceError) -> Self {
        match error {
            AuthorsServiceError::AuthorNotFound => WebError::NotFound,
            other => WebError::Internal(format!("{other:?}")),
        }
    }
}
