use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{debug, info};
use yatube_core::{
    entity::prelude::PostModel,
    error::FieldErrors,
    forms::{CommentForm, PostForm},
    ids::PostId,
    service::{
        authorship,
        comments::CommentsServiceError,
        posts::PostsServiceError,
    },
};

use super::feeds::parse_post_id;
use crate::{
    auth::ActingUser,
    error::WebError,
    extract::{CommentFields, PostSubmission},
    views::{GroupChoice, PostFormView},
    AppState,
};

fn detail_redirect(post_id: PostId) -> Response {
    Redirect::to(&format!("/posts/{post_id}/")).into_response()
}

async fn form_view(
    state: &AppState,
    form: PostForm,
    errors: FieldErrors,
    post: Option<&PostModel>,
) -> Result<Response, WebError> {
    let groups = state
        .core
        .groups
        .list_groups()
        .await?
        .into_iter()
        .map(GroupChoice::from)
        .collect();

    Ok(Json(PostFormView {
        form,
        errors,
        groups,
        is_edit: post.is_some(),
        post_id: post.map(|p| p.id),
        current_image: post.and_then(|p| p.image.clone()),
    })
    .into_response())
}

pub async fn post_create_page(
    State(state): State<AppState>,
    ActingUser(_author): ActingUser,
) -> Result<Response, WebError> {
    form_view(&state, PostForm::default(), FieldErrors::default(), None).await
}

pub async fn post_create(
    State(state): State<AppState>,
    ActingUser(author): ActingUser,
    PostSubmission(form): PostSubmission,
) -> Result<Response, WebError> {
    match state.core.posts.create_post(&author, &form).await {
        Ok(_) => Ok(Redirect::to(&format!("/profile/{}/", author.username)).into_response()),
        Err(PostsServiceError::Invalid(errors)) => form_view(&state, form, errors, None).await,
        Err(error) => Err(error.into()),
    }
}

pub async fn post_edit_page(
    State(state): State<AppState>,
    ActingUser(author): ActingUser,
    Path(post_id): Path<String>,
) -> Result<Response, WebError> {
    let post = state.core.posts.get_post(parse_post_id(&post_id)?).await?;

    if !authorship::check(author.id, &post).is_allowed() {
        return Ok(detail_redirect(post.id));
    }

    let form = PostForm {
        text: post.text.clone(),
        group: post.group_id.map(|id| id.to_string()),
        ..Default::default()
    };
    form_view(&state, form, FieldErrors::default(), Some(&post)).await
}

pub async fn post_edit(
    State(state): State<AppState>,
    ActingUser(author): ActingUser,
    Path(post_id): Path<String>,
    PostSubmission(form): PostSubmission,
) -> Result<Response, WebError> {
    let post_id = parse_post_id(&post_id)?;

    match state.core.posts.edit_post(&author, post_id, &form).await {
        Ok(_) | Err(PostsServiceError::Unauthorized) => Ok(detail_redirect(post_id)),
        Err(PostsServiceError::Invalid(errors)) => {
            let post = state.core.posts.get_post(post_id).await?;
            form_view(&state, form, errors, Some(&post)).await
        }
        Err(error) => Err(error.into()),
    }
}

/// Always lands back on the post; an empty comment is dropped quietly.
pub async fn add_comment(
    State(state): State<AppState>,
    ActingUser(author): ActingUser,
    Path(post_id): Path<String>,
    fields: Result<Form<CommentFields>, FormRejection>,
) -> Result<Response, WebError> {
    let post_id = parse_post_id(&post_id)?;
    let form: CommentForm = fields.map(|Form(f)| f).unwrap_or_default().into();

    match state.core.comments.create_comment(&author, post_id, &form).await {
        Ok(comment) => info!(comment = %comment.id, "comment accepted"),
        Err(CommentsServiceError::Invalid(errors)) => {
            debug!(?errors, post = %post_id, "dropped invalid comment")
        }
        Err(error) => return Err(error.into()),
    }

    Ok(detail_redirect(post_id))
}
