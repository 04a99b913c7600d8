use axum::{
    extract::{Path, Query, State},
    Json,
};
use yatube_core::{
    ids::PostId,
    pagination::Page,
    service::listings::{AuthorFeed, GroupFeed, PostDetail, PostSummary},
};

use super::PageQuery;
use crate::{auth::MaybeUser, error::WebError, views::PostDetailView, AppState};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<PostSummary>>, WebError> {
    let page = state.core.listings.global_feed(query.page.as_deref()).await?;
    Ok(Json(page))
}

pub async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<GroupFeed>, WebError> {
    let feed = state
        .core
        .listings
        .group_feed(&slug, query.page.as_deref())
        .await?;
    Ok(Json(feed))
}

pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<AuthorFeed>, WebError> {
    let feed = state
        .core
        .listings
        .author_feed(&username, query.page.as_deref())
        .await?;
    Ok(Json(feed))
}

pub async fn post_detail(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(post_id): Path<String>,
) -> Result<Json<PostDetailView>, WebError> {
    let post_id = parse_post_id(&post_id)?;
    let detail: PostDetail = state.core.listings.post_detail(post_id).await?;
    let can_edit = viewer.is_some_and(|viewer| viewer.username == detail.post.author);

    Ok(Json(PostDetailView { detail, can_edit }))
}

/// A malformed id names no post, so it is a plain 404.
pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, WebError> {
    raw.parse().map_err(|_| WebError::NotFound)
}
