use axum::{
    handler::HandlerWithoutStateExt,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{error::WebError, AppState};

pub mod about;
pub mod feeds;
pub mod submissions;

/// `?page=` as sent; resolved leniently by the paginator.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let media =
        ServeDir::new(&state.core.config.media_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(feeds::index))
        .route("/group/:slug/", get(feeds::group_posts))
        .route("/profile/:username/", get(feeds::profile))
        .route("/posts/:post_id/", get(feeds::post_detail))
        .route(
            "/create/",
            get(submissions::post_create_page).post(submissions::post_create),
        )
        .route(
            "/posts/:post_id/edit/",
            get(submissions::post_edit_page).post(submissions::post_edit),
        )
        .route("/posts/:post_id/comment/", post(submissions::add_comment))
        .route("/about/author/", get(about::author))
        .route("/about/tech/", get(about::tech))
        .nest_service("/media", media)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    WebError::NotFound
}
