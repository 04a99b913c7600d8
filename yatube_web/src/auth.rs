//! Acting-user extraction. Authentication itself happens upstream: the
//! identity proxy forwards the username it vouches for in a header, and
//! the author record is provisioned on first sight.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;
use yatube_core::entity::prelude::AuthorModel;

use crate::{error::WebError, AppState};

/// The visitor, if the identity proxy named one.
pub struct MaybeUser(pub Option<AuthorModel>);

/// A visitor who must be signed in. Anonymous requests are redirected to
/// the login page with `next` pointing back at the requested path.
pub struct ActingUser(pub AuthorModel);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(state.core.config.identity_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|username| !username.is_empty());

        match username {
            Some(username) => {
                let author = state.core.authors.get_or_provision(username).await?;
                Ok(MaybeUser(Some(author)))
            }
            None => Ok(MaybeUser(None)),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ActingUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match MaybeUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?
        {
            MaybeUser(Some(author)) => Ok(ActingUser(author)),
            MaybeUser(None) => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map_or_else(|| parts.uri.path(), |pq| pq.as_str());
                debug!(%next, "anonymous visitor sent to login");
                Err(login_redirect(&state.core.config.login_url, next).into_response())
            }
        }
    }
}

// Path separators stay readable; everything else in `next` is escaped.
const NEXT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn login_redirect(login_url: &str, next: &str) -> Redirect {
    let next = utf8_percent_encode(next, NEXT_ESCAPE);
    Redirect::to(&format!("{login_url}?next={next}"))
}
