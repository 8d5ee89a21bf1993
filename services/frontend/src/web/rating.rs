//! services/frontend/src/web/rating.rs
//!
//! The rating queue: show the movie under the session's cursor, step through
//! the queue, submit grades and jump to a movie by name.

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    response::Redirect,
    Extension, Form,
};
use flixr_core::domain::RatingSubmission;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::{AppState, SessionContext};
use crate::web::view::View;

/// The five star checkboxes of the rating view. A checked box is sent as "on".
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StarsForm {
    pub star1: Option<String>,
    pub star2: Option<String>,
    pub star3: Option<String>,
    pub star4: Option<String>,
    pub star5: Option<String>,
}

impl StarsForm {
    fn grade(&self) -> u8 {
        let checked = |star: &Option<String>| star.as_deref() == Some("on");
        RatingSubmission::grade_from_stars([
            checked(&self.star1),
            checked(&self.star2),
            checked(&self.star3),
            checked(&self.star4),
            checked(&self.star5),
        ])
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchForm {
    pub movie_name: String,
}

/// GET /rating - The movie under the session's cursor
#[utoipa::path(
    get,
    path = "/rating",
    responses(
        (status = 200, description = "Rating view with `movie` and `cursor`", body = View),
        (status = 303, description = "Not signed in, redirected to /signin"),
        (status = 502, description = "Backend unavailable or malformed response", body = View)
    )
)]
pub async fn rating_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<View, ApiError> {
    let cursor = ctx.principal.rating_cursor;
    let movie = state
        .backend
        .movie_at(ctx.principal.user_id, cursor)
        .await?;
    Ok(View::new("rating").with("movie", movie).with("cursor", cursor))
}

/// GET /rating/prev - Step back one movie, never past the start
#[utoipa::path(get, path = "/rating/prev", responses((status = 303, description = "Redirected to /rating")))]
pub async fn rating_prev_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Redirect, ApiError> {
    state.sessions.advance(&ctx.session_id, -1).await?;
    Ok(Redirect::to("/rating"))
}

/// GET /rating/next - Step forward one movie
#[utoipa::path(get, path = "/rating/next", responses((status = 303, description = "Redirected to /rating")))]
pub async fn rating_next_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Redirect, ApiError> {
    state.sessions.advance(&ctx.session_id, 1).await?;
    Ok(Redirect::to("/rating"))
}

/// POST /rating/{id} - Grade a movie and move on to the next one
///
/// A failed submission is logged and the browser still moves on. A request
/// that does not name a movie is dropped and the current movie is shown again.
#[utoipa::path(
    post,
    path = "/rating/{id}",
    params(("id" = i64, Path, description = "Backend movie id")),
    request_body(content = StarsForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirected to /rating/next"))
)]
pub async fn rate_movie_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    movie_id: Result<Path<i64>, PathRejection>,
    stars: Result<Form<StarsForm>, FormRejection>,
) -> Redirect {
    let (Path(movie_id), Form(stars)) = match (movie_id, stars) {
        (Ok(movie_id), Ok(stars)) => (movie_id, stars),
        (Err(e), _) => {
            warn!("Ignoring rating for an invalid movie id: {}", e);
            return Redirect::to("/rating");
        }
        (_, Err(e)) => {
            warn!("Ignoring malformed rating form: {}", e);
            return Redirect::to("/rating");
        }
    };
    let rating = RatingSubmission {
        user_id: ctx.principal.user_id,
        movie_id,
        grade: stars.grade(),
    };
    match state.backend.submit_rating(&rating).await {
        Ok(()) => info!("Recorded {:?}", rating),
        Err(e) => error!("Failed to submit {:?}: {}", rating, e),
    }
    Redirect::to("/rating/next")
}

/// POST /rating/search - Move the cursor to the first movie matching a name
///
/// When nothing matches or the backend fails the cursor stays where it was.
#[utoipa::path(
    post,
    path = "/rating/search",
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirected to /rating"))
)]
pub async fn search_movie_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => {
            warn!("Ignoring malformed movie search: {}", e);
            return Ok(Redirect::to("/rating"));
        }
    };
    let located = state
        .backend
        .locate_movie(
            &ctx.principal.username,
            ctx.principal.rating_cursor,
            form.movie_name.trim(),
        )
        .await;

    match located {
        Ok(position) => {
            state.sessions.seek(&ctx.session_id, position).await?;
            info!("Moved {} to '{}' at {}", ctx.principal.username, form.movie_name, position);
        }
        Err(e) => error!("Movie search for '{}' failed: {}", form.movie_name, e),
    }
    Ok(Redirect::to("/rating"))
}
