//! services/frontend/src/web/lists.rs
//!
//! Paged list views (recommendations and admin analytics) and the admin
//! actions that are forwarded to the backend.

use axum::{
    extract::{rejection::FormRejection, FromRequestParts, Path, Query, State},
    http::request::Parts,
    response::Redirect,
    Extension, Form,
};
use flixr_core::{
    domain::{AdminSort, RecommendSort},
    pagination::{paginate, ListKind, PageRequest, PageResult},
    Item,
};
use serde::Deserialize;
use std::{convert::Infallible, sync::Arc};
use tracing::{error, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::web::state::{AppState, SessionContext};
use crate::web::view::View;

/// Admin pages always land back on the rating-sorted analytics.
const ADMIN_HOME: &str = "/admin/rating";

/// `?page=` as sent by the browser. Parsing is lenient, see [`PageRequest::parse`].
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Reads the query as raw pairs so a repeated `page` never fails the
    /// request; the first occurrence wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let page = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "page").then_some(value));
        Self { page }
    }

    fn request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PageQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self::from_pairs(pairs))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewMovieForm {
    /// IMDb id of the movie to import.
    pub movie_id: String,
}

fn list_view(template: &'static str, sort: &'static str, page: PageResult<Item>) -> View {
    View::new(template)
        .with("items", page.items)
        .with("current", page.current_page)
        .with("pages", page.total_pages)
        .with("type", sort)
}

/// GET /recommend/{sort_type} - A page of the user's recommendations
#[utoipa::path(
    get,
    path = "/recommend/{sort_type}",
    params(
        ("sort_type" = String, Path, description = "top10, top25, top50, top100 or a~z"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Recommend view with `items`, `current`, `pages`, `type`", body = View),
        (status = 303, description = "Not signed in, redirected to /signin"),
        (status = 502, description = "Backend unavailable or malformed response", body = View)
    )
)]
pub async fn recommend_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path(sort_type): Path<String>,
    query: PageQuery,
) -> Result<View, ApiError> {
    let sort = RecommendSort::parse(&sort_type);
    let items = state
        .backend
        .recommendations(ctx.principal.user_id, sort)
        .await?;
    let page = paginate(
        &items,
        query.request(),
        ListKind::Recommendations.page_size(),
    );
    Ok(list_view("recommend", sort.as_str(), page))
}

/// GET /admin/{sort_type} - A page of movie rating statistics
#[utoipa::path(
    get,
    path = "/admin/{sort_type}",
    params(
        ("sort_type" = String, Path, description = "rating, count, a~z or z~a"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Admin view with `items`, `current`, `pages`, `type`", body = View),
        (status = 502, description = "Backend unavailable or malformed response", body = View)
    )
)]
pub async fn admin_handler(
    State(state): State<Arc<AppState>>,
    Path(sort_type): Path<String>,
    query: PageQuery,
) -> Result<View, ApiError> {
    admin_view(&state, AdminSort::parse(&sort_type), query).await
}

/// GET /admin/newmovie - The import form posts here; a plain GET shows the
/// default admin list, as `newmovie` is not a sort type.
#[utoipa::path(
    get,
    path = "/admin/newmovie",
    params(PageQuery),
    responses(
        (status = 200, description = "Admin view sorted by rating", body = View),
        (status = 502, description = "Backend unavailable or malformed response", body = View)
    )
)]
pub async fn admin_default_handler(
    State(state): State<Arc<AppState>>,
    query: PageQuery,
) -> Result<View, ApiError> {
    admin_view(&state, AdminSort::default(), query).await
}

async fn admin_view(state: &AppState, sort: AdminSort, query: PageQuery) -> Result<View, ApiError> {
    let items = state.backend.movie_stats(sort).await?;
    let page = paginate(&items, query.request(), ListKind::AdminAnalytics.page_size());
    Ok(list_view("admin", sort.as_str(), page))
}

/// POST /admin/newmovie - Import a movie by IMDb id
#[utoipa::path(
    post,
    path = "/admin/newmovie",
    request_body(content = NewMovieForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirected to /admin/rating"))
)]
pub async fn new_movie_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<NewMovieForm>, FormRejection>,
) -> Redirect {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            warn!("Ignoring malformed new movie form: {}", e);
            return Redirect::to(ADMIN_HOME);
        }
    };
    match state.backend.add_movie(form.movie_id.trim()).await {
        Ok(message) => info!("Add movie {}: {}", form.movie_id, message),
        Err(e) => error!("Failed to add movie {}: {}", form.movie_id, e),
    }
    Redirect::to(ADMIN_HOME)
}

/// GET /re_train - Ask the backend to retrain its model
///
/// Training can take a while, so the request is sent in the background and
/// the browser is redirected straight away.
#[utoipa::path(get, path = "/re_train", responses((status = 303, description = "Redirected to /admin/rating")))]
pub async fn retrain_handler(State(state): State<Arc<AppState>>) -> Redirect {
    let backend = state.backend.clone();
    tokio::spawn(async move {
        match backend.retrain().await {
            Ok(message) => info!("Retrain requested: {}", message),
            Err(e) => error!("Failed to request retrain: {}", e),
        }
    });
    Redirect::to(ADMIN_HOME)
}
