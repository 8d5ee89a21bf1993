//! services/frontend/src/web/routes.rs
//!
//! Builds the browser-facing router and holds the master definition for the
//! OpenAPI specification.

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::{
    auth::{self, SignInForm, SignUpForm},
    lists::{self, NewMovieForm},
    middleware::require_auth,
    pages,
    rating::{self, SearchForm, StarsForm},
    state::AppState,
    view::View,
};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        pages::home_page,
        pages::about_page,
        pages::contact_page,
        auth::signin_page,
        auth::signup_page,
        auth::signin_handler,
        auth::signup_handler,
        auth::logout_handler,
        auth::checkstatus_handler,
        rating::rating_handler,
        rating::rating_prev_handler,
        rating::rating_next_handler,
        rating::rate_movie_handler,
        rating::search_movie_handler,
        lists::recommend_handler,
        lists::admin_handler,
        lists::admin_default_handler,
        lists::new_movie_handler,
        lists::retrain_handler,
    ),
    components(
        schemas(View, SignInForm, SignUpForm, StarsForm, SearchForm, NewMovieForm)
    ),
    tags(
        (name = "Flixr Frontend", description = "Browser-facing routes of the movie rating frontend.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Assembles every route. Rating, recommendation, logout and status routes
/// sit behind the auth guard; everything else is public.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(pages::home_page))
        .route("/about", get(pages::about_page))
        .route("/contact", get(pages::contact_page))
        .route("/signin", get(auth::signin_page).post(auth::signin_handler))
        .route("/signup", get(auth::signup_page).post(auth::signup_handler))
        .route(
            "/admin/newmovie",
            get(lists::admin_default_handler).post(lists::new_movie_handler),
        )
        .route("/admin/{sort_type}", get(lists::admin_handler))
        .route("/re_train", get(lists::retrain_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/logout", get(auth::logout_handler))
        .route("/checkstatus", get(auth::checkstatus_handler))
        .route("/rating", get(rating::rating_handler))
        .route("/rating/prev", get(rating::rating_prev_handler))
        .route("/rating/next", get(rating::rating_next_handler))
        .route("/rating/search", post(rating::search_movie_handler))
        .route("/rating/{id}", post(rating::rate_movie_handler))
        .route("/recommend/{sort_type}", get(lists::recommend_handler))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let static_files = ServeDir::new(&app_state.config.static_dir);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
}
