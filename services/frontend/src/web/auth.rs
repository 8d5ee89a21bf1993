//! services/frontend/src/web/auth.rs
//!
//! Authentication endpoints for sign-in, sign-up, logout and status checks.
//! Credentials are verified by the backend; this side only binds the
//! resulting principal to a browser session.

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use flixr_core::{
    auth::{authenticate, register},
    domain::{Credentials, Principal, Registration},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::middleware::{
    cleared_session_cookie, session_cookie, session_id_from, SIGN_IN_PATH,
};
use crate::web::state::{AppState, SessionContext};
use crate::web::view::View;

//=========================================================================================
// Request Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub fullname: String,
    pub age: String,
    pub country: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /signin - The sign-in form
#[utoipa::path(get, path = "/signin", responses((status = 200, body = View)))]
pub async fn signin_page() -> View {
    View::new("signin")
}

/// GET /signup - The sign-up form
#[utoipa::path(get, path = "/signup", responses((status = 200, body = View)))]
pub async fn signup_page() -> View {
    View::new("signup")
}

/// POST /signin - Sign in through the backend and start a session
#[utoipa::path(
    post,
    path = "/signin",
    request_body(content = SignInForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirected home; or rejected, redirected to /signin")
    )
)]
pub async fn signin_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<SignInForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => {
            warn!("Malformed sign-in form: {}", e);
            return Ok(Redirect::to(SIGN_IN_PATH).into_response());
        }
    };
    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    match authenticate(state.backend.as_ref(), &credentials).await {
        Ok(principal) => start_session(&state, &headers, principal).await,
        Err(e) => {
            warn!("Sign-in rejected for {}: {}", credentials.email, e);
            Ok(Redirect::to(SIGN_IN_PATH).into_response())
        }
    }
}

/// POST /signup - Create the account through the backend and start a session
#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = SignUpForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered, redirected home; or rejected, redirected to /signin")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<SignUpForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => {
            warn!("Malformed sign-up form: {}", e);
            return Ok(Redirect::to(SIGN_IN_PATH).into_response());
        }
    };
    let registration = Registration {
        email: form.email,
        password: form.password,
        fullname: form.fullname,
        age: form.age,
        country: form.country,
    };

    match register(state.backend.as_ref(), &registration).await {
        Ok(principal) => start_session(&state, &headers, principal).await,
        Err(e) => {
            warn!("Sign-up rejected for {}: {}", registration.email, e);
            Ok(Redirect::to(SIGN_IN_PATH).into_response())
        }
    }
}

/// Binds `principal` to the browser.
///
/// A browser already signed in as the same account keeps its session and has
/// its rating cursor rewound; any other existing session is dropped first.
async fn start_session(
    state: &AppState,
    headers: &HeaderMap,
    principal: Principal,
) -> Result<Response, ApiError> {
    if let Some(existing_id) = session_id_from(headers) {
        let existing = state
            .sessions
            .load(&existing_id, state.config.session_ttl)
            .await?;
        match existing {
            Some(session)
                if session.principal.username == principal.username
                    && session.principal.user_id == principal.user_id =>
            {
                state.sessions.reset(&session.id).await?;
                info!("User {} signed in again; cursor reset", principal.username);
                return Ok(Redirect::to("/").into_response());
            }
            Some(session) => state.sessions.destroy(&session.id).await?,
            None => {}
        }
    }

    let username = principal.username.clone();
    let session = state
        .sessions
        .create(principal, state.config.session_ttl)
        .await?;
    info!("User {} signed in", username);

    Ok((
        [(header::SET_COOKIE, session_cookie(&state.config, &session.id))],
        Redirect::to("/"),
    )
        .into_response())
}

/// GET /logout - End the session locally and on the backend
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cleared, redirected home"))
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Response, ApiError> {
    match state.backend.log_out(ctx.principal.user_id).await {
        Ok(status) => info!("Backend logout for {}: {:?}", ctx.principal.username, status),
        Err(e) => error!("Backend logout failed for {}: {}", ctx.principal.username, e),
    }

    state.sessions.destroy(&ctx.session_id).await?;

    Ok((
        [(header::SET_COOKIE, cleared_session_cookie(&state.config))],
        Redirect::to("/"),
    )
        .into_response())
}

/// GET /checkstatus - Re-verify the principal with the backend
///
/// An account the backend reports as "off" loses its local session.
#[utoipa::path(
    get,
    path = "/checkstatus",
    responses(
        (status = 303, description = "Redirected home, or to /signin when the account is inactive")
    )
)]
pub async fn checkstatus_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Response, ApiError> {
    match state.backend.check_status(&ctx.principal.username).await {
        Ok(status) if !status.is_active() => {
            warn!(
                "Backend reports {} as inactive; ending session",
                ctx.principal.username
            );
            state.sessions.destroy(&ctx.session_id).await?;
            return Ok((
                [(header::SET_COOKIE, cleared_session_cookie(&state.config))],
                Redirect::to(SIGN_IN_PATH),
            )
                .into_response());
        }
        Ok(status) => info!("Status for {}: {:?}", ctx.principal.username, status),
        Err(e) => error!("Status check failed for {}: {}", ctx.principal.username, e),
    }
    Ok(Redirect::to("/").into_response())
}
