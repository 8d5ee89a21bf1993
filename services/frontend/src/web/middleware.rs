//! services/frontend/src/web/middleware.rs
//!
//! Authentication guard for protected routes, plus the session cookie helpers.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use flixr_core::auth::is_authenticated;
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::Config;
use crate::web::state::{AppState, SessionContext};

pub const SESSION_COOKIE: &str = "session";

/// Where unauthenticated browsers are sent.
pub const SIGN_IN_PATH: &str = "/signin";

/// Middleware that resolves the session cookie to a live principal.
///
/// If valid, inserts a `SessionContext` into request extensions for handlers to use.
/// If missing, unknown or expired, redirects to the sign-in view before any
/// handler (and therefore any backend call) runs.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    // 1. Parse session ID from cookie
    let Some(session_id) = session_id_from(req.headers()) else {
        debug!("No session cookie on {}", req.uri().path());
        return Redirect::to(SIGN_IN_PATH).into_response();
    };

    // 2. Look up the session, sliding its expiry forward
    let session = match state.sessions.load(&session_id, state.config.session_ttl).await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to load session: {:?}", e);
            None
        }
    };

    let session = match session {
        Some(session) if is_authenticated(Some(&session), Utc::now()) => session,
        _ => {
            debug!("Session is not authenticated for {}", req.uri().path());
            return Redirect::to(SIGN_IN_PATH).into_response();
        }
    };

    // 3. Attach the principal and continue to the handler
    req.extensions_mut().insert(SessionContext {
        session_id: session.id,
        principal: session.principal,
    });
    next.run(req).await
}

/// Extracts the session id from the `Cookie` header, if any.
pub fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| c.trim().strip_prefix("session="))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// The `Set-Cookie` value that binds a browser to a session.
pub fn session_cookie(config: &Config, session_id: &str) -> String {
    cookie(config, session_id, config.session_ttl)
}

/// The `Set-Cookie` value that unbinds a browser from its session.
pub fn cleared_session_cookie(config: &Config) -> String {
    cookie(config, "", Duration::zero())
}

fn cookie(config: &Config, value: &str, max_age: Duration) -> String {
    let secure = if config.cookie_secure { " Secure;" } else { "" };
    format!(
        "{}={}; HttpOnly;{} SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        value,
        secure,
        max_age.num_seconds()
    )
}
