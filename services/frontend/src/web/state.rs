//! services/frontend/src/web/state.rs
//!
//! Defines the application's shared state and the per-request session context.

use crate::config::Config;
use flixr_core::domain::Principal;
use flixr_core::ports::{BackendApi, SessionId, SessionStore};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendApi>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<Config>,
}

//=========================================================================================
// SessionContext (Specific to One Authenticated Request)
//=========================================================================================

/// Inserted into request extensions by the auth guard. Protected handlers
/// take it as `Extension<SessionContext>` and never read identity elsewhere.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: SessionId,
    pub principal: Principal,
}
