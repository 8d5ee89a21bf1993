//! crates/flixr_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the frontend's core logic.
//! The backend API and the session store sit behind these traits so the
//! handlers can be exercised without a network or a real store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    AccountStatus, AdminSort, Credentials, Item, Principal, RatingSubmission, RecommendSort,
    Registration, UserId,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Network failure or a non-success status from the backend.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    /// The backend answered, but the payload could not be decoded.
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Backend API
//=========================================================================================

#[async_trait]
pub trait BackendApi: Send + Sync {
    // --- Accounts ---
    async fn sign_in(&self, credentials: &Credentials) -> PortResult<AccountStatus>;

    async fn sign_up(&self, registration: &Registration) -> PortResult<AccountStatus>;

    async fn log_out(&self, user_id: UserId) -> PortResult<AccountStatus>;

    async fn check_status(&self, username: &str) -> PortResult<AccountStatus>;

    // --- Rating queue ---
    /// The movie at `cursor` in the user's rating queue.
    async fn movie_at(&self, user_id: UserId, cursor: u64) -> PortResult<Item>;

    async fn submit_rating(&self, rating: &RatingSubmission) -> PortResult<()>;

    /// Position in the rating queue of the first movie matching `movie_name`.
    async fn locate_movie(&self, username: &str, cursor: u64, movie_name: &str)
        -> PortResult<u64>;

    // --- Lists ---
    async fn recommendations(&self, user_id: UserId, sort: RecommendSort)
        -> PortResult<Vec<Item>>;

    async fn movie_stats(&self, sort: AdminSort) -> PortResult<Vec<Item>>;

    // --- Admin ---
    /// Returns the backend's human-readable outcome message.
    async fn add_movie(&self, imdb_id: &str) -> PortResult<String>;

    async fn retrain(&self) -> PortResult<String>;
}

//=========================================================================================
// Session Store
//=========================================================================================

/// Opaque handle carried in the session cookie.
pub type SessionId = String;

/// A principal bound to a browser session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub principal: Principal,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Per-session principal storage.
///
/// Cursor mutations for one session must be applied in the order the
/// requests arrived. Operations on unknown or expired sessions fail with
/// `PortError::NotFound`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, principal: Principal, ttl: Duration) -> PortResult<Session>;

    /// Returns the live session and slides its expiry forward by `ttl`.
    /// Missing and expired sessions yield `None`.
    async fn load(&self, session_id: &str, ttl: Duration) -> PortResult<Option<Session>>;

    async fn advance(&self, session_id: &str, delta: i64) -> PortResult<u64>;

    async fn reset(&self, session_id: &str) -> PortResult<()>;

    async fn seek(&self, session_id: &str, position: u64) -> PortResult<u64>;

    async fn current(&self, session_id: &str) -> PortResult<u64>;

    async fn destroy(&self, session_id: &str) -> PortResult<()>;

    /// Drops every expired session and reports how many were removed.
    async fn purge_expired(&self) -> PortResult<usize>;
}
