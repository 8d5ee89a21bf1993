//! crates/flixr_core/src/auth.rs
//!
//! The authentication gate. Credential checks are delegated to the backend;
//! this module only decides whether the backend's answer yields a principal.

use chrono::{DateTime, Utc};

use crate::domain::{AccountStatus, Credentials, Principal, Registration};
use crate::ports::{BackendApi, PortError, Session};

/// Why a sign-in or sign-up did not produce a principal.
#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    #[error("account is inactive")]
    Inactive,
    #[error("backend rejected the credentials: {0}")]
    Rejected(#[from] PortError),
    #[error("backend response carried no user id")]
    MissingIdentity,
}

/// Signs in against the backend.
pub async fn authenticate(
    backend: &dyn BackendApi,
    credentials: &Credentials,
) -> Result<Principal, AuthFailure> {
    let status = backend.sign_in(credentials).await?;
    principal_from(status, &credentials.email)
}

/// Creates the account on the backend and signs it in.
pub async fn register(
    backend: &dyn BackendApi,
    registration: &Registration,
) -> Result<Principal, AuthFailure> {
    let status = backend.sign_up(registration).await?;
    principal_from(status, &registration.email)
}

fn principal_from(status: AccountStatus, submitted: &str) -> Result<Principal, AuthFailure> {
    if !status.is_active() {
        return Err(AuthFailure::Inactive);
    }
    let user_id = status.user_id.ok_or(AuthFailure::MissingIdentity)?;
    let username = status
        .email
        .filter(|email| !email.trim().is_empty())
        .unwrap_or_else(|| submitted.to_string());
    Ok(Principal::new(username, user_id))
}

/// Whether a live principal is bound to the session.
pub fn is_authenticated(session: Option<&Session>, now: DateTime<Utc>) -> bool {
    session.is_some_and(|session| !session.is_expired_at(now))
}
