//! services/frontend/src/adapters/session_memory.rs
//!
//! An in-process implementation of the `SessionStore` port.
//!
//! All sessions live behind one `tokio::sync::Mutex`. Its queue is fair, so
//! cursor updates for a session are applied in the order requests reached
//! the lock, and every mutation happens entirely inside one critical section.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use flixr_core::domain::Principal;
use flixr_core::ports::{PortError, PortResult, Session, SessionId, SessionStore};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against a live session, failing for unknown or expired ids.
    async fn with_live<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut Session) -> T,
    ) -> PortResult<T> {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();
        let expired = match sessions.get(session_id) {
            Some(session) => session.is_expired_at(now),
            None => return Err(not_found(session_id)),
        };
        if expired {
            sessions.remove(session_id);
            return Err(not_found(session_id));
        }
        sessions
            .get_mut(session_id)
            .map(f)
            .ok_or_else(|| not_found(session_id))
    }
}

fn not_found(session_id: &str) -> PortError {
    PortError::NotFound(format!("Session {} not found", session_id))
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, principal: Principal, ttl: Duration) -> PortResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            principal,
            created_at: now,
            last_accessed_at: now,
            expires_at: now + ttl,
        };
        self.sessions
            .lock()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn load(&self, session_id: &str, ttl: Duration) -> PortResult<Option<Session>> {
        match self
            .with_live(session_id, |session| {
                let now = Utc::now();
                session.last_accessed_at = now;
                session.expires_at = now + ttl;
                session.clone()
            })
            .await
        {
            Ok(session) => Ok(Some(session)),
            Err(PortError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn advance(&self, session_id: &str, delta: i64) -> PortResult<u64> {
        self.with_live(session_id, |session| session.principal.advance(delta))
            .await
    }

    async fn reset(&self, session_id: &str) -> PortResult<()> {
        self.with_live(session_id, |session| session.principal.reset())
            .await
    }

    async fn seek(&self, session_id: &str, position: u64) -> PortResult<u64> {
        self.with_live(session_id, |session| session.principal.seek(position))
            .await
    }

    async fn current(&self, session_id: &str) -> PortResult<u64> {
        self.with_live(session_id, |session| session.principal.rating_cursor)
            .await
    }

    async fn destroy(&self, session_id: &str) -> PortResult<()> {
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }

    async fn purge_expired(&self) -> PortResult<usize> {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok(before - sessions.len())
    }
}
