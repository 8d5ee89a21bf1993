//! Shared helpers for the frontend integration tests: a recording fake backend
//! and small request builders around `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use flixr_core::domain::{
    AccountStatus, AdminSort, Credentials, Item, RatingSubmission, RecommendSort, Registration,
    UserId,
};
use flixr_core::ports::{BackendApi, PortError, PortResult};
use frontend_lib::{adapters::MemorySessionStore, config::Config, web::router, web::AppState};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const USER_ID: UserId = 7;
pub const EMAIL: &str = "g@m.com";

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unavailable,
    Malformed,
}

impl Failure {
    fn error(self) -> PortError {
        match self {
            Failure::Unavailable => PortError::Unavailable("connection refused".to_string()),
            Failure::Malformed => PortError::MalformedResponse("expected value".to_string()),
        }
    }
}

/// A `BackendApi` that answers from canned data and records every call.
pub struct FakeBackend {
    pub calls: Mutex<Vec<String>>,
    pub account: Result<AccountStatus, Failure>,
    pub status: AccountStatus,
    pub items: Vec<Item>,
    /// Applied to the movie, list, rating and admin calls.
    pub failure: Option<Failure>,
    pub located: Option<u64>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            account: Ok(AccountStatus {
                user_id: Some(USER_ID),
                email: Some(EMAIL.to_string()),
                status: None,
            }),
            status: AccountStatus {
                user_id: Some(USER_ID),
                email: Some(EMAIL.to_string()),
                status: Some("on".to_string()),
            },
            items: movies(25),
            failure: None,
            located: Some(5),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail_or<T>(&self, value: T) -> PortResult<T> {
        match self.failure {
            Some(failure) => Err(failure.error()),
            None => Ok(value),
        }
    }
}

pub fn movies(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| json!({"movie_id": i, "title": format!("Movie {i}")}))
        .collect()
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn sign_in(&self, credentials: &Credentials) -> PortResult<AccountStatus> {
        self.record(format!("sign_in {}", credentials.email));
        self.account.clone().map_err(Failure::error)
    }

    async fn sign_up(&self, registration: &Registration) -> PortResult<AccountStatus> {
        self.record(format!("sign_up {}", registration.email));
        self.account.clone().map_err(Failure::error)
    }

    async fn log_out(&self, user_id: UserId) -> PortResult<AccountStatus> {
        self.record(format!("log_out {user_id}"));
        Ok(AccountStatus {
            user_id: Some(user_id),
            email: None,
            status: Some("off".to_string()),
        })
    }

    async fn check_status(&self, username: &str) -> PortResult<AccountStatus> {
        self.record(format!("check_status {username}"));
        Ok(self.status.clone())
    }

    async fn movie_at(&self, user_id: UserId, cursor: u64) -> PortResult<Item> {
        self.record(format!("movie_at {user_id} {cursor}"));
        self.fail_or(json!({"movie_id": cursor, "title": format!("Movie {cursor}")}))
    }

    async fn submit_rating(&self, rating: &RatingSubmission) -> PortResult<()> {
        self.record(format!(
            "submit_rating {} {} {}",
            rating.user_id, rating.movie_id, rating.grade
        ));
        self.fail_or(())
    }

    async fn locate_movie(
        &self,
        username: &str,
        cursor: u64,
        movie_name: &str,
    ) -> PortResult<u64> {
        self.record(format!("locate_movie {username} {cursor} {movie_name}"));
        self.located
            .ok_or_else(|| PortError::Unavailable("HTTP 500".to_string()))
    }

    async fn recommendations(
        &self,
        user_id: UserId,
        sort: RecommendSort,
    ) -> PortResult<Vec<Item>> {
        self.record(format!("recommendations {user_id} {sort}"));
        self.fail_or(self.items.clone())
    }

    async fn movie_stats(&self, sort: AdminSort) -> PortResult<Vec<Item>> {
        self.record(format!("movie_stats {sort}"));
        self.fail_or(self.items.clone())
    }

    async fn add_movie(&self, imdb_id: &str) -> PortResult<String> {
        self.record(format!("add_movie {imdb_id}"));
        self.fail_or("New Movie Added Successfully!".to_string())
    }

    async fn retrain(&self) -> PortResult<String> {
        self.record("retrain".to_string());
        self.fail_or("Model is Now Training... Please Wait...".to_string())
    }
}

/// The full router wired to `backend` and a fresh in-memory session store.
pub fn app(backend: Arc<FakeBackend>) -> (Router, Arc<MemorySessionStore>) {
    let sessions = Arc::new(MemorySessionStore::new());
    let state = Arc::new(AppState {
        backend,
        sessions: sessions.clone(),
        config: Arc::new(Config::default()),
    });
    (router(state), sessions)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("response")
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// The `name=value` pair from a `Set-Cookie` header, ready to send back.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

pub async fn json_body(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    (status, payload)
}

/// Signs in as the default account and returns the cookie to send back.
pub async fn sign_in(app: &Router) -> String {
    let response = send(app, post_form("/signin", "email=g%40m.com&password=pw", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
    set_cookie(&response).expect("session cookie")
}

/// Waits for a call made from a background task to show up.
pub async fn wait_for_call(backend: &FakeBackend, call: &str) -> bool {
    for _ in 0..50 {
        if backend.calls().iter().any(|c| c == call) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
