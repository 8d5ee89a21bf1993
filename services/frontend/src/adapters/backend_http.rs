//! services/frontend/src/adapters/backend_http.rs
//!
//! This module contains the HTTP adapter for the ratings/recommendation backend.
//! It implements the `BackendApi` port from the `core` crate with `reqwest`.
//! Request bodies are form-encoded; responses are JSON except for the two
//! admin actions, which answer with plain text.

use async_trait::async_trait;
use flixr_core::domain::{
    AccountStatus, AdminSort, Credentials, Item, RatingSubmission, RecommendSort, Registration,
    UserId,
};
use flixr_core::ports::{BackendApi, PortError, PortResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `BackendApi` port over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackendAdapter {
    client: Client,
    base_url: String,
}

impl HttpBackendAdapter {
    /// Creates a new `HttpBackendAdapter` for the backend at `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> PortResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Unavailable(format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> PortResult<T> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| PortError::MalformedResponse(e.to_string()))
    }
}

/// Escaped in path segments so usernames cannot reshape the backend URL.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'@');

//=========================================================================================
// Wire Structs
//=========================================================================================

#[derive(Serialize)]
struct LocateMovieForm<'a> {
    user_email: &'a str,
    movie_rate_count: u64,
    movie_name: &'a str,
}

#[derive(Deserialize)]
struct LocateMovieReply {
    movie_rate_count: serde_json::Value,
}

#[derive(Serialize)]
struct NewMovieForm<'a> {
    movie_id: &'a str,
}

fn queue_index(raw: serde_json::Value) -> PortResult<u64> {
    match raw {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| PortError::MalformedResponse("movie_rate_count is not an index".to_string()))
}

//=========================================================================================
// `BackendApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl BackendApi for HttpBackendAdapter {
    async fn sign_in(&self, credentials: &Credentials) -> PortResult<AccountStatus> {
        self.json(self.client.post(self.url("/signin")).form(credentials))
            .await
    }

    async fn sign_up(&self, registration: &Registration) -> PortResult<AccountStatus> {
        self.json(self.client.post(self.url("/signup")).form(registration))
            .await
    }

    async fn log_out(&self, user_id: UserId) -> PortResult<AccountStatus> {
        self.json(self.client.get(self.url(&format!("/logout/{user_id}"))))
            .await
    }

    async fn check_status(&self, username: &str) -> PortResult<AccountStatus> {
        let path = format!("/checkstatus/{}", utf8_percent_encode(username, PATH_SEGMENT));
        self.json(self.client.get(self.url(&path))).await
    }

    async fn movie_at(&self, user_id: UserId, cursor: u64) -> PortResult<Item> {
        self.json(self.client.get(self.url(&format!("/rating/{user_id}/{cursor}"))))
            .await
    }

    async fn submit_rating(&self, rating: &RatingSubmission) -> PortResult<()> {
        let body = self
            .send(self.client.post(self.url("/rating")).form(rating))
            .await?;
        debug!("Rating accepted by backend: {}", body);
        Ok(())
    }

    async fn locate_movie(
        &self,
        username: &str,
        cursor: u64,
        movie_name: &str,
    ) -> PortResult<u64> {
        let form = LocateMovieForm {
            user_email: username,
            movie_rate_count: cursor,
            movie_name,
        };
        let reply: LocateMovieReply = self
            .json(self.client.post(self.url("/nextorate")).form(&form))
            .await?;
        queue_index(reply.movie_rate_count)
    }

    async fn recommendations(
        &self,
        user_id: UserId,
        sort: RecommendSort,
    ) -> PortResult<Vec<Item>> {
        let path = format!(
            "/recommend/{user_id}/{}",
            utf8_percent_encode(sort.as_str(), PATH_SEGMENT)
        );
        self.json(self.client.get(self.url(&path))).await
    }

    async fn movie_stats(&self, sort: AdminSort) -> PortResult<Vec<Item>> {
        let path = format!(
            "/admin/analyze/{}",
            utf8_percent_encode(sort.as_str(), PATH_SEGMENT)
        );
        self.json(self.client.get(self.url(&path))).await
    }

    async fn add_movie(&self, imdb_id: &str) -> PortResult<String> {
        self.send(
            self.client
                .post(self.url("/admin/newmovie"))
                .form(&NewMovieForm { movie_id: imdb_id }),
        )
        .await
    }

    async fn retrain(&self) -> PortResult<String> {
        self.send(self.client.get(self.url("/admin/re_train"))).await
    }
}
