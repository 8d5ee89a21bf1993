//! The reqwest backend adapter against a throwaway axum server that speaks the
//! backend's wire format.

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use flixr_core::domain::{AdminSort, Credentials, RatingSubmission, RecommendSort};
use flixr_core::ports::{BackendApi, PortError};
use frontend_lib::adapters::HttpBackendAdapter;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;

async fn signin(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    if form.get("password").map(String::as_str) == Some("pw") {
        (
            StatusCode::OK,
            Json(json!({"userID": 7, "user_id": 7, "email": form["email"], "fullname": "G"})),
        )
            .into_response()
    } else {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

async fn checkstatus(Path(username): Path<String>) -> Json<serde_json::Value> {
    Json(json!({"user_id": 7, "email": username, "status": "off"}))
}

async fn logout(Path(user_id): Path<String>) -> Json<serde_json::Value> {
    Json(json!({"userId": user_id, "status": "off"}))
}

async fn movie(Path((_, cursor)): Path<(i64, u64)>) -> Json<serde_json::Value> {
    Json(json!({"movie_id": cursor, "title": "Heat", "poster_url": "p.jpg"}))
}

async fn rating(Form(form): Form<HashMap<String, String>>) -> StatusCode {
    if form.get("grade").map(String::as_str) == Some("4") && form.contains_key("user_id") {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn recommend(Path((_, sort)): Path<(i64, String)>) -> Json<serde_json::Value> {
    Json(json!([{"title": sort}, {"title": "B"}, {"title": "C"}]))
}

async fn analyze() -> &'static str {
    "<html>oops</html>"
}

async fn nextorate(Form(form): Form<HashMap<String, String>>) -> Json<serde_json::Value> {
    Json(json!({
        "user_email": form["user_email"],
        "movie_rate_count": "4",
        "movie_name": form["movie_name"],
    }))
}

async fn newmovie() -> &'static str {
    "New Movie Added Successfully!"
}

async fn serve_backend() -> SocketAddr {
    let app = Router::new()
        .route("/signin", post(signin))
        .route("/checkstatus/{username}", get(checkstatus))
        .route("/logout/{user_id}", get(logout))
        .route("/rating/{user_id}/{cursor}", get(movie))
        .route("/rating", post(rating))
        .route("/recommend/{user_id}/{sort}", get(recommend))
        .route("/admin/analyze/{sort}", get(analyze))
        .route("/nextorate", post(nextorate))
        .route("/admin/newmovie", post(newmovie));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn adapter() -> HttpBackendAdapter {
    let addr = serve_backend().await;
    HttpBackendAdapter::new(reqwest::Client::new(), format!("http://{addr}/"))
}

#[tokio::test]
async fn sign_in_decodes_the_account() {
    let backend = adapter().await;
    let account = backend
        .sign_in(&Credentials {
            email: "g@m.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(account.user_id, Some(7));
    assert_eq!(account.email.as_deref(), Some("g@m.com"));
    assert!(account.is_active());
}

#[tokio::test]
async fn non_success_status_is_unavailable() {
    let backend = adapter().await;
    let result = backend
        .sign_in(&Credentials {
            email: "g@m.com".to_string(),
            password: "wrong".to_string(),
        })
        .await;
    assert!(matches!(result, Err(PortError::Unavailable(msg)) if msg == "HTTP 500"));
}

#[tokio::test]
async fn status_and_logout_payloads_are_understood() {
    let backend = adapter().await;

    let status = backend.check_status("g@m.com").await.unwrap();
    assert_eq!(status.email.as_deref(), Some("g@m.com"));
    assert!(!status.is_active());

    let logout = backend.log_out(7).await.unwrap();
    assert_eq!(logout.user_id, Some(7));
}

#[tokio::test]
async fn usernames_stay_inside_their_path_segment() {
    let backend = adapter().await;
    let status = backend.check_status("../logout/7?x=a b").await.unwrap();
    assert_eq!(status.email.as_deref(), Some("../logout/7?x=a b"));
}

#[tokio::test]
async fn rating_queue_calls_round_trip() {
    let backend = adapter().await;

    let movie = backend.movie_at(7, 3).await.unwrap();
    assert_eq!(movie["movie_id"], 3);
    assert_eq!(movie["poster_url"], "p.jpg");

    backend
        .submit_rating(&RatingSubmission {
            user_id: 7,
            movie_id: 12,
            grade: 4,
        })
        .await
        .unwrap();

    let position = backend.locate_movie("g@m.com", 0, "Heat").await.unwrap();
    assert_eq!(position, 4);
}

#[tokio::test]
async fn list_order_is_preserved() {
    let backend = adapter().await;
    let items = backend
        .recommendations(7, RecommendSort::Alphabetical)
        .await
        .unwrap();
    let titles: Vec<_> = items.iter().map(|i| i["title"].clone()).collect();
    assert_eq!(titles, vec![json!("a~z"), json!("B"), json!("C")]);
}

#[tokio::test]
async fn unparseable_payload_is_malformed() {
    let backend = adapter().await;
    let result = backend.movie_stats(AdminSort::Count).await;
    assert!(matches!(result, Err(PortError::MalformedResponse(_))));
}

#[tokio::test]
async fn plain_text_admin_replies_are_returned_verbatim() {
    let backend = adapter().await;
    let message = backend.add_movie("tt0113277").await.unwrap();
    assert_eq!(message, "New Movie Added Successfully!");

    // No retrain route on this server.
    assert!(matches!(
        backend.retrain().await,
        Err(PortError::Unavailable(msg)) if msg == "HTTP 404"
    ));
}

#[tokio::test]
async fn refused_connection_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackendAdapter::new(reqwest::Client::new(), format!("http://{addr}"));
    let result = backend.movie_at(7, 0).await;
    assert!(matches!(result, Err(PortError::Unavailable(_))));
}
