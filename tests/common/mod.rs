#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use overstats::{Config, OverfastClient};

pub const PLAYER_ID: &str = "Player-1234";
pub const OTHER_PLAYER_ID: &str = "Other-5678";
pub const BROKEN_PLAYER_ID: &str = "Broken-1";

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

pub fn fixture_json(name: &str) -> serde_json::Value {
    serde_json::from_str(&read_fixture(name)).expect("fixture should be valid json")
}

#[derive(Clone, Copy)]
pub struct MockApi {
    pub heroes_available: bool,
}

fn json_body(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Player not found" }))).into_response()
}

async fn profile(Path(id): Path<String>) -> Response {
    match id.as_str() {
        PLAYER_ID => json_body(StatusCode::OK, read_fixture("profile.json")),
        OTHER_PLAYER_ID => Json(json!({ "summary": { "username": "Other" } })).into_response(),
        _ => not_found(),
    }
}

async fn summary(Path(id): Path<String>) -> Response {
    match id.as_str() {
        PLAYER_ID => Json(fixture_json("profile.json")["summary"].clone()).into_response(),
        _ => not_found(),
    }
}

async fn stats_summary(Path(id): Path<String>) -> Response {
    match id.as_str() {
        PLAYER_ID => json_body(StatusCode::OK, read_fixture("stats_summary.json")),
        OTHER_PLAYER_ID => Json(json!({})).into_response(),
        BROKEN_PLAYER_ID => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => not_found(),
    }
}

async fn heroes(
    State(mock): State<MockApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("locale").map(String::as_str) != Some("en-us") {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "message": "locale required" })))
            .into_response();
    }
    if !mock.heroes_available {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Heroes catalog unavailable" })),
        )
            .into_response();
    }
    json_body(StatusCode::OK, read_fixture("heroes.json"))
}

async fn roles() -> Response {
    json_body(StatusCode::OK, read_fixture("roles.json"))
}

async fn maps() -> Response {
    json_body(StatusCode::OK, read_fixture("maps.json"))
}

/// Serve a stand-in for the remote API on an ephemeral port and return a
/// client pointed at it.
pub async fn spawn_api(mock: MockApi) -> OverfastClient {
    let router = Router::new()
        .route("/players/{id}", get(profile))
        .route("/players/{id}/summary", get(summary))
        .route("/players/{id}/stats/summary", get(stats_summary))
        .route("/heroes", get(heroes))
        .route("/roles", get(roles))
        .route("/maps", get(maps))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock api");
    let addr = listener.local_addr().expect("mock api address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock api server");
    });

    let config = Config {
        api_url: format!("http://{addr}"),
        ..Config::default()
    };
    OverfastClient::new(&config).expect("client for mock api")
}
