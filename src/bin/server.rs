use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{collections::HashMap, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use overstats::listing::{filter_maps, group_heroes_by_role, role_icons};
use overstats::view::{hero_sections, summary_sections};
use overstats::{Config, NormalizeOptions, OverfastClient, OverstatsError, PlayerPage};

#[derive(Clone)]
struct AppState {
    client: Arc<OverfastClient>,
    options: NormalizeOptions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let client = OverfastClient::new(&config)?;

    let state = AppState {
        client: Arc::new(client),
        options: NormalizeOptions::from(&config),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/players/{id}", get(player_handler))
        .route("/players/{id}/stats", get(player_stats_handler))
        .route("/players/{id}/heroes", get(player_heroes_handler))
        .route("/heroes", get(heroes_handler))
        .route("/maps", get(maps_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, api = %config.api_url, "server running");
    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(e: OverstatsError) -> axum::response::Response {
    let status = match &e {
        OverstatsError::MissingPlayerId => StatusCode::BAD_REQUEST,
        OverstatsError::Api { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        OverstatsError::Http(_) | OverstatsError::Json(_) => StatusCode::BAD_GATEWAY,
        OverstatsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Whole player page. Each region reports its own state, so a failed hero
/// catalog still returns the profile.
async fn player_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut page = PlayerPage::new();
    page.load(&state.client, &id, state.options).await;
    Json(json!(page))
}

async fn player_stats_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.client.player_stats_summary(&id).await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary_sections(&summary)))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Per-hero stat sections. Catalog names are decoration only.
async fn player_heroes_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let (summary, heroes) = tokio::join!(
        state.client.player_stats_summary(&id),
        state.client.heroes(None)
    );
    let heroes = heroes.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "hero catalog unavailable");
        Vec::new()
    });
    match summary {
        Ok(summary) => (StatusCode::OK, Json(json!(hero_sections(&summary, &heroes)))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn heroes_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let search = params.get("search").map(String::as_str).unwrap_or("");
    let (heroes, roles) = tokio::join!(state.client.heroes(None), state.client.roles());

    let icons = match roles {
        Ok(roles) => role_icons(&roles),
        Err(e) => {
            tracing::warn!(error = %e, "role icons unavailable");
            HashMap::new()
        }
    };
    match heroes {
        Ok(heroes) => {
            let groups = group_heroes_by_role(&heroes, search, &icons);
            (StatusCode::OK, Json(json!(groups))).into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn maps_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let search = params.get("search").map(String::as_str).unwrap_or("");
    let gamemode = params.get("gamemode").map(String::as_str);
    match state.client.maps(None).await {
        Ok(maps) => {
            let filtered = filter_maps(&maps, search, gamemode);
            (StatusCode::OK, Json(json!(filtered))).into_response()
        }
        Err(e) => error_response(e),
    }
}
