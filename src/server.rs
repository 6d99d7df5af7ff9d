//! JSON HTTP API over the listing pipeline.
//!
//! Every request loads a fresh snapshot from the listing's source and runs
//! the same controller as `eco list`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/listings/{listing}` | One page; query `search`, `filter`, `sort`, `page` |
//! | `GET`  | `/listings/{listing}/facets` | Filter options of the listing |
//! | `GET`  | `/nav` | Navigation items built from the `entity_types` lookup |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "unknown listing 'events'" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `upstream` (502),
//! `internal` (500).

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use eco_directory_core::models::{Accelerator, LoadStatus, MediaOutlet};
use eco_directory_core::nav::NavItem;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{Config, ListingKind};
use crate::entities::DirectoryEntity;
use crate::listing::{fetch_page, ListingPage, ListingRequest};
use crate::nav_cmd::fetch_nav;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Build the router without binding, so callers can serve it on any listener.
pub fn router(config: Arc<Config>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/listings/{listing}", get(handle_listing))
        .route("/listings/{listing}/facets", get(handle_facets))
        .route("/nav", get(handle_nav))
        .layer(cors)
        .with_state(AppState { config })
}

/// Starts the HTTP server on `[server].bind` and runs until terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(Arc::new(config.clone()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(listings = config.sources.len(), "listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

fn upstream(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "upstream",
        message: message.into(),
    }
}

fn internal(err: anyhow::Error) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal",
        message: format!("{:#}", err),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /listings/{listing} ============

/// Load one page, reporting a failed source as `upstream`.
async fn loaded_page<T: DirectoryEntity>(
    config: &Config,
    name: &str,
    req: &ListingRequest,
) -> Result<ListingPage<T>, AppError> {
    let page = fetch_page::<T>(config, name, req).await.map_err(internal)?;
    if page.status == LoadStatus::Failed {
        return Err(upstream(format!(
            "failed to load '{}': {}",
            name,
            page.error.unwrap_or_default()
        )));
    }
    Ok(page)
}

async fn listing_json<T: DirectoryEntity>(
    config: &Config,
    name: &str,
    req: &ListingRequest,
) -> Result<serde_json::Value, AppError> {
    let page = loaded_page::<T>(config, name, req).await?;
    serde_json::to_value(&page).map_err(|e| internal(e.into()))
}

fn listing_kind(config: &Config, name: &str) -> Result<ListingKind, AppError> {
    config
        .sources
        .get(name)
        .map(|s| s.kind)
        .ok_or_else(|| not_found(format!("unknown listing '{}'", name)))
}

async fn handle_listing(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<ListingRequest>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Query(req) = query.map_err(|e| bad_request(e.body_text()))?;
    let value = match listing_kind(&state.config, &name)? {
        ListingKind::Accelerators => listing_json::<Accelerator>(&state.config, &name, &req).await?,
        ListingKind::Media => listing_json::<MediaOutlet>(&state.config, &name, &req).await?,
    };
    Ok(Json(value))
}

// ============ GET /listings/{listing}/facets ============

#[derive(Serialize)]
struct FacetsResponse {
    listing: String,
    facets: Vec<String>,
}

async fn handle_facets(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FacetsResponse>, AppError> {
    let req = ListingRequest::default();
    let facets = match listing_kind(&state.config, &name)? {
        ListingKind::Accelerators => {
            loaded_page::<Accelerator>(&state.config, &name, &req)
                .await?
                .facets
        }
        ListingKind::Media => {
            loaded_page::<MediaOutlet>(&state.config, &name, &req)
                .await?
                .facets
        }
    };
    Ok(Json(FacetsResponse {
        listing: name,
        facets,
    }))
}

// ============ GET /nav ============

#[derive(Serialize)]
struct NavResponse {
    items: Vec<NavItem>,
}

async fn handle_nav(State(state): State<AppState>) -> Result<Json<NavResponse>, AppError> {
    let items = fetch_nav(&state.config)
        .await
        .map_err(|e| upstream(format!("{:#}", e)))?;
    Ok(Json(NavResponse { items }))
}
