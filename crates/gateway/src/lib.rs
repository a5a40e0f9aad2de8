//! HTTP gateway for LiftCheck.
//!
//! Exposes the inspection decision protocol, result assembly and the
//! equipment lookups over JSON.
//!
//! Built on Axum. Tables are loaded once at startup and shared read-only
//! across requests; every handler is a pure function of that state and
//! the request body.

pub mod elevator;
pub mod inspection;

use axum::extract::DefaultBodyLimit;
use axum::{Router, extract::State, response::Json, routing::get};
use liftcheck_config::AppConfig;
use liftcheck_data::{TableStatus, TableStore};
use liftcheck_engine::{InspectionEngine, InspectionSchema, ResultLayout};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state.
pub struct AppState {
    pub engine: Arc<InspectionEngine>,
    pub store: TableStore,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the loaded tables into a fresh engine.
    pub fn new(store: TableStore, schema: InspectionSchema) -> Self {
        let engine = InspectionEngine::new(
            schema,
            ResultLayout::contactors(),
            store.primary.table().cloned(),
            store.secondary.table().cloned(),
        );
        Self {
            engine: Arc::new(engine),
            store,
            start_time: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the Axum router with all routes.
pub fn build_router(state: SharedState, body_limit: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(inspection::router())
        .merge(elevator::router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Load the tables and serve until the process is stopped.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let store = TableStore::load(&config.data);
    for status in store.statuses().iter().filter(|s| !s.available) {
        warn!(table = status.name, origin = %status.origin, "Serving without table");
    }

    let state = Arc::new(AppState::new(store, InspectionSchema::from(&config.schema)));
    let app = build_router(state, config.gateway.body_limit_bytes);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: i64,
    pub tables: Vec<TableHealth>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TableHealth {
    pub name: String,
    pub available: bool,
    pub rows: usize,
}

impl From<TableStatus> for TableHealth {
    fn from(status: TableStatus) -> Self {
        Self {
            name: status.name.to_string(),
            available: status.available,
            rows: status.rows,
        }
    }
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let tables: Vec<TableHealth> = state
        .store
        .statuses()
        .into_iter()
        .map(TableHealth::from)
        .collect();
    let status = if tables.iter().all(|t| t.available) {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status: status.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_secs: (chrono::Utc::now() - state.start_time).num_seconds(),
        tables,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_endpoint() {
        let app = app(state(true, true));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.tables.len(), 3);
    }

    #[tokio::test]
    async fn health_reports_missing_tables() {
        let app = app(state(true, false));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "degraded");
        assert!(
            health
                .tables
                .iter()
                .any(|t| t.name == "secondary" && !t.available)
        );
    }
}
