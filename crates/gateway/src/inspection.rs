//! Contactor inspection endpoints.
//!
//! - `POST /inspection/contact/toshiba/options`      — next primary step
//! - `POST /inspection/contact/toshiba/ups/options`  — next backup device step
//! - `POST /inspection/contact/toshiba/result`       — assembled result

use crate::{ErrorResponse, SharedState};
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::post};
use liftcheck_core::record::ResultGroup;
use liftcheck_core::selection::Selection;
use liftcheck_core::step::StepResult;
use liftcheck_engine::EngineError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/inspection/contact/toshiba/options", post(options_handler))
        .route(
            "/inspection/contact/toshiba/ups/options",
            post(ups_options_handler),
        )
        .route("/inspection/contact/toshiba/result", post(result_handler))
}

// ── DTOs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct OptionsRequest {
    #[serde(default)]
    pub selected: Option<Selection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpsOptionsRequest {
    #[serde(default, rename = "baseSelected")]
    pub base_selected: Option<Selection>,
    #[serde(default, rename = "upsSelected")]
    pub ups_selected: Option<Selection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultRequest {
    #[serde(default)]
    pub selected: Option<Selection>,
    #[serde(default)]
    pub ups: Option<Selection>,
}

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub groups: Vec<ResultGroup>,
    /// Every answer given in the session, backup device answers last.
    pub choices: Selection,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn not_found(err: EngineError) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn options_handler(
    State(state): State<SharedState>,
    Json(payload): Json<OptionsRequest>,
) -> Result<Json<StepResult>, ApiError> {
    let selected = payload.selected.unwrap_or_default();
    let step = state.engine.primary_step(&selected).map_err(not_found)?;
    Ok(Json(step))
}

async fn ups_options_handler(
    State(state): State<SharedState>,
    Json(payload): Json<UpsOptionsRequest>,
) -> Result<Json<StepResult>, ApiError> {
    let base = payload.base_selected.unwrap_or_default();
    let ups = payload.ups_selected.unwrap_or_default();
    let step = state
        .engine
        .secondary_step(&base, &ups)
        .map_err(not_found)?;
    if let StepResult::AutoFill { field, value } = &step {
        debug!(field = %field, value = %value, "Backup device flow seeded");
    }
    Ok(Json(step))
}

async fn result_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ResultRequest>,
) -> Json<ResultResponse> {
    let selected = payload.selected.unwrap_or_default();
    let ups = payload.ups.unwrap_or_default();
    let record = state.engine.assemble(&selected, &ups);
    info!(
        answered = selected.len(),
        backup_answers = ups.len(),
        groups = record.groups.len(),
        "Result assembled"
    );
    Json(ResultResponse {
        groups: record.groups,
        choices: selected.merged(&ups),
    })
}
