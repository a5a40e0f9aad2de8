//! Equipment master-data lookups.
//!
//! - `GET /api/elevator?kanri=`   — maker, model and site of one unit
//! - `GET /api/elevator/list`     — every management number
//! - `GET /inspection/site?kanri=` — site name for page headers

use crate::SharedState;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use liftcheck_data::Equipment;
use serde::{Deserialize, Serialize};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/elevator", get(elevator_handler))
        .route("/api/elevator/list", get(list_handler))
        .route("/inspection/site", get(site_handler))
}

#[derive(Debug, Deserialize)]
pub struct KanriQuery {
    pub kanri: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OptionalKanriQuery {
    #[serde(default)]
    pub kanri: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SiteResponse {
    pub kanri: String,
    pub genba: String,
}

async fn elevator_handler(
    State(state): State<SharedState>,
    Query(query): Query<KanriQuery>,
) -> Result<Json<Equipment>, (StatusCode, Json<DetailResponse>)> {
    state
        .store
        .registry()
        .lookup(&query.kanri)
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(DetailResponse {
                    detail: "管理番号が見つかりません".into(),
                }),
            )
        })
}

async fn list_handler(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(state.store.registry().keys())
}

async fn site_handler(
    State(state): State<SharedState>,
    Query(query): Query<OptionalKanriQuery>,
) -> Json<SiteResponse> {
    let genba = state.store.registry().site_name(&query.kanri);
    Json(SiteResponse {
        kanri: query.kanri,
        genba,
    })
}
