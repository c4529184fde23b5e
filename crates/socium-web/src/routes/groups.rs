//! Group route handlers.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use socium_graph::RankedGroup;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /top-groups
pub async fn fetch_top_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankedGroup>>, ApiError> {
    Ok(Json(state.graph.top_groups().await?))
}

/// GET /groups-count
pub async fn fetch_groups_count(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let count = state.graph.count_groups().await?;
    Ok(Json(json!({ "groups_count": count })))
}
