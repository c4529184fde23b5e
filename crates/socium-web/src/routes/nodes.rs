//! Generic node route handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use socium_graph::{Label, NewNode, NodeDetail, NodeSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /nodes
pub async fn fetch_all_nodes(
    State(state): State<AppState>,
) -> Result<Json<Vec<NodeSummary>>, ApiError> {
    Ok(Json(state.graph.list_nodes().await?))
}

/// GET /node/{label}/{node_id}
pub async fn fetch_node_with_relations(
    State(state): State<AppState>,
    Path((label, node_id)): Path<(String, i64)>,
) -> Result<Json<NodeDetail>, ApiError> {
    let label = Label::parse(&label)?;
    info!(%label, node_id, "Fetching node with relations");

    match state.graph.fetch_node_with_relations(&label, node_id).await? {
        Some(detail) => Ok(Json(detail)),
        None => Err(ApiError::NotFound("Node or relations not found")),
    }
}

/// POST /nodes (bearer-gated)
///
/// The body is read raw so an absent body maps to 400 rather than the
/// extractor's default rejection.
pub async fn create_node_and_relationships(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("No node data provided".to_string()));
    }
    let node: NewNode = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid node data: {e}")))?;

    state.graph.create_node(&node).await?;
    Ok(Json(json!({ "status": "success" })))
}

/// DELETE /nodes/{label}/{node_id} (bearer-gated)
///
/// Succeeds even when nothing matched.
pub async fn delete_node_and_relations(
    State(state): State<AppState>,
    Path((label, node_id)): Path<(String, i64)>,
) -> Result<Json<Value>, ApiError> {
    let label = Label::parse(&label)?;

    state.graph.delete_node(&label, node_id).await?;
    Ok(Json(json!({ "status": "success" })))
}
