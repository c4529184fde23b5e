//! User route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use socium_graph::{RankedUser, UserProfile};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /user/{user_id}
///
/// The id arrives as a path string and is coerced to an integer for
/// matching; a non-numeric id matches nothing.
pub async fn fetch_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let Ok(user_id) = user_id.parse::<i64>() else {
        return Err(ApiError::NotFound("User not found"));
    };

    match state.graph.fetch_user(user_id).await? {
        Some(profile) => Ok(Json(profile)),
        None => Err(ApiError::NotFound("User not found")),
    }
}

/// GET /top-users
pub async fn fetch_top_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankedUser>>, ApiError> {
    Ok(Json(state.graph.top_users().await?))
}

/// GET /users-count
pub async fn fetch_users_count(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let count = state.graph.count_users().await?;
    Ok(Json(json!({ "users_count": count })))
}
