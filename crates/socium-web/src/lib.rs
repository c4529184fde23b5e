//! # Socium Web
//!
//! Axum HTTP gateway over the socium social graph: read endpoints for
//! users, groups, and nodes, plus bearer-gated node creation and
//! deletion.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Create the application router.
///
/// An empty `allowed_origins` list means any origin is admitted (dev
/// default). Only node creation and deletion sit behind the bearer
/// gate; every read route is unauthenticated.
pub fn create_router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let read_routes = Router::new()
        .route("/user/{user_id}", get(routes::users::fetch_user))
        .route("/top-users", get(routes::users::fetch_top_users))
        .route("/top-groups", get(routes::groups::fetch_top_groups))
        .route("/users-count", get(routes::users::fetch_users_count))
        .route("/groups-count", get(routes::groups::fetch_groups_count))
        .route("/nodes", get(routes::nodes::fetch_all_nodes))
        .route(
            "/node/{label}/{node_id}",
            get(routes::nodes::fetch_node_with_relations),
        )
        .with_state(state.clone());

    let mutating_routes = Router::new()
        .route("/nodes", post(routes::nodes::create_node_and_relationships))
        .route(
            "/nodes/{label}/{node_id}",
            delete(routes::nodes::delete_node_and_relations),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ))
        .with_state(state);

    read_routes
        .merge(mutating_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the web server.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
    allowed_origins: Vec<HeaderValue>,
) -> anyhow::Result<()> {
    let app = create_router(state, allowed_origins);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!("Gateway listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
