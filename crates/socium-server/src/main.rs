//! Socium gateway server.
//!
//! Reads configuration from flags or the process environment, connects
//! the graph client, and serves the HTTP gateway.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use socium_graph::{GraphClient, GraphConfig};
use socium_web::AppState;

#[derive(Parser, Debug)]
#[command(name = "socium", about = "HTTP gateway over the socium social graph")]
struct Config {
    /// Bolt URI of the Neo4j instance.
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    neo4j_uri: String,

    /// Neo4j username.
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    neo4j_user: String,

    /// Neo4j password.
    #[arg(long, env = "NEO4J_PASSWORD")]
    neo4j_password: String,

    /// Listen host.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Listen port.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Bearer token required on mutating routes.
    #[arg(long, env = "AUTH_TOKEN")]
    auth_token: String,

    /// Comma-separated allowed CORS origins; empty allows any.
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "")]
    allowed_origins: String,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "socium=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid origin: {origin}"))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing();

    let graph_config = GraphConfig {
        uri: config.neo4j_uri,
        user: config.neo4j_user,
        password: config.neo4j_password,
        ..GraphConfig::default()
    };
    let graph = GraphClient::connect(&graph_config)
        .await
        .context("Failed to connect to Neo4j")?;

    let origins = parse_origins(&config.allowed_origins)?;
    let state = AppState::new(graph, config.auth_token);

    socium_web::run_server(state, &config.host, config.port, origins).await
}
