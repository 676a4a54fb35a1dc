//! API Gateway Library
//!
//! HTTP adapter over the user and auth services. Handlers only translate
//! between JSON and service calls; every rule lives in the services.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server until the listener fails.
pub async fn run(config: &GatewayConfig, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
