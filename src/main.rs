use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use ridegate::logging::init_tracing;
use ridegate::middleware::rate_limit::spawn_limiter_upkeep;
use ridegate::router::init_router;
use ridegate::state::init_app_state;
use ridegate_config::{LoggingConfig, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&LoggingConfig::from_env()).context("Failed to initialize logging")?;

    let state = init_app_state().await?;
    if let Some(limiter) = &state.rate_limiter {
        spawn_limiter_upkeep(limiter.clone(), state.rate_limit_config.upkeep_interval());
    }
    let app = init_router(state);

    let address = ServerConfig::from_env().address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("Server running on http://{address}");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
