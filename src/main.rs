use std::sync::Arc;

use smartclock_pairing::config::Config;
use smartclock_pairing::registry::PairingRegistry;
use smartclock_pairing::{build_app, spawn_sweeper, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("smartclock_pairing=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env();

    let registry = Arc::new(PairingRegistry::new(config.pairing_ttl));
    if spawn_sweeper(registry.clone(), config.sweep_interval).is_some() {
        tracing::info!(
            "Sweeping expired pairings every {}s (ttl {}s)",
            config.sweep_interval.as_secs(),
            config.pairing_ttl.as_secs()
        );
    }

    let state = AppState { registry };
    let app = build_app(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    tracing::info!("Swagger UI at http://{}/docs/", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
