pub mod clock;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod registry;
pub mod routes;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::registry::PairingRegistry;

#[derive(Clone)]
pub struct AppState {
    /// Single owner of pairing and device state, shared by every handler.
    pub registry: Arc<PairingRegistry>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::device::generate_token,
        routes::device::verify_code,
        routes::device::complete_setup,
        routes::device::get_device,
        routes::device::update_device,
    ),
    components(schemas(
        error::ApiError,
        models::pairing::TokenResponse,
        models::pairing::VerifyCodeRequest,
        models::pairing::CompleteSetupRequest,
        models::pairing::SuccessResponse,
        models::pairing::SetupResponse,
        models::device::Device,
        models::device::DeviceSummary,
        models::device::UpdateDeviceRequest,
    )),
    tags(
        (name = "Pairing", description = "Token issuance, code verification & setup"),
        (name = "Devices", description = "Registered device records")
    )
)]
pub struct ApiDoc;

pub fn cors_layer(cors_origins: &str) -> CorsLayer {
    if cors_origins.trim().is_empty() || cors_origins == "*" {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any)
    }
}

/// Full application: API routes, Swagger UI, CORS and request tracing.
pub fn build_app(state: AppState, cors_origins: &str) -> Router {
    routes::api_router(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Sweep expired pairings every `every`. Returns `None` when `every` is zero.
pub fn spawn_sweeper(
    registry: Arc<PairingRegistry>,
    every: Duration,
) -> Option<tokio::task::JoinHandle<()>> {
    if every.is_zero() {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick fires immediately; nothing can have expired yet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = registry.sweep_expired();
            if removed > 0 {
                tracing::info!(
                    "Background sweep removed {} expired pairing(s), {} pending",
                    removed,
                    registry.pending_count()
                );
            }
        }
    }))
}
