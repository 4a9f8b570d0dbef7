use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, PairingError};
use crate::extract::ApiJson;
use crate::models::device::{Device, UpdateDeviceRequest};
use crate::models::pairing::{
    CompleteSetupRequest, SetupResponse, SuccessResponse, TokenResponse, VerifyCodeRequest,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-token", post(generate_token))
        .route("/verify-code", post(verify_code))
        .route("/complete-setup", post(complete_setup))
        .route("/{device_id}", get(get_device).put(update_device))
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

#[utoipa::path(
    post,
    path = "/api/device/generate-token",
    responses(
        (status = 200, description = "Pairing started", body = TokenResponse),
        (status = 500, description = "Token could not be generated", body = ApiError),
    ),
    tag = "Pairing"
)]
pub(crate) async fn generate_token(
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, PairingError> {
    let issued = state.registry.issue_token()?;
    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

#[utoipa::path(
    post,
    path = "/api/device/verify-code",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code accepted", body = SuccessResponse),
        (status = 400, description = "Missing fields or wrong code", body = ApiError),
        (status = 404, description = "Unknown or expired token", body = ApiError),
    ),
    tag = "Pairing"
)]
pub(crate) async fn verify_code(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VerifyCodeRequest>,
) -> Result<Json<SuccessResponse>, PairingError> {
    let (Some(token), Some(code)) = (required(req.token), required(req.code)) else {
        return Err(PairingError::InvalidInput("Token and code are required"));
    };

    state.registry.verify_code(&token, &code)?;
    Ok(Json(SuccessResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/device/complete-setup",
    request_body = CompleteSetupRequest,
    responses(
        (status = 200, description = "Device registered", body = SetupResponse),
        (status = 400, description = "Missing fields or unverified token", body = ApiError),
    ),
    tag = "Pairing"
)]
pub(crate) async fn complete_setup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CompleteSetupRequest>,
) -> Result<Json<SetupResponse>, PairingError> {
    let device = state.registry.complete_setup(
        req.token.as_deref().unwrap_or_default(),
        req.device_name.as_deref().unwrap_or_default(),
        req.timezone.as_deref().unwrap_or_default(),
        req.location.as_deref().unwrap_or_default(),
    )?;

    Ok(Json(SetupResponse {
        success: true,
        device,
    }))
}

#[utoipa::path(
    get,
    path = "/api/device/{device_id}",
    params(("device_id" = String, Path, description = "Device UUID")),
    responses(
        (status = 200, description = "Device record", body = Device),
        (status = 404, description = "Device not found", body = ApiError),
    ),
    tag = "Devices"
)]
pub(crate) async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<Device>, PairingError> {
    Ok(Json(state.registry.get_device(&device_id)?))
}

#[utoipa::path(
    put,
    path = "/api/device/{device_id}",
    params(("device_id" = String, Path, description = "Device UUID")),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Updated device record", body = Device),
        (status = 400, description = "Blank field", body = ApiError),
        (status = 404, description = "Device not found", body = ApiError),
    ),
    tag = "Devices"
)]
pub(crate) async fn update_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    ApiJson(req): ApiJson<UpdateDeviceRequest>,
) -> Result<Json<Device>, PairingError> {
    Ok(Json(state.registry.update_device(&device_id, &req)?))
}
