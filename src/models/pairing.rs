use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::device::DeviceSummary;

// ── Registry state ───────────────────────────────────────────────────────────

/// An unfinished pairing, keyed by its token. The verification code is kept in
/// the same entry so the two are always written and removed together.
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub issued_at: DateTime<Utc>,
    pub verified: bool,
    pub code: String,
}

/// What the device side gets back when a pairing starts.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub code: String,
}

// ── API types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Pairing token (UUID v4)
    pub token: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyCodeRequest {
    pub token: Option<String>,
    /// 6-digit code shown on the device, as a string or a number
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
}

/// Keypad front ends often post the code as a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(text) => text,
        Code::Number(n) => n.to_string(),
    }))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSetupRequest {
    pub token: Option<String>,
    pub device_name: Option<String>,
    pub timezone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SetupResponse {
    pub success: bool,
    pub device: DeviceSummary,
}
