use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A paired clock, as stored and as returned by `GET /api/device/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Uuid,
    /// Display name (e.g., "Bedroom")
    pub name: String,
    /// IANA timezone name (e.g., "America/New_York")
    pub timezone: String,
    pub location: String,
    pub registered_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Partial update for `PUT /api/device/{id}`. Omitted fields keep their value;
/// `id`, `registeredAt` and `lastSeen` are owned by the server and ignored here.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub timezone: Option<String>,
    pub location: Option<String>,
}

impl UpdateDeviceRequest {
    /// True if any provided field is blank.
    pub fn has_blank_field(&self) -> bool {
        [&self.name, &self.timezone, &self.location]
            .into_iter()
            .flatten()
            .any(|v| v.trim().is_empty())
    }

    pub fn apply_to(&self, device: &mut Device) {
        if let Some(name) = &self.name {
            device.name = name.clone();
        }
        if let Some(timezone) = &self.timezone {
            device.timezone = timezone.clone();
        }
        if let Some(location) = &self.location {
            device.location = location.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DeviceSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Device> for DeviceSummary {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
        }
    }
}
