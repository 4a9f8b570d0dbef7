//! Device pairing registry.
//!
//! A pairing moves through `issued -> verified -> consumed`; any issued token
//! that outlives the retention window is swept. Consumed and expired tokens are
//! simply absent, so every later lookup fails the same way.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng as _;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{PairingError, PairingResult};
use crate::models::device::{Device, DeviceSummary, UpdateDeviceRequest};
use crate::models::pairing::{IssuedToken, PendingRegistration};
use crate::store::{KeyValueStore, MemoryStore};

pub const DEFAULT_PAIRING_TTL: Duration = Duration::from_secs(60 * 60);

const TOKEN_NOT_FOUND: &str = "Invalid or expired token";
const DEVICE_NOT_FOUND: &str = "Device not found";

pub struct PairingRegistry {
    pending: Box<dyn KeyValueStore<PendingRegistration>>,
    devices: Box<dyn KeyValueStore<Device>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl PairingRegistry {
    /// In-memory registry on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_parts(
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
            Arc::new(SystemClock),
            ttl,
        )
    }

    pub fn with_parts(
        pending: Box<dyn KeyValueStore<PendingRegistration>>,
        devices: Box<dyn KeyValueStore<Device>>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            pending,
            devices,
            clock,
            ttl,
        }
    }

    /// Start a pairing: fresh token plus a 6-digit code for the device to display.
    /// Also sweeps expired pairings.
    pub fn issue_token(&self) -> PairingResult<IssuedToken> {
        let now = self.clock.now();
        let token = Uuid::new_v4().to_string();
        let code = rand::thread_rng().gen_range(100_000..=999_999u32).to_string();

        let inserted = self.pending.set_if_absent(
            token.clone(),
            PendingRegistration {
                issued_at: now,
                verified: false,
                code: code.clone(),
            },
        );
        if !inserted {
            return Err(PairingError::Internal("Failed to generate token".to_string()));
        }

        let swept = self.sweep_expired();
        if swept > 0 {
            tracing::debug!("Swept {} expired pairing(s)", swept);
        }

        tracing::info!("Issued pairing token {}", token);
        Ok(IssuedToken { token, code })
    }

    /// Check the code the user typed against the one issued with `token`.
    /// Succeeds again if the token is already verified and the code still matches.
    pub fn verify_code(&self, token: &str, code: &str) -> PairingResult<()> {
        let now = self.clock.now();
        let code = code.trim();

        let mut outcome = None;
        self.pending.update(token, &mut |reg| {
            outcome = Some(if self.is_expired(reg, now) {
                Err(PairingError::NotFound(TOKEN_NOT_FOUND))
            } else if reg.code == code {
                reg.verified = true;
                Ok(())
            } else {
                Err(PairingError::CodeMismatch)
            });
        });

        let result = outcome.unwrap_or(Err(PairingError::NotFound(TOKEN_NOT_FOUND)));
        match &result {
            Ok(()) => tracing::info!("Pairing token {} verified", token),
            Err(e) => tracing::debug!("Verification failed for {}: {}", token, e),
        }
        result
    }

    /// Turn a verified pairing into a device. The token is consumed whether or
    /// not the device is modified afterwards.
    pub fn complete_setup(
        &self,
        token: &str,
        device_name: &str,
        timezone: &str,
        location: &str,
    ) -> PairingResult<DeviceSummary> {
        if [token, device_name, timezone, location]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(PairingError::InvalidInput("Missing required fields"));
        }

        let now = self.clock.now();
        let registration = self
            .pending
            .take_if(token, &|reg| reg.verified && !self.is_expired(reg, now))
            .ok_or(PairingError::Unverified)?;

        let device = Device {
            id: Uuid::new_v4(),
            name: device_name.to_string(),
            timezone: timezone.to_string(),
            location: location.to_string(),
            registered_at: now,
            last_seen: now,
        };
        if !self.devices.set_if_absent(device.id.to_string(), device.clone()) {
            // Hand the pairing back so the caller can retry setup.
            self.pending.set_if_absent(token.to_string(), registration);
            return Err(PairingError::Internal(
                "Failed to complete device setup".to_string(),
            ));
        }

        tracing::info!("Device {} ({}) registered", device.id, device.name);
        Ok(DeviceSummary::from(&device))
    }

    pub fn get_device(&self, device_id: &str) -> PairingResult<Device> {
        self.devices
            .get(device_id)
            .ok_or(PairingError::NotFound(DEVICE_NOT_FOUND))
    }

    /// Merge the provided fields into the device and refresh `last_seen`.
    pub fn update_device(
        &self,
        device_id: &str,
        update: &UpdateDeviceRequest,
    ) -> PairingResult<Device> {
        if update.has_blank_field() {
            return Err(PairingError::InvalidInput("Device fields cannot be empty"));
        }

        let now = self.clock.now();
        let device = self
            .devices
            .update(device_id, &mut |device| {
                update.apply_to(device);
                device.last_seen = now;
            })
            .ok_or(PairingError::NotFound(DEVICE_NOT_FOUND))?;

        tracing::debug!("Device {} updated", device_id);
        Ok(device)
    }

    /// Drop every pending pairing older than the retention window.
    /// Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        self.pending.retain(&|_, reg| !self.is_expired(reg, now))
    }

    /// Pairings issued and not yet consumed or swept.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn is_expired(&self, reg: &PendingRegistration, now: DateTime<Utc>) -> bool {
        // A clock that went backwards yields a negative age; treat it as fresh.
        (now - reg.issued_at)
            .to_std()
            .map(|age| age > self.ttl)
            .unwrap_or(false)
    }
}
