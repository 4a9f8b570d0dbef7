use std::time::Duration;

use crate::registry::DEFAULT_PAIRING_TTL;

pub struct Config {
    pub listen_addr: String,
    /// Comma-separated allowed CORS origins. If empty or "*", allows all origins (dev mode).
    pub cors_origins: String,
    /// How long an unfinished pairing stays valid after its token is issued.
    pub pairing_ttl: Duration,
    /// Period of the background sweep. Zero disables it; issuing a token still sweeps.
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            cors_origins: std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            pairing_ttl: Duration::from_secs(secs_from_env(
                "PAIRING_TTL_SECS",
                DEFAULT_PAIRING_TTL.as_secs(),
            )),
            sweep_interval: Duration::from_secs(secs_from_env("SWEEP_INTERVAL_SECS", 300)),
        }
    }
}

fn secs_from_env(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => parse_secs(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_secs(key: &str, raw: &str, default: u64) -> u64 {
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!("{} is not a number of seconds ({:?}), using {}", key, raw, default);
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secs_accepts_padded_number() {
        assert_eq!(parse_secs("PAIRING_TTL_SECS", " 120 ", 3600), 120);
    }

    #[test]
    fn test_parse_secs_falls_back_on_garbage() {
        assert_eq!(parse_secs("PAIRING_TTL_SECS", "one hour", 3600), 3600);
        assert_eq!(parse_secs("SWEEP_INTERVAL_SECS", "-5", 300), 300);
    }
}
