//! Server configuration.
//!
//! Defaults suit a small regional airport; each field can be overridden
//! from an `AIRPORT_*` environment variable.

use std::net::SocketAddr;
use std::str::FromStr;

use chrono::Duration;

use crate::security::SecurityConfig;

/// Longest landing window accepted: one day.
pub const MAX_LANDING_WINDOW_MINS: i64 = 24 * 60;

/// Error reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Configuration for the airport server.
#[derive(Debug, Clone)]
pub struct AirportConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Passenger capacity of every shuttle.
    pub shuttle_capacity: u32,

    /// How far ahead of its landing time a plane may be given a slot
    /// (minutes).
    pub landing_window_mins: i64,

    /// Sizing of the passenger security table.
    pub security: SecurityConfig,
}

impl AirportConfig {
    /// Returns the landing window as a Duration.
    pub fn landing_window(&self) -> Duration {
        Duration::minutes(self.landing_window_mins)
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration, reading overrides through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_with(&lookup, "AIRPORT_BIND_ADDR", &mut config.bind_addr)?;
        override_with(&lookup, "AIRPORT_SHUTTLE_CAPACITY", &mut config.shuttle_capacity)?;
        override_with(
            &lookup,
            "AIRPORT_LANDING_WINDOW_MINS",
            &mut config.landing_window_mins,
        )?;
        override_with(
            &lookup,
            "AIRPORT_PLANES_PER_DAY",
            &mut config.security.planes_per_day,
        )?;
        override_with(
            &lookup,
            "AIRPORT_PASSENGERS_PER_PLANE",
            &mut config.security.passengers_per_plane,
        )?;
        override_with(
            &lookup,
            "AIRPORT_SECURITY_MAX_CAPACITY",
            &mut config.security.max_capacity,
        )?;
        override_with(&lookup, "AIRPORT_MAX_VISITS", &mut config.security.max_visits)?;

        if !(0..=MAX_LANDING_WINDOW_MINS).contains(&config.landing_window_mins) {
            return Err(ConfigError {
                key: "AIRPORT_LANDING_WINDOW_MINS",
                value: config.landing_window_mins.to_string(),
            });
        }

        Ok(config)
    }
}

fn override_with<F, T>(lookup: &F, key: &'static str, slot: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(value) = lookup(key) {
        *slot = value
            .trim()
            .parse()
            .map_err(|_| ConfigError { key, value })?;
    }
    Ok(())
}

impl Default for AirportConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            shuttle_capacity: 50,
            landing_window_mins: 5,
            security: SecurityConfig::default(),
        }
    }
}
