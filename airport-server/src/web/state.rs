//! Application state for the web layer.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::airport::Airport;
use crate::config::AirportConfig;

/// Shared application state.
///
/// Every handler goes through the same lock, so requests touching the
/// airport are serialized.
#[derive(Clone)]
pub struct AppState {
    airport: Arc<Mutex<Airport>>,

    /// Server configuration
    pub config: Arc<AirportConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(airport: Airport, config: AirportConfig) -> Self {
        Self {
            airport: Arc::new(Mutex::new(airport)),
            config: Arc::new(config),
        }
    }

    /// Lock the airport for the duration of a request.
    ///
    /// A poisoned lock is recovered: every airport operation leaves its
    /// structures consistent before it can panic.
    pub fn airport(&self) -> MutexGuard<'_, Airport> {
        self.airport
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
