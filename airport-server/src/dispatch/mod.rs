//! Landing-slot dispatcher.
//!
//! Keeps incoming planes ordered by landing time (then flight number) and
//! hands out landing slots to whichever plane is next, provided it is due
//! within the landing window. Emergencies jump the queue.

use std::collections::VecDeque;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::domain::{FlightNumber, LandingTime, Plane};

/// Planes waiting to land, earliest first.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    planes: VecDeque<Plane>,
    window: Duration,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Duration::minutes(5))
    }
}

impl Dispatcher {
    /// Create a dispatcher that releases a plane once it is due within
    /// `window` of the current time.
    pub fn new(window: Duration) -> Self {
        Self {
            planes: VecDeque::new(),
            window,
        }
    }

    /// Add a plane, keeping the queue ordered.
    ///
    /// The plane goes after every plane that sorts strictly before it.
    pub fn add_plane(&mut self, flight: FlightNumber, time: LandingTime) {
        let plane = Plane::new(flight, time);
        let at = self.planes.partition_point(|p| p < &plane);
        debug!(flight = %plane.flight, time = %plane.time, position = at, "Queued plane");
        self.planes.insert(at, plane);
    }

    /// Give the next landing slot to the plane at the head of the queue.
    ///
    /// Returns `None` when the queue is empty or when the next plane is due
    /// more than the landing window after `now`.
    pub fn allocate_landing_slot(&mut self, now: LandingTime) -> Option<FlightNumber> {
        let next = self.planes.front()?;
        if next.time.since(now) > self.window {
            debug!(
                next = %next.flight,
                due = %next.time,
                now = %now,
                "No plane due within landing window"
            );
            return None;
        }

        let plane = self.planes.pop_front()?;
        info!(flight = %plane.flight, due = %plane.time, now = %now, "Allocated landing slot");
        Some(plane.flight)
    }

    /// Clear every queued entry for `flight` so it can land immediately.
    ///
    /// Returns `None` if the flight is not queued.
    pub fn emergency_landing(&mut self, flight: &FlightNumber) -> Option<FlightNumber> {
        if !self.is_present(flight) {
            return None;
        }

        self.planes.retain(|p| &p.flight != flight);
        warn!(flight = %flight, "Emergency landing");
        Some(flight.clone())
    }

    pub fn is_present(&self, flight: &FlightNumber) -> bool {
        self.planes.iter().any(|p| &p.flight == flight)
    }

    /// Number of queued planes.
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Queued planes in landing order.
    pub fn planes(&self) -> &VecDeque<Plane> {
        &self.planes
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
