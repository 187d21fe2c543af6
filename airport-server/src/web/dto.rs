//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Path, Plane, Shuttle, Terminal};

/// Request to add a terminal.
#[derive(Debug, Deserialize)]
pub struct CreateTerminalRequest {
    /// Terminal identifier (e.g., "T1")
    pub id: String,

    /// Waiting time in minutes
    pub waiting_time: u32,
}

/// A terminal in responses.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminalResult {
    pub id: String,
    pub waiting_time: u32,
}

impl TerminalResult {
    pub fn from_terminal(terminal: &Terminal) -> Self {
        Self {
            id: terminal.id().as_str().to_string(),
            waiting_time: terminal.waiting_time(),
        }
    }
}

/// Terminal listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct TerminalListResponse {
    pub terminals: Vec<TerminalResult>,
    pub shuttle_capacity: u32,
}

/// Request to add a shuttle.
#[derive(Debug, Deserialize)]
pub struct CreateShuttleRequest {
    pub origin: String,
    pub destination: String,

    /// Travel time in minutes
    pub travel_time: u32,
}

/// A shuttle in responses.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShuttleResult {
    pub id: u64,
    pub origin: String,
    pub destination: String,
    pub travel_time: u32,
}

impl ShuttleResult {
    pub fn from_shuttle(shuttle: &Shuttle) -> Self {
        Self {
            id: shuttle.id().0,
            origin: shuttle.origin().id().as_str().to_string(),
            destination: shuttle.destination().id().as_str().to_string(),
            travel_time: shuttle.travel_time(),
        }
    }
}

/// Shuttles touching a terminal, most recent first.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShuttleListResponse {
    pub terminal: String,
    pub shuttles: Vec<ShuttleResult>,
}

/// Query parameters for route searches.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
}

/// A route search result.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResult {
    /// Terminal ids in visiting order
    pub terminals: Vec<String>,

    /// Total cost in minutes, absent when unreachable
    pub cost: Option<u64>,

    pub reachable: bool,
}

impl RouteResult {
    pub fn from_path(path: &Path) -> Self {
        Self {
            terminals: path.ids().into_iter().map(str::to_string).collect(),
            cost: path.cost(),
            reachable: path.is_reachable(),
        }
    }
}

/// Request to queue a plane for landing.
#[derive(Debug, Deserialize)]
pub struct AddPlaneRequest {
    pub flight: String,

    /// Landing time in HH:MM format
    pub time: String,
}

/// Request for the next landing slot.
#[derive(Debug, Deserialize)]
pub struct AllocateSlotRequest {
    /// Current time in HH:MM format
    pub current_time: String,
}

/// Outcome of a landing request.
#[derive(Debug, Serialize, Deserialize)]
pub struct LandingResponse {
    /// Flight cleared to land, if any
    pub flight: Option<String>,

    /// Planes still queued
    pub queued: usize,
}

/// A plane on the board.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaneResult {
    pub flight: String,
    pub time: String,
}

impl PlaneResult {
    pub fn from_plane(plane: &Plane) -> Self {
        Self {
            flight: plane.flight.as_str().to_string(),
            time: plane.time.to_string(),
        }
    }
}

/// The arrivals board.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardResponse {
    pub planes: Vec<PlaneResult>,
}

/// Request to register a passenger at security.
#[derive(Debug, Deserialize)]
pub struct AddPassengerRequest {
    pub name: String,
    pub passport_id: String,
}

/// A registered passenger.
#[derive(Debug, Serialize, Deserialize)]
pub struct PassengerResult {
    pub passport_id: String,
    pub name: String,
    pub visits: u32,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
