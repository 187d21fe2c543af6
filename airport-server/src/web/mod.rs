//! Web layer for the airport server.
//!
//! Exposes the shuttle graph, route searches, landing queue and security
//! table over HTTP.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
