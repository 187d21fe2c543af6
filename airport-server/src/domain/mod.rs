//! Domain types for the airport.
//!
//! This module contains the value types shared by the shuttle graph, the
//! route planner and the landing dispatcher. Identifiers enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod flight;
mod path;
mod shuttle;
mod terminal;

pub use flight::{FlightError, FlightNumber, LandingTime, Plane};
pub use path::Path;
pub use shuttle::{Shuttle, ShuttleId};
pub use terminal::{InvalidTerminalId, Terminal, TerminalId};
