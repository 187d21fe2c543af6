//! Shuttle edge types.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Terminal, TerminalId};

/// Identifier assigned to a shuttle by the graph that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShuttleId(pub u64);

impl fmt::Display for ShuttleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// A timed, undirected connection between two terminals.
///
/// Shuttles are identified by their [`ShuttleId`]: two shuttles joining the
/// same pair of terminals with the same travel time are still distinct.
#[derive(Clone)]
pub struct Shuttle {
    id: ShuttleId,
    origin: Terminal,
    destination: Terminal,
    travel_time: u32,
}

impl Shuttle {
    pub(crate) fn new(
        id: ShuttleId,
        origin: Terminal,
        destination: Terminal,
        travel_time: u32,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            travel_time,
        }
    }

    pub fn id(&self) -> ShuttleId {
        self.id
    }

    pub fn origin(&self) -> &Terminal {
        &self.origin
    }

    pub fn destination(&self) -> &Terminal {
        &self.destination
    }

    /// Travel time in minutes.
    pub fn travel_time(&self) -> u32 {
        self.travel_time
    }

    /// Whether `terminal` is one of this shuttle's endpoints.
    pub fn touches(&self, terminal: &TerminalId) -> bool {
        self.origin.id() == terminal || self.destination.id() == terminal
    }

    /// Whether this shuttle starts and ends at the same terminal.
    pub fn is_loop(&self) -> bool {
        self.origin == self.destination
    }

    /// Returns the endpoint that is not `terminal`.
    ///
    /// Returns `None` if `terminal` is neither endpoint. For a loop shuttle
    /// the single endpoint is returned.
    pub fn opposite(&self, terminal: &TerminalId) -> Option<&Terminal> {
        if self.origin.id() == terminal {
            Some(&self.destination)
        } else if self.destination.id() == terminal {
            Some(&self.origin)
        } else {
            None
        }
    }

    /// Cost of riding this shuttle away from `from`: the travel time plus
    /// the waiting time at the terminal being left.
    ///
    /// Returns `None` if `from` is not an endpoint.
    pub fn departure_cost(&self, from: &TerminalId) -> Option<u64> {
        let departing = if self.origin.id() == from {
            &self.origin
        } else if self.destination.id() == from {
            &self.destination
        } else {
            return None;
        };
        Some(u64::from(self.travel_time) + u64::from(departing.waiting_time()))
    }
}

impl PartialEq for Shuttle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shuttle {}

impl Hash for Shuttle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Shuttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shuttle({}: {}-{}, {}min)",
            self.id, self.origin, self.destination, self.travel_time
        )
    }
}
