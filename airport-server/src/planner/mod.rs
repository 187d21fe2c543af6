//! Route planner over the shuttle graph.
//!
//! Two searches are offered:
//! - [`PathFinder::shortest_path`]: breadth-first, stops at the first
//!   discovery of the destination, favouring the most recently inserted
//!   shuttle at each terminal;
//! - [`PathFinder::fastest_path`]: Dijkstra relaxation where each ride
//!   costs the shuttle's travel time plus the waiting time at the terminal
//!   being left.
//!
//! Every search builds its own distance map, visited set and queue, so no
//! state carries over from one query to the next.

mod fastest;
mod shortest;


use crate::domain::{Terminal, TerminalId};
use crate::graph::{GraphError, ShuttleGraph};

/// Runs route queries against a borrowed graph.
///
/// Holding a shared borrow means the graph cannot be mutated while a
/// `PathFinder` is alive.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    graph: &'g ShuttleGraph,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g ShuttleGraph) -> Self {
        Self { graph }
    }

    fn require(&self, id: &TerminalId) -> Result<&'g Terminal, GraphError> {
        self.graph
            .terminal(id)
            .ok_or_else(|| GraphError::UnknownTerminal(id.clone()))
    }
}
