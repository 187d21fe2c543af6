//! First-discovery breadth-first route search.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use super::PathFinder;
use crate::domain::{Path, Terminal, TerminalId};
use crate::graph::GraphError;

impl<'g> PathFinder<'g> {
    /// Find a route by breadth-first exploration from `origin`.
    ///
    /// Terminals are dequeued in FIFO order; each terminal's shuttles are
    /// expanded most recent first. The search stops the moment the
    /// destination is dequeued, and the returned terminals are every
    /// terminal dequeued so far, in discovery order.
    ///
    /// The reported cost is the last value written for the destination:
    /// each expansion overwrites a neighbour's distance with the cost of
    /// the single shuttle ride that discovered it (travel time plus the
    /// waiting time of the terminal being left). It is not a cumulative
    /// sum, and a later expansion may overwrite an earlier one.
    ///
    /// If the queue runs dry first, the result is unreachable and carries
    /// the terminals explored.
    pub fn shortest_path(
        &self,
        origin: &TerminalId,
        destination: &TerminalId,
    ) -> Result<Path, GraphError> {
        let origin = self.require(origin)?;
        let destination = self.require(destination)?;

        let mut distances: HashMap<&TerminalId, u64> = HashMap::new();
        let mut visited: HashSet<&TerminalId> = HashSet::new();
        let mut explored: Vec<Terminal> = Vec::new();
        let mut queue: VecDeque<&Terminal> = VecDeque::new();

        distances.insert(origin.id(), 0);
        queue.push_back(origin);

        let mut found = false;

        while let Some(current) = queue.pop_front() {
            if visited.contains(current.id()) {
                continue;
            }

            explored.push(current.clone());
            if current == destination {
                found = true;
                break;
            }

            // Neighbours discovered by this expansion, first shuttle wins.
            let mut neighbours: Vec<&Terminal> = Vec::new();
            for shuttle in self.graph.outgoing_shuttles(current.id())? {
                let Some(next) = shuttle.opposite(current.id()) else {
                    continue;
                };
                if neighbours.contains(&next) {
                    continue;
                }
                if let Some(cost) = shuttle.departure_cost(current.id()) {
                    distances.insert(next.id(), cost);
                }
                neighbours.push(next);
            }

            trace!(
                terminal = %current,
                neighbours = neighbours.len(),
                queued = queue.len(),
                "Expanded terminal"
            );

            queue.extend(neighbours);
            visited.insert(current.id());
        }

        let cost = if found {
            distances.get(destination.id()).copied()
        } else {
            None
        };

        debug!(
            origin = %origin,
            destination = %destination,
            explored = explored.len(),
            cost = ?cost,
            "Shortest-path search complete"
        );

        Ok(match cost {
            Some(cost) => Path::reached(explored, cost),
            None => Path::unreachable(explored),
        })
    }
}
