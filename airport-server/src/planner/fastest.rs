//! Minimum-cost route search.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use super::PathFinder;
use crate::domain::{Path, Terminal, TerminalId};
use crate::graph::GraphError;

/// Entry in the search frontier.
///
/// Ordered so that `BinaryHeap` pops the lowest cost first and, among equal
/// costs, the entry pushed earliest.
#[derive(Debug)]
struct QueueEntry<'g> {
    cost: u64,
    seq: u64,
    terminal: &'g Terminal,
}

impl PartialEq for QueueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for QueueEntry<'_> {}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<'g> PathFinder<'g> {
    /// Find the cheapest route from `origin` to `destination`.
    ///
    /// Riding a shuttle away from a terminal costs the shuttle's travel
    /// time plus that terminal's waiting time. Returns `Ok(None)` when the
    /// destination cannot be reached.
    ///
    /// Stale queue entries left behind by later improvements are skipped
    /// when popped. The route is rebuilt from the predecessor recorded at
    /// each improving relaxation, so consecutive terminals are always
    /// joined by a shuttle.
    pub fn fastest_path(
        &self,
        origin: &TerminalId,
        destination: &TerminalId,
    ) -> Result<Option<Path>, GraphError> {
        let origin = self.require(origin)?;
        let destination = self.require(destination)?;

        let mut distances: HashMap<&TerminalId, u64> = HashMap::new();
        let mut predecessors: HashMap<&TerminalId, &Terminal> = HashMap::new();
        let mut visited: HashSet<&TerminalId> = HashSet::new();
        let mut queue: BinaryHeap<QueueEntry<'g>> = BinaryHeap::new();
        let mut seq = 0;

        distances.insert(origin.id(), 0);
        queue.push(QueueEntry {
            cost: 0,
            seq,
            terminal: origin,
        });

        while visited.len() < self.graph.live_count() {
            let Some(entry) = queue.pop() else {
                debug!(
                    origin = %origin,
                    destination = %destination,
                    visited = visited.len(),
                    "Fastest-path search exhausted, destination unreachable"
                );
                return Ok(None);
            };

            let current = entry.terminal;
            if !visited.insert(current.id()) {
                continue;
            }
            if current == destination {
                break;
            }

            let Some(&base) = distances.get(current.id()) else {
                continue;
            };

            for shuttle in self.graph.outgoing_shuttles(current.id())? {
                let Some(next) = shuttle.opposite(current.id()) else {
                    continue;
                };
                if visited.contains(next.id()) {
                    continue;
                }
                let Some(ride) = shuttle.departure_cost(current.id()) else {
                    continue;
                };

                let candidate = base.saturating_add(ride);
                let best = match distances.get(next.id()) {
                    Some(&known) if known <= candidate => known,
                    _ => {
                        distances.insert(next.id(), candidate);
                        predecessors.insert(next.id(), current);
                        candidate
                    }
                };

                seq += 1;
                queue.push(QueueEntry {
                    cost: best,
                    seq,
                    terminal: next,
                });
            }

            trace!(
                terminal = %current,
                distance = base,
                frontier = queue.len(),
                "Settled terminal"
            );
        }

        let Some(&cost) = distances.get(destination.id()) else {
            return Ok(None);
        };

        let mut terminals = vec![destination.clone()];
        let mut cursor = destination.id();
        while let Some(&previous) = predecessors.get(cursor) {
            terminals.push(previous.clone());
            cursor = previous.id();
        }
        terminals.reverse();

        debug!(
            origin = %origin,
            destination = %destination,
            cost,
            hops = terminals.len().saturating_sub(1),
            visited = visited.len(),
            "Fastest-path search complete"
        );

        Ok(Some(Path::reached(terminals, cost)))
    }
}
