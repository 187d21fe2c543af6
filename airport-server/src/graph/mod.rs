//! The shuttle graph: terminals joined by undirected, timed shuttles.
//!
//! Each terminal keeps its incident shuttles in a sequence with the most
//! recently inserted shuttle first. The shortest-path search depends on
//! that order, so every mutation preserves it.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info};

use crate::domain::{Shuttle, ShuttleId, Terminal, TerminalId};

/// Errors from graph mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The operation referenced a terminal that is not in the graph.
    #[error("unknown terminal: {0}")]
    UnknownTerminal(TerminalId),

    /// A terminal with this id is already in the graph.
    #[error("duplicate terminal: {0}")]
    DuplicateTerminal(TerminalId),
}

/// Terminals and the shuttles between them.
///
/// Invariants:
/// - a shuttle is in the adjacency sequence of both its endpoints or of
///   neither (a loop shuttle appears once in its terminal's sequence);
/// - `adjacency`, `indexes` and `terminals` share the same key set, and
///   the live-vertex count is the number of keys in `indexes`;
/// - `shuttles` holds exactly the shuttles listed in some sequence.
#[derive(Debug, Clone)]
pub struct ShuttleGraph {
    adjacency: HashMap<TerminalId, VecDeque<Shuttle>>,
    indexes: HashMap<TerminalId, usize>,
    terminals: HashMap<TerminalId, Terminal>,
    shuttles: HashMap<ShuttleId, Shuttle>,
    next_index: usize,
    next_shuttle: u64,
    shuttle_capacity: u32,
}

impl Default for ShuttleGraph {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ShuttleGraph {
    /// Create an empty graph whose shuttles each carry `shuttle_capacity`
    /// passengers.
    pub fn new(shuttle_capacity: u32) -> Self {
        Self {
            adjacency: HashMap::new(),
            indexes: HashMap::new(),
            terminals: HashMap::new(),
            shuttles: HashMap::new(),
            next_index: 0,
            next_shuttle: 0,
            shuttle_capacity,
        }
    }

    /// Passenger capacity shared by every shuttle.
    pub fn shuttle_capacity(&self) -> u32 {
        self.shuttle_capacity
    }

    /// Add a terminal with an empty adjacency sequence.
    ///
    /// Fails with [`GraphError::DuplicateTerminal`] if the id is taken; the
    /// graph is left unchanged.
    pub fn insert_terminal(
        &mut self,
        id: TerminalId,
        waiting_time: u32,
    ) -> Result<Terminal, GraphError> {
        if self.indexes.contains_key(&id) {
            return Err(GraphError::DuplicateTerminal(id));
        }

        let terminal = Terminal::new(id.clone(), waiting_time);
        self.adjacency.insert(id.clone(), VecDeque::new());
        self.indexes.insert(id.clone(), self.next_index);
        self.terminals.insert(id, terminal.clone());
        self.next_index += 1;

        info!(terminal = %terminal, waiting_time, "Inserted terminal");
        Ok(terminal)
    }

    /// Join two existing terminals with a shuttle.
    ///
    /// The new shuttle is placed first in both endpoints' sequences.
    pub fn insert_shuttle(
        &mut self,
        origin: &TerminalId,
        destination: &TerminalId,
        travel_time: u32,
    ) -> Result<Shuttle, GraphError> {
        let origin = self.require(origin)?.clone();
        let destination = self.require(destination)?.clone();

        let id = ShuttleId(self.next_shuttle);
        self.next_shuttle += 1;

        let shuttle = Shuttle::new(id, origin, destination, travel_time);

        self.adjacency_mut(shuttle.origin().id())
            .push_front(shuttle.clone());
        if !shuttle.is_loop() {
            self.adjacency_mut(shuttle.destination().id())
                .push_front(shuttle.clone());
        }
        self.shuttles.insert(id, shuttle.clone());

        info!(shuttle = ?shuttle, "Inserted shuttle");
        Ok(shuttle)
    }

    /// Remove a terminal and every shuttle touching it.
    ///
    /// Incident shuttles are collected first and then detached from the
    /// other endpoints, so no sequence is mutated while it is being read.
    pub fn remove_terminal(&mut self, id: &TerminalId) -> Result<Terminal, GraphError> {
        let Some(terminal) = self.terminals.remove(id) else {
            return Err(GraphError::UnknownTerminal(id.clone()));
        };
        let incident = self.adjacency.remove(id).unwrap_or_default();
        self.indexes.remove(id);

        for shuttle in &incident {
            self.shuttles.remove(&shuttle.id());
            if let Some(other) = shuttle.opposite(id) {
                if let Some(list) = self.adjacency.get_mut(other.id()) {
                    list.retain(|s| s.id() != shuttle.id());
                }
            }
        }

        info!(
            terminal = %terminal,
            shuttles_removed = incident.len(),
            "Removed terminal"
        );
        Ok(terminal)
    }

    /// Remove a shuttle from both endpoints' sequences.
    ///
    /// Returns `false`, leaving the graph untouched, if the shuttle is not
    /// in the graph.
    pub fn remove_shuttle(&mut self, shuttle: &Shuttle) -> bool {
        if self.shuttles.remove(&shuttle.id()).is_none() {
            return false;
        }

        for end in [shuttle.origin().id(), shuttle.destination().id()] {
            if let Some(list) = self.adjacency.get_mut(end) {
                list.retain(|s| s.id() != shuttle.id());
            }
        }

        debug!(shuttle = ?shuttle, "Removed shuttle");
        true
    }

    /// The shuttles touching `id`, most recently inserted first.
    pub fn outgoing_shuttles(&self, id: &TerminalId) -> Result<&VecDeque<Shuttle>, GraphError> {
        self.adjacency
            .get(id)
            .ok_or_else(|| GraphError::UnknownTerminal(id.clone()))
    }

    /// The endpoint of `shuttle` that is not `terminal`.
    ///
    /// Returns `None` if `terminal` is neither endpoint.
    pub fn opposite<'s>(&self, shuttle: &'s Shuttle, terminal: &TerminalId) -> Option<&'s Terminal> {
        shuttle.opposite(terminal)
    }

    pub fn terminal(&self, id: &TerminalId) -> Option<&Terminal> {
        self.terminals.get(id)
    }

    pub fn contains_terminal(&self, id: &TerminalId) -> bool {
        self.indexes.contains_key(id)
    }

    /// Sequence index assigned to `id` when it was inserted.
    pub fn index_of(&self, id: &TerminalId) -> Option<usize> {
        self.indexes.get(id).copied()
    }

    /// Look up a shuttle by id.
    pub fn shuttle(&self, id: ShuttleId) -> Option<&Shuttle> {
        self.shuttles.get(&id)
    }

    /// All terminals, ordered by insertion index.
    pub fn terminals(&self) -> Vec<&Terminal> {
        let mut terminals: Vec<&Terminal> = self.terminals.values().collect();
        terminals.sort_by_key(|t| self.indexes.get(t.id()).copied().unwrap_or(usize::MAX));
        terminals
    }

    /// Number of terminals currently in the graph.
    pub fn live_count(&self) -> usize {
        self.indexes.len()
    }

    /// Number of distinct shuttles currently in the graph.
    pub fn shuttle_count(&self) -> usize {
        self.shuttles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    fn require(&self, id: &TerminalId) -> Result<&Terminal, GraphError> {
        self.terminals
            .get(id)
            .ok_or_else(|| GraphError::UnknownTerminal(id.clone()))
    }

    fn adjacency_mut(&mut self, id: &TerminalId) -> &mut VecDeque<Shuttle> {
        self.adjacency.entry(id.clone()).or_default()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        AddTerminal(u8, u32),
        AddShuttle(u8, u8, u32),
        RemoveTerminal(u8),
        RemoveShuttle(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..6, 0u32..10).prop_map(|(t, w)| Op::AddTerminal(t, w)),
            (0u8..6, 0u8..6, 0u32..20).prop_map(|(a, b, t)| Op::AddShuttle(a, b, t)),
            (0u8..6).prop_map(Op::RemoveTerminal),
            (0u64..20).prop_map(Op::RemoveShuttle),
        ]
    }

    fn tid(n: u8) -> TerminalId {
        TerminalId::parse(&format!("T{n}")).unwrap()
    }

    fn apply(graph: &mut ShuttleGraph, op: &Op) {
        match op {
            Op::AddTerminal(t, w) => {
                let _ = graph.insert_terminal(tid(*t), *w);
            }
            Op::AddShuttle(a, b, time) => {
                let _ = graph.insert_shuttle(&tid(*a), &tid(*b), *time);
            }
            Op::RemoveTerminal(t) => {
                let before = graph.live_count();
                if graph.remove_terminal(&tid(*t)).is_ok() {
                    assert_eq!(graph.live_count(), before - 1);
                } else {
                    assert_eq!(graph.live_count(), before);
                }
            }
            Op::RemoveShuttle(id) => {
                if let Some(s) = graph.shuttle(ShuttleId(*id)).cloned() {
                    assert!(graph.remove_shuttle(&s));
                }
            }
        }
    }

    proptest! {
        /// Every shuttle is listed at both of its endpoints, and only at live terminals
        #[test]
        fn adjacency_stays_symmetric(ops in prop::collection::vec(op(), 0..60)) {
            let mut graph = ShuttleGraph::default();
            for op in &ops {
                apply(&mut graph, op);
            }

            for t in graph.terminals() {
                for s in graph.outgoing_shuttles(t.id()).unwrap() {
                    prop_assert!(s.touches(t.id()));
                    let other = s.opposite(t.id()).unwrap();
                    prop_assert!(graph.contains_terminal(other.id()));
                    let back = graph.outgoing_shuttles(other.id()).unwrap();
                    prop_assert!(back.iter().any(|b| b.id() == s.id()));
                }
            }
            prop_assert_eq!(graph.live_count(), graph.terminals().len());

            let listed: std::collections::HashSet<ShuttleId> = graph
                .terminals()
                .iter()
                .flat_map(|t| graph.outgoing_shuttles(t.id()).unwrap().iter().map(|s| s.id()))
                .collect();
            prop_assert_eq!(listed.len(), graph.shuttle_count());
            for id in listed {
                prop_assert!(graph.shuttle(id).is_some());
            }
        }

        /// A freshly inserted shuttle heads both endpoints' sequences
        #[test]
        fn new_shuttle_is_first(a in 0u8..4, b in 0u8..4, time in 0u32..50) {
            let mut graph = ShuttleGraph::default();
            for n in 0..4 {
                graph.insert_terminal(tid(n), u32::from(n)).unwrap();
            }
            graph.insert_shuttle(&tid(0), &tid(1), 1).unwrap();
            graph.insert_shuttle(&tid(2), &tid(3), 1).unwrap();

            let s = graph.insert_shuttle(&tid(a), &tid(b), time).unwrap();
            prop_assert_eq!(graph.outgoing_shuttles(&tid(a)).unwrap().front(), Some(&s));
            prop_assert_eq!(graph.outgoing_shuttles(&tid(b)).unwrap().front(), Some(&s));
        }
    }
}
