//! Route results.

use super::Terminal;

/// The result of a route query: the terminals visited and the total cost.
///
/// A `cost` of `None` means the destination could not be reached; in that
/// case `terminals` holds whatever the search explored before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    terminals: Vec<Terminal>,
    cost: Option<u64>,
}

impl Path {
    /// A path that reached its destination.
    pub fn reached(terminals: Vec<Terminal>, cost: u64) -> Self {
        Self {
            terminals,
            cost: Some(cost),
        }
    }

    /// A path that did not reach its destination.
    pub fn unreachable(explored: Vec<Terminal>) -> Self {
        Self {
            terminals: explored,
            cost: None,
        }
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Total cost in minutes, or `None` if unreachable.
    pub fn cost(&self) -> Option<u64> {
        self.cost
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }

    /// Terminal ids in visiting order.
    pub fn ids(&self) -> Vec<&str> {
        self.terminals.iter().map(|t| t.id().as_str()).collect()
    }

    pub fn origin(&self) -> Option<&Terminal> {
        self.terminals.first()
    }

    pub fn destination(&self) -> Option<&Terminal> {
        self.terminals.last()
    }

    pub fn into_terminals(self) -> Vec<Terminal> {
        self.terminals
    }
}
