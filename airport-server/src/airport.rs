//! The airport as a whole: shuttle graph, landing queue and security table.

use crate::config::AirportConfig;
use crate::dispatch::Dispatcher;
use crate::graph::ShuttleGraph;
use crate::security::SecurityDb;

/// Everything the server manages, owned in one place.
///
/// The server keeps a single `Airport` behind a lock so that graph
/// mutations never overlap a route search.
#[derive(Debug, Clone)]
pub struct Airport {
    pub graph: ShuttleGraph,
    pub dispatcher: Dispatcher,
    pub security: SecurityDb,
}

impl Airport {
    pub fn new(config: &AirportConfig) -> Self {
        Self {
            graph: ShuttleGraph::new(config.shuttle_capacity),
            dispatcher: Dispatcher::new(config.landing_window()),
            security: SecurityDb::new(&config.security),
        }
    }
}

impl Default for Airport {
    fn default() -> Self {
        Self::new(&AirportConfig::default())
    }
}
