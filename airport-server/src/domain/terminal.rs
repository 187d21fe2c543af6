//! Terminal identifier and vertex types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Longest identifier accepted for a terminal.
const MAX_ID_LEN: usize = 32;

/// Error returned when parsing an invalid terminal identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid terminal id: {reason}")]
pub struct InvalidTerminalId {
    reason: &'static str,
}

/// A validated terminal identifier such as `"T1"` or `"North-B"`.
///
/// Identifiers are non-empty, at most 32 characters long, and contain no
/// whitespace or control characters.
///
/// # Examples
///
/// ```
/// use airport_server::domain::TerminalId;
///
/// let id = TerminalId::parse("T1").unwrap();
/// assert_eq!(id.as_str(), "T1");
///
/// assert!(TerminalId::parse("").is_err());
/// assert!(TerminalId::parse("T 1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(String);

impl TerminalId {
    /// Parse a terminal identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidTerminalId> {
        if s.is_empty() {
            return Err(InvalidTerminalId {
                reason: "must not be empty",
            });
        }

        if s.chars().count() > MAX_ID_LEN {
            return Err(InvalidTerminalId {
                reason: "must be at most 32 characters",
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(InvalidTerminalId {
                reason: "must not contain whitespace or control characters",
            });
        }

        Ok(TerminalId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerminalId({})", self.0)
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An airport terminal: a vertex in the shuttle graph.
///
/// Every departure from a terminal costs its fixed waiting time in addition
/// to the shuttle's travel time.
///
/// Identity is by id alone: two `Terminal` values with the same id compare
/// equal and hash identically, whatever their waiting times.
#[derive(Clone)]
pub struct Terminal {
    id: TerminalId,
    waiting_time: u32,
}

impl Terminal {
    /// Create a terminal with the given waiting time in minutes.
    pub fn new(id: TerminalId, waiting_time: u32) -> Self {
        Self { id, waiting_time }
    }

    pub fn id(&self) -> &TerminalId {
        &self.id
    }

    /// Waiting time in minutes.
    pub fn waiting_time(&self) -> u32 {
        self.waiting_time
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Terminal {}

impl Hash for Terminal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Terminal({}, wait={})", self.id, self.waiting_time)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any printable, space-free id up to 32 chars parses and round-trips
        #[test]
        fn roundtrip(s in "[A-Za-z0-9_-]{1,32}") {
            let id = TerminalId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Ids containing a space are always rejected
        #[test]
        fn spaces_rejected(a in "[A-Z]{0,5}", b in "[A-Z]{0,5}") {
            let s = format!("{a} {b}");
            prop_assert!(TerminalId::parse(&s).is_err());
        }
    }
}
