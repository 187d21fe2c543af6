//! Passenger security table.
//!
//! A fixed-size open-addressing hash table mapping travel-document ids to
//! passenger names. It is sized once from the day's traffic and never
//! grows. Each entry counts how often the document has been presented;
//! a document presented under a different name, or too many times, is
//! flagged as suspicious.

use tracing::{debug, warn};

/// Errors from passenger registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecurityError {
    /// The document is already registered to someone else
    #[error("suspicious behaviour: document {passport_id} is registered to another passenger")]
    NameMismatch { passport_id: String },

    /// The document has been presented more often than allowed
    #[error("suspicious behaviour: document {passport_id} presented {visits} times")]
    TooManyVisits { passport_id: String, visits: u32 },

    /// Every slot is taken
    #[error("security table is full ({capacity} slots)")]
    TableFull { capacity: usize },

    /// The document id is empty
    #[error("passport id must not be empty")]
    EmptyPassportId,
}

/// Sizing and limits for a [`SecurityDb`].
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Planes expected per day.
    pub planes_per_day: usize,

    /// Passengers expected per plane.
    pub passengers_per_plane: usize,

    /// Upper bound on the number of slots.
    pub max_capacity: usize,

    /// A document presented more than this many times is flagged.
    pub max_visits: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            planes_per_day: 100,
            passengers_per_plane: 200,
            max_capacity: 1021,
            max_visits: 5,
        }
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Empty,
    Deleted,
    Occupied(Entry),
}

#[derive(Debug, Clone)]
struct Entry {
    passport_id: String,
    name: String,
    visits: u32,
}

/// Open-addressing table of registered passengers.
#[derive(Debug, Clone)]
pub struct SecurityDb {
    slots: Vec<Slot>,
    count: usize,
    max_visits: u32,
}

impl SecurityDb {
    /// Create an empty table sized for the expected traffic.
    ///
    /// The capacity is the smallest prime greater than
    /// `planes_per_day * passengers_per_plane`, capped at the largest prime
    /// not above `max_capacity`.
    pub fn new(config: &SecurityConfig) -> Self {
        let wanted = config
            .planes_per_day
            .saturating_mul(config.passengers_per_plane)
            .saturating_add(1);
        let ceiling = config.max_capacity.max(2);
        let capacity = next_prime(wanted.min(ceiling.saturating_add(1)));
        let capacity = if capacity > ceiling {
            previous_prime(ceiling)
        } else {
            capacity
        };

        debug!(capacity, "Created security table");
        Self {
            slots: vec![Slot::Empty; capacity],
            count: 0,
            max_visits: config.max_visits,
        }
    }

    /// Hash code of a document id.
    ///
    /// Starts at `1 + c0`; each further character adds the running sum of
    /// the characters seen so far (including itself).
    pub fn calculate_hash_code(key: &str) -> u64 {
        let mut chars = key.chars().map(u64::from);
        let Some(first) = chars.next() else {
            return 0;
        };

        let mut hash = 1 + first;
        let mut prefix = hash;
        for c in chars {
            prefix = prefix.wrapping_add(c);
            hash = hash.wrapping_add(prefix);
        }
        hash
    }

    /// Home slot of a document id.
    pub fn home_index(&self, passport_id: &str) -> usize {
        (Self::calculate_hash_code(passport_id) % self.slots.len() as u64) as usize
    }

    /// Register a passenger presenting a document.
    ///
    /// A known document presented again under the same name bumps its
    /// visit count.
    pub fn add_passenger(&mut self, name: &str, passport_id: &str) -> Result<(), SecurityError> {
        if passport_id.is_empty() {
            return Err(SecurityError::EmptyPassportId);
        }

        let max_visits = self.max_visits;
        if let Some(entry) = self.entry_mut(passport_id) {
            if entry.name != name {
                warn!(passport_id, "Suspicious behaviour: document presented under another name");
                return Err(SecurityError::NameMismatch {
                    passport_id: passport_id.to_string(),
                });
            }

            entry.visits += 1;
            if entry.visits > max_visits {
                warn!(passport_id, visits = entry.visits, "Suspicious behaviour: document overused");
                return Err(SecurityError::TooManyVisits {
                    passport_id: passport_id.to_string(),
                    visits: entry.visits,
                });
            }
            return Ok(());
        }

        let capacity = self.slots.len();
        let home = self.home_index(passport_id);
        let free = (0..capacity)
            .map(|step| (home + step) % capacity)
            .find(|&i| !matches!(self.slots[i], Slot::Occupied(_)))
            .ok_or(SecurityError::TableFull { capacity })?;

        self.slots[free] = Slot::Occupied(Entry {
            passport_id: passport_id.to_string(),
            name: name.to_string(),
            visits: 1,
        });
        self.count += 1;
        debug!(passport_id, slot = free, "Registered passenger");
        Ok(())
    }

    /// Name registered to a document.
    pub fn get(&self, passport_id: &str) -> Option<&str> {
        let idx = self.find(passport_id)?;
        match &self.slots[idx] {
            Slot::Occupied(entry) => Some(&entry.name),
            _ => None,
        }
    }

    pub fn contains(&self, passport_id: &str) -> bool {
        self.find(passport_id).is_some()
    }

    /// Number of times a document has been presented.
    pub fn visits(&self, passport_id: &str) -> Option<u32> {
        let idx = self.find(passport_id)?;
        match &self.slots[idx] {
            Slot::Occupied(entry) => Some(entry.visits),
            _ => None,
        }
    }

    /// Remove a document. Returns `false` if it was not registered.
    pub fn remove(&mut self, passport_id: &str) -> bool {
        match self.find(passport_id) {
            Some(idx) => {
                self.slots[idx] = Slot::Deleted;
                self.count -= 1;
                true
            }
            None => false,
        }
    }

    /// Number of registered documents.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn entry_mut(&mut self, passport_id: &str) -> Option<&mut Entry> {
        let idx = self.find(passport_id)?;
        match &mut self.slots[idx] {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    fn find(&self, passport_id: &str) -> Option<usize> {
        let capacity = self.slots.len();
        let home = self.home_index(passport_id);
        for step in 0..capacity {
            let idx = (home + step) % capacity;
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Deleted => continue,
                Slot::Occupied(entry) if entry.passport_id == passport_id => return Some(idx),
                Slot::Occupied(_) => continue,
            }
        }
        None
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Smallest prime `>= n`.
fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Largest prime `<= n`, for `n >= 2`.
fn previous_prime(n: usize) -> usize {
    let mut candidate = n;
    while candidate > 2 && !is_prime(candidate) {
        candidate -= 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_db() -> SecurityDb {
        SecurityDb::new(&SecurityConfig {
            planes_per_day: 3,
            passengers_per_plane: 2,
            ..SecurityConfig::default()
        })
    }

    #[test]
    fn capacity_is_next_prime() {
        assert_eq!(small_db().capacity(), 7);

        let db = SecurityDb::new(&SecurityConfig {
            planes_per_day: 4,
            passengers_per_plane: 6,
            ..SecurityConfig::default()
        });
        // 4 * 6 + 1 = 25 -> 29
        assert_eq!(db.capacity(), 29);
    }

    #[test]
    fn capacity_capped_at_max() {
        let db = SecurityDb::new(&SecurityConfig {
            planes_per_day: 1000,
            passengers_per_plane: 1000,
            max_capacity: 100,
            max_visits: 5,
        });
        assert_eq!(db.capacity(), 97);
    }

    #[test]
    fn hash_code() {
        assert_eq!(SecurityDb::calculate_hash_code("Asb23f"), 1717);
        assert_eq!(SecurityDb::calculate_hash_code("A"), 66);
        assert_eq!(SecurityDb::calculate_hash_code(""), 0);
    }

    #[test]
    fn add_count_remove() {
        let mut db = small_db();
        db.add_passenger("Rob Bekker", "Awb23f").unwrap();
        db.add_passenger("Rob Bekher", "Awb23m").unwrap();
        db.add_passenger("Kira Adams", "MKSD23").unwrap();
        db.add_passenger("Kira Adams", "MKSD24").unwrap();

        assert!(db.contains("Awb23f"));
        assert_eq!(db.count(), 4);
        assert_eq!(db.get("MKSD24"), Some("Kira Adams"));

        assert!(db.remove("MKSD23"));
        assert!(!db.contains("MKSD23"));
        assert!(db.contains("Awb23f"));
        assert!(db.contains("MKSD24"));
        assert_eq!(db.count(), 3);

        assert!(!db.remove("MKSD23"));
    }

    #[test]
    fn different_name_is_suspicious() {
        let mut db = small_db();
        db.add_passenger("Rob Bekker", "Asb23f").unwrap();

        let err = db.add_passenger("Robert Bekker", "Asb23f").unwrap_err();
        assert_eq!(
            err,
            SecurityError::NameMismatch {
                passport_id: "Asb23f".into()
            }
        );
        assert_eq!(db.get("Asb23f"), Some("Rob Bekker"));
        assert_eq!(db.count(), 1);
    }

    #[test]
    fn too_many_visits_is_suspicious() {
        let mut db = small_db();
        for _ in 0..5 {
            db.add_passenger("Kira Adams", "MKSD23").unwrap();
        }
        assert_eq!(db.visits("MKSD23"), Some(5));

        let err = db.add_passenger("Kira Adams", "MKSD23").unwrap_err();
        assert_eq!(
            err,
            SecurityError::TooManyVisits {
                passport_id: "MKSD23".into(),
                visits: 6
            }
        );
        assert_eq!(db.count(), 1);
    }

    #[test]
    fn probing_survives_removal() {
        let mut db = small_db();
        // All land in the same home slot when the table has 7 slots and the
        // keys share a hash modulo 7.
        let keys: Vec<String> = (0..200)
            .map(|n| format!("P{n}"))
            .filter(|k| db.home_index(k) == 0)
            .take(3)
            .collect();
        assert_eq!(keys.len(), 3);

        for k in &keys {
            db.add_passenger("Someone", k).unwrap();
        }
        assert!(db.remove(&keys[0]));
        assert!(db.contains(&keys[1]));
        assert!(db.contains(&keys[2]));

        // The freed slot is reused
        db.add_passenger("Someone", "NEW1").unwrap();
        assert_eq!(db.count(), 3);
    }

    #[test]
    fn full_table_rejects() {
        let mut db = small_db();
        for n in 0..7 {
            db.add_passenger("Someone", &format!("ID{n}")).unwrap();
        }
        assert_eq!(
            db.add_passenger("Someone", "ID7").unwrap_err(),
            SecurityError::TableFull { capacity: 7 }
        );
        // Existing documents are still found when the table has no empty slot
        assert!(db.contains("ID3"));
        assert!(!db.contains("ID9"));
    }

    #[test]
    fn empty_passport_rejected() {
        let mut db = small_db();
        assert_eq!(
            db.add_passenger("Someone", ""),
            Err(SecurityError::EmptyPassportId)
        );
    }

    #[test]
    fn primes() {
        assert_eq!(next_prime(7), 7);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(0), 2);
        assert_eq!(previous_prime(100), 97);
        assert_eq!(previous_prime(2), 2);
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(9));
    }
}
