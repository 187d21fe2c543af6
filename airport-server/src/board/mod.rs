//! Arrivals board ordering.
//!
//! Flight records arrive as CSV lines of the form `FLIGHT,HH:MM` with no
//! header row. A board whose records arrive in no particular order is
//! sorted with quicksort; a board that is already mostly sorted (the day's
//! schedule plus a handful of extra flights) is sorted with insertion sort.

use std::cmp::Ordering;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{FlightError, Plane};

/// Error loading flight records onto a board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A line is not a two-field CSV record
    #[error("malformed flight record on line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    /// A record has an invalid flight number or time
    #[error("invalid flight record on line {line}: {source}")]
    Flight {
        line: usize,
        #[source]
        source: FlightError,
    },
}

#[derive(Debug, Deserialize)]
struct FlightRecord {
    flight: String,
    time: String,
}

/// Parse `FLIGHT,HH:MM` lines into planes, in input order.
pub fn parse_records<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Plane>, BoardError> {
    let mut joined = String::new();
    for line in lines {
        joined.push_str(line.as_ref());
        joined.push('\n');
    }

    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    let mut planes = Vec::with_capacity(lines.len());
    for (idx, row) in reader.into_deserialize::<FlightRecord>().enumerate() {
        let line = idx + 1;
        let record = row.map_err(|source| BoardError::Csv { line, source })?;
        let plane = Plane::parse(&record.flight, &record.time)
            .map_err(|source| BoardError::Flight { line, source })?;
        planes.push(plane);
    }

    Ok(planes)
}

/// Sort planes in place with quicksort.
///
/// The pivot is the median of the first, middle and last planes, and each
/// pass splits the slice three ways so runs of equal planes are settled at
/// once. Only the smaller side is sorted recursively; the larger side is
/// handled by the loop, which keeps the stack depth logarithmic.
pub fn quick_sort(planes: &mut [Plane]) {
    let mut rest = planes;
    while rest.len() > 1 {
        let (lt, gt) = partition(rest);
        let (left, tail) = std::mem::take(&mut rest).split_at_mut(lt);
        let right = &mut tail[gt - lt..];
        if left.len() < right.len() {
            quick_sort(left);
            rest = right;
        } else {
            quick_sort(right);
            rest = left;
        }
    }
}

/// Three-way partition around a median-of-three pivot.
///
/// Returns `(lt, gt)`: planes before `lt` sort below the pivot, planes from
/// `gt` on sort above it, and everything between equals it.
fn partition(planes: &mut [Plane]) -> (usize, usize) {
    let pivot = median_of_three(planes).clone();
    let (mut lt, mut i, mut gt) = (0, 0, planes.len());
    while i < gt {
        match planes[i].cmp(&pivot) {
            Ordering::Less => {
                planes.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                planes.swap(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}

fn median_of_three(planes: &[Plane]) -> &Plane {
    let (a, b, c) = (
        &planes[0],
        &planes[planes.len() / 2],
        &planes[planes.len() - 1],
    );
    if (a <= b) == (b <= c) {
        b
    } else if (b <= a) == (a <= c) {
        a
    } else {
        c
    }
}

/// Sort planes in place with insertion sort.
///
/// Cheap when the input is already nearly ordered.
pub fn insertion_sort(planes: &mut [Plane]) {
    for out in 1..planes.len() {
        let mut i = out;
        while i > 0 && planes[i - 1] > planes[i] {
            planes.swap(i - 1, i);
            i -= 1;
        }
    }
}

/// A board loaded from records in arbitrary order.
#[derive(Debug, Clone)]
pub struct RandomBoard {
    planes: Vec<Plane>,
}

impl RandomBoard {
    pub fn new(planes: Vec<Plane>) -> Self {
        Self { planes }
    }

    pub fn from_csv_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, BoardError> {
        Ok(Self::new(parse_records(lines)?))
    }

    /// Sort the board by landing time and return it.
    pub fn sort(&mut self) -> &[Plane] {
        quick_sort(&mut self.planes);
        debug!(planes = self.planes.len(), "Sorted random board");
        &self.planes
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }
}

/// A board made of an already-sorted schedule plus extra flights.
#[derive(Debug, Clone)]
pub struct PartiallySortedBoard {
    schedule: Vec<Plane>,
    extra: Vec<Plane>,
}

impl PartiallySortedBoard {
    pub fn new(schedule: Vec<Plane>, extra: Vec<Plane>) -> Self {
        Self { schedule, extra }
    }

    pub fn from_csv_lines<S: AsRef<str>, T: AsRef<str>>(
        schedule: &[S],
        extra: &[T],
    ) -> Result<Self, BoardError> {
        Ok(Self::new(parse_records(schedule)?, parse_records(extra)?))
    }

    /// Merge the extra flights into the schedule and sort it.
    pub fn sort(&mut self) -> &[Plane] {
        let added = self.extra.len();
        self.schedule.append(&mut self.extra);
        insertion_sort(&mut self.schedule);
        debug!(
            planes = self.schedule.len(),
            added, "Sorted partially sorted board"
        );
        &self.schedule
    }

    pub fn schedule(&self) -> &[Plane] {
        &self.schedule
    }

    pub fn extra(&self) -> &[Plane] {
        &self.extra
    }
}
