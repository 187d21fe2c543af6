//! Flight numbers, landing times and planes.
//!
//! Landing times arrive as "HH:MM" strings. Planes are ordered by landing
//! time, then by flight number, which is the order both the landing
//! dispatcher and the arrivals board rely on.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Duration, NaiveTime, Timelike};

/// Error returned when parsing a flight number or landing time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlightError {
    #[error("invalid flight number: {0}")]
    InvalidFlightNumber(&'static str),

    #[error("invalid landing time: {0}")]
    InvalidTime(&'static str),
}

/// A validated flight number such as `"KL1234"`.
///
/// Flight numbers are 2 to 8 uppercase ASCII letters or digits.
///
/// # Examples
///
/// ```
/// use airport_server::domain::FlightNumber;
///
/// let kl = FlightNumber::parse("KL1234").unwrap();
/// assert_eq!(kl.as_str(), "KL1234");
///
/// assert!(FlightNumber::parse("kl1234").is_err());
/// assert!(FlightNumber::parse("K").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightNumber(String);

impl FlightNumber {
    pub fn parse(s: &str) -> Result<Self, FlightError> {
        if !(2..=8).contains(&s.len()) {
            return Err(FlightError::InvalidFlightNumber(
                "must be 2 to 8 characters",
            ));
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(FlightError::InvalidFlightNumber(
                "must be uppercase ASCII letters or digits",
            ));
        }

        Ok(FlightNumber(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightNumber({})", self.0)
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A time of day at which a plane is due to land.
///
/// # Examples
///
/// ```
/// use airport_server::domain::LandingTime;
///
/// let t = LandingTime::parse_hhmm("09:05").unwrap();
/// assert_eq!(t.to_string(), "09:05");
///
/// assert!(LandingTime::parse_hhmm("905").is_err());
/// assert!(LandingTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LandingTime(NaiveTime);

impl LandingTime {
    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, FlightError> {
        if s.len() != 5 {
            return Err(FlightError::InvalidTime("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(FlightError::InvalidTime("expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or(FlightError::InvalidTime("invalid hour digits"))?;
        if hour > 23 {
            return Err(FlightError::InvalidTime("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or(FlightError::InvalidTime("invalid minute digits"))?;
        if minute > 59 {
            return Err(FlightError::InvalidTime("minute must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(LandingTime)
            .ok_or(FlightError::InvalidTime("invalid time"))
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Signed duration from `earlier` to `self`, within the same day.
    pub fn since(&self, earlier: LandingTime) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }
}

impl fmt::Debug for LandingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LandingTime({})", self)
    }
}

impl fmt::Display for LandingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// A plane due to land: a flight number and its landing time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plane {
    pub flight: FlightNumber,
    pub time: LandingTime,
}

impl Plane {
    pub fn new(flight: FlightNumber, time: LandingTime) -> Self {
        Self { flight, time }
    }

    /// Parse a plane from its flight number and "HH:MM" time strings.
    pub fn parse(flight: &str, time: &str) -> Result<Self, FlightError> {
        Ok(Self {
            flight: FlightNumber::parse(flight)?,
            time: LandingTime::parse_hhmm(time)?,
        })
    }
}

impl Ord for Plane {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.flight.cmp(&other.flight))
    }
}

impl PartialOrd for Plane {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every valid HH:MM string parses and displays back unchanged
        #[test]
        fn time_roundtrip(h in 0u32..24, m in 0u32..60) {
            let s = format!("{h:02}:{m:02}");
            let t = LandingTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(t.to_string(), s);
        }
    }
}
