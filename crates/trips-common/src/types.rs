//! Common types used across the trips crates

use serde::{Deserialize, Serialize};

use crate::error::TripsError;

/// Outcome of a trip, restricted to the values the `trips.status` check
/// constraint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Done,
    NotRespond,
}

impl TripStatus {
    pub const ALL: [TripStatus; 2] = [TripStatus::Done, TripStatus::NotRespond];

    /// Database and CSV representation
    pub fn as_str(self) -> &'static str {
        match self {
            TripStatus::Done => "done",
            TripStatus::NotRespond => "not_respond",
        }
    }
}

impl std::str::FromStr for TripStatus {
    type Err = TripsError;

    /// Exact, case-sensitive match. Callers trim first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => Ok(TripStatus::Done),
            "not_respond" => Ok(TripStatus::NotRespond),
            _ => Err(TripsError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
