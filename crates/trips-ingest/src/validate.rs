//! Row validation
//!
//! Every row gets exactly one classification. Checks run in a fixed order:
//! required fields first, then status membership, then date parsing.

use trips_common::TripStatus;

use crate::counters::Counters;
use crate::date::parse_trip_date;
use crate::models::{RawRow, TripRecord};

/// Result of validating a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(TripRecord),
    /// A field is absent, blank after trimming, or not valid UTF-8
    MissingField,
    /// Status is not one of `done`, `not_respond`
    InvalidStatus,
    /// Every field is present and the status is valid, but the date does not parse
    InvalidDate,
}

impl RowOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowOutcome::Accepted(_))
    }
}

/// Classify a row without touching any counters
pub fn classify(row: &RawRow<'_>) -> RowOutcome {
    let fields = (
        required(row.trip_id()),
        required(row.client_id()),
        required(row.driver_id()),
        required(row.trip_date()),
        required(row.status()),
    );

    let (Some(trip_id), Some(client_id), Some(driver_id), Some(trip_date_raw), Some(status_raw)) =
        fields
    else {
        return RowOutcome::MissingField;
    };

    let Ok(status) = status_raw.parse::<TripStatus>() else {
        return RowOutcome::InvalidStatus;
    };

    let Some(trip_date) = parse_trip_date(trip_date_raw) else {
        return RowOutcome::InvalidDate;
    };

    RowOutcome::Accepted(TripRecord {
        trip_id: trip_id.to_string(),
        client_id: client_id.to_string(),
        driver_id: driver_id.to_string(),
        trip_date,
        status,
    })
}

/// Classify a row and count a rejection.
///
/// Increments at most one counter. Returns the record when the row is valid.
pub fn validate_row(row: &RawRow<'_>, counters: &mut Counters) -> Option<TripRecord> {
    let outcome = classify(row);
    counters.record_outcome(&outcome);

    match outcome {
        RowOutcome::Accepted(record) => Some(record),
        _ => None,
    }
}

/// Trimmed, non-empty UTF-8 text of a field
fn required(field: Option<&[u8]>) -> Option<&str> {
    let text = std::str::from_utf8(field?).ok()?.trim();
    (!text.is_empty()).then_some(text)
}
