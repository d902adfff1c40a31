//! Trip data models

use chrono::NaiveDateTime;
use trips_common::TripStatus;

/// Column order of the source file and of the `trips` table
pub const EXPECTED_HEADER: [&str; 5] = ["trip_id", "client_id", "driver_id", "trip_date", "status"];

/// A validated row, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub trip_id: String,
    pub client_id: String,
    pub driver_id: String,
    pub trip_date: NaiveDateTime,
    pub status: TripStatus,
}

/// One source line as read from the file
///
/// Fields are kept as raw bytes; decoding happens during validation so that
/// a line with invalid UTF-8 is classified instead of aborting the run.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    fields: [Option<&'a [u8]>; 5],
}

impl<'a> RawRow<'a> {
    /// Build from the CSV record; fields past the fifth are ignored and
    /// missing trailing fields stay `None`.
    pub fn from_byte_record(record: &'a csv_async::ByteRecord) -> Self {
        Self {
            fields: std::array::from_fn(|i| record.get(i)),
        }
    }

    pub fn from_fields(fields: [Option<&'a [u8]>; 5]) -> Self {
        Self { fields }
    }

    pub fn trip_id(&self) -> Option<&'a [u8]> {
        self.fields[0]
    }

    pub fn client_id(&self) -> Option<&'a [u8]> {
        self.fields[1]
    }

    pub fn driver_id(&self) -> Option<&'a [u8]> {
        self.fields[2]
    }

    pub fn trip_date(&self) -> Option<&'a [u8]> {
        self.fields[3]
    }

    pub fn status(&self) -> Option<&'a [u8]> {
        self.fields[4]
    }
}
