//! Trip date normalization
//!
//! Dates arrive in a handful of shapes. Each accepted shape is tried in
//! order and the first successful parse wins.

use chrono::NaiveDateTime;

/// Accepted `trip_date` layouts in priority order.
///
/// The ISO layout is matched against the input with every space read as `T`,
/// so `2024-01-01 10:00:00` also satisfies it. `%.f` accepts an optional
/// fractional part.
const TRIP_DATE_FORMATS: [DateFormat; 3] = [
    DateFormat { pattern: "%Y-%m-%dT%H:%M:%S%.f", space_as_t: true },
    DateFormat { pattern: "%Y-%m-%d %H:%M:%S%.f", space_as_t: false },
    DateFormat { pattern: "%Y-%m-%d %H:%M:%S", space_as_t: false },
];

struct DateFormat {
    pattern: &'static str,
    space_as_t: bool,
}

impl DateFormat {
    fn parse(&self, input: &str) -> Option<NaiveDateTime> {
        if self.space_as_t {
            let iso = input.replace(' ', "T");
            NaiveDateTime::parse_from_str(&iso, self.pattern).ok()
        } else {
            NaiveDateTime::parse_from_str(input, self.pattern).ok()
        }
    }
}

/// Parse a raw `trip_date` value into a naive timestamp.
///
/// Returns `None` for blank input or when no layout matches. No timezone is
/// applied; values are stored as given.
pub fn parse_trip_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if !has_date_time_shape(s) {
        return None;
    }

    TRIP_DATE_FORMATS.iter().find_map(|format| format.parse(s))
}

/// Unsigned year up front and a single `T` or space after `YYYY-MM-DD`
///
/// chrono lets `%Y` take a sign and a pattern space match no whitespace at
/// all, so both shapes are ruled out here.
fn has_date_time_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.first().is_some_and(u8::is_ascii_digit) && matches!(bytes.get(10), Some(b'T' | b' '))
}
