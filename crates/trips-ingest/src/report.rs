//! End-of-run summary

use std::fmt;
use std::time::Duration;

use crate::counters::Counters;

/// Final counters plus timing for a completed run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestReport {
    pub counters: Counters,
    pub duration: Duration,
}

impl IngestReport {
    pub fn new(counters: Counters, duration: Duration) -> Self {
        Self { counters, duration }
    }

    /// Rows read per second; zero when no time elapsed
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.counters.total_rows_read as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counters;

        writeln!(f, "Ingestion completed successfully")?;
        writeln!(f)?;
        writeln!(f, "Summary:")?;
        writeln!(f, "  Total rows read:        {}", group_thousands(c.total_rows_read))?;
        writeln!(f, "  Valid rows:             {}", group_thousands(c.valid_rows()))?;
        writeln!(f, "  Successfully inserted:  {}", group_thousands(c.inserted))?;
        writeln!(f, "  Skipped (duplicates):   {}", group_thousands(c.duplicates_skipped))?;
        writeln!(f)?;
        writeln!(f, "Errors:")?;
        writeln!(f, "  Invalid date format:    {}", group_thousands(c.invalid_date))?;
        writeln!(f, "  Invalid status value:   {}", group_thousands(c.invalid_status))?;
        writeln!(f, "  Other errors:           {}", group_thousands(c.other_errors))?;
        writeln!(f)?;
        writeln!(f, "Duration: {:.2} seconds", self.duration.as_secs_f64())?;
        write!(f, "Throughput: {} rows/sec", group_thousands_f64(self.throughput()))
    }
}

/// `1234567` -> `"1,234,567"`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals with grouped integer part, `12345.678` -> `"12,345.68"`
fn group_thousands_f64(value: f64) -> String {
    let fixed = format!("{:.2}", value.max(0.0));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let int_value: u64 = int_part.parse().unwrap_or(0);
    format!("{}.{}", group_thousands(int_value), frac_part)
}
