//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for converting file
//! modification times into printable timestamps.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::from_unix(1_718_461_845);
//! assert_eq!(dt.to_stamp(), "2024-06-15_14-30-45");
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: u64 = 86_400;

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: u32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    /// Convert seconds since the Unix epoch to a civil UTC datetime.
    ///
    /// Uses the days-to-civil algorithm over the 400-year Gregorian cycle
    /// (146097 days), valid for any timestamp at or after the epoch.
    pub const fn from_unix(secs: u64) -> Self {
        let days = secs / SECS_PER_DAY;
        let rem = secs % SECS_PER_DAY;

        // Shift epoch from 1970-01-01 to 0000-03-01 so leap days land at
        // the end of the cycle year.
        let z = days + 719_468;
        let era = z / 146_097;
        let doe = z % 146_097;
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let (month, year_off) = if mp < 10 { (mp + 3, 0) } else { (mp - 9, 1) };
        let year = yoe + era * 400 + year_off;

        Self {
            year: year as u32,
            month: month as u8,
            day: day as u8,
            hour: (rem / 3_600) as u8,
            minute: (rem / 60 % 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// Format as a filesystem- and URL-safe stamp: `YYYY-MM-DD_HH-MM-SS`.
    pub fn to_stamp(self) -> String {
        format!(
            "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Format a `SystemTime` as a UTC stamp.
///
/// Times before the epoch collapse to the epoch itself; modification
/// times of real files never are.
pub fn format_system_time(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    DateTimeUtc::from_unix(secs).to_stamp()
}
