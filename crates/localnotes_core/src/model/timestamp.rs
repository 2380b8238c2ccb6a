//! Timestamp encoding for persisted note rows.
//!
//! # Responsibility
//! - Produce the wall-clock "now" used for `created_at/updated_at/deleted_at`.
//! - Encode/decode the sortable ISO-8601 text stored in SQLite.
//!
//! # Invariants
//! - Encoded values always carry six fractional digits, so lexical order of
//!   the stored text equals chronological order.
//! - Decoding also accepts values without a fractional part.

use chrono::{Duration, Local, NaiveDateTime, Timelike};

/// Storage format used for every timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Returns the local wall-clock time truncated to microsecond precision.
pub fn now_local() -> NaiveDateTime {
    truncate_to_micros(Local::now().naive_local())
}

/// Encodes a timestamp into its stored text form.
pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Decodes stored timestamp text. Returns `None` for malformed values.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_PARSE_FORMAT).ok()
}

/// Returns a stamp strictly later than `previous`.
///
/// Uses `now` when the clock has moved forward, otherwise bumps `previous`
/// by one microsecond.
pub fn next_stamp_after(previous: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

fn truncate_to_micros(value: NaiveDateTime) -> NaiveDateTime {
    let micros = value.nanosecond() / 1_000;
    value.with_nanosecond(micros * 1_000).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, next_stamp_after, now_local, parse_timestamp};
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn format_uses_fixed_width_fraction() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(format_timestamp(value), "2024-03-05T07:08:09.000000");
    }

    #[test]
    fn parse_accepts_values_without_fraction() {
        let parsed = parse_timestamp("2024-03-05T07:08:09").expect("plain seconds should parse");
        assert_eq!(parsed.second(), 9);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn stored_text_sorts_chronologically() {
        let earlier = parse_timestamp("2024-03-05T07:08:09.5").unwrap();
        let later = parse_timestamp("2024-03-05T07:08:10").unwrap();
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }

    #[test]
    fn next_stamp_is_strictly_later_when_clock_stalls() {
        let previous = now_local();
        let next = next_stamp_after(previous, previous);
        assert!(next > previous);
        assert_eq!(format_timestamp(next).len(), format_timestamp(previous).len());
    }
}
