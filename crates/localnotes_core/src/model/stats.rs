//! Date-bucketed activity aggregates.
//!
//! # Responsibility
//! - Hold sparse per-date created/deleted counts read from storage.
//! - Expand them into a dense daily series for chart rendering.
//!
//! # Invariants
//! - Sparse maps never contain zero counts.
//! - Dense series is ordered oldest first and has exactly `days` points,
//!   fewer only when the window would reach before the earliest
//!   representable date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of days shown by the statistics chart.
pub const DEFAULT_STATS_WINDOW_DAYS: u32 = 30;

/// Sparse per-date counts for created and deleted notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCounts {
    /// Count of notes created per calendar date.
    pub created: BTreeMap<NaiveDate, u32>,
    /// Count of notes soft-deleted per calendar date.
    pub deleted: BTreeMap<NaiveDate, u32>,
}

/// One chart point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub created: u32,
    pub deleted: u32,
}

impl DailyPoint {
    /// Short `MM-DD` axis label.
    pub fn axis_label(&self) -> String {
        self.date.format("%m-%d").to_string()
    }
}

impl DailyCounts {
    pub fn created_on(&self, date: NaiveDate) -> u32 {
        self.created.get(&date).copied().unwrap_or(0)
    }

    pub fn deleted_on(&self, date: NaiveDate) -> u32 {
        self.deleted.get(&date).copied().unwrap_or(0)
    }

    /// Expands the sparse maps into `days` consecutive points ending at `today`.
    ///
    /// Dates without activity are filled with zeros. The window is cut at
    /// the earliest date chrono can represent.
    pub fn series(&self, today: NaiveDate, days: u32) -> Vec<DailyPoint> {
        let mut points = (0..days)
            .map_while(|offset| today.checked_sub_signed(Duration::days(i64::from(offset))))
            .map(|date| DailyPoint {
                date,
                created: self.created_on(date),
                deleted: self.deleted_on(date),
            })
            .collect::<Vec<_>>();
        points.reverse();
        points
    }
}

#[cfg(test)]
mod tests {
    use super::DailyCounts;
    use chrono::{Duration, NaiveDate};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn series_fills_gaps_oldest_first() {
        let mut counts = DailyCounts::default();
        counts.created.insert(date(3), 2);
        counts.deleted.insert(date(5), 1);

        let series = counts.series(date(5), 4);
        let dates = series.iter().map(|point| point.date).collect::<Vec<_>>();
        assert_eq!(dates, vec![date(2), date(3), date(4), date(5)]);
        assert_eq!(series[1].created, 2);
        assert_eq!(series[2].created, 0);
        assert_eq!(series[3].deleted, 1);
        assert_eq!(series[3].axis_label(), "05-05");
    }

    #[test]
    fn series_with_zero_days_is_empty() {
        assert!(DailyCounts::default().series(date(1), 0).is_empty());
    }

    #[test]
    fn series_stops_at_earliest_representable_date() {
        let today = NaiveDate::MIN + Duration::days(5);

        let series = DailyCounts::default().series(today, 10);
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].date, NaiveDate::MIN);
        assert_eq!(series[5].date, today);
    }
}
