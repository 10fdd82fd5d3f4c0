use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{format_instant, parse_instant};

/// Named ranges offered by summary screens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DatePreset {
    #[default]
    ThisMonth,
    LastMonth,
    ThisYear,
    Custom,
}

impl DatePreset {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "thisMonth" => Some(DatePreset::ThisMonth),
            "lastMonth" => Some(DatePreset::LastMonth),
            "thisYear" => Some(DatePreset::ThisYear),
            "custom" => Some(DatePreset::Custom),
            _ => None,
        }
    }
}

/// Selects which transactions are "in view"; both bounds are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub preset: DatePreset,
    pub start_date: String,
    pub end_date: String,
}

impl DateFilter {
    /// Computes the bounds of a calendar preset relative to `today`.
    ///
    /// `Custom` has no calendar meaning and falls back to the current month.
    pub fn for_preset(preset: DatePreset, today: NaiveDate) -> Self {
        let (start, end) = match preset {
            DatePreset::ThisMonth | DatePreset::Custom => month_bounds(today.year(), today.month()),
            DatePreset::LastMonth => {
                let (year, month) = if today.month() == 1 {
                    (today.year() - 1, 12)
                } else {
                    (today.year(), today.month() - 1)
                };
                month_bounds(year, month)
            }
            DatePreset::ThisYear => (
                start_of_day(first_of_month(today.year(), 1)),
                end_of_day(last_of_month(today.year(), 12)),
            ),
        };
        Self {
            preset,
            start_date: format_instant(start),
            end_date: format_instant(end),
        }
    }

    pub fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            preset: DatePreset::Custom,
            start_date: format_instant(start),
            end_date: format_instant(end),
        }
    }

    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((parse_instant(&self.start_date)?, parse_instant(&self.end_date)?))
    }

    /// Whether a stored date string falls inside the filter.
    ///
    /// Unparseable dates or bounds never match.
    pub fn contains(&self, raw_date: &str) -> bool {
        match (self.bounds(), parse_instant(raw_date)) {
            (Some((start, end)), Some(instant)) => instant >= start && instant <= end,
            _ => false,
        }
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::for_preset(DatePreset::ThisMonth, Utc::now().date_naive())
    }
}

fn month_bounds(year: i32, month: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        start_of_day(first_of_month(year, month)),
        end_of_day(last_of_month(year, month)),
    )
}

pub(crate) fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month) - Duration::days(1)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}
