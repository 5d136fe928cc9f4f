use crate::core::transaction::Transaction;
use crate::error::Error;
use crate::history::replay::earliest_date;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Look-back window for a reconstructed history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

/// Days ALL reaches back when there is no transaction to anchor it.
const DEFAULT_ALL_DAYS: i64 = 365;

fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_sub_days(Days::new(days.max(0).unsigned_abs()))
        .unwrap_or(NaiveDate::MIN)
}

impl TimeRange {
    pub const VARIANTS: [TimeRange; 6] = [
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::All,
    ];

    /// Fixed look-back in days. `None` for ALL, which depends on the log.
    pub fn fixed_days(self) -> Option<i64> {
        match self {
            TimeRange::OneWeek => Some(7),
            TimeRange::OneMonth => Some(30),
            TimeRange::ThreeMonths => Some(90),
            TimeRange::SixMonths => Some(180),
            TimeRange::OneYear => Some(365),
            TimeRange::All => None,
        }
    }

    /// First day of the window ending at `today`.
    ///
    /// ALL starts `padding_days` before the earliest transaction, or a year
    /// back when the log is empty. It never starts after `today`. Negative
    /// padding counts as zero, and the start saturates at `NaiveDate::MIN`.
    pub fn start_date(
        self,
        today: NaiveDate,
        transactions: &[Transaction],
        padding_days: i64,
    ) -> NaiveDate {
        match self.fixed_days() {
            Some(days) => days_before(today, days),
            None => match earliest_date(transactions) {
                Some(earliest) => days_before(earliest, padding_days).min(today),
                None => days_before(today, DEFAULT_ALL_DAYS),
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::All => "ALL",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        TimeRange::VARIANTS
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| Error::UnknownRange(s.to_string()))
    }
}
