use crate::history::reconstruct::DailyPoint;
use crate::valuation::snapshot::percent;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline figures of a reconstructed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_value: Decimal,
    pub end_value: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub change: Decimal,
    /// Change relative to the start value; 0 when the start value is 0.
    pub change_percent: f64,
}

impl HistorySummary {
    /// Summarize an oldest-first series. `None` for an empty series.
    pub fn from_points(points: &[DailyPoint]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;
        let high = points.iter().map(|p| p.value).max()?;
        let low = points.iter().map(|p| p.value).min()?;
        let change = last.value - first.value;
        Some(Self {
            start_date: first.date,
            end_date: last.date,
            start_value: first.value,
            end_value: last.value,
            high,
            low,
            change,
            change_percent: percent(change, first.value.abs()),
        })
    }
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== History {} .. {} ===", self.start_date, self.end_date)?;
        writeln!(f, "Start:  {}", self.start_value.round_dp(2))?;
        writeln!(f, "End:    {}", self.end_value.round_dp(2))?;
        writeln!(f, "High:   {}", self.high.round_dp(2))?;
        writeln!(f, "Low:    {}", self.low.round_dp(2))?;
        writeln!(
            f,
            "Change: {} ({:.2}%)",
            self.change.round_dp(2),
            self.change_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(d: u32, value: Decimal) -> DailyPoint {
        DailyPoint::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), value, dec!(100))
    }

    #[test]
    fn test_empty_series() {
        assert!(HistorySummary::from_points(&[]).is_none());
    }

    #[test]
    fn test_summary_figures() {
        let points = vec![point(1, dec!(200)), point(2, dec!(150)), point(3, dec!(260)), point(4, dec!(250))];
        let summary = HistorySummary::from_points(&points).unwrap();
        assert_eq!(summary.high, dec!(260));
        assert_eq!(summary.low, dec!(150));
        assert_eq!(summary.change, dec!(50));
        assert_eq!(summary.change_percent, 25.0);
    }

    #[test]
    fn test_zero_start_value() {
        let points = vec![point(1, Decimal::ZERO), point(2, dec!(10))];
        let summary = HistorySummary::from_points(&points).unwrap();
        assert_eq!(summary.change_percent, 0.0);
    }
}
