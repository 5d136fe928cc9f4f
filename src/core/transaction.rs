use crate::core::asset::AssetId;
use crate::core::currency::CurrencyCode;
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Direction of a trade. Parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TransactionKind {
    Buy,
    Sell,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Buy => f.write_str("Buy"),
            TransactionKind::Sell => f.write_str("Sell"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionKind::Buy),
            "sell" => Ok(TransactionKind::Sell),
            _ => Err(Error::UnknownTransactionKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for TransactionKind {
    type Error = Error;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parse a trade date, dropping any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. An offset timestamp keeps the calendar day it was written in,
/// so `2024-03-01T23:30:00-05:00` is still March 1st.
///
/// ```
/// use portfolio_engine::core::transaction::parse_trade_date;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(parse_trade_date("2024-03-01").unwrap(), day);
/// assert_eq!(parse_trade_date("2024-03-01T23:30:00-05:00").unwrap(), day);
/// ```
pub fn parse_trade_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts.date());
    }
    Err(Error::InvalidDate(raw.to_string()))
}

fn deserialize_trade_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_trade_date(&raw).map_err(serde::de::Error::custom)
}

/// A Buy or Sell against one of the portfolio's assets.
///
/// `total` is fixed at creation: `quantity × price + fee` for a Buy,
/// `quantity × price − fee` for a Sell. Deserialized transactions keep the
/// stored total as-is.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::transaction::{Transaction, TransactionKind};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let buy = Transaction::new("aapl", TransactionKind::Buy, date, dec!(10), dec!(100), dec!(5));
/// assert_eq!(buy.total(), dec!(1005));
///
/// let sell = Transaction::new("aapl", TransactionKind::Sell, date, dec!(10), dec!(100), dec!(5));
/// assert_eq!(sell.total(), dec!(995));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    asset_id: AssetId,
    kind: TransactionKind,
    #[serde(deserialize_with = "deserialize_trade_date")]
    date: NaiveDate,
    quantity: Decimal,
    price: Decimal,
    #[serde(default)]
    fee: Decimal,
    total: Decimal,
    /// Overrides the referenced asset's currency when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<CurrencyCode>,
}

impl Transaction {
    /// Create a transaction and derive its total from the fee direction.
    pub fn new(
        asset_id: impl Into<String>,
        kind: TransactionKind,
        date: NaiveDate,
        quantity: Decimal,
        price: Decimal,
        fee: Decimal,
    ) -> Self {
        let gross = quantity * price;
        let total = match kind {
            TransactionKind::Buy => gross + fee,
            TransactionKind::Sell => gross - fee,
        };
        Self {
            id: Uuid::new_v4(),
            asset_id: AssetId::new(asset_id),
            kind,
            date,
            quantity,
            price,
            fee,
            total,
            currency: None,
        }
    }

    /// Create a transaction from a timestamp, keeping only its calendar day
    /// in the timestamp's own zone.
    pub fn at<Tz: TimeZone>(
        asset_id: impl Into<String>,
        kind: TransactionKind,
        timestamp: DateTime<Tz>,
        quantity: Decimal,
        price: Decimal,
        fee: Decimal,
    ) -> Self {
        Self::new(asset_id, kind, timestamp.date_naive(), quantity, price, fee)
    }

    /// Replace the derived total with a stored one.
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    /// Denominate this transaction in `currency` instead of the asset's.
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = Some(currency);
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// `quantity × price`, ignoring the fee.
    pub fn gross(&self) -> Decimal {
        self.quantity * self.price
    }

    pub fn currency(&self) -> Option<&CurrencyCode> {
        self.currency.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("BUY".parse::<TransactionKind>().unwrap(), TransactionKind::Buy);
        assert_eq!(" sell".parse::<TransactionKind>().unwrap(), TransactionKind::Sell);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_kind_deserializes_case_insensitively() {
        let tx: Transaction = serde_json::from_str(
            r#"{"asset_id":"a","kind":"BUY","date":"2024-03-01","quantity":"1","price":"10","total":"10"}"#,
        )
        .unwrap();
        assert_eq!(tx.kind(), TransactionKind::Buy);
        assert!(serde_json::from_str::<TransactionKind>(r#""transfer""#).is_err());
    }

    #[test]
    fn test_at_truncates_to_local_day() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let late_evening = offset.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap();
        let tx = Transaction::at("a", TransactionKind::Buy, late_evening, dec!(1), dec!(1), dec!(0));
        assert_eq!(tx.date(), day(2024, 3, 1));

        let utc = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 1).unwrap();
        let tx = Transaction::at("a", TransactionKind::Buy, utc, dec!(1), dec!(1), dec!(0));
        assert_eq!(tx.date(), day(2024, 3, 1));
    }

    #[test]
    fn test_with_total_is_trusted() {
        let tx = Transaction::new("a", TransactionKind::Buy, day(2024, 1, 2), dec!(2), dec!(50), dec!(1))
            .with_total(dec!(42));
        assert_eq!(tx.total(), dec!(42));
        assert_eq!(tx.gross(), dec!(100));
    }

    #[test]
    fn test_deserialize_datetime_date() {
        let tx: Transaction = serde_json::from_str(
            r#"{"asset_id":"a","kind":"Sell","date":"2024-03-01T18:45:00Z","quantity":"1","price":"10","total":"9.5","fee":"0.5"}"#,
        )
        .unwrap();
        assert_eq!(tx.date(), day(2024, 3, 1));
        assert_eq!(tx.total(), dec!(9.5));
        assert!(tx.currency().is_none());
    }

    #[test]
    fn test_invalid_date() {
        assert!(matches!(parse_trade_date("03/01/2024"), Err(Error::InvalidDate(_))));
    }
}
