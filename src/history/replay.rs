use crate::core::transaction::Transaction;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Group transactions by trade date.
///
/// Within a day, transactions keep their log order. Dates are already
/// calendar days, so a trade recorded late in the evening lands in the same
/// bucket as one recorded at midnight.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::transaction::{Transaction, TransactionKind};
/// use portfolio_engine::history::replay::bucket_by_date;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let log = vec![
///     Transaction::new("a", TransactionKind::Buy, d, dec!(1), dec!(10), dec!(0)),
///     Transaction::new("b", TransactionKind::Sell, d, dec!(2), dec!(5), dec!(0)),
/// ];
/// let buckets = bucket_by_date(&log);
/// assert_eq!(buckets[&d].len(), 2);
/// assert_eq!(buckets[&d][0].asset_id().as_str(), "a");
/// ```
pub fn bucket_by_date(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Vec<&Transaction>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        buckets.entry(tx.date()).or_default().push(tx);
    }
    buckets
}

/// Earliest trade date in the log, if any.
pub fn earliest_date(transactions: &[Transaction]) -> Option<NaiveDate> {
    transactions.iter().map(Transaction::date).min()
}
