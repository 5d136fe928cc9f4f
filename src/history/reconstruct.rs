use crate::core::asset::{Asset, AssetId};
use crate::core::currency::{CurrencyCode, ExchangeRates, FxError};
use crate::core::portfolio::{holds_crypto, Portfolio};
use crate::core::transaction::{Transaction, TransactionKind};
use crate::history::drift::{Drift, RandomDrift};
use crate::history::range::TimeRange;
use crate::history::replay::bucket_by_date;
use crate::valuation::snapshot::{build_snapshot, percent};
use chrono::{Duration, Local, NaiveDate};
use log::{debug, warn};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One reconstructed end-of-day state, in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: Decimal,
    pub cost: Decimal,
    pub pnl: Decimal,
    /// `pnl / cost × 100`; 0 when cost is 0.
    pub pnl_percent: f64,
}

impl DailyPoint {
    pub fn new(date: NaiveDate, value: Decimal, cost: Decimal) -> Self {
        let pnl = value - cost;
        Self {
            date,
            value,
            cost,
            pnl,
            pnl_percent: percent(pnl, cost),
        }
    }
}

/// Tuning for history reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Daily volatility applied when any Crypto holding is present.
    pub crypto_volatility: Decimal,
    /// Daily volatility otherwise.
    pub base_volatility: Decimal,
    /// Days the ALL range reaches before the earliest transaction.
    pub all_range_padding_days: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            crypto_volatility: dec!(0.02),
            base_volatility: dec!(0.008),
            all_range_padding_days: 7,
        }
    }
}

/// Rebuilds a daily net worth / cost basis series from today's holdings.
///
/// There is no price history to consult. The series is obtained by starting
/// from today's snapshot and walking backward one day at a time, undoing each
/// day's trades and removing a small random drift from the value. The result
/// is an illustrative trend: exact at today, plausible before it.
///
/// # Algorithm
///
/// Today's point is the snapshot, exactly. Today's own trades are then
/// undone before stepping back. For each earlier day down to the range start:
///
/// 1. Undo that day's trades: a Buy removes its total from both value and
///    cost; a Sell adds its total back to value and its `quantity × price`
///    back to cost. Clamp the running cost at zero.
/// 2. Subtract `value × volatility × shock` from the running value (the
///    running cost is never perturbed).
/// 3. Record the running value and cost as that day's point.
///
/// The points are returned oldest first.
///
/// Sell reversal uses market value as the restored cost, which drifts from
/// lot-level accounting when the same asset is bought and sold repeatedly.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::asset::{Asset, AssetClass};
/// use portfolio_engine::core::currency::{CurrencyCode, ExchangeRates};
/// use portfolio_engine::history::drift::NoDrift;
/// use portfolio_engine::history::range::TimeRange;
/// use portfolio_engine::history::reconstruct::HistoryReconstructor;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let usd = CurrencyCode::new("USD");
/// let assets = vec![Asset::new("a", "AAPL", AssetClass::Stock, dec!(10), dec!(80), dec!(100), usd.clone())];
/// let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
///
/// let points = HistoryReconstructor::new()
///     .with_today(today)
///     .reconstruct(&assets, &[], TimeRange::OneWeek, &usd, &ExchangeRates::new(usd.clone()), &mut NoDrift)
///     .unwrap();
///
/// assert_eq!(points.len(), 8);
/// assert_eq!(points.last().unwrap().date, today);
/// assert_eq!(points.last().unwrap().value, dec!(1000));
/// ```
#[derive(Debug, Clone)]
pub struct HistoryReconstructor {
    today: NaiveDate,
    config: HistoryConfig,
}

impl Default for HistoryReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryReconstructor {
    /// Reconstructor anchored at the local calendar day.
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
            config: HistoryConfig::default(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Volatility the drift is scaled by for this set of holdings.
    pub fn volatility_for(&self, assets: &[Asset]) -> Decimal {
        if holds_crypto(assets) {
            self.config.crypto_volatility
        } else {
            self.config.base_volatility
        }
    }

    /// Reconstruct the daily series for `range`, oldest first.
    ///
    /// Returns an empty series for an empty asset list. Fails only when an
    /// asset or transaction currency has no rate to `base`.
    pub fn reconstruct<D: Drift + ?Sized>(
        &self,
        assets: &[Asset],
        transactions: &[Transaction],
        range: TimeRange,
        base: &CurrencyCode,
        rates: &ExchangeRates,
        drift: &mut D,
    ) -> Result<Vec<DailyPoint>, FxError> {
        if assets.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = build_snapshot(assets, base, rates)?;
        let start = range.start_date(self.today, transactions, self.config.all_range_padding_days);
        let days = (self.today - start).num_days().max(0);
        let volatility = self.volatility_for(assets);
        let buckets = bucket_by_date(transactions);
        let currencies: HashMap<&AssetId, &CurrencyCode> =
            assets.iter().map(|a| (&a.id, &a.currency)).collect();

        let future = transactions.iter().filter(|t| t.date() > self.today).count();
        if future > 0 {
            warn!("Ignoring {} transactions dated after {}", future, self.today);
        }

        debug!(
            "Reconstructing {} ({} days) from {} to {}, volatility {}",
            range, days, start, self.today, volatility
        );

        let mut sim = Running {
            value: snapshot.net_worth,
            cost: snapshot.cost_basis,
        };
        let mut points = Vec::with_capacity(days as usize + 1);

        // Today is the snapshot itself; its trades are undone only on the
        // way to yesterday.
        points.push(DailyPoint::new(self.today, sim.value, sim.cost));
        if let Some(day) = buckets.get(&self.today) {
            sim.undo_day(day, &currencies, base, rates)?;
        }

        for offset in 1..=days {
            let date = self.today - Duration::days(offset);

            if let Some(day) = buckets.get(&date) {
                sim.undo_day(day, &currencies, base, rates)?;
            }

            let shock = Decimal::from_f64(drift.unit_shock())
                .unwrap_or(Decimal::ZERO)
                .round_dp(6);
            sim.value -= (sim.value * volatility * shock).round_dp(2);

            points.push(DailyPoint::new(date, sim.value, sim.cost));
        }

        points.reverse();
        Ok(points)
    }

    /// Reconstruct from a portfolio snapshot using its own base currency and
    /// rates.
    pub fn reconstruct_portfolio<D: Drift + ?Sized>(
        &self,
        portfolio: &Portfolio,
        range: TimeRange,
        drift: &mut D,
    ) -> Result<Vec<DailyPoint>, FxError> {
        let rates = portfolio.exchange_rates()?;
        self.reconstruct(
            &portfolio.assets,
            &portfolio.transactions,
            range,
            &portfolio.base_currency,
            &rates,
            drift,
        )
    }
}

/// Running value and cost while walking backward.
struct Running {
    value: Decimal,
    cost: Decimal,
}

impl Running {
    /// Reverse one day's trades, then floor the cost at zero.
    ///
    /// The stored total is trusted as-is. A Buy takes its total out of both
    /// value and cost; a Sell puts its total back into value and its
    /// `quantity × price` back into cost.
    fn undo_day(
        &mut self,
        day: &[&Transaction],
        currencies: &HashMap<&AssetId, &CurrencyCode>,
        base: &CurrencyCode,
        rates: &ExchangeRates,
    ) -> Result<(), FxError> {
        for tx in day {
            let Some(currency) = tx.currency().or_else(|| currencies.get(tx.asset_id()).copied())
            else {
                warn!(
                    "Skipping transaction {} on {}: asset {} not held and no currency given",
                    tx.id(),
                    tx.date(),
                    tx.asset_id()
                );
                continue;
            };
            let rate = rates.get_rate(currency, base)?;
            match tx.kind() {
                TransactionKind::Buy => {
                    let total = tx.total() * rate;
                    self.cost -= total;
                    self.value -= total;
                }
                TransactionKind::Sell => {
                    self.cost += tx.gross() * rate;
                    self.value += tx.total() * rate;
                }
            }
        }
        self.cost = self.cost.max(Decimal::ZERO);
        Ok(())
    }
}

/// Reconstruct with default settings, anchored at today, with
/// non-reproducible drift.
pub fn reconstruct(
    assets: &[Asset],
    transactions: &[Transaction],
    range: TimeRange,
    base: &CurrencyCode,
    rates: &ExchangeRates,
) -> Result<Vec<DailyPoint>, FxError> {
    HistoryReconstructor::new().reconstruct(
        assets,
        transactions,
        range,
        base,
        rates,
        &mut RandomDrift::from_entropy(),
    )
}
