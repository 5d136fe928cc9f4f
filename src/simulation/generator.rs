//! Random portfolio generation for benchmarks, property tests and demos.

use crate::core::asset::{Asset, AssetClass};
use crate::core::currency::{CurrencyCode, RateQuote};
use crate::core::portfolio::Portfolio;
use crate::core::transaction::{Transaction, TransactionKind};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Configuration for generating a random portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of holdings.
    pub asset_count: usize,
    /// Number of Buy/Sell entries in the log.
    pub transaction_count: usize,
    /// Currency everything is reported in.
    pub base_currency: CurrencyCode,
    /// Currencies holdings may be denominated in.
    pub currencies: Vec<CurrencyCode>,
    /// Last day a trade may fall on.
    pub today: NaiveDate,
    /// How far back the log reaches.
    pub history_days: i64,
    /// Share of holdings tagged Liability, between 0 and 1.
    pub liability_share: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            asset_count: 10,
            transaction_count: 50,
            base_currency: CurrencyCode::new("USD"),
            currencies: vec![CurrencyCode::new("USD")],
            today: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or_default(),
            history_days: 365,
            liability_share: 0.1,
        }
    }
}

fn money(rng: &mut impl Rng, low: f64, high: f64) -> Decimal {
    Decimal::from_f64(rng.gen_range(low..high))
        .unwrap_or(Decimal::ONE)
        .round_dp(2)
}

/// Generate a random portfolio with rates for every currency it uses.
pub fn generate_random_portfolio(config: &PortfolioConfig) -> Portfolio {
    let mut rng = rand::thread_rng();
    let mut portfolio = Portfolio::new(config.base_currency.clone());

    let currencies = if config.currencies.is_empty() {
        vec![config.base_currency.clone()]
    } else {
        config.currencies.clone()
    };

    for currency in &currencies {
        if currency != &config.base_currency {
            portfolio.add_rate(RateQuote {
                from: currency.clone(),
                to: config.base_currency.clone(),
                rate: money(&mut rng, 0.01, 2.0).max(Decimal::new(1, 2)),
            });
        }
    }

    let holding_classes = &AssetClass::ALL[..AssetClass::ALL.len() - 1];
    for i in 0..config.asset_count {
        let class = if rng.gen_bool(config.liability_share.clamp(0.0, 1.0)) {
            AssetClass::Liability
        } else {
            holding_classes[rng.gen_range(0..holding_classes.len())]
        };
        let currency = currencies[rng.gen_range(0..currencies.len())].clone();
        let avg_cost = money(&mut rng, 1.0, 1_000.0);
        let price = (avg_cost * money(&mut rng, 0.5, 1.8)).round_dp(2);
        portfolio.add_asset(
            Asset::new(
                format!("ASSET-{:03}", i),
                format!("SYM{:03}", i),
                class,
                money(&mut rng, 1.0, 500.0),
                avg_cost,
                price,
                currency,
            )
            .with_name(format!("{} holding {}", class, i)),
        );
    }

    if portfolio.assets.is_empty() {
        return portfolio;
    }

    for _ in 0..config.transaction_count {
        let asset = &portfolio.assets[rng.gen_range(0..portfolio.assets.len())];
        let kind = if rng.gen_bool(0.7) {
            TransactionKind::Buy
        } else {
            TransactionKind::Sell
        };
        let date = config.today - Duration::days(rng.gen_range(0..=config.history_days.max(0)));
        let tx = Transaction::new(
            asset.id.as_str(),
            kind,
            date,
            money(&mut rng, 1.0, 20.0),
            asset.avg_cost,
            money(&mut rng, 0.0, 10.0),
        );
        portfolio.add_transaction(tx);
    }

    portfolio
}
