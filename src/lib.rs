//! # portfolio-engine
//!
//! Multi-currency portfolio history reconstruction and exposure aggregation.
//!
//! Only current prices and an append-only trade log are stored. From those
//! this engine answers what the portfolio was (plausibly) worth on each past
//! day, and how today's exposure is spread across asset classes, risk tiers
//! and debt.
//!
//! ## Architecture
//!
//! - **core** — Currencies and exchange rates, assets, transactions, portfolio snapshot
//! - **valuation** — Today's net worth and cost basis in the base currency
//! - **history** — Date bucketing, range resolution and backward reconstruction
//! - **aggregation** — Allocation, liabilities, balance sheet, risk tiers, rankings
//! - **simulation** — Random portfolio generation

pub mod aggregation;
pub mod core;
pub mod error;
pub mod history;
pub mod simulation;
pub mod valuation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::aggregation::{AggregateReport, AggregationConfig, PortfolioView};
    pub use crate::core::asset::{Asset, AssetClass, AssetId, RiskTier};
    pub use crate::core::currency::{CurrencyCode, ExchangeRates, FxError, RateQuote};
    pub use crate::core::portfolio::Portfolio;
    pub use crate::core::transaction::{Transaction, TransactionKind};
    pub use crate::error::Error;
    pub use crate::history::drift::{Drift, NoDrift, RandomDrift};
    pub use crate::history::range::TimeRange;
    pub use crate::history::reconstruct::{reconstruct, DailyPoint, HistoryConfig, HistoryReconstructor};
    pub use crate::history::summary::HistorySummary;
    pub use crate::valuation::snapshot::{build_snapshot, ValuationSnapshot};
}
