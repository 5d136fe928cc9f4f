//! Cross-sectional views of the current holdings: allocation, liabilities,
//! balance sheet, risk tiers and rankings. No time dimension.

pub mod allocation;
pub mod balance_sheet;
pub mod ranking;
pub mod risk;

use crate::core::asset::Asset;
use crate::core::currency::{CurrencyCode, ExchangeRates, FxError};
use crate::core::portfolio::Portfolio;
use crate::valuation::snapshot::{value_assets, AssetValuation, ValuationSnapshot};
use allocation::ClassAllocation;
use balance_sheet::BalanceSheet;
use log::debug;
use ranking::{HoldingValue, PnlEntry};
use risk::RiskExposure;
use serde::{Deserialize, Serialize};

/// Sizes of the ranked views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub top_holdings: usize,
    pub pnl_ranking: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            top_holdings: 6,
            pnl_ranking: 8,
        }
    }
}

/// Holdings valued once in the base currency, ready to be sliced.
///
/// Building the view is the only step that can fail (a missing rate);
/// every view read from it afterwards is infallible and leaves the input
/// untouched, so the same view always answers the same way.
///
/// # Examples
///
/// ```
/// use portfolio_engine::aggregation::PortfolioView;
/// use portfolio_engine::core::asset::{Asset, AssetClass, RiskTier};
/// use portfolio_engine::core::currency::{CurrencyCode, ExchangeRates};
/// use rust_decimal_macros::dec;
///
/// let usd = CurrencyCode::new("USD");
/// let assets = vec![Asset::new("a", "AAPL", AssetClass::Stock, dec!(10), dec!(80), dec!(100), usd.clone())];
/// let view = PortfolioView::build(&assets, &usd, &ExchangeRates::new(usd.clone())).unwrap();
///
/// assert_eq!(view.allocation_by_class()[0].value, dec!(1000));
/// assert_eq!(view.risk_buckets()[0].tier, RiskTier::Medium);
/// assert_eq!(view.pnl_ranking()[0].pnl, dec!(200));
/// assert_eq!(view.balance_sheet().debt_ratio, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct PortfolioView {
    base_currency: CurrencyCode,
    valuations: Vec<AssetValuation>,
    config: AggregationConfig,
}

impl PortfolioView {
    pub fn build(
        assets: &[Asset],
        base: &CurrencyCode,
        rates: &ExchangeRates,
    ) -> Result<Self, FxError> {
        let valuations = value_assets(assets, base, rates)?;
        debug!("Valued {} holdings in {}", valuations.len(), base);
        Ok(Self {
            base_currency: base.clone(),
            valuations,
            config: AggregationConfig::default(),
        })
    }

    pub fn from_portfolio(portfolio: &Portfolio) -> Result<Self, FxError> {
        let rates = portfolio.exchange_rates()?;
        Self::build(&portfolio.assets, &portfolio.base_currency, &rates)
    }

    pub fn with_config(mut self, config: AggregationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        &self.base_currency
    }

    pub fn valuations(&self) -> &[AssetValuation] {
        &self.valuations
    }

    pub fn snapshot(&self) -> ValuationSnapshot {
        ValuationSnapshot::from_valuations(self.base_currency.clone(), &self.valuations)
    }

    pub fn allocation_by_class(&self) -> Vec<ClassAllocation> {
        allocation::allocation_by_class(&self.valuations)
    }

    pub fn liability_breakdown(&self) -> Vec<ClassAllocation> {
        allocation::liability_breakdown(&self.valuations)
    }

    pub fn balance_sheet(&self) -> BalanceSheet {
        BalanceSheet::from_valuations(self.base_currency.clone(), &self.valuations)
    }

    pub fn risk_buckets(&self) -> Vec<RiskExposure> {
        risk::risk_buckets(&self.valuations)
    }

    pub fn top_holdings(&self) -> Vec<HoldingValue> {
        ranking::top_holdings(&self.valuations, self.config.top_holdings)
    }

    pub fn pnl_ranking(&self) -> Vec<PnlEntry> {
        ranking::pnl_ranking(&self.valuations, self.config.pnl_ranking)
    }

    pub fn worst_performers(&self, k: usize) -> Vec<PnlEntry> {
        ranking::worst_performers(&self.valuations, k)
    }

    /// Every view at once, for serialization.
    pub fn report(&self) -> AggregateReport {
        AggregateReport {
            snapshot: self.snapshot(),
            balance_sheet: self.balance_sheet(),
            allocation: self.allocation_by_class(),
            liabilities: self.liability_breakdown(),
            risk: self.risk_buckets(),
            top_holdings: self.top_holdings(),
            pnl_ranking: self.pnl_ranking(),
            worst_performers: self.worst_performers(self.config.pnl_ranking),
        }
    }
}

/// All aggregate views of one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub snapshot: ValuationSnapshot,
    pub balance_sheet: BalanceSheet,
    pub allocation: Vec<ClassAllocation>,
    pub liabilities: Vec<ClassAllocation>,
    pub risk: Vec<RiskExposure>,
    pub top_holdings: Vec<HoldingValue>,
    pub pnl_ranking: Vec<PnlEntry>,
    pub worst_performers: Vec<PnlEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::AssetClass;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_limits_rankings() {
        let usd = CurrencyCode::new("USD");
        let assets: Vec<Asset> = (1..=10)
            .map(|i| {
                Asset::new(
                    format!("s{i}"),
                    format!("S{i}"),
                    AssetClass::Stock,
                    Decimal::from(i),
                    dec!(1),
                    dec!(2),
                    usd.clone(),
                )
            })
            .collect();
        let view = PortfolioView::build(&assets, &usd, &ExchangeRates::new(usd.clone())).unwrap();
        assert_eq!(view.top_holdings().len(), 6);
        assert_eq!(view.pnl_ranking().len(), 8);

        let view = view.with_config(AggregationConfig {
            top_holdings: 2,
            pnl_ranking: 3,
        });
        assert_eq!(view.top_holdings().len(), 2);
        assert_eq!(view.report().pnl_ranking.len(), 3);
    }

    #[test]
    fn test_view_fails_on_missing_rate() {
        let usd = CurrencyCode::new("USD");
        let assets = vec![Asset::new("x", "X", AssetClass::Cash, dec!(1), dec!(1), dec!(1), "SEK".into())];
        assert!(PortfolioView::build(&assets, &usd, &ExchangeRates::new(usd.clone())).is_err());
    }
}
