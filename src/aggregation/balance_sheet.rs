use crate::core::currency::CurrencyCode;
use crate::valuation::snapshot::{percent, AssetValuation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What is owned against what is owed, in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub base_currency: CurrencyCode,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    /// `total_liabilities / total_assets × 100`.
    ///
    /// 0 whenever `total_assets` is 0, including a portfolio that holds
    /// nothing but debt.
    pub debt_ratio: f64,
}

impl BalanceSheet {
    pub fn from_valuations(base_currency: CurrencyCode, valuations: &[AssetValuation]) -> Self {
        let (liabilities, assets): (Vec<&AssetValuation>, Vec<&AssetValuation>) =
            valuations.iter().partition(|v| v.class.is_liability());
        let total_assets: Decimal = assets.iter().map(|v| v.value).sum();
        let total_liabilities: Decimal = liabilities.iter().map(|v| v.value).sum();

        BalanceSheet {
            base_currency,
            total_assets,
            total_liabilities,
            debt_ratio: percent(total_liabilities, total_assets),
        }
    }

    pub fn net_worth(&self) -> Decimal {
        self.total_assets - self.total_liabilities
    }
}

impl fmt::Display for BalanceSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Balance Sheet ({}) ===", self.base_currency)?;
        writeln!(f, "Assets:      {}", self.total_assets.round_dp(2))?;
        writeln!(f, "Liabilities: {}", self.total_liabilities.round_dp(2))?;
        writeln!(f, "Net Worth:   {}", self.net_worth().round_dp(2))?;
        writeln!(f, "Debt Ratio:  {:.1}%", self.debt_ratio)
    }
}
