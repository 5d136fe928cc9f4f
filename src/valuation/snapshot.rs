use crate::core::asset::{Asset, AssetClass, AssetId};
use crate::core::currency::{CurrencyCode, ExchangeRates, FxError};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `numerator / denominator × 100` as a display percentage.
///
/// A zero denominator yields `0.0`, never NaN or infinity.
pub fn percent(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    (numerator * Decimal::ONE_HUNDRED / denominator)
        .to_f64()
        .unwrap_or(0.0)
}

/// One holding expressed in the base currency.
///
/// `value` and `cost` are unsigned magnitudes even for liabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetValuation {
    pub asset_id: AssetId,
    pub symbol: String,
    pub name: String,
    pub class: AssetClass,
    pub value: Decimal,
    pub cost: Decimal,
}

impl AssetValuation {
    /// Convert one asset's market value and cost into `base`.
    pub fn of(asset: &Asset, base: &CurrencyCode, rates: &ExchangeRates) -> Result<Self, FxError> {
        let rate = rates.get_rate(&asset.currency, base)?;
        Ok(Self {
            asset_id: asset.id.clone(),
            symbol: asset.symbol.clone(),
            name: asset.display_name().to_string(),
            class: asset.class,
            value: asset.market_value() * rate,
            cost: asset.cost_value() * rate,
        })
    }

    pub fn pnl(&self) -> Decimal {
        self.value - self.cost
    }

    pub fn pnl_percent(&self) -> f64 {
        percent(self.pnl(), self.cost)
    }

    /// Contribution to net worth: negative for liabilities.
    pub fn signed_value(&self) -> Decimal {
        if self.class.is_liability() {
            -self.value
        } else {
            self.value
        }
    }

    /// Contribution to cost basis: negative for liabilities.
    pub fn signed_cost(&self) -> Decimal {
        if self.class.is_liability() {
            -self.cost
        } else {
            self.cost
        }
    }
}

/// Convert every asset into `base`, failing on the first missing rate.
pub fn value_assets(
    assets: &[Asset],
    base: &CurrencyCode,
    rates: &ExchangeRates,
) -> Result<Vec<AssetValuation>, FxError> {
    assets
        .iter()
        .map(|asset| AssetValuation::of(asset, base, rates))
        .collect()
}

/// Today's net worth and cost basis in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub base_currency: CurrencyCode,
    pub net_worth: Decimal,
    pub cost_basis: Decimal,
}

impl ValuationSnapshot {
    /// Sum already-converted holdings, flipping the sign of liabilities.
    pub fn from_valuations(base_currency: CurrencyCode, valuations: &[AssetValuation]) -> Self {
        let net_worth = valuations.iter().map(AssetValuation::signed_value).sum();
        let cost_basis = valuations.iter().map(AssetValuation::signed_cost).sum();
        Self {
            base_currency,
            net_worth,
            cost_basis,
        }
    }

    pub fn unrealized_pnl(&self) -> Decimal {
        self.net_worth - self.cost_basis
    }

    pub fn pnl_percent(&self) -> f64 {
        percent(self.unrealized_pnl(), self.cost_basis)
    }
}

/// Reduce the current asset list to today's net worth and cost basis.
///
/// Every asset's currency must resolve to `base` through `rates`; a missing
/// rate is returned as an error rather than assumed to be 1:1.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::asset::{Asset, AssetClass};
/// use portfolio_engine::core::currency::{CurrencyCode, ExchangeRates};
/// use portfolio_engine::valuation::snapshot::build_snapshot;
/// use rust_decimal_macros::dec;
///
/// let usd = CurrencyCode::new("USD");
/// let assets = vec![
///     Asset::new("h", "HOME", AssetClass::RealEstate, dec!(1), dec!(300000), dec!(350000), usd.clone()),
///     Asset::new("m", "MORTGAGE", AssetClass::Liability, dec!(1), dec!(200000), dec!(200000), usd.clone()),
/// ];
/// let snapshot = build_snapshot(&assets, &usd, &ExchangeRates::new(usd.clone())).unwrap();
/// assert_eq!(snapshot.net_worth, dec!(150000));
/// assert_eq!(snapshot.cost_basis, dec!(100000));
/// ```
pub fn build_snapshot(
    assets: &[Asset],
    base: &CurrencyCode,
    rates: &ExchangeRates,
) -> Result<ValuationSnapshot, FxError> {
    let valuations = value_assets(assets, base, rates)?;
    let snapshot = ValuationSnapshot::from_valuations(base.clone(), &valuations);
    debug!(
        "Snapshot of {} assets in {}: net worth {}, cost basis {}",
        assets.len(),
        base,
        snapshot.net_worth,
        snapshot.cost_basis
    );
    Ok(snapshot)
}
