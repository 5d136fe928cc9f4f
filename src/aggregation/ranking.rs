use crate::core::asset::{AssetClass, AssetId};
use crate::valuation::snapshot::AssetValuation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding's current value next to what was paid for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValue {
    pub asset_id: AssetId,
    pub symbol: String,
    pub name: String,
    pub class: AssetClass,
    pub value: Decimal,
    pub cost: Decimal,
}

/// A holding's unrealized profit or loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlEntry {
    pub asset_id: AssetId,
    pub symbol: String,
    pub name: String,
    pub class: AssetClass,
    pub pnl: Decimal,
    pub pnl_percent: f64,
}

impl From<&AssetValuation> for HoldingValue {
    fn from(v: &AssetValuation) -> Self {
        Self {
            asset_id: v.asset_id.clone(),
            symbol: v.symbol.clone(),
            name: v.name.clone(),
            class: v.class,
            value: v.value,
            cost: v.cost,
        }
    }
}

impl From<&AssetValuation> for PnlEntry {
    fn from(v: &AssetValuation) -> Self {
        Self {
            asset_id: v.asset_id.clone(),
            symbol: v.symbol.clone(),
            name: v.name.clone(),
            class: v.class,
            pnl: v.pnl(),
            pnl_percent: v.pnl_percent(),
        }
    }
}

/// Non-liability holdings by current value, largest first, at most `k`.
pub fn top_holdings(valuations: &[AssetValuation], k: usize) -> Vec<HoldingValue> {
    let mut holdings: Vec<HoldingValue> = valuations
        .iter()
        .filter(|v| !v.class.is_liability())
        .map(HoldingValue::from)
        .collect();
    holdings.sort_by(|a, b| b.value.cmp(&a.value));
    holdings.truncate(k);
    holdings
}

/// Every non-liability holding by P&L, best first.
///
/// Both the best and the worst performer views read from this one ordering.
pub fn pnl_ranked(valuations: &[AssetValuation]) -> Vec<PnlEntry> {
    let mut entries: Vec<PnlEntry> = valuations
        .iter()
        .filter(|v| !v.class.is_liability())
        .map(PnlEntry::from)
        .collect();
    entries.sort_by(|a, b| b.pnl.cmp(&a.pnl));
    entries
}

/// The `k` best performers, best first.
pub fn pnl_ranking(valuations: &[AssetValuation], k: usize) -> Vec<PnlEntry> {
    let mut ranked = pnl_ranked(valuations);
    ranked.truncate(k);
    ranked
}

/// The `k` worst performers, worst first, taken from the tail of the ranking.
pub fn worst_performers(valuations: &[AssetValuation], k: usize) -> Vec<PnlEntry> {
    let ranked = pnl_ranked(valuations);
    let keep = ranked.len().saturating_sub(k);
    ranked.into_iter().skip(keep).rev().collect()
}
