use crate::core::asset::RiskTier;
use crate::valuation::snapshot::AssetValuation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Non-liability value carried by one risk tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskExposure {
    pub tier: RiskTier,
    pub value: Decimal,
}

/// Split non-liability value into High (Crypto), Medium (Stock) and Low
/// (everything else).
///
/// Tiers come back in High, Medium, Low order; a tier with zero value is
/// left out. The tiers always add up to total asset value.
pub fn risk_buckets(valuations: &[AssetValuation]) -> Vec<RiskExposure> {
    let tiers = [RiskTier::High, RiskTier::Medium, RiskTier::Low];
    tiers
        .into_iter()
        .map(|tier| RiskExposure {
            tier,
            value: valuations
                .iter()
                .filter(|v| v.class.risk_tier() == Some(tier))
                .map(|v| v.value)
                .sum(),
        })
        .filter(|bucket| !bucket.value.is_zero())
        .collect()
}
