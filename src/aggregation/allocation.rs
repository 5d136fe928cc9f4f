use crate::core::asset::AssetClass;
use crate::valuation::snapshot::{percent, AssetValuation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total base-currency value held in one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAllocation {
    pub class: AssetClass,
    pub value: Decimal,
    /// Share of the group total (assets or liabilities), 0 when it is 0.
    pub percent: f64,
}

fn group_by_class<'a>(
    valuations: impl Iterator<Item = &'a AssetValuation>,
) -> Vec<ClassAllocation> {
    let mut sums: BTreeMap<AssetClass, Decimal> = BTreeMap::new();
    for v in valuations {
        *sums.entry(v.class).or_insert(Decimal::ZERO) += v.value;
    }
    let total: Decimal = sums.values().copied().sum();

    let mut groups: Vec<ClassAllocation> = sums
        .into_iter()
        .map(|(class, value)| ClassAllocation {
            class,
            value,
            percent: percent(value, total),
        })
        .collect();
    groups.sort_by(|a, b| b.value.cmp(&a.value));
    groups
}

/// Value per class, liabilities excluded, largest first.
pub fn allocation_by_class(valuations: &[AssetValuation]) -> Vec<ClassAllocation> {
    group_by_class(valuations.iter().filter(|v| !v.class.is_liability()))
}

/// Liability value grouped the same way, largest first.
pub fn liability_breakdown(valuations: &[AssetValuation]) -> Vec<ClassAllocation> {
    group_by_class(valuations.iter().filter(|v| v.class.is_liability()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::AssetId;
    use rust_decimal_macros::dec;

    fn valued(class: AssetClass, value: Decimal) -> AssetValuation {
        AssetValuation {
            asset_id: AssetId::new(format!("{class}-{value}")),
            symbol: class.to_string(),
            name: class.to_string(),
            class,
            value,
            cost: value,
        }
    }

    #[test]
    fn test_allocation_sorted_and_grouped() {
        let vals = vec![
            valued(AssetClass::Cash, dec!(100)),
            valued(AssetClass::Stock, dec!(300)),
            valued(AssetClass::Cash, dec!(250)),
            valued(AssetClass::Liability, dec!(900)),
        ];
        let alloc = allocation_by_class(&vals);
        assert_eq!(alloc.len(), 2);
        assert_eq!(alloc[0].class, AssetClass::Cash);
        assert_eq!(alloc[0].value, dec!(350));
        assert_eq!(alloc[1].class, AssetClass::Stock);
        assert!((alloc[0].percent + alloc[1].percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_liability_breakdown_only_liabilities() {
        let vals = vec![
            valued(AssetClass::Stock, dec!(300)),
            valued(AssetClass::Liability, dec!(900)),
            valued(AssetClass::Liability, dec!(100)),
        ];
        let debts = liability_breakdown(&vals);
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].value, dec!(1000));
        assert_eq!(debts[0].percent, 100.0);
    }

    #[test]
    fn test_empty_allocation() {
        assert!(allocation_by_class(&[]).is_empty());
    }
}
