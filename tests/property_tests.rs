use chrono::{Duration, NaiveDate};
use portfolio_engine::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn rates() -> ExchangeRates {
    let mut rates = ExchangeRates::new(CurrencyCode::new("USD"));
    rates
        .set_rate(CurrencyCode::new("EUR"), CurrencyCode::new("USD"), Decimal::new(110, 2))
        .unwrap();
    rates
        .set_rate(CurrencyCode::new("USD"), CurrencyCode::new("JPY"), Decimal::from(150))
        .unwrap();
    rates
}

fn arb_class() -> impl Strategy<Value = AssetClass> {
    prop::sample::select(AssetClass::ALL.to_vec())
}

fn arb_currency() -> impl Strategy<Value = CurrencyCode> {
    prop::sample::select(vec![
        CurrencyCode::new("USD"),
        CurrencyCode::new("EUR"),
        CurrencyCode::new("JPY"),
    ])
}

/// Amount in cents, 0.01 to 100,000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_asset() -> impl Strategy<Value = Asset> {
    (0u32..20, arb_class(), arb_amount(), arb_amount(), arb_amount(), arb_currency()).prop_map(
        |(n, class, quantity, avg_cost, price, currency)| {
            Asset::new(format!("A{n}"), format!("SYM{n}"), class, quantity, avg_cost, price, currency)
        },
    )
}

fn arb_assets() -> impl Strategy<Value = Vec<Asset>> {
    prop::collection::vec(arb_asset(), 1..25)
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (0u32..20, any::<bool>(), 0i64..400, arb_amount(), arb_amount()).prop_map(
        |(n, buy, days_ago, quantity, price)| {
            let kind = if buy { TransactionKind::Buy } else { TransactionKind::Sell };
            Transaction::new(
                format!("A{n}"),
                kind,
                today() - Duration::days(days_ago),
                quantity,
                price,
                Decimal::ZERO,
            )
        },
    )
}

fn arb_range() -> impl Strategy<Value = TimeRange> {
    prop::sample::select(TimeRange::VARIANTS.to_vec())
}

/// Conversions through 1/150 round at the 28th digit; sums in a different
/// order may differ there.
fn tolerance() -> Decimal {
    Decimal::new(1, 6)
}

fn usd() -> CurrencyCode {
    CurrencyCode::new("USD")
}

proptest! {
    // The today point equals the snapshot exactly, whatever trades and drift.
    #[test]
    fn today_matches_snapshot(
        assets in arb_assets(),
        log in prop::collection::vec(arb_transaction(), 0..40),
        range in arb_range(),
        seed in any::<u64>(),
    ) {
        let snapshot = build_snapshot(&assets, &usd(), &rates()).unwrap();
        let points = HistoryReconstructor::new()
            .with_today(today())
            .reconstruct(&assets, &log, range, &usd(), &rates(), &mut RandomDrift::seeded(seed))
            .unwrap();
        let anchor = points.last().unwrap();
        prop_assert_eq!(anchor.date, today());
        prop_assert_eq!(anchor.value, snapshot.net_worth);
        prop_assert_eq!(anchor.cost, snapshot.cost_basis);
    }

    // One point per day from the range start to today, oldest first.
    #[test]
    fn series_is_contiguous(
        assets in arb_assets(),
        log in prop::collection::vec(arb_transaction(), 0..40),
        range in arb_range(),
    ) {
        let start = range.start_date(today(), &log, 7);
        let points = HistoryReconstructor::new()
            .with_today(today())
            .reconstruct(&assets, &log, range, &usd(), &rates(), &mut NoDrift)
            .unwrap();

        let days_in_range = (today() - start).num_days() as usize;
        prop_assert_eq!(points.len(), days_in_range + 1);
        prop_assert_eq!(points[0].date, start);
        for pair in points.windows(2) {
            prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    // Cost basis never goes negative once replay starts, and percentages are finite.
    #[test]
    fn replayed_cost_floored_and_finite(
        assets in arb_assets(),
        log in prop::collection::vec(arb_transaction(), 0..40),
        seed in any::<u64>(),
    ) {
        let points = HistoryReconstructor::new()
            .with_today(today())
            .reconstruct(&assets, &log, TimeRange::All, &usd(), &rates(), &mut RandomDrift::seeded(seed))
            .unwrap();
        let snapshot = build_snapshot(&assets, &usd(), &rates()).unwrap();

        let mut replayed = false;
        for p in points.iter().rev() {
            prop_assert!(p.pnl_percent.is_finite());
            if replayed {
                prop_assert!(p.cost >= Decimal::ZERO);
            }
            if log.iter().any(|t| t.date() == p.date) {
                replayed = true;
            }
        }
        if snapshot.cost_basis.is_zero() {
            prop_assert_eq!(points.last().unwrap().pnl_percent, 0.0);
        }
    }

    // High + Medium + Low == total asset value.
    #[test]
    fn risk_buckets_partition_assets(assets in arb_assets()) {
        let view = PortfolioView::build(&assets, &usd(), &rates()).unwrap();
        let bucket_sum: Decimal = view.risk_buckets().iter().map(|b| b.value).sum();
        let sheet = view.balance_sheet();
        prop_assert!((bucket_sum - sheet.total_assets).abs() < tolerance());
        prop_assert!(view.risk_buckets().iter().all(|b| !b.value.is_zero()));
    }

    // Debt ratio is 0 without debt, positive with debt and assets, never NaN.
    #[test]
    fn debt_ratio_well_defined(assets in arb_assets()) {
        let sheet = PortfolioView::build(&assets, &usd(), &rates()).unwrap().balance_sheet();
        prop_assert!(sheet.debt_ratio.is_finite());
        if sheet.total_liabilities.is_zero() || sheet.total_assets.is_zero() {
            prop_assert_eq!(sheet.debt_ratio, 0.0);
        } else {
            prop_assert!(sheet.debt_ratio > 0.0);
        }
    }

    // Rankings skip liabilities and respect their size limits.
    #[test]
    fn rankings_bounded_and_debt_free(assets in arb_assets()) {
        let view = PortfolioView::build(&assets, &usd(), &rates()).unwrap();
        let top = view.top_holdings();
        let pnl = view.pnl_ranking();
        prop_assert!(top.len() <= 6);
        prop_assert!(pnl.len() <= 8);
        prop_assert!(top.iter().all(|h| h.class != AssetClass::Liability));
        prop_assert!(pnl.iter().all(|e| e.class != AssetClass::Liability));
        prop_assert!(top.windows(2).all(|w| w[0].value >= w[1].value));
        prop_assert!(pnl.windows(2).all(|w| w[0].pnl >= w[1].pnl));
    }

    // Aggregating twice gives the same answer and leaves the input alone.
    #[test]
    fn aggregation_is_idempotent(assets in arb_assets()) {
        let before = assets.clone();
        let first = PortfolioView::build(&assets, &usd(), &rates()).unwrap().report();
        let second = PortfolioView::build(&assets, &usd(), &rates()).unwrap().report();
        prop_assert_eq!(first, second);
        prop_assert_eq!(assets, before);
    }

    // Allocation excludes liabilities and sums to total asset value.
    #[test]
    fn allocation_sums_to_assets(assets in arb_assets()) {
        let view = PortfolioView::build(&assets, &usd(), &rates()).unwrap();
        let allocation = view.allocation_by_class();
        prop_assert!(allocation.iter().all(|a| a.class != AssetClass::Liability));
        let total: Decimal = allocation.iter().map(|a| a.value).sum();
        prop_assert!((total - view.balance_sheet().total_assets).abs() < tolerance());
        prop_assert!(allocation.windows(2).all(|w| w[0].value >= w[1].value));
    }
}
