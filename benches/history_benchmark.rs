use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portfolio_engine::aggregation::PortfolioView;
use portfolio_engine::core::currency::CurrencyCode;
use portfolio_engine::history::drift::RandomDrift;
use portfolio_engine::history::range::TimeRange;
use portfolio_engine::history::reconstruct::HistoryReconstructor;
use portfolio_engine::simulation::generator::{generate_random_portfolio, PortfolioConfig};

fn config(asset_count: usize, transaction_count: usize) -> PortfolioConfig {
    PortfolioConfig {
        asset_count,
        transaction_count,
        currencies: vec![
            CurrencyCode::new("USD"),
            CurrencyCode::new("EUR"),
            CurrencyCode::new("JPY"),
        ],
        history_days: 3 * 365,
        ..Default::default()
    }
}

fn bench_history_1y(c: &mut Criterion) {
    let cfg = config(20, 200);
    let portfolio = generate_random_portfolio(&cfg);
    let engine = HistoryReconstructor::new().with_today(cfg.today);

    c.bench_function("history_1y_20_assets", |b| {
        b.iter(|| {
            engine.reconstruct_portfolio(
                black_box(&portfolio),
                TimeRange::OneYear,
                &mut RandomDrift::seeded(1),
            )
        })
    });
}

fn bench_history_all(c: &mut Criterion) {
    let cfg = config(200, 5_000);
    let portfolio = generate_random_portfolio(&cfg);
    let engine = HistoryReconstructor::new().with_today(cfg.today);

    c.bench_function("history_all_200_assets", |b| {
        b.iter(|| {
            engine.reconstruct_portfolio(
                black_box(&portfolio),
                TimeRange::All,
                &mut RandomDrift::seeded(1),
            )
        })
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let portfolio = generate_random_portfolio(&config(1_000, 0));

    c.bench_function("aggregate_1000_assets", |b| {
        b.iter(|| {
            PortfolioView::from_portfolio(black_box(&portfolio)).map(|view| view.report())
        })
    });
}

criterion_group!(benches, bench_history_1y, bench_history_all, bench_aggregation);
criterion_main!(benches);
