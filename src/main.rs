//! portfolio-engine CLI
//!
//! Reconstruct and summarize a portfolio from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Daily history for the last month
//! portfolio-engine history --input portfolio.json --range 1M
//!
//! # Reproducible history as JSON
//! portfolio-engine history --input portfolio.json --range ALL --seed 7 --format json
//!
//! # Allocation, risk, balance sheet and rankings
//! portfolio-engine summary --input portfolio.json
//!
//! # Generate a random portfolio for testing
//! portfolio-engine generate --assets 12 --transactions 80 --currencies USD,EUR
//! ```
//!
//! Set `RUST_LOG=debug` for per-computation logging.

use chrono::NaiveDate;
use portfolio_engine::aggregation::PortfolioView;
use portfolio_engine::core::currency::CurrencyCode;
use portfolio_engine::core::portfolio::Portfolio;
use portfolio_engine::history::drift::{Drift, RandomDrift};
use portfolio_engine::history::range::TimeRange;
use portfolio_engine::history::reconstruct::HistoryReconstructor;
use portfolio_engine::history::summary::HistorySummary;
use portfolio_engine::simulation::generator::{generate_random_portfolio, PortfolioConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"portfolio-engine — portfolio history reconstruction and exposure analysis

USAGE:
    portfolio-engine <COMMAND> [OPTIONS]

COMMANDS:
    history     Reconstruct the daily net worth / cost basis series
    summary     Allocation, liabilities, risk tiers, balance sheet and rankings
    generate    Generate a random portfolio (for testing)
    help        Show this message

OPTIONS (history, summary):
    --input <FILE>        Path to JSON portfolio file
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (history):
    --range <RANGE>       1W, 1M (default), 3M, 6M, 1Y or ALL
    --seed <N>            Seed the drift for a reproducible curve
    --today <YYYY-MM-DD>  Anchor date (default: local today)

OPTIONS (generate):
    --assets <N>          Number of holdings (default: 10)
    --transactions <N>    Number of trades (default: 50)
    --currencies <LIST>   Comma-separated currency codes (default: USD)
    --base <CODE>         Base currency (default: first of --currencies)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    portfolio-engine history --input portfolio.json --range 3M
    portfolio-engine history --input portfolio.json --range ALL --seed 1 --format json
    portfolio-engine summary --input portfolio.json --format json
    portfolio-engine generate --assets 5 --currencies USD,EUR,JPY --output test.json"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn load_portfolio(path: &str) -> Portfolio {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "base_currency": "USD",
  "assets": [
    {{ "id": "aapl", "symbol": "AAPL", "class": "Stock", "quantity": "10",
       "avg_cost": "80", "current_price": "100", "currency": "USD" }}
  ],
  "transactions": [
    {{ "asset_id": "aapl", "kind": "Buy", "date": "2024-03-01",
       "quantity": "10", "price": "80", "fee": "0", "total": "800" }}
  ],
  "rates": [ {{ "from": "EUR", "to": "USD", "rate": "1.08" }} ]
}}"#
        );
        process::exit(1);
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(e))
}

/// Flags shared by every command: `--flag value` pairs.
fn parse_flags(args: &[String], allowed: &[&str]) -> Vec<(String, String)> {
    let mut flags = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if !allowed.contains(&flag) {
            fail(format!("unknown option: {}", flag));
        }
        i += 1;
        let value = args
            .get(i)
            .cloned()
            .unwrap_or_else(|| fail(format!("{} requires a value", flag)));
        flags.push((flag.to_string(), value));
        i += 1;
    }
    flags
}

fn flag<'a>(flags: &'a [(String, String)], name: &str) -> Option<&'a str> {
    flags
        .iter()
        .rev()
        .find(|(f, _)| f == name)
        .map(|(_, v)| v.as_str())
}

fn cmd_history(args: &[String]) {
    let flags = parse_flags(args, &["--input", "--format", "--range", "--seed", "--today"]);
    let path = flag(&flags, "--input").unwrap_or_else(|| fail("--input <FILE> is required"));
    let format = flag(&flags, "--format").unwrap_or("text");
    let range: TimeRange = flag(&flags, "--range")
        .unwrap_or("1M")
        .parse()
        .unwrap_or_else(|e| fail(e));

    let mut engine = HistoryReconstructor::new();
    if let Some(raw) = flag(&flags, "--today") {
        let today = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .unwrap_or_else(|e| fail(format!("invalid --today '{}': {}", raw, e)));
        engine = engine.with_today(today);
    }

    let mut drift: Box<dyn Drift> = match flag(&flags, "--seed") {
        Some(raw) => {
            let seed: u64 = raw
                .parse()
                .unwrap_or_else(|_| fail("--seed requires a number"));
            Box::new(RandomDrift::seeded(seed))
        }
        None => Box::new(RandomDrift::from_entropy()),
    };

    let portfolio = load_portfolio(path);
    let points = engine
        .reconstruct_portfolio(&portfolio, range, drift.as_mut())
        .unwrap_or_else(|e| fail(e));

    if format == "json" {
        println!("{}", to_json(&points));
        return;
    }

    println!(
        "{:<12} {:>16} {:>16} {:>16} {:>9}",
        "DATE", "VALUE", "COST", "P&L", "P&L %"
    );
    for p in &points {
        println!(
            "{:<12} {:>16} {:>16} {:>16} {:>8.2}%",
            p.date.to_string(),
            p.value.round_dp(2).to_string(),
            p.cost.round_dp(2).to_string(),
            p.pnl.round_dp(2).to_string(),
            p.pnl_percent
        );
    }
    match HistorySummary::from_points(&points) {
        Some(summary) => println!("\n{}", summary),
        None => println!("No holdings; nothing to reconstruct."),
    }
}

fn cmd_summary(args: &[String]) {
    let flags = parse_flags(args, &["--input", "--format"]);
    let path = flag(&flags, "--input").unwrap_or_else(|| fail("--input <FILE> is required"));
    let format = flag(&flags, "--format").unwrap_or("text");

    let portfolio = load_portfolio(path);
    let view = PortfolioView::from_portfolio(&portfolio).unwrap_or_else(|e| fail(e));
    let report = view.report();

    if format == "json" {
        println!("{}", to_json(&report));
        return;
    }

    println!("{}", report.balance_sheet);

    println!("Allocation:");
    for a in &report.allocation {
        println!("  {:<12} {:>16} {:>6.1}%", a.class.to_string(), a.value.round_dp(2).to_string(), a.percent);
    }
    if !report.liabilities.is_empty() {
        println!("\nLiabilities:");
        for l in &report.liabilities {
            println!("  {:<12} {:>16}", l.class.to_string(), l.value.round_dp(2).to_string());
        }
    }

    println!("\nRisk Exposure:");
    for r in &report.risk {
        println!("  {:<12} {:>16}", r.tier.to_string(), r.value.round_dp(2).to_string());
    }

    println!("\nTop Holdings:");
    for h in &report.top_holdings {
        println!(
            "  {:<24} value {:>14}  cost {:>14}",
            h.name,
            h.value.round_dp(2).to_string(),
            h.cost.round_dp(2).to_string()
        );
    }

    println!("\nBest Performers:");
    for e in &report.pnl_ranking {
        println!("  {:<24} {:>14} ({:.2}%)", e.name, e.pnl.round_dp(2).to_string(), e.pnl_percent);
    }

    println!("\nWorst Performers:");
    for e in &report.worst_performers {
        println!("  {:<24} {:>14} ({:.2}%)", e.name, e.pnl.round_dp(2).to_string(), e.pnl_percent);
    }
}

fn cmd_generate(args: &[String]) {
    let flags = parse_flags(
        args,
        &["--assets", "--transactions", "--currencies", "--base", "--output"],
    );

    let count = |name: &str, default: usize| -> usize {
        flag(&flags, name)
            .map(|raw| {
                raw.parse::<usize>()
                    .unwrap_or_else(|_| fail(format!("{} requires a number", name)))
            })
            .unwrap_or(default)
    };

    let currencies: Vec<CurrencyCode> = flag(&flags, "--currencies")
        .unwrap_or("USD")
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(CurrencyCode::new)
        .collect();
    let base = flag(&flags, "--base")
        .map(CurrencyCode::new)
        .or_else(|| currencies.first().cloned())
        .unwrap_or_default();

    let config = PortfolioConfig {
        asset_count: count("--assets", 10),
        transaction_count: count("--transactions", 50),
        base_currency: base,
        currencies,
        today: HistoryReconstructor::new().today(),
        ..Default::default()
    };

    let portfolio = generate_random_portfolio(&config);
    let json = to_json(&portfolio);

    if let Some(path) = flag(&flags, "--output") {
        fs::write(path, &json).unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} assets and {} transactions → {}",
            portfolio.assets.len(),
            portfolio.transactions.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "history" => cmd_history(rest),
        "summary" => cmd_summary(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
