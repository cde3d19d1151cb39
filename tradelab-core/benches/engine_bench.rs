//! Engine throughput benchmarks over a deterministic synthetic series.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tradelab_core::domain::Bar;
use tradelab_core::engine::{BacktestConfig, Backtester};
use tradelab_core::signals::{StrategyId, StrategyParams};
use tradelab_core::sizing::SizingMode;

fn synthetic_bars(n: usize) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            // Trend plus two interfering cycles: enough reversals to keep
            // every strategy trading.
            let close = 100.0 + t * 0.01 + 8.0 * (t * 0.05).sin() + 3.0 * (t * 0.23).sin();
            Bar::new(
                start + Duration::days(i as i64),
                close,
                close + 1.0,
                close - 1.0,
                close,
                100_000,
            )
        })
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let bars = synthetic_bars(10_000);
    let params = StrategyParams::new();

    let mut group = c.benchmark_group("backtest_10k_bars");
    for id in StrategyId::ALL {
        group.bench_function(id.as_str(), |b| {
            let bt = Backtester::new(BacktestConfig::default());
            b.iter(|| bt.run(black_box(&bars), id, &params).unwrap())
        });
    }
    group.finish();
}

fn bench_risk_managed(c: &mut Criterion) {
    let bars = synthetic_bars(10_000);
    let params = StrategyParams::new();

    c.bench_function("backtest_10k_bars_risk_managed", |b| {
        let bt = Backtester::new(BacktestConfig::default().with_sizing(SizingMode::RiskManaged));
        b.iter(|| bt.run(black_box(&bars), StrategyId::SmaCross, &params).unwrap())
    });
}

criterion_group!(benches, bench_strategies, bench_risk_managed);
criterion_main!(benches);
