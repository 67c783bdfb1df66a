#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::load_reference_ohlcvs;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use quantedge_frame::{
    Bollinger, Engine, EngineConfig, Indicator, Reduction, Rsi, Series, Sma, Smoothing, rolling,
};
use std::{hint::black_box, num::NonZero, time::Duration};

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).expect("non zero value")
}

fn pipeline_benchmarks(c: &mut Criterion) {
    let bars = load_reference_ohlcvs();
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! pipeline_bench {
        ($name:expr, $config:expr) => {
            let engine = Engine::new($config);
            group.bench_function($name, |b| {
                b.iter(|| black_box(engine.process(&bars).expect("ordered bars")));
            });
        };
    }

    pipeline_bench!("default", EngineConfig::default());
    pipeline_bench!(
        "wilder",
        EngineConfig::builder()
            .rsi_smoothing(Smoothing::Wilder)
            .atr_smoothing(Smoothing::Wilder)
            .build()
    );

    group.bench_function("from_bars", |b| {
        b.iter(|| black_box(Series::from_bars(&bars).expect("ordered bars")));
    });

    group.finish();
}

fn indicator_benchmarks(c: &mut Criterion) {
    let bars = load_reference_ohlcvs();
    let base = {
        let mut series = Series::from_bars(&bars).expect("ordered bars");
        Sma::close(nz(20)).apply(&mut series).expect("close column");
        Sma::close(nz(200)).apply(&mut series).expect("close column");
        series
    };

    let mut group = c.benchmark_group("indicator");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! indicator_bench {
        ($name:expr, $indicator:expr) => {
            let indicator = $indicator;
            group.bench_function($name, |b| {
                b.iter(|| black_box(indicator.compute(&base).expect("inputs present")));
            });
        };
    }

    indicator_bench!("sma200", Sma::close(nz(200)));
    indicator_bench!("bb20", Bollinger::close(nz(20)));
    indicator_bench!("bb200", Bollinger::close(nz(200)));
    indicator_bench!("rsi14", Rsi::close(nz(14)));
    indicator_bench!("rsi14_wilder", Rsi::with_smoothing(nz(14), Smoothing::Wilder));

    group.finish();
}

fn rolling_benchmarks(c: &mut Criterion) {
    let bars = load_reference_ohlcvs();
    let close: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();

    let mut group = c.benchmark_group("rolling");
    group.throughput(Throughput::Elements(close.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    for (name, size, reduction) in [
        ("mean20", nz(20), Reduction::Mean),
        ("mean200", nz(200), Reduction::Mean),
        ("std20", nz(20), Reduction::StdDev),
        ("std200", nz(200), Reduction::StdDev),
        ("max20", nz(20), Reduction::Max),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(rolling(black_box(&close), size, reduction)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    pipeline_benchmarks,
    indicator_benchmarks,
    rolling_benchmarks
);
criterion_main!(benches);
