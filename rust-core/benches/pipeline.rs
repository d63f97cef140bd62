use criterion::{black_box, criterion_group, criterion_main, Criterion};

use psdlab::spectrum::{pcovar, welch, SEGMENT_LENGTHS};
use psdlab::{
    AnalysisPipeline, Channel, ChannelSet, CovarianceConfig, MethodSet, WelchConfig, WindowType,
};

fn channel(label: &str, freq: f64, n: usize) -> Channel {
    let fs = 1000.0;
    let t: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
    let y = t
        .iter()
        .enumerate()
        .map(|(i, &ti)| {
            let jitter = (i * 7919 % 1009) as f64 / 1009.0 - 0.5;
            (2.0 * std::f64::consts::PI * freq * ti).sin() + 0.1 * jitter
        })
        .collect();
    Channel::new(label, t, y).expect("valid channel")
}

fn bench_estimators(c: &mut Criterion) {
    let ch = channel("bench", 50.0, 16_384);
    let nperseg = SEGMENT_LENGTHS[SEGMENT_LENGTHS.len() - 1];

    c.bench_function("welch_hamming_4096", |b| {
        let config = WelchConfig::new(WindowType::Hamming, nperseg);
        b.iter(|| welch(black_box(ch.y()), 1000.0, &config))
    });

    c.bench_function("pcovar_order48_4096", |b| {
        let config = CovarianceConfig::new(48, nperseg);
        b.iter(|| pcovar(black_box(ch.y()), 1000.0, &config))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let channels = ChannelSet::new(vec![
        channel("a", 50.0, 16_384),
        channel("b", 120.0, 16_384),
    ]);
    let nperseg = SEGMENT_LENGTHS[SEGMENT_LENGTHS.len() - 1];
    let methods = MethodSet::new()
        .with_welch(WelchConfig::new(WindowType::Taylor, nperseg))
        .with_covariance(CovarianceConfig::new(48, nperseg));
    let pipeline = AnalysisPipeline::new(methods).expect("valid methods");

    c.bench_function("pipeline_two_channels_two_methods", |b| {
        b.iter(|| pipeline.run(black_box(&channels), None))
    });
}

criterion_group!(benches, bench_estimators, bench_pipeline);
criterion_main!(benches);
