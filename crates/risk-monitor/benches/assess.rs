//! Benchmarks for risk assessment

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use risk_monitor::{reference, MonitorConfig, ResolutionConfig, RiskMonitor, SensorReading};

fn assess_benchmark(c: &mut Criterion) {
    let monitor = RiskMonitor::from_config(&MonitorConfig::default()).unwrap();
    let mut group = c.benchmark_group("assess");

    for reading in MonitorConfig::default().samples {
        let id = format!(
            "{}/{}/{}",
            reading.temperature, reading.current, reading.voltage_variation
        );
        group.bench_with_input(BenchmarkId::new("reading", id), &reading, |b, r| {
            b.iter(|| black_box(monitor.assess(*r).ok()))
        });
    }

    group.finish();
}

fn resolution_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_step");
    let inputs = SensorReading::new(90.0, 370.0, 7.0).to_inputs();

    for step in [1.0, 0.1, 0.01] {
        let system = reference::build_system(&ResolutionConfig {
            risk_step: step,
            ..Default::default()
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(step), &inputs, |b, i| {
            b.iter(|| black_box(system.evaluate(i).ok()))
        });
    }

    group.finish();
}

criterion_group!(benches, assess_benchmark, resolution_benchmark);
criterion_main!(benches);
