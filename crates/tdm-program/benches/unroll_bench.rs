//! Benchmarks for unrolling and reshaping
//!
//! Run with: cargo bench -p tdm-program

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::collections::BTreeMap;

use tdm_ir::{BandSpec, ModeId};
use tdm_program::{ShiftPolicy, TdmProgram};

/// Single loop with `n` concurrent modes over `time_bins` bins.
fn single_loop(n: u32, time_bins: usize) -> TdmProgram {
    let angles: Vec<f64> = (0..time_bins).map(|i| i as f64 * 0.01).collect();
    let mut prog = TdmProgram::new(BandSpec::single(n).unwrap());
    let mut b = prog
        .begin(vec![angles.clone(); 3], 1, ShiftPolicy::Default)
        .unwrap();
    let (p, q) = (b.params(), b.register());
    let last = q[n as usize - 1];
    b.sgate(1.0, 0.0, last).unwrap();
    b.bsgate(p[0], 0.0, q[0], last).unwrap();
    b.rgate(p[1], last).unwrap();
    b.measure_homodyne(p[2], q[0]).unwrap();
    prog.end(b).unwrap();
    prog
}

/// Benchmark the first (uncached) unroll
fn bench_unroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("unroll");

    for time_bins in &[10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("single_loop", time_bins),
            time_bins,
            |b, &t| {
                let prog = single_loop(2, t);
                b.iter(|| {
                    let mut fresh = prog.clone();
                    fresh.unroll().unwrap();
                    black_box(fresh.circuit().map(|c| c.len()))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark reshaping homodyne samples
fn bench_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    for time_bins in &[100, 1000] {
        let prog = single_loop(2, *time_bins);
        let raw: BTreeMap<ModeId, Vec<f64>> = BTreeMap::from([
            (ModeId(0), vec![0.5; time_bins / 2]),
            (ModeId(1), vec![0.5; time_bins / 2]),
        ]);
        group.bench_with_input(BenchmarkId::new("homodyne", time_bins), &raw, |b, raw| {
            b.iter(|| black_box(prog.reshape_samples(raw.clone()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_unroll, bench_reshape);
criterion_main!(benches);
