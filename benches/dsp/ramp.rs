//! Benchmarks for gain ramps.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonate::dsp::GainRamp;
use resonate::graph::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Fading (per-sample interpolation). Long enough to never finish.
        let mut ramp = GainRamp::silent();
        ramp.ramp_to(0.08, 3_600.0, &ctx);
        group.bench_with_input(BenchmarkId::new("fading", size), &size, |b, _| {
            b.iter(|| {
                ramp.render(black_box(&mut buffer));
            })
        });

        // Holding at the target volume
        let mut ramp = GainRamp::new(0.08);
        group.bench_with_input(BenchmarkId::new("holding", size), &size, |b, _| {
            b.iter(|| {
                ramp.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
