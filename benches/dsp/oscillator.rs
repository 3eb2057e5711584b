//! Benchmarks for sine sources.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonate::dsp::{mix::sum_in_place, oscillator::OscillatorBlock};
use resonate::graph::{GraphNode, OscNode, RenderCtx};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = RenderCtx::from_freq(48_000.0, 432.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Raw phase accumulator, one sin() per sample
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Four pinned sources summed, the healing chord's source stage
        let mut sources = [1.0, 1.25, 1.5, 2.0].map(|ratio| OscNode::sine(528.0 * ratio));
        let mut scratch = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("chord_sources", size), &size, |b, _| {
            b.iter(|| {
                buffer.fill(0.0);
                for source in &mut sources {
                    source.render_block(&mut scratch, &ctx);
                    sum_in_place(&mut buffer, &scratch);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
