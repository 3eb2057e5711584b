//! Benchmarks for the tone graph as the audio callback drives it.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonate::emotion::ToneCategory;
use resonate::tone::{synthesis::voicing_for, ToneGraph, ToneMessage};
use rtrb::RingBuffer;

use crate::BLOCK_SIZES;

fn graph_playing(categories: &[ToneCategory], release_all_but_last: bool) -> ToneGraph {
    let (mut tx, rx) = RingBuffer::new(16);
    let mut graph = ToneGraph::new(48_000.0, rx);

    for (i, &category) in categories.iter().enumerate() {
        let id = i as u64 + 1;
        let _ = tx.push(ToneMessage::Start {
            id,
            voicing: voicing_for(category),
            target: 0.08,
            attack: 0.2,
        });
        if release_all_but_last && i + 1 < categories.len() {
            // Long fade so the voice stays audible for the whole run
            let _ = tx.push(ToneMessage::Release { id, fade: 3_600.0 });
        }
    }
    let mut warmup = vec![0.0f32; 64];
    graph.render(&mut warmup);
    graph
}

pub fn bench_tone_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/tone_graph");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === BINAURAL BEAT ===
        // two sources, one gain ramp
        let mut graph = graph_playing(&[ToneCategory::Anger], false);
        group.bench_with_input(BenchmarkId::new("binaural", size), &size, |b, _| {
            b.iter(|| {
                graph.render(black_box(&mut buffer));
            })
        });

        // === HEALING CHORD ===
        let mut graph = graph_playing(&[ToneCategory::Happy], false);
        group.bench_with_input(BenchmarkId::new("chord", size), &size, |b, _| {
            b.iter(|| {
                graph.render(black_box(&mut buffer));
            })
        });

        // === RAPID HOVERING ===
        // a full pool: three chords fading out under a fresh one
        let mut graph = graph_playing(
            &[
                ToneCategory::Surprise,
                ToneCategory::Happy,
                ToneCategory::Default,
                ToneCategory::Surprise,
            ],
            true,
        );
        group.bench_with_input(BenchmarkId::new("crossfade_pool", size), &size, |b, _| {
            b.iter(|| {
                graph.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
