//! Benchmarks for halftone frames at terminal-ish and screen-ish sizes.

use criterion::{BenchmarkId, Criterion};
use resonate::color::Rgb;
use resonate::config::WaveConfig;
use resonate::wave::{PixelCanvas, WavePattern, WaveRenderer};

pub fn bench_wave(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/wave");

    // (logical width, logical height, pixel ratio)
    let viewports = [
        ("terminal_120x40", 480.0, 320.0, 0.25),
        ("hd_quarter", 1920.0, 1080.0, 0.25),
        ("hd_full", 1920.0, 1080.0, 1.0),
    ];

    for (name, width, height, ratio) in viewports {
        for pattern in [WavePattern::Sine, WavePattern::Fractal] {
            let config = WaveConfig {
                pattern,
                ..WaveConfig::default()
            };
            let canvas = PixelCanvas::new(width, height, ratio);
            let mut renderer = WaveRenderer::new(Some(canvas), Rgb::new(78, 205, 196), config);

            let id = BenchmarkId::new(format!("{pattern:?}").to_lowercase(), name);
            group.bench_function(id, |b| {
                b.iter(|| renderer.frame());
            });
        }
    }

    group.finish();
}
