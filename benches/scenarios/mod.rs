//! End-to-end scenarios: what the audio callback and the UI loop actually do.

mod tone;
mod wave;

pub use tone::bench_tone_graph;
pub use wave::bench_wave;
