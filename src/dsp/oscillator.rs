use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/// Phase-accumulating sine generator.
///
/// Phase is kept normalised to `0.0..1.0` so it never loses precision, no
/// matter how long a tone keeps sounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct OscillatorBlock {
    phase: f32,
}

impl OscillatorBlock {
    pub fn sine() -> Self {
        Self { phase: 0.0 }
    }

    /// Fill `out` with a sine at `ctx.frequency`.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;
        for sample in out.iter_mut() {
            *sample = (TAU * self.phase).sin();
            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= self.phase.floor();
            }
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_crossing() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0);
        let mut osc = OscillatorBlock::sine();
        let mut buffer = [1.0f32; 4];

        osc.render(&mut buffer, &ctx);

        assert_eq!(buffer[0], 0.0);
        assert!(buffer[1] > 0.0);
    }

    #[test]
    fn phase_stays_normalised() {
        let ctx = RenderCtx::from_freq(1_000.0, 333.0);
        let mut osc = OscillatorBlock::sine();
        let mut buffer = vec![0.0f32; 10_000];

        osc.render(&mut buffer, &ctx);

        assert!((0.0..1.0).contains(&osc.phase()));
        assert!(buffer.iter().all(|s| s.abs() <= 1.0));
    }
}
