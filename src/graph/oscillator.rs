use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Pitched Sine Source
===================

Every healing tone is built from plain sine waves: the purest tone, a single
frequency with no harmonics. Timbre comes from how several sines are
stacked, not from the waveform itself.

  binaural beat   two sines a few Hz apart (e.g. 396 Hz and 406 Hz)
  healing chord   four sines at 1, 1.25, 1.5 and 2 times the root

A source is pinned to its own frequency. The frequency in the RenderCtx is
ignored, so one context can drive every source of a voice.

Example usage:
  let root = OscNode::sine(528.0);
  let fifth = OscNode::sine(528.0 * 1.5);
*/

#[derive(Debug, Clone, Copy)]
pub struct OscNode {
    osc: OscillatorBlock,
    frequency: f32,
}

impl OscNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl Default for OscNode {
    fn default() -> Self {
        Self::sine(440.0)
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let pinned = RenderCtx {
            frequency: self.frequency,
            ..*ctx
        };
        self.osc.render(out, &pinned);
    }
}
