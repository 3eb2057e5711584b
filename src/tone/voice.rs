use super::message::{SessionId, Voicing, MAX_SOURCES};
use crate::{
    dsp::{
        amplify::{apply_gain, multiply_in_place},
        mix::sum_in_place,
        GainRamp,
    },
    graph::{GraphNode, OscNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Sounding, gain holding or moving towards the target volume
    Releasing, // Fading to silence, waiting for its hard stop
}

/// The audio-side half of a ToneSession: up to four sine sources summed
/// into one shared gain ramp.
pub struct ToneVoice {
    id: SessionId,
    state: VoiceState,
    age: u64,
    voicing: Voicing,
    sources: [OscNode; MAX_SOURCES],
    gain: GainRamp,
    ctx: RenderCtx,

    // Scratch, sized once
    source_buf: Vec<f32>,
    gain_buf: Vec<f32>,
}

impl ToneVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            id: 0,
            state: VoiceState::Free,
            age: 0,
            voicing: Voicing::from_slice(&[]),
            sources: [OscNode::default(); MAX_SOURCES],
            gain: GainRamp::silent(),
            ctx: RenderCtx::new(sample_rate),
            source_buf: vec![0.0; MAX_BLOCK_SIZE],
            gain_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Start every source at once and fade in from silence.
    pub fn start(&mut self, id: SessionId, voicing: Voicing, target: f32, attack: f32, age: u64) {
        self.id = id;
        self.state = VoiceState::Active;
        self.age = age;
        self.voicing = voicing;

        for (source, &freq) in self.sources.iter_mut().zip(voicing.frequencies()) {
            *source = OscNode::sine(freq);
        }

        self.gain = GainRamp::silent();
        self.gain.ramp_to(target, attack, &self.ctx);
    }

    /// Retarget the gain without touching the oscillators.
    pub fn ramp_to(&mut self, target: f32, seconds: f32) {
        if self.state == VoiceState::Active {
            self.gain.ramp_to(target, seconds, &self.ctx);
        }
    }

    pub fn release(&mut self, fade: f32) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.gain.ramp_to(0.0, fade, &self.ctx);
        }
    }

    /// Hard stop. Safe to call on a voice that is already free.
    pub fn stop(&mut self) {
        self.state = VoiceState::Free;
        self.id = 0;
        self.voicing = Voicing::from_slice(&[]);
        self.gain.set(0.0);
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_releasing(&self) -> bool {
        self.state == VoiceState::Releasing
    }

    /// Frequencies of the sources currently sounding.
    pub fn frequencies(&self) -> &[f32] {
        self.voicing.frequencies()
    }

    pub fn gain(&self) -> f32 {
        self.gain.level()
    }

    pub fn gain_target(&self) -> f32 {
        self.gain.target()
    }
}

impl GraphNode for ToneVoice {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        out.fill(0.0);
        if self.is_free() {
            return;
        }

        let len = out.len().min(MAX_BLOCK_SIZE);
        let out = &mut out[..len];
        let source_buf = &mut self.source_buf[..len];

        for source in &mut self.sources[..self.voicing.len()] {
            source.render_block(source_buf, &self.ctx);
            sum_in_place(out, source_buf);
        }

        if self.gain.is_ramping() {
            let gain_buf = &mut self.gain_buf[..len];
            self.gain.render(gain_buf);
            multiply_in_place(out, gain_buf);
        } else {
            apply_gain(out, self.gain.level());
        }

        // Fade finished before the scheduled stop arrived
        if self.state == VoiceState::Releasing && !self.gain.is_ramping() {
            self.stop();
        }
    }

    fn is_active(&self) -> bool {
        !self.is_free()
    }
}
