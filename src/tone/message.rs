//! Control messages sent from the engine to the audio thread.

/// Identifies one ToneSession across both sides of the ring buffer.
pub type SessionId = u64;

/// Upper bound on simultaneous sources in one voice.
pub const MAX_SOURCES: usize = 4;

/// The set of sine frequencies a session sounds.
///
/// Stored inline so messages stay `Copy` and the audio thread never touches
/// the allocator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voicing {
    freqs: [f32; MAX_SOURCES],
    len: usize,
}

impl Voicing {
    /// Builds a voicing from up to [`MAX_SOURCES`] frequencies; extra entries
    /// are ignored.
    pub fn from_slice(frequencies: &[f32]) -> Self {
        let mut freqs = [0.0; MAX_SOURCES];
        let len = frequencies.len().min(MAX_SOURCES);
        freqs[..len].copy_from_slice(&frequencies[..len]);
        Self { freqs, len }
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.freqs[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneMessage {
    /// Claim a voice, start every source at once and fade in to `target`.
    Start {
        id: SessionId,
        voicing: Voicing,
        target: f32,
        attack: f32,
    },
    /// Move a live voice's gain to `target` over `seconds`.
    Ramp {
        id: SessionId,
        target: f32,
        seconds: f32,
    },
    /// Fade a voice to silence and schedule its hard stop.
    Release { id: SessionId, fade: f32 },
    /// Silence everything immediately and drop all pending tasks.
    StopAll,
}
