//! Meditation sessions: the countdown and text phases of one run, the
//! optional box-breathing pacer, and the [`Meditation`] that ties a session
//! to its tone and its wave.

pub mod breathing;
pub mod meditation;
pub mod wave_session;

pub use breathing::{BoxBreathing, BreathSide};
pub use meditation::{Meditation, RealizationLog, RealizationSink};
pub use wave_session::{
    format_countdown, PhaseText, SessionReport, SessionState, TerminationCause, WaveSession,
    AFFIRMATION,
};
