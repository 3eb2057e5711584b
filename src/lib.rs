//! Emotion-keyed healing tones and a halftone wave meditation renderer.
//!
//! The crate is split the same way the experience is: [`tone`] turns an
//! emotion category into a click-free binaural beat or healing chord,
//! [`wave`] paints the pulsing dot grid, and [`session`] owns the countdown,
//! text phases and teardown that tie the two together.

pub mod clock;
pub mod color;
pub mod config;
pub mod dsp;
pub mod emotion;
pub mod error;
pub mod graph; // Block-rendering node traits
pub mod session;
pub mod tone;
pub mod wave;

pub use config::EngineConfig;
pub use error::{ConfigError, ToneError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
