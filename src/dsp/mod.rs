//! Low-level DSP primitives used by the tone voices.
//!
//! These components are allocation-free and realtime-safe, so they can be
//! embedded directly inside voice structs that live on the audio thread.
//! They stay focused on the signal-processing math; voice bookkeeping and
//! message handling live in [`crate::tone`].

/// Sample-by-sample multiplication and constant gain.
pub mod amplify;
/// Linear gain ramps used for click-free fades.
pub mod ramp;
/// Summing of parallel sources onto one bus.
pub mod mix;
/// Phase-accumulating sine oscillator.
pub mod oscillator;

pub use ramp::{GainRamp, RampState};
