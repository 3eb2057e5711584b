//! Error types for the library.
//!
//! None of these reach the front-end from the tone path: audio failures are
//! logged and swallowed by [`crate::tone::ToneEngine`]. They exist so the
//! backends can say precisely what went wrong.

#[derive(thiserror::Error, Debug)]
pub enum ToneError {
    #[error("audio output unavailable: {details}")]
    AudioUnavailable { details: String },

    #[error("failed to start audio stream: {details}")]
    Stream { details: String },

    #[error("tone message queue is full")]
    QueueFull,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("default countdown {default}s exceeds the {max}s maximum")]
    CountdownAboveMax { default: u32, max: u32 },
}
