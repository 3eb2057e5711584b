//! Engine configuration.
//!
//! Every tunable named by the experience lives here with its default. Time
//! values are stored as whole milliseconds (easy to write in a config file or
//! on the command line) and exposed as [`Duration`]s.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, wave::WavePattern};

pub const DEFAULT_VOLUME: f32 = 0.08;
pub const DEFAULT_FADE_IN_MS: u64 = 200;
pub const DEFAULT_FADE_OUT_MS: u64 = 100;
pub const DEFAULT_MUTE_RAMP_MS: u64 = 100;
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;
pub const DEFAULT_SCOPE_CAPACITY: usize = 16_384;

pub const DEFAULT_CELL_SIZE: f32 = 20.0;
pub const DEFAULT_TIME_STEP: f32 = 0.05;
pub const DEFAULT_SPATIAL_FREQUENCY: f32 = 10.0;
pub const DEFAULT_DAMPING: f32 = 0.8;
pub const DEFAULT_TRAIL_ALPHA: f32 = 0.1;
pub const DEFAULT_DOT_ALPHA: f32 = 0.7;

pub const DEFAULT_COUNTDOWN_SECS: u32 = 60;
pub const MAX_COUNTDOWN_SECS: u32 = 1200;
pub const COUNTDOWN_INCREMENT_SECS: u32 = 60;
pub const DEFAULT_PHASE_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_BREATH_SIDE_MS: u64 = 4000;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub tone: ToneConfig,
    pub wave: WaveConfig,
    pub session: SessionConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tone.validate()?;
        self.wave.validate()?;
        self.session.validate()
    }
}

/// Tone engine levels and fade timings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ToneConfig {
    /// Target gain of a sounding tone (0.0..=1.0).
    pub volume: f32,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
    pub mute_ramp_ms: u64,
    /// Capacity of the control → audio message ring.
    pub queue_capacity: usize,
    /// Capacity of the audio → UI sample tap.
    pub scope_capacity: usize,
}

impl ToneConfig {
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn mute_ramp(&self) -> Duration {
        Duration::from_millis(self.mute_ramp_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("tone.volume", self.volume, 0.0, 1.0)?;
        if self.queue_capacity == 0 {
            return Err(ConfigError::Zero("tone.queue_capacity"));
        }
        Ok(())
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            fade_in_ms: DEFAULT_FADE_IN_MS,
            fade_out_ms: DEFAULT_FADE_OUT_MS,
            mute_ramp_ms: DEFAULT_MUTE_RAMP_MS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            scope_capacity: DEFAULT_SCOPE_CAPACITY,
        }
    }
}

/// Halftone wave geometry and animation constants.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    /// Grid cell edge in logical pixels.
    pub cell_size: f32,
    /// Animation time added per sine frame.
    pub time_step: f32,
    /// Radial spatial frequency `K` of the sine pattern.
    pub spatial_frequency: f32,
    /// Dot diameter as a fraction of the cell at full wave offset.
    pub damping: f32,
    /// Alpha of the black wash composited each frame (motion trail).
    pub trail_alpha: f32,
    /// Dot alpha at full wave offset.
    pub dot_alpha: f32,
    pub pattern: WavePattern,
}

impl WaveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::Zero("wave.cell_size"));
        }
        check_range("wave.time_step", self.time_step, 0.0, 10.0)?;
        check_range("wave.damping", self.damping, 0.0, 1.0)?;
        check_range("wave.trail_alpha", self.trail_alpha, 0.0, 1.0)?;
        check_range("wave.dot_alpha", self.dot_alpha, 0.0, 1.0)
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            time_step: DEFAULT_TIME_STEP,
            spatial_frequency: DEFAULT_SPATIAL_FREQUENCY,
            damping: DEFAULT_DAMPING,
            trail_alpha: DEFAULT_TRAIL_ALPHA,
            dot_alpha: DEFAULT_DOT_ALPHA,
            pattern: WavePattern::default(),
        }
    }
}

/// Countdown and overlay timing for one meditation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub countdown_secs: u32,
    pub countdown_max_secs: u32,
    pub countdown_increment_secs: u32,
    pub phase_interval_ms: u64,
    pub breath_side_ms: u64,
}

impl SessionConfig {
    pub fn phase_interval(&self) -> Duration {
        Duration::from_millis(self.phase_interval_ms)
    }

    pub fn breath_side(&self) -> Duration {
        Duration::from_millis(self.breath_side_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countdown_secs == 0 {
            return Err(ConfigError::Zero("session.countdown_secs"));
        }
        if self.countdown_secs > self.countdown_max_secs {
            return Err(ConfigError::CountdownAboveMax {
                default: self.countdown_secs,
                max: self.countdown_max_secs,
            });
        }
        if self.phase_interval_ms == 0 {
            return Err(ConfigError::Zero("session.phase_interval_ms"));
        }
        if self.breath_side_ms == 0 {
            return Err(ConfigError::Zero("session.breath_side_ms"));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            countdown_max_secs: MAX_COUNTDOWN_SECS,
            countdown_increment_secs: COUNTDOWN_INCREMENT_SECS,
            phase_interval_ms: DEFAULT_PHASE_INTERVAL_MS,
            breath_side_ms: DEFAULT_BREATH_SIDE_MS,
        }
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
