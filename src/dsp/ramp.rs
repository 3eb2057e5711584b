use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Linear Gain Ramps
=================

A ramp moves a gain value from wherever it currently is to a target over a
fixed time, in a straight line. It is the envelope "release" stage turned
into a general-purpose tool: the same ramp fades a tone in, fades it out
before a stop, and swings between the live volume and zero for mute.

Vocabulary
----------

  level       The ramp's current output value. Multiplies the voice signal.

  target      Where the ramp is heading. Once reached the ramp holds there
              until a new target is requested.

  start       The level captured at the moment a ramp is requested. Ramps
              always begin from the CURRENT level, never from a nominal one,
              so retargeting half-way through a fade cannot jump.


The Shape
---------

    Level
     0.08 ┤        ╭──────────────╮
          │       ╱                ╲
          │      ╱                  ╲
     0.0  ┼─────╯                    ╰──────→ Time
               fade in (200 ms)   fade out (100 ms)


The Math
--------

We snapshot the starting level and the total number of samples when a ramp
is requested, then interpolate:

    level = start + (target - start) × (elapsed / total)

Interpolating from a snapshot (rather than adding an increment each sample)
guarantees the ramp lands exactly on the target with no accumulated
floating-point drift.

    total = round(seconds × sample_rate)

Example: 100 ms at 48 kHz → 4800 samples.
*/

/// Whether the ramp is moving or holding still.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampState {
    Holding,
    Ramping,
}

#[derive(Debug, Clone, Copy)]
pub struct GainRamp {
    level: f32,
    target: f32,
    state: RampState,

    // Bookkeeping captured when the ramp was requested
    start_level: f32,
    total_samples: u32,
    elapsed_samples: u32,
}

impl GainRamp {
    pub fn new(level: f32) -> Self {
        let level = level.clamp(0.0, 1.0);
        Self {
            level,
            target: level,
            state: RampState::Holding,
            start_level: level,
            total_samples: 1,
            elapsed_samples: 0,
        }
    }

    /// A ramp holding at zero, the starting point of every new voice.
    pub fn silent() -> Self {
        Self::new(0.0)
    }

    /// Start a linear ramp from the current level towards `target`.
    ///
    /// A duration shorter than one sample jumps straight to the target.
    pub fn ramp_to(&mut self, target: f32, seconds: f32, ctx: &RenderCtx) {
        let target = target.clamp(0.0, 1.0);
        self.start_level = self.level;
        self.target = target;

        if seconds <= MIN_TIME {
            self.level = target;
            self.state = RampState::Holding;
            return;
        }

        self.total_samples = (seconds * ctx.sample_rate).round().max(1.0) as u32;
        self.elapsed_samples = 0;
        self.state = RampState::Ramping;
    }

    /// Jump to `level` immediately, cancelling any running ramp.
    pub fn set(&mut self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        self.level = level;
        self.target = level;
        self.state = RampState::Holding;
    }

    /// Advance the ramp by one sample and return the new level.
    pub fn next_sample(&mut self) -> f32 {
        if self.state == RampState::Ramping {
            let progress = self.elapsed_samples as f32 / self.total_samples as f32;
            self.level = self.start_level + (self.target - self.start_level) * progress;

            self.elapsed_samples = self.elapsed_samples.saturating_add(1);

            if self.elapsed_samples >= self.total_samples {
                self.level = self.target;
                self.state = RampState::Holding;
            }
        }

        self.level
    }

    /// Render a block of gain values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn state(&self) -> RampState {
        self.state
    }

    pub fn is_ramping(&self) -> bool {
        self.state == RampState::Ramping
    }
}

impl Default for GainRamp {
    fn default() -> Self {
        Self::silent()
    }
}
