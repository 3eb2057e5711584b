use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    clock::{whole_seconds_between, Interval},
    color::Rgb,
    config::SessionConfig,
    emotion::{self, ToneCategory},
};

pub const AFFIRMATION: &str = "Embrace this feeling with compassion";

/// Length of the text-reveal cycle.
pub const PHASE_COUNT: u8 = 4;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    CountdownElapsed,
    ManualExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated(TerminationCause),
}

/// Handed to the persistence side once a session ends.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub emotion: String,
    pub prompt: String,
    pub elapsed_secs: u64,
    pub cause: TerminationCause,
}

/// What the overlay should show for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseText<'a> {
    /// Phases 0 and 1: the prompt and the emotion.
    Prompt { prompt: &'a str, emotion: &'a str },
    /// Phases 2 and 3.
    Affirmation(&'static str),
}

/// One meditation run: countdown, phase cycle and the emotion it is about.
#[derive(Debug, Clone)]
pub struct WaveSession {
    emotion: String,
    prompt: String,
    color: Rgb,
    category: ToneCategory,
    started_at: Instant,
    remaining_secs: u32,
    max_secs: u32,
    increment_secs: u32,
    phase: u8,
    countdown: Option<Interval>,
    phase_timer: Option<Interval>,
    state: SessionState,
}

impl WaveSession {
    pub fn new(emotion: &str, prompt: impl Into<String>, config: &SessionConfig, now: Instant) -> Self {
        let profile = emotion::profile(emotion);
        Self {
            emotion: emotion.to_string(),
            prompt: prompt.into(),
            color: profile.color,
            category: profile.tone_category,
            started_at: now,
            remaining_secs: config.countdown_secs.min(config.countdown_max_secs),
            max_secs: config.countdown_max_secs,
            increment_secs: config.countdown_increment_secs,
            phase: 0,
            countdown: Some(Interval::new(Duration::from_secs(1), now)),
            phase_timer: Some(Interval::new(config.phase_interval(), now)),
            state: SessionState::Running,
        }
    }

    /// Advance both timers to `now`. Returns the report if the countdown ran
    /// out.
    pub fn tick(&mut self, now: Instant) -> Option<SessionReport> {
        if !self.is_running() {
            return None;
        }

        if let Some(timer) = self.phase_timer.as_mut() {
            let ticks = timer.poll(now);
            self.phase = ((self.phase as u32 + ticks) % PHASE_COUNT as u32) as u8;
        }

        let seconds = self.countdown.as_mut().map_or(0, |timer| timer.poll(now));
        self.remaining_secs = self.remaining_secs.saturating_sub(seconds);
        if self.remaining_secs == 0 {
            return Some(self.terminate(TerminationCause::CountdownElapsed, now));
        }
        None
    }

    /// Extend the countdown by one increment, up to the maximum.
    pub fn add_time(&mut self) -> u32 {
        if self.is_running() {
            self.remaining_secs = self
                .remaining_secs
                .saturating_add(self.increment_secs)
                .min(self.max_secs);
        }
        self.remaining_secs
    }

    /// End the session early. `None` if it already ended.
    pub fn exit(&mut self, now: Instant) -> Option<SessionReport> {
        if !self.is_running() {
            return None;
        }
        Some(self.terminate(TerminationCause::ManualExit, now))
    }

    fn terminate(&mut self, cause: TerminationCause, now: Instant) -> SessionReport {
        self.state = SessionState::Terminated(cause);
        self.countdown = None;
        self.phase_timer = None;

        let report = SessionReport {
            emotion: self.emotion.clone(),
            prompt: self.prompt.clone(),
            elapsed_secs: whole_seconds_between(self.started_at, now),
            cause,
        };
        tracing::debug!(emotion = %report.emotion, ?cause, elapsed = report.elapsed_secs, "wave session ended");
        report
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn phase_text(&self) -> PhaseText<'_> {
        if self.phase < 2 {
            PhaseText::Prompt {
                prompt: &self.prompt,
                emotion: &self.emotion,
            }
        } else {
            PhaseText::Affirmation(AFFIRMATION)
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        whole_seconds_between(self.started_at, now)
    }

    /// True while either timer is still armed.
    pub fn has_timers(&self) -> bool {
        self.countdown.is_some() || self.phase_timer.is_some()
    }

    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn category(&self) -> ToneCategory {
        self.category
    }
}

/// Format seconds as `m:ss`.
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(now: Instant) -> WaveSession {
        WaveSession::new("sad", "I feel like", &SessionConfig::default(), now)
    }

    #[test]
    fn countdown_runs_out_after_sixty_seconds() {
        let start = Instant::now();
        let mut s = session(start);

        for second in 1..60 {
            assert_eq!(s.tick(start + Duration::from_secs(second)), None);
        }
        assert_eq!(s.remaining_secs(), 1);

        let report = s.tick(start + Duration::from_secs(60)).unwrap();
        assert_eq!(report.elapsed_secs, 60);
        assert_eq!(report.cause, TerminationCause::CountdownElapsed);
        assert_eq!(report.emotion, "sad");
        assert_eq!(s.remaining_secs(), 0);
        assert!(!s.has_timers());
    }

    #[test]
    fn add_time_clamps_at_maximum() {
        let start = Instant::now();
        let mut s = session(start);
        for _ in 0..19 {
            s.add_time();
        }
        s.tick(start + Duration::from_secs(20));
        assert_eq!(s.remaining_secs(), 1180);
        assert_eq!(s.add_time(), 1200);
        assert_eq!(s.add_time(), 1200);
    }

    #[test]
    fn phases_cycle_modulo_four() {
        let start = Instant::now();
        let mut s = session(start);
        assert!(matches!(s.phase_text(), PhaseText::Prompt { prompt: "I feel like", emotion: "sad" }));

        s.tick(start + Duration::from_secs(2));
        assert_eq!(s.phase(), 2);
        assert_eq!(s.phase_text(), PhaseText::Affirmation(AFFIRMATION));

        s.tick(start + Duration::from_secs(5));
        assert_eq!(s.phase(), 1);
    }

    #[test]
    fn manual_exit_is_terminal() {
        let start = Instant::now();
        let mut s = session(start);
        let report = s.exit(start + Duration::from_millis(12_700)).unwrap();
        assert_eq!(report.elapsed_secs, 12);
        assert_eq!(report.cause, TerminationCause::ManualExit);

        assert_eq!(s.exit(start + Duration::from_secs(13)), None);
        assert_eq!(s.tick(start + Duration::from_secs(100)), None);
        assert_eq!(s.add_time(), s.remaining_secs());
        assert_eq!(s.state(), SessionState::Terminated(TerminationCause::ManualExit));
    }

    #[test]
    fn unknown_emotion_renders_white() {
        let s = WaveSession::new("serene", "I want to feel", &SessionConfig::default(), Instant::now());
        assert_eq!(s.color(), Rgb::WHITE);
        assert_eq!(s.category(), ToneCategory::Default);
    }

    #[test]
    fn countdown_formats_minutes() {
        assert_eq!(format_countdown(60), "1:00");
        assert_eq!(format_countdown(1199), "19:59");
        assert_eq!(format_countdown(5), "0:05");
    }
}
