use std::{collections::HashMap, time::Instant};

use super::{
    breathing::BoxBreathing,
    wave_session::{SessionReport, WaveSession},
};
use crate::{
    config::EngineConfig,
    tone::ToneEngine,
    wave::{Canvas, WaveRenderer},
};

/// Receives the report of every finished session.
pub trait RealizationSink {
    fn record(&mut self, report: SessionReport);
}

impl<F: FnMut(SessionReport)> RealizationSink for F {
    fn record(&mut self, report: SessionReport) {
        self(report)
    }
}

impl RealizationSink for Vec<SessionReport> {
    fn record(&mut self, report: SessionReport) {
        self.push(report);
    }
}

/// In-memory log that also tracks how often each emotion has been sat with.
#[derive(Debug, Default, Clone)]
pub struct RealizationLog {
    entries: Vec<(SessionReport, u32)>,
    counts: HashMap<String, u32>,
}

impl RealizationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports with their per-emotion occurrence number (1 for the first).
    pub fn entries(&self) -> impl Iterator<Item = (&SessionReport, u32)> {
        self.entries.iter().map(|(report, n)| (report, *n))
    }

    pub fn frequency(&self, emotion: &str) -> u32 {
        self.counts.get(emotion).copied().unwrap_or(0)
    }

    pub fn total_secs(&self) -> u64 {
        self.entries.iter().map(|(r, _)| r.elapsed_secs).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RealizationSink for RealizationLog {
    fn record(&mut self, report: SessionReport) {
        let count = self.counts.entry(report.emotion.clone()).or_insert(0);
        *count += 1;
        self.entries.push((report, *count));
    }
}

/// A full meditation: the wave session, its renderer, the emotion's tone
/// and an optional breathing pacer, driven from one frame loop.
pub struct Meditation<C: Canvas> {
    session: WaveSession,
    renderer: WaveRenderer<C>,
    breathing: Option<BoxBreathing>,
    config: EngineConfig,
    report: Option<SessionReport>,
}

impl<C: Canvas> Meditation<C> {
    /// Start a session and the tone for its emotion.
    pub fn begin(
        emotion: &str,
        prompt: impl Into<String>,
        canvas: Option<C>,
        config: &EngineConfig,
        tone: &mut ToneEngine,
        now: Instant,
    ) -> Self {
        let session = WaveSession::new(emotion, prompt, &config.session, now);
        let renderer = WaveRenderer::new(canvas, session.color(), config.wave.clone());
        tone.play_emotion_sound(session.category());
        tracing::debug!(emotion, color = %session.color(), "meditation started");

        Self {
            session,
            renderer,
            breathing: None,
            config: config.clone(),
            report: None,
        }
    }

    /// Advance timers, draw one wave frame and tear everything down if the
    /// countdown ran out. Returns the report on the frame the session ends.
    pub fn frame(
        &mut self,
        now: Instant,
        tone: &mut ToneEngine,
        sink: &mut dyn RealizationSink,
    ) -> Option<SessionReport> {
        if let Some(report) = self.session.tick(now) {
            return Some(self.finish(report, tone, sink));
        }
        if let Some(pacer) = self.breathing.as_mut() {
            pacer.update(now);
        }
        self.renderer.frame();
        None
    }

    /// End early on user request.
    pub fn exit(
        &mut self,
        now: Instant,
        tone: &mut ToneEngine,
        sink: &mut dyn RealizationSink,
    ) -> Option<SessionReport> {
        let report = self.session.exit(now)?;
        Some(self.finish(report, tone, sink))
    }

    fn finish(
        &mut self,
        report: SessionReport,
        tone: &mut ToneEngine,
        sink: &mut dyn RealizationSink,
    ) -> SessionReport {
        tone.stop_sound();
        self.renderer.cancel();
        self.breathing = None;
        tracing::info!(
            emotion = %report.emotion,
            prompt = %report.prompt,
            elapsed_secs = report.elapsed_secs,
            cause = ?report.cause,
            "meditation finished"
        );
        sink.record(report.clone());
        self.report = Some(report.clone());
        report
    }

    pub fn add_time(&mut self) -> u32 {
        self.session.add_time()
    }

    /// Mute or unmute the tone while the session runs.
    pub fn toggle_mute(&mut self, tone: &mut ToneEngine) -> bool {
        if self.session.is_running() {
            tone.toggle_mute()
        } else {
            tone.is_muted()
        }
    }

    /// Show (and start) or hide the breathing pacer. Returns true if shown.
    pub fn toggle_breathing(&mut self, now: Instant) -> bool {
        if !self.session.is_running() {
            return false;
        }
        if self.breathing.take().is_some() {
            return false;
        }
        let mut pacer = BoxBreathing::new(self.config.session.breath_side());
        pacer.start(now);
        self.breathing = Some(pacer);
        true
    }

    /// Pause or resume a visible pacer.
    pub fn pause_breathing(&mut self, now: Instant) -> Option<bool> {
        self.breathing.as_mut().map(|pacer| pacer.toggle(now))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.renderer.resize(width, height);
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn session(&self) -> &WaveSession {
        &self.session
    }

    pub fn renderer(&self) -> &WaveRenderer<C> {
        &self.renderer
    }

    pub fn breathing(&self) -> Option<&BoxBreathing> {
        self.breathing.as_ref()
    }

    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        session::TerminationCause,
        tone::{OfflineBackend, OfflineRenderer},
        wave::PixelCanvas,
    };
    use std::time::Duration;

    fn setup() -> (ToneEngine, OfflineRenderer, EngineConfig) {
        let config = EngineConfig::default();
        let (backend, renderer) = OfflineBackend::new(48_000.0);
        let engine = ToneEngine::new(Box::new(backend), config.tone.clone());
        (engine, renderer, config)
    }

    #[test]
    fn begin_plays_the_emotion_tone() {
        let (mut tone, _audio, config) = setup();
        let canvas = PixelCanvas::new(200.0, 100.0, 0.5);
        let m = Meditation::begin("furious", "I feel like", Some(canvas), &config, &mut tone, Instant::now());

        assert!(m.is_running());
        let session = tone.session().unwrap();
        assert_eq!(session.frequencies(), &[396.0, 406.0]);
        assert_eq!(m.renderer().color(), crate::color::Rgb::from_hex_or_white("#e53935"));
    }

    #[test]
    fn countdown_end_stops_tone_and_reports() {
        let (mut tone, _audio, config) = setup();
        let start = Instant::now();
        let mut log = RealizationLog::new();
        let mut m = Meditation::<PixelCanvas>::begin("joyful", "I want to feel", None, &config, &mut tone, start);

        let mut report = None;
        for second in 1..=60 {
            report = m.frame(start + Duration::from_secs(second), &mut tone, &mut log);
        }

        let report = report.unwrap();
        assert_eq!(report.elapsed_secs, 60);
        assert_eq!(report.cause, TerminationCause::CountdownElapsed);
        assert!(tone.session().is_none());
        assert!(m.renderer().is_cancelled());
        assert_eq!(log.frequency("joyful"), 1);
        assert_eq!(m.report(), Some(&report));
    }

    #[test]
    fn exit_reports_once() {
        let (mut tone, _audio, config) = setup();
        let start = Instant::now();
        let mut reports: Vec<SessionReport> = Vec::new();
        let mut m = Meditation::begin("lonely", "I believe I'm", Some(PixelCanvas::new(40.0, 40.0, 1.0)), &config, &mut tone, start);

        m.frame(start + Duration::from_millis(16), &mut tone, &mut reports);
        assert!(m.exit(start + Duration::from_secs(7), &mut tone, &mut reports).is_some());
        assert!(m.exit(start + Duration::from_secs(8), &mut tone, &mut reports).is_none());
        assert!(m.frame(start + Duration::from_secs(90), &mut tone, &mut reports).is_none());

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].cause, TerminationCause::ManualExit);
        assert_eq!(reports[0].elapsed_secs, 7);
    }

    #[test]
    fn missing_canvas_keeps_the_clock_running() {
        let (mut tone, _audio, config) = setup();
        let start = Instant::now();
        let mut sink = |_: SessionReport| {};
        let mut m = Meditation::<PixelCanvas>::begin("worried", "I feel like", None, &config, &mut tone, start);

        m.frame(start + Duration::from_secs(10), &mut tone, &mut sink);
        assert_eq!(m.session().remaining_secs(), 50);
        assert_eq!(m.renderer().frames(), 0);
    }

    #[test]
    fn breathing_toggles_on_and_off() {
        let (mut tone, _audio, config) = setup();
        let start = Instant::now();
        let mut m = Meditation::<PixelCanvas>::begin("anxious", "I feel like", None, &config, &mut tone, start);

        assert!(m.toggle_breathing(start));
        assert_eq!(m.pause_breathing(start), Some(false));
        assert!(!m.toggle_breathing(start));
        assert!(m.breathing().is_none());
        assert_eq!(m.pause_breathing(start), None);
    }

    #[test]
    fn log_counts_each_emotion() {
        let mut log = RealizationLog::new();
        for (emotion, secs) in [("sad", 60), ("happy", 30), ("sad", 120)] {
            log.record(SessionReport {
                emotion: emotion.into(),
                prompt: "I feel like".into(),
                elapsed_secs: secs,
                cause: TerminationCause::CountdownElapsed,
            });
        }
        assert_eq!(log.frequency("sad"), 2);
        assert_eq!(log.frequency("angry"), 0);
        assert_eq!(log.total_secs(), 210);
        assert_eq!(log.entries().last().map(|(_, n)| n), Some(2));
    }
}
