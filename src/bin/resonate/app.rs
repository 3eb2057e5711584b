//! Application state and the event loop.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::Consumer;

use resonate::{
    emotion::{self, EmotionProfile},
    session::{Meditation, RealizationLog, SessionReport},
    tone::ToneEngine,
    wave::PixelCanvas,
    EngineConfig,
};

use crate::ui::{self, spectrum::SpectrumAnalyzer};

/// Samples kept for the spectrum and scope panels
pub const VIS_BUFFER_SIZE: usize = 2048;

const VOLUME_STEP: f32 = 0.02;

pub const PROMPTS: [&str; 6] = [
    "I feel like",
    "I want to feel",
    "I believe I'm",
    "I don't know why I feel",
    "I can't believe how",
    "I don't understand why I'm feeling",
];

pub enum Screen {
    Prompts { cursor: usize },
    Wheel { prompt: usize, cursor: usize },
    Meditation(Box<Meditation<PixelCanvas>>),
    Summary(SessionReport),
}

pub struct App {
    pub config: EngineConfig,
    pub tone: ToneEngine,
    pub log: RealizationLog,
    pub screen: Screen,
    pub emotions: Vec<EmotionProfile>,
    /// Terminal size in cells
    pub viewport: (u16, u16),
    pixel_ratio: f32,
    scope: Option<Consumer<f32>>,
    pub audio_buffer: Vec<f32>,
    pub spectrum: Option<SpectrumAnalyzer>,
    should_quit: bool,
}

impl App {
    pub fn new(config: EngineConfig, mut tone: ToneEngine, pixel_ratio: f32) -> Self {
        let scope = tone.take_scope();
        let spectrum = tone
            .sample_rate()
            .map(|sample_rate| SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate));

        Self {
            config,
            tone,
            log: RealizationLog::new(),
            screen: Screen::Prompts { cursor: 0 },
            emotions: emotion::all().collect(),
            viewport: (80, 24),
            pixel_ratio,
            scope,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let size = terminal.size()?;
        self.viewport = (size.width, size.height);

        while !self.should_quit {
            self.poll_scope();
            self.step(Instant::now());

            terminal.draw(|frame| ui::render(frame, self))?;

            // ~60fps, doubles as the animation frame
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code, Instant::now());
                    }
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => {}
                }
            }
        }

        self.tone.dispose();
        Ok(())
    }

    /// Keep the most recent `VIS_BUFFER_SIZE` tone samples.
    fn poll_scope(&mut self) {
        let Some(scope) = self.scope.as_mut() else {
            return;
        };

        let available = scope.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = scope.read_chunk(available) {
            let (first, second) = chunk.as_slices();
            self.audio_buffer.extend_from_slice(first);
            self.audio_buffer.extend_from_slice(second);
            chunk.commit_all();
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }

        if let Some(spectrum) = self.spectrum.as_mut() {
            spectrum.update(&self.audio_buffer);
        }
    }

    /// Advance the meditation, moving to the summary once it ends.
    fn step(&mut self, now: Instant) {
        let Screen::Meditation(meditation) = &mut self.screen else {
            return;
        };
        if let Some(report) = meditation.frame(now, &mut self.tone, &mut self.log) {
            self.screen = Screen::Summary(report);
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        let (w, h) = self.logical_size();
        if let Screen::Meditation(meditation) = &mut self.screen {
            meditation.resize(w, h);
        }
    }

    /// Logical wave size for the current viewport. Each terminal cell holds
    /// two stacked pixels.
    fn logical_size(&self) -> (f32, f32) {
        let (cols, rows) = self.viewport;
        (
            cols as f32 / self.pixel_ratio,
            rows as f32 * 2.0 / self.pixel_ratio,
        )
    }

    fn handle_key(&mut self, key: KeyCode, now: Instant) {
        match &mut self.screen {
            Screen::Prompts { cursor } => match key {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + 1).min(PROMPTS.len() - 1),
                KeyCode::Enter => {
                    let prompt = *cursor;
                    self.screen = Screen::Wheel { prompt, cursor: 0 };
                    self.hover(0);
                }
                _ => {}
            },
            Screen::Wheel { prompt, cursor } => match key {
                KeyCode::Esc => {
                    let prompt = *prompt;
                    self.tone.stop_sound();
                    self.screen = Screen::Prompts { cursor: prompt };
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => {
                    let next = cursor.saturating_sub(1);
                    self.hover(next);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let next = (*cursor + 1).min(self.emotions.len().saturating_sub(1));
                    self.hover(next);
                }
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    self.tone.toggle_mute();
                }
                KeyCode::Char('-') => {
                    let volume = self.tone.volume() - VOLUME_STEP;
                    self.tone.set_volume(volume);
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    let volume = self.tone.volume() + VOLUME_STEP;
                    self.tone.set_volume(volume);
                }
                KeyCode::Enter => {
                    let (prompt, cursor) = (*prompt, *cursor);
                    self.begin(prompt, cursor, now);
                }
                _ => {}
            },
            Screen::Meditation(meditation) => match key {
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    meditation.add_time();
                }
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    meditation.toggle_mute(&mut self.tone);
                }
                KeyCode::Char('b') | KeyCode::Char('B') => {
                    meditation.toggle_breathing(now);
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    meditation.pause_breathing(now);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    if let Some(report) = meditation.exit(now, &mut self.tone, &mut self.log) {
                        self.screen = Screen::Summary(report);
                    }
                }
                _ => {}
            },
            Screen::Summary(_) => match key {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Enter => self.screen = Screen::Prompts { cursor: 0 },
                _ => {}
            },
        }
    }

    /// Move the wheel cursor and play the emotion under it.
    fn hover(&mut self, index: usize) {
        let Screen::Wheel { cursor, .. } = &mut self.screen else {
            return;
        };
        if *cursor == index && self.tone.session().is_some() {
            return;
        }
        *cursor = index;
        if let Some(profile) = self.emotions.get(index) {
            self.tone.play_emotion_sound(profile.tone_category);
        }
    }

    fn begin(&mut self, prompt: usize, cursor: usize, now: Instant) {
        let Some(profile) = self.emotions.get(cursor) else {
            return;
        };
        let (width, height) = self.logical_size();
        let canvas = PixelCanvas::new(width, height, self.pixel_ratio);
        let meditation = Meditation::begin(
            profile.name,
            PROMPTS[prompt.min(PROMPTS.len() - 1)],
            Some(canvas),
            &self.config,
            &mut self.tone,
            now,
        );
        self.screen = Screen::Meditation(Box::new(meditation));
    }
}
