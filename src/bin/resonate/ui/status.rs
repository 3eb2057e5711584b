//! Audio status bar - sample rate, mute, volume and level meters

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use resonate::{dsp::mix::peak, tone::ToneEngine};

/// Level statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self {
            peak: peak(buffer),
            rms,
        }
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, tone: &ToneEngine, stats: &AudioStats) {
    let block = Block::default().title(" resonate ").borders(Borders::ALL);

    let output = match tone.sample_rate() {
        Some(sample_rate) => Span::styled(
            format!(" {:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        None if !tone.is_available() => Span::styled(" no audio  ", Style::default().fg(Color::Red)),
        None => Span::styled(" idle  ", Style::default().fg(Color::DarkGray)),
    };

    let (symbol, mute_color) = if tone.is_muted() {
        ("MUTED", Color::Yellow)
    } else {
        ("ON", Color::Green)
    };

    let line = Line::from(vec![
        output,
        Span::styled(format!("{symbol}  "), Style::default().fg(mute_color)),
        Span::styled(
            format!("Vol: {:.2}  ", tone.volume()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Peak: {:.3}  RMS: {:.3}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
