//! Scope of the most recent tone samples

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples shown
const SCOPE_SAMPLES: usize = 512;

pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32], tint: Color) {
    let block = Block::default().title(" Scope ").borders(Borders::ALL);

    let tail = &audio_buffer[audio_buffer.len().saturating_sub(SCOPE_SAMPLES)..];
    let data: Vec<(f64, f64)> = tail
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64, sample as f64))
        .collect();

    // Tones sit far below full scale
    let range = tail
        .iter()
        .fold(0.05f32, |acc, &x| acc.max(x.abs())) as f64;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(tint))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, SCOPE_SAMPLES as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-range, range])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
