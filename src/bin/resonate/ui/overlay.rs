//! Text drawn over the halftone wave: phase text, countdown, breathing pacer.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use resonate::{
    session::{format_countdown, BoxBreathing, Meditation, PhaseText},
    wave::PixelCanvas,
};

use super::color;

const AFFIRMATION_COLOR: Color = Color::Rgb(233, 213, 255);
const SUN_COLOR: Color = Color::Rgb(245, 158, 11);

/// Pacer box size in cells
const PACER_WIDTH: u16 = 22;
const PACER_HEIGHT: u16 = 11;

pub fn render_overlay(frame: &mut Frame, area: Rect, meditation: &Meditation<PixelCanvas>, muted: bool) {
    let session = meditation.session();
    let tint = color(session.color());

    let lines = match session.phase_text() {
        PhaseText::Prompt { prompt, emotion } => vec![
            Line::from(Span::styled(
                format!("{prompt}..."),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                emotion.to_uppercase(),
                Style::default().fg(tint).add_modifier(Modifier::BOLD),
            )),
        ],
        PhaseText::Affirmation(text) => vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(text, Style::default().fg(AFFIRMATION_COLOR))),
        ],
    };
    let text_area = centered(area, area.width.min(60), 3);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);

    let mut status = vec![Span::styled(
        format!(" {} ", format_countdown(session.remaining_secs())),
        Style::default().fg(Color::White).bg(Color::Black),
    )];
    if muted {
        status.push(Span::styled(" muted ", Style::default().fg(Color::DarkGray).bg(Color::Black)));
    }
    let status_area = Rect::new(area.x, area.y, area.width, 1.min(area.height));
    frame.render_widget(Paragraph::new(Line::from(status)).alignment(Alignment::Right), status_area);

    if let Some(pacer) = meditation.breathing() {
        render_pacer(frame, area, pacer, tint);
    }

    if area.height > 1 {
        let help_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let help = Paragraph::new(" [+] 1 more minute  [M] Mute  [B] Breathing  [P] Pause breath  [Q] End")
            .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
        frame.render_widget(help, help_area);
    }
}

fn render_pacer(frame: &mut Frame, area: Rect, pacer: &BoxBreathing, tint: Color) {
    if area.width < PACER_WIDTH + 2 || area.height < PACER_HEIGHT + 3 {
        return;
    }
    let box_area = Rect::new(area.x + 1, area.bottom() - PACER_HEIGHT - 2, PACER_WIDTH, PACER_HEIGHT);
    let title = if pacer.is_running() {
        format!(" {} ", pacer.label())
    } else {
        " Paused ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tint));
    let inner = block.inner(box_area);
    frame.render_widget(Clear, box_area);
    frame.render_widget(block, box_area);

    // Square path along the inner edge
    let path = Rect::new(inner.x + 1, inner.y + 1, inner.width.saturating_sub(2), inner.height.saturating_sub(2));
    if path.width == 0 || path.height == 0 {
        return;
    }
    let (mx, my) = pacer.marker(1.0);
    let x = path.x + (mx * (path.width - 1) as f32).round() as u16;
    let y = path.y + (my * (path.height - 1) as f32).round() as u16;
    frame.render_widget(
        Paragraph::new("●").style(Style::default().fg(SUN_COLOR)),
        Rect::new(x, y, 1, 1),
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
