//! Prompt picker, emotion wheel and end-of-session summary.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use resonate::{
    emotion::Synthesis,
    session::{format_countdown, RealizationLog, SessionReport, TerminationCause},
};

use super::{
    color,
    spectrum::render_spectrum,
    status::{render_status, AudioStats},
    waveform::render_waveform,
};
use crate::app::{App, PROMPTS};

pub fn render_prompts(frame: &mut Frame, area: Rect, cursor: usize) {
    let block = Block::default()
        .title(" How are you feeling? ")
        .borders(Borders::ALL);

    let items: Vec<ListItem> = PROMPTS
        .iter()
        .map(|prompt| ListItem::new(format!("{prompt}...")))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_wheel(frame: &mut Frame, area: Rect, app: &App, prompt: usize, cursor: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(area);

    let prompt = PROMPTS[prompt.min(PROMPTS.len() - 1)];
    let block = Block::default()
        .title(format!(" {prompt}... "))
        .borders(Borders::ALL);

    let items: Vec<ListItem> = app
        .emotions
        .iter()
        .map(|profile| {
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(color(profile.color))),
                Span::raw(profile.name),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, columns[0], &mut state);

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Audio status
            Constraint::Length(5), // Emotion details
            Constraint::Min(6),    // Spectrum
            Constraint::Length(8), // Waveform
        ])
        .split(columns[1]);

    let stats = AudioStats::from_buffer(&app.audio_buffer);
    render_status(frame, panels[0], &app.tone, &stats);

    if let Some(profile) = app.emotions.get(cursor) {
        let tint = color(profile.color);
        let kind = match profile.tone_category.synthesis() {
            Synthesis::BinauralBeat => "binaural beat",
            Synthesis::HealingChord => "healing chord",
        };
        let details = vec![
            Line::from(Span::styled(
                profile.name.to_uppercase(),
                Style::default().fg(tint).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{}  {}", kind, profile.sound_label())),
            Line::from(Span::styled(
                profile.color.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().title(" Tone ").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(details).block(block), panels[1]);

        let data = app.spectrum.as_ref().map(|s| s.data()).unwrap_or(&[]);
        render_spectrum(frame, panels[2], data, tint);
        render_waveform(frame, panels[3], &app.audio_buffer, tint);
    }
}

pub fn render_summary(frame: &mut Frame, area: Rect, report: &SessionReport, log: &RealizationLog) {
    let block = Block::default().title(" Realization ").borders(Borders::ALL);

    let ending = match report.cause {
        TerminationCause::CountdownElapsed => "Time's up.",
        TerminationCause::ManualExit => "You ended early.",
    };
    let times = log.frequency(&report.emotion);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}... {}", report.prompt, report.emotion),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{ending} You sat with it for {}.",
            format_countdown(report.elapsed_secs.min(u32::MAX as u64) as u32)
        )),
        Line::from(format!(
            "That's {times} time{} with {}, {} in total.",
            if times == 1 { "" } else { "s" },
            report.emotion,
            format_countdown(log.total_secs().min(u32::MAX as u64) as u32)
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}
