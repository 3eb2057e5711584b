//! TUI rendering for resonate
//!
//! One render entry point dispatching on the current screen.

mod halftone;
mod menu;
mod overlay;
pub mod spectrum;
mod status;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use resonate::color::Rgb;

use crate::app::{App, Screen};

use halftone::Halftone;
use menu::{render_prompts, render_summary, render_wheel};
use overlay::render_overlay;

pub fn render(frame: &mut Frame, app: &App) {
    match &app.screen {
        Screen::Prompts { cursor } => {
            let [body, help] = split_help(frame.area());
            render_prompts(frame, body, *cursor);
            render_help(frame, help, " [↑↓] Choose  [Enter] Select  [Q] Quit");
        }
        Screen::Wheel { prompt, cursor } => {
            let [body, help] = split_help(frame.area());
            render_wheel(frame, body, app, *prompt, *cursor);
            render_help(
                frame,
                help,
                " [↑↓] Hover to listen  [Enter] Meditate  [M] Mute  [-/+] Volume  [Esc] Back  [Q] Quit",
            );
        }
        Screen::Meditation(meditation) => {
            let area = frame.area();
            if let Some(canvas) = meditation.renderer().canvas() {
                frame.render_widget(Halftone::new(canvas), area);
            }
            render_overlay(frame, area, meditation, app.tone.is_muted());
        }
        Screen::Summary(report) => {
            let [body, help] = split_help(frame.area());
            render_summary(frame, body, report, &app.log);
            render_help(frame, help, " [Enter] Again  [Q] Quit");
        }
    }
}

fn split_help(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    [chunks[0], chunks[1]]
}

fn render_help(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
