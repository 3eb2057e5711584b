//! Blits a [`PixelCanvas`] onto the terminal with half-block characters.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use resonate::{color::Rgb, wave::PixelCanvas};

use super::color;

/// Each terminal cell shows two stacked pixels: the upper one as the
/// foreground of `▀`, the lower one as the background.
pub struct Halftone<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> Halftone<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

impl Widget for Halftone<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.canvas.dimensions();
        for y in 0..area.height {
            let top_row = y as usize * 2;
            if top_row >= rows {
                break;
            }
            for x in 0..area.width.min(cols as u16) {
                let Some(top) = self.canvas.pixel(x as usize, top_row) else {
                    continue;
                };
                let bottom = self
                    .canvas
                    .pixel(x as usize, top_row + 1)
                    .unwrap_or(Rgb::BLACK);
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_char('▀').set_fg(color(top)).set_bg(color(bottom));
                }
            }
        }
    }
}
