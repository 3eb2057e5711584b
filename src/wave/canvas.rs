use super::grid::extent;
use crate::color::Rgb;

/// Physical pixel budget. Larger surfaces are treated as empty.
pub const MAX_PIXELS: usize = 1 << 24;

/// Accepted logical to physical pixel ratios.
pub const PIXEL_RATIO_RANGE: std::ops::RangeInclusive<f32> = 0.01..=8.0;

/// A 2D surface the wave renderer paints on, in logical pixels.
pub trait Canvas {
    /// Logical `(width, height)`.
    fn size(&self) -> (f32, f32);

    fn resize(&mut self, width: f32, height: f32);

    /// Composite `color` at `alpha` over the whole surface.
    fn fade(&mut self, color: Rgb, alpha: f32);

    /// Composite a filled circle of `color` at `alpha`.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32);
}

/*
Software canvas
===============

Logical coordinates are scaled by `pixel_ratio` onto a physical RGB buffer.
A terminal cell is far coarser than a screen pixel, so the front-end runs at
a ratio well below 1 and the halftone dots shrink to a few physical pixels.

Circle edges are anti-aliased by pixel coverage:

    coverage = clamp(radius + 0.5 - distance, 0, 1)

so a dot smaller than one physical pixel still shows up as a dim pixel
instead of vanishing.
*/

#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: f32,
    height: f32,
    pixel_ratio: f32,
    cols: usize,
    rows: usize,
    pixels: Vec<Rgb>,
}

impl PixelCanvas {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if PIXEL_RATIO_RANGE.contains(&pixel_ratio) {
            pixel_ratio
        } else {
            1.0
        };
        let mut canvas = Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio,
            cols: 0,
            rows: 0,
            pixels: Vec::new(),
        };
        canvas.resize(width, height);
        canvas
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Physical `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.pixels.get(y * self.cols + x).copied()
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }
}

impl Canvas for PixelCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        let (mut width, mut height) = (extent(width), extent(height));
        let mut cols = (width * self.pixel_ratio).round() as usize;
        let mut rows = (height * self.pixel_ratio).round() as usize;
        let len = match cols.checked_mul(rows) {
            Some(len) if len <= MAX_PIXELS => len,
            _ => {
                tracing::warn!(width, height, "canvas too large, drawing nothing");
                (width, height, cols, rows) = (0.0, 0.0, 0, 0);
                0
            }
        };

        self.width = width;
        self.height = height;
        self.cols = cols;
        self.rows = rows;
        self.pixels.clear();
        self.pixels.resize(len, Rgb::BLACK);
    }

    fn fade(&mut self, color: Rgb, alpha: f32) {
        for pixel in &mut self.pixels {
            *pixel = color.over(*pixel, alpha);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 || self.pixels.is_empty() {
            return;
        }

        let cx = cx * self.pixel_ratio;
        let cy = cy * self.pixel_ratio;
        let r = radius * self.pixel_ratio;

        let x0 = (cx - r - 1.0).floor().max(0.0) as usize;
        let y0 = (cy - r - 1.0).floor().max(0.0) as usize;
        let x1 = ((cx + r + 1.0).ceil().max(0.0) as usize).min(self.cols);
        let y1 = ((cy + r + 1.0).ceil().max(0.0) as usize).min(self.rows);

        for y in y0..y1 {
            let py = y as f32 + 0.5 - cy;
            let row = y * self.cols;
            for x in x0..x1 {
                let px = x as f32 + 0.5 - cx;
                let distance = (px * px + py * py).sqrt();
                let coverage = (r + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let pixel = &mut self.pixels[row + x];
                    *pixel = color.over(*pixel, alpha * coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_tracks_pixel_ratio() {
        let mut canvas = PixelCanvas::new(800.0, 600.0, 0.25);
        assert_eq!(canvas.dimensions(), (200, 150));

        canvas.resize(400.0, 200.0);
        assert_eq!(canvas.size(), (400.0, 200.0));
        assert_eq!(canvas.dimensions(), (100, 50));
        assert_eq!(canvas.pixels().len(), 5_000);
    }

    #[test]
    fn circle_paints_center_not_corners() {
        let mut canvas = PixelCanvas::new(20.0, 20.0, 1.0);
        canvas.fill_circle(10.0, 10.0, 4.0, Rgb::WHITE, 1.0);

        assert_eq!(canvas.pixel(10, 10), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(19, 19), Some(Rgb::BLACK));
    }

    #[test]
    fn fade_darkens_towards_black() {
        let mut canvas = PixelCanvas::new(4.0, 4.0, 1.0);
        canvas.clear(Rgb::WHITE);
        canvas.fade(Rgb::BLACK, 0.1);

        let pixel = canvas.pixel(1, 1).unwrap();
        assert!(pixel.r < 255 && pixel.r > 200);
    }

    #[test]
    fn non_finite_size_gives_empty_canvas() {
        let mut canvas = PixelCanvas::new(80.0 / 0.0, 48.0 / 0.0, 0.0);
        assert_eq!(canvas.pixel_ratio(), 1.0);
        assert_eq!(canvas.dimensions(), (0, 0));
        assert_eq!(canvas.size(), (0.0, 0.0));

        canvas.resize(f32::NAN, 10.0);
        assert_eq!(canvas.dimensions(), (0, 10));
        assert!(canvas.pixels().is_empty());

        canvas.fade(Rgb::BLACK, 0.1);
        canvas.fill_circle(5.0, 5.0, 3.0, Rgb::WHITE, 1.0);
    }

    #[test]
    fn oversized_canvas_draws_nothing() {
        let mut canvas = PixelCanvas::new(1.0e9, 1.0e9, 1.0);
        assert_eq!(canvas.dimensions(), (0, 0));
        assert!(canvas.pixels().is_empty());

        canvas.resize(40.0, 20.0);
        assert_eq!(canvas.dimensions(), (40, 20));
    }

    #[test]
    fn offscreen_circle_is_clipped() {
        let mut canvas = PixelCanvas::new(10.0, 10.0, 1.0);
        canvas.fill_circle(-50.0, 500.0, 3.0, Rgb::WHITE, 1.0);
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::BLACK));
    }
}
