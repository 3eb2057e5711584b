use super::{
    canvas::Canvas,
    grid::Grid,
    pattern::WavePattern,
};
use crate::{color::Rgb, config::WaveConfig};

/// Paints the halftone wave one frame at a time.
///
/// Built without a canvas (none available) every frame is a no-op. Resizes
/// are recorded and applied at the start of the next frame so a frame is
/// never drawn against half-updated geometry.
pub struct WaveRenderer<C: Canvas> {
    canvas: Option<C>,
    config: WaveConfig,
    color: Rgb,
    grid: Grid,
    time: f32,
    frames: u64,
    pending_resize: Option<(f32, f32)>,
    cancelled: bool,
}

impl<C: Canvas> WaveRenderer<C> {
    pub fn new(canvas: Option<C>, color: Rgb, config: WaveConfig) -> Self {
        let (width, height) = canvas.as_ref().map(|c| c.size()).unwrap_or((0.0, 0.0));
        let grid = Grid::new(width, height, config.cell_size, config.pattern.layout());
        Self {
            canvas,
            config,
            color,
            grid,
            time: 0.0,
            frames: 0,
            pending_resize: None,
            cancelled: false,
        }
    }

    /// Record a new viewport size for the next frame.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.pending_resize = Some((width, height));
    }

    fn apply_resize(&mut self) {
        let Some((width, height)) = self.pending_resize.take() else {
            return;
        };
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(width, height);
            let (width, height) = canvas.size();
            self.grid.rebuild(width, height);
        }
    }

    /// Draw one frame. Returns whether anything was drawn.
    pub fn frame(&mut self) -> bool {
        if self.cancelled || self.canvas.is_none() {
            return false;
        }
        self.apply_resize();

        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };

        let pattern = self.config.pattern;
        canvas.fade(Rgb::BLACK, pattern.trail_alpha(&self.config));

        for cell in self.grid.cells() {
            let dot = pattern.dot(cell, self.time, self.color, &self.config);
            canvas.fill_circle(cell.x, cell.y, dot.radius, dot.color, dot.alpha);
        }

        self.time += pattern.time_step(&self.config);
        self.frames += 1;
        true
    }

    /// Stop the render loop for good. Later frames draw nothing.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.pending_resize = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn has_canvas(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn pattern(&self) -> WavePattern {
        self.config.pattern
    }

    /// Animation time, advanced by one step per drawn frame.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
