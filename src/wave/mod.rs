//! The halftone wave: a grid of dots pulsing outwards from the center in
//! the color of the chosen emotion.

pub mod canvas;
pub mod grid;
pub mod pattern;
pub mod renderer;

pub use canvas::{Canvas, PixelCanvas};
pub use grid::{Cell, Grid, GridLayout};
pub use pattern::{wave_offset, Dot, WavePattern};
pub use renderer::WaveRenderer;
