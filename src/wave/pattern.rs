/*
Halftone patterns
=================

Sine (canonical)
----------------
A single radial wave travelling outwards from the center:

    offset = sin(distance * K - time) * 0.5 + 0.5          in [0, 1]
    radius = cell * offset * damping / 2
    alpha  = offset * 0.7

    distance 0 ........................................ 1
    dots     .  o  O  o  .  .  o  O  o  .  .  o  O  o  .
                      ---->  rings drift outwards as time grows

Fractal
-------
A staggered hex grid driven by three interfering sine layers, an orbiting
phase term and a per-dot color shimmer. Drawn without a trail: every frame
starts from black.
*/

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::grid::{Cell, GridLayout};
use crate::{color::Rgb, config::WaveConfig};

/// Animation time added per fractal frame.
pub const FRACTAL_TIME_STEP: f32 = 0.04;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavePattern {
    #[default]
    Sine,
    Fractal,
}

/// One dot to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub radius: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl WavePattern {
    pub fn layout(self) -> GridLayout {
        match self {
            WavePattern::Sine => GridLayout::Square,
            WavePattern::Fractal => GridLayout::Staggered,
        }
    }

    /// Alpha of the black wash laid down before the dots.
    pub fn trail_alpha(self, config: &WaveConfig) -> f32 {
        match self {
            WavePattern::Sine => config.trail_alpha,
            WavePattern::Fractal => 1.0,
        }
    }

    /// Animation time added per frame.
    pub fn time_step(self, config: &WaveConfig) -> f32 {
        match self {
            WavePattern::Sine => config.time_step,
            WavePattern::Fractal => FRACTAL_TIME_STEP,
        }
    }

    pub fn dot(self, cell: &Cell, time: f32, color: Rgb, config: &WaveConfig) -> Dot {
        match self {
            WavePattern::Sine => sine_dot(cell, time, color, config),
            WavePattern::Fractal => fractal_dot(cell, time, color, config.cell_size),
        }
    }
}

impl std::str::FromStr for WavePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" => Ok(WavePattern::Sine),
            "fractal" => Ok(WavePattern::Fractal),
            other => Err(format!("unknown wave pattern '{other}' (expected sine or fractal)")),
        }
    }
}

/// `sin(distance * k - time) * 0.5 + 0.5`, always within `[0, 1]`.
pub fn wave_offset(distance: f32, time: f32, k: f32) -> f32 {
    ((distance * k - time).sin() * 0.5 + 0.5).clamp(0.0, 1.0)
}

fn sine_dot(cell: &Cell, time: f32, color: Rgb, config: &WaveConfig) -> Dot {
    let offset = wave_offset(cell.distance, time, config.spatial_frequency);
    let diameter = config.cell_size * offset * config.damping;
    Dot {
        radius: diameter / 2.0,
        color,
        alpha: offset * config.dot_alpha,
    }
}

fn fractal_sin(x: f32, y: f32, t: f32) -> f32 {
    (x * 0.13 + y * 0.17 + t).sin() * 0.5
        + (x * 0.09 - y * 0.11 + t * 1.4).sin() * 0.35
        + ((x * x + y * y).sqrt() * 0.19 + t * 0.7 + (x * 0.03 + y * 0.05).cos()).sin() * 0.2
}

fn fractal_dot(cell: &Cell, t: f32, color: Rgb, cell_size: f32) -> Dot {
    let Cell {
        x,
        y,
        dx,
        dy,
        distance,
    } = *cell;

    let wave = 0.5
        + 0.5
            * fractal_sin(
                dx / 40.0 + 0.2 * (t * 0.13).sin(),
                dy / 38.0 + 0.16 * (t * 0.09).cos(),
                t,
            );
    let orbit = (0.4 * t + (dx * (t * 0.17).sin() + dy * (t * 0.11).cos()) * 0.005).sin() * 0.3;
    let dot = 0.15 + 0.75 * (wave * TAU + orbit + distance * TAU + t * 0.5).sin().abs();
    let size = cell_size * dot * (1.08 - distance * 0.7);

    let hue = 30.0 * (t * 0.7 + dx * 0.014 + dy * 0.013).sin();
    let color = color.shifted(
        hue + 12.0 * (x * 0.018 + t * 0.26 - y * 0.008).sin(),
        hue + 8.0 * (y * 0.019 + t * 0.13 + x * 0.0012).cos(),
        hue + 4.0 * (x * 0.012 - t * 0.18 + y * 0.003).cos(),
    );

    Dot {
        radius: (size / 2.7).max(0.0),
        color,
        alpha: (0.15 + 0.34 * wave + 0.08 * (1.0 - distance)).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(distance: f32) -> Cell {
        Cell {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            distance,
        }
    }

    #[test]
    fn offset_is_half_at_origin() {
        assert_eq!(wave_offset(0.0, 0.0, 10.0), 0.5);
    }

    #[test]
    fn offset_stays_in_unit_range() {
        for i in 0..200 {
            let d = i as f32 / 200.0;
            let o = wave_offset(d, i as f32 * 0.37, 10.0);
            assert!((0.0..=1.0).contains(&o));
        }
    }

    #[test]
    fn sine_dot_follows_offset() {
        let config = WaveConfig::default();
        let dot = WavePattern::Sine.dot(&cell(0.0), 0.0, Rgb::WHITE, &config);
        // 20 * 0.5 * 0.8 / 2
        assert!((dot.radius - 4.0).abs() < 1e-6);
        assert!((dot.alpha - 0.35).abs() < 1e-6);
        assert_eq!(dot.color, Rgb::WHITE);
    }

    #[test]
    fn fractal_dot_is_bounded() {
        let config = WaveConfig::default();
        for i in 0..100 {
            let c = Cell {
                x: i as f32 * 13.0,
                y: i as f32 * 7.0,
                dx: i as f32 * 5.0 - 250.0,
                dy: 120.0 - i as f32 * 3.0,
                distance: i as f32 / 100.0,
            };
            let dot = WavePattern::Fractal.dot(&c, i as f32 * 0.05, Rgb::new(255, 0, 128), &config);
            assert!(dot.radius >= 0.0 && dot.radius <= config.cell_size);
            assert!((0.0..=1.0).contains(&dot.alpha));
        }
    }

    #[test]
    fn parses_pattern_names() {
        assert_eq!("Fractal".parse::<WavePattern>(), Ok(WavePattern::Fractal));
        assert!("plasma".parse::<WavePattern>().is_err());
    }
}
