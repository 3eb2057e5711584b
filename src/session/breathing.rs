/*
Box breathing
=============

A marker travels clockwise around a square, one side per breath phase:

        Breathe In
      +------------>+
      ^             |
 Hold |             | Hold
      |             v
      +<------------+
        Breathe Out

Each side lasts the same time (4 s by default). The pacer can be paused and
resumed without losing its place.
*/

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl BreathSide {
    pub fn next(self) -> Self {
        match self {
            BreathSide::Top => BreathSide::Right,
            BreathSide::Right => BreathSide::Bottom,
            BreathSide::Bottom => BreathSide::Left,
            BreathSide::Left => BreathSide::Top,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreathSide::Top => "Breathe In",
            BreathSide::Right | BreathSide::Left => "Hold",
            BreathSide::Bottom => "Breathe Out",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoxBreathing {
    side_length: Duration,
    side: BreathSide,
    into_side: Duration,
    last_update: Option<Instant>,
}

impl BoxBreathing {
    /// A paused pacer at the start of the top side.
    pub fn new(side_length: Duration) -> Self {
        Self {
            side_length: side_length.max(Duration::from_millis(1)),
            side: BreathSide::Top,
            into_side: Duration::ZERO,
            last_update: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.last_update.is_none() {
            self.last_update = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        self.update(now);
        self.last_update = None;
    }

    /// Flip between running and paused. Returns true when now running.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_running() {
            self.pause(now);
        } else {
            self.start(now);
        }
        self.is_running()
    }

    pub fn update(&mut self, now: Instant) {
        let Some(last) = self.last_update else {
            return;
        };
        self.into_side += now.saturating_duration_since(last);
        while self.into_side >= self.side_length {
            self.into_side -= self.side_length;
            self.side = self.side.next();
        }
        self.last_update = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.last_update.is_some()
    }

    pub fn side(&self) -> BreathSide {
        self.side
    }

    pub fn label(&self) -> &'static str {
        self.side.label()
    }

    /// Fraction of the current side completed, in `0.0..1.0`.
    pub fn progress(&self) -> f32 {
        self.into_side.as_secs_f32() / self.side_length.as_secs_f32()
    }

    /// Marker position on a square of edge `size`, origin top-left.
    pub fn marker(&self, size: f32) -> (f32, f32) {
        let along = self.progress() * size;
        match self.side {
            BreathSide::Top => (along, 0.0),
            BreathSide::Right => (size, along),
            BreathSide::Bottom => (size - along, size),
            BreathSide::Left => (0.0, size - along),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIDE: Duration = Duration::from_secs(4);

    #[test]
    fn walks_the_square_clockwise() {
        let start = Instant::now();
        let mut pacer = BoxBreathing::new(SIDE);
        pacer.start(start);

        pacer.update(start + Duration::from_secs(2));
        assert_eq!(pacer.label(), "Breathe In");
        assert_eq!(pacer.marker(120.0), (60.0, 0.0));

        pacer.update(start + Duration::from_secs(9));
        assert_eq!(pacer.side(), BreathSide::Bottom);
        assert_eq!(pacer.label(), "Breathe Out");
        assert_eq!(pacer.marker(120.0), (90.0, 120.0));

        pacer.update(start + Duration::from_secs(16));
        assert_eq!(pacer.side(), BreathSide::Top);
    }

    #[test]
    fn paused_pacer_holds_position() {
        let start = Instant::now();
        let mut pacer = BoxBreathing::new(SIDE);
        assert!(pacer.toggle(start));
        assert!(!pacer.toggle(start + Duration::from_secs(1)));

        pacer.update(start + Duration::from_secs(30));
        assert_eq!(pacer.side(), BreathSide::Top);
        assert!((pacer.progress() - 0.25).abs() < 1e-6);

        pacer.toggle(start + Duration::from_secs(30));
        pacer.update(start + Duration::from_secs(33));
        assert_eq!(pacer.side(), BreathSide::Right);
    }
}
