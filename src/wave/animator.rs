use bevy::math::Vec3;

use super::config::check_duration;
use crate::error::WaveError;
use crate::graph::EdgeId;

/// Which way an edge's tip is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Reveal: tip moves from the start anchor to the end anchor
    Grow,
    /// Retract: tip moves back to the start anchor
    Shrink,
}

/// The mutable, visible part of an edge
///
/// The segment runs from `start` to the moving `tip`; `progress` is the tip's
/// distance ratio from `start` toward `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLine {
    start: Vec3,
    end: Vec3,
    tip: Vec3,
    progress: f32,
    enabled: bool,
    direction: Direction,
}

impl EdgeLine {
    /// A fully retracted line between two node positions
    pub fn new(from: Vec3, to: Vec3, inset: f32) -> Self {
        let (start, end) = anchors(from, to, inset);
        EdgeLine {
            start,
            end,
            tip: start,
            progress: 0.0,
            enabled: false,
            direction: Direction::Shrink,
        }
    }

    /// Point the line from `from` toward `to` and retract it onto the new start
    /// Only meaningful while the line is fully retracted.
    pub fn orient(&mut self, from: Vec3, to: Vec3, inset: f32) {
        let (start, end) = anchors(from, to, inset);
        self.start = start;
        self.end = end;
        self.tip = start;
        self.progress = 0.0;
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Current position of the moving endpoint
    pub fn tip(&self) -> Vec3 {
        self.tip
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// True once a Grow has finished, false again once a Shrink has
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Segment endpoints pulled `inset` units inside the node positions
/// The inset never exceeds half the distance, so anchors cannot cross.
fn anchors(from: Vec3, to: Vec3, inset: f32) -> (Vec3, Vec3) {
    let span = to - from;
    let inset = inset.max(0.0).min(span.length() * 0.5);
    let unit = span.normalize_or_zero();

    (from + unit * inset, to - unit * inset)
}

/// How an animation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Reached its target anchor
    Finished,
    /// Stopped early so a reversed animation could take over
    Interrupted,
}

/// Reported exactly once per animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub edge: EdgeId,
    pub direction: Direction,
    pub outcome: Outcome,
}

/// A running grow or shrink on one edge
///
/// Linear interpolation of the tip from `from` to `to` over `duration`
/// seconds. Launching on a partially grown line starts the clock at the
/// matching elapsed time, so the tip never jumps.
#[derive(Debug, Clone)]
pub struct EdgeAnimation {
    edge: EdgeId,
    direction: Direction,
    from: Vec3,
    to: Vec3,
    elapsed: f32,
    duration: f32,
    done: bool,
}

impl EdgeAnimation {
    pub fn grow(edge: EdgeId, line: &mut EdgeLine, duration: f32) -> Result<Self, WaveError> {
        Self::launch(edge, line, Direction::Grow, duration)
    }

    pub fn shrink(edge: EdgeId, line: &mut EdgeLine, duration: f32) -> Result<Self, WaveError> {
        Self::launch(edge, line, Direction::Shrink, duration)
    }

    fn launch(
        edge: EdgeId,
        line: &mut EdgeLine,
        direction: Direction,
        duration: f32,
    ) -> Result<Self, WaveError> {
        check_duration(duration)?;

        let (from, to) = match direction {
            Direction::Grow => (line.start, line.end),
            Direction::Shrink => (line.end, line.start),
        };
        let span = from.distance(to);

        line.direction = direction;
        let elapsed = if span <= f32::EPSILON {
            // Coincident anchors: nothing to interpolate
            line.tip = to;
            line.progress = match direction {
                Direction::Grow => 1.0,
                Direction::Shrink => 0.0,
            };
            duration
        } else {
            duration * (line.tip.distance(from) / span).clamp(0.0, 1.0)
        };

        Ok(EdgeAnimation {
            edge,
            direction,
            from,
            to,
            elapsed,
            duration,
            done: false,
        })
    }

    /// Step the animation by `dt` seconds and move the line's tip
    ///
    /// Returns the completion on the step that reaches the target, including
    /// a zero-length step for animations that started already complete.
    pub fn advance(&mut self, line: &mut EdgeLine, dt: f32) -> Option<Completion> {
        if self.done {
            return None;
        }
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }

        let t = self.elapsed / self.duration;
        line.tip = self.from.lerp(self.to, t);
        line.progress = match self.direction {
            Direction::Grow => t,
            Direction::Shrink => 1.0 - t,
        };

        if self.elapsed < self.duration {
            return None;
        }

        line.tip = self.to;
        line.enabled = self.direction == Direction::Grow;
        self.done = true;
        Some(Completion {
            edge: self.edge,
            direction: self.direction,
            outcome: Outcome::Finished,
        })
    }

    /// Stop where the tip currently is; the line is left untouched
    pub fn interrupt(&mut self) -> Option<Completion> {
        if self.done {
            return None;
        }
        self.done = true;
        Some(Completion {
            edge: self.edge,
            direction: self.direction,
            outcome: Outcome::Interrupted,
        })
    }

    /// Fraction of the duration already played, in [0, 1]
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }
}
