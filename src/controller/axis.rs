use tracing::{debug, trace};

use super::input::{AxisKeys, Direction, KeyInput};
use super::smoothing::{AxisConfig, AxisSmoother};
use crate::model::AxisTarget;

/// What an axis is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisPhase {
    #[default]
    Idle,
    MovingPositive,
    MovingNegative,
}

impl From<Direction> for AxisPhase {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::None => AxisPhase::Idle,
            Direction::Positive => AxisPhase::MovingPositive,
            Direction::Negative => AxisPhase::MovingNegative,
        }
    }
}

/// Outcome of one axis tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStep {
    pub phase: AxisPhase,
    pub delta: f32,
    pub value: f32,
}

/// One key-driven crane axis: two opposing keys, a smoother, and the target it moves
#[derive(Debug, Clone)]
pub struct AxisMover {
    name: &'static str,
    keys: AxisKeys,
    smoother: AxisSmoother,
    phase: AxisPhase,
}

impl AxisMover {
    pub fn new(name: &'static str, keys: AxisKeys, config: AxisConfig) -> Self {
        Self {
            name,
            keys,
            smoother: AxisSmoother::new(config),
            phase: AxisPhase::Idle,
        }
    }

    pub fn phase(&self) -> AxisPhase {
        self.phase
    }

    pub fn smoother(&self) -> &AxisSmoother {
        &self.smoother
    }

    /// Sample the keys and move `target` for one fixed step
    pub fn tick(&mut self, input: &impl KeyInput, target: &mut impl AxisTarget, dt: f32) -> AxisStep {
        let direction = self.keys.direction(input);
        self.step(direction, target, dt)
    }

    /// Move `target` in `direction` for one fixed step. Neutral input leaves both the
    /// target and the ramp untouched, so resuming the same direction keeps its speed.
    pub fn step(&mut self, direction: Direction, target: &mut impl AxisTarget, dt: f32) -> AxisStep {
        self.phase = direction.into();

        if direction == Direction::None {
            return AxisStep {
                phase: self.phase,
                delta: 0.0,
                value: target.value(),
            };
        }

        let last = self.smoother.state.last_direction;
        if last != Direction::None && last != direction {
            debug!(axis = self.name, ?direction, "axis reversed, restarting ramp");
        }

        let current = target.value();
        let delta = self.smoother.compute(direction, current, dt);
        let value = current + delta;
        target.set_value(value);

        trace!(
            axis = self.name,
            delta,
            value,
            speed = self.smoother.state.current_speed,
            "axis step"
        );

        AxisStep {
            phase: self.phase,
            delta,
            value,
        }
    }
}
