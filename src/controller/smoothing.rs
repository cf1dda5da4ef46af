/// Speed smoothing and range limiting shared by every crane axis
use super::input::Direction;

/// Author-time tuning of one crane axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    pub change_speed: f32,
    pub smoothing_time: f32,
    pub has_limit: bool,
    pub limit_min: f32,
    pub limit_max: f32,
}

impl AxisConfig {
    pub fn unlimited(change_speed: f32, smoothing_time: f32) -> Self {
        Self {
            change_speed,
            smoothing_time,
            has_limit: false,
            limit_min: 0.0,
            limit_max: 0.0,
        }
    }

    pub fn limited(change_speed: f32, smoothing_time: f32, limit_min: f32, limit_max: f32) -> Self {
        Self {
            change_speed,
            smoothing_time,
            has_limit: true,
            limit_min,
            limit_max,
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::unlimited(1.0, 0.2)
    }
}

/// Ramp state owned by a single axis, mutated once per tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisRuntimeState {
    pub current_speed: f32,
    pub smooth_damp_velocity: f32,
    pub last_direction: Direction,
}

/// Critically damped spring toward `target`, updating `velocity` in place.
///
/// Polynomial approximation of `exp(-omega * dt)`; never overshoots the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smoothing_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smoothing_time = smoothing_time.max(0.0001);
    let omega = 2.0 / smoothing_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}

/// Change to apply to an axis value this tick.
///
/// Restarts the speed ramp whenever `direction` differs from the last non-neutral
/// direction. With a limit, the result never carries `current_value` past the bound;
/// near the bound the delta is cut to the remaining room rather than eased.
pub fn bounded_delta(
    direction: Direction,
    current_value: f32,
    config: &AxisConfig,
    state: &mut AxisRuntimeState,
    dt: f32,
) -> f32 {
    if direction == Direction::None {
        return 0.0;
    }

    if direction != state.last_direction {
        state.last_direction = direction;
        state.current_speed = 0.0;
        state.smooth_damp_velocity = 0.0;
    }

    state.current_speed = smooth_damp(
        state.current_speed,
        config.change_speed,
        &mut state.smooth_damp_velocity,
        config.smoothing_time,
        dt,
    );

    let raw_delta = direction.to_sign() * state.current_speed * dt;
    if !config.has_limit {
        return raw_delta;
    }

    match direction {
        Direction::Positive => raw_delta.min(config.limit_max - current_value),
        _ => raw_delta.max(config.limit_min - current_value),
    }
}

/// An axis config paired with the ramp state it drives
#[derive(Debug, Clone)]
pub struct AxisSmoother {
    pub config: AxisConfig,
    pub state: AxisRuntimeState,
}

impl AxisSmoother {
    pub fn new(config: AxisConfig) -> Self {
        Self {
            config,
            state: AxisRuntimeState::default(),
        }
    }

    pub fn compute(&mut self, direction: Direction, current_value: f32, dt: f32) -> f32 {
        bounded_delta(direction, current_value, &self.config, &mut self.state, dt)
    }
}
