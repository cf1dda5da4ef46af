use crate::config::CraneConfig;
use crate::error::ConfigError;

/// Turns variable frame times into whole fixed simulation steps
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    fixed_dt: f32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl FixedStepDriver {
    pub fn new(fixed_dt: f32, max_frame_dt: f32) -> Result<Self, ConfigError> {
        if !(fixed_dt > 0.0) || !(max_frame_dt > 0.0) || !fixed_dt.is_finite() || !max_frame_dt.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "fixed step needs positive timings, got fixed_dt={fixed_dt} max_frame_dt={max_frame_dt}"
            )));
        }
        Ok(Self {
            fixed_dt,
            max_frame_dt,
            accumulator: 0.0,
        })
    }

    pub fn from_config(config: &CraneConfig) -> Result<Self, ConfigError> {
        Self::new(config.fixed_dt, config.max_frame_dt)
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Add one frame's elapsed time and return how many fixed steps are due.
    /// Long frames are clamped so a stall never triggers a burst of catch-up steps.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        steps
    }
}
