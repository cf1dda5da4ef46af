use std::{fs, path::Path};

use serde::{Deserialize, Deserializer};

use crate::controller::{AxisConfig, KeyBindings};
use crate::error::ConfigError;

/// Crane tuning, loaded from TOML. Every field is optional.
///
/// An axis section only overrides the keys it names; the rest keep that axis's
/// built-in tuning, rail limit included. `limit = false` removes a limit.
#[derive(Debug, Clone, PartialEq)]
pub struct CraneConfig {
    /// Fixed simulation step in seconds
    pub fixed_dt: f32,
    /// Longest frame the fixed-step loop will catch up on
    pub max_frame_dt: f32,
    /// Number of joints making up the rope
    pub rope_segments: usize,
    pub rotation: AxisConfig,
    pub rope_length: AxisConfig,
    pub carriage: AxisConfig,
    pub keys: KeyBindings,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CraneConfigFile {
    fixed_dt: Option<f32>,
    max_frame_dt: Option<f32>,
    rope_segments: Option<usize>,
    rotation: AxisOverrides,
    rope_length: AxisOverrides,
    carriage: AxisOverrides,
    keys: KeyBindings,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AxisOverrides {
    change_speed: Option<f32>,
    smoothing_time: Option<f32>,
    limit: Option<LimitSetting>,
}

// `limit = [min, max]` or `limit = false`
#[derive(Deserialize)]
#[serde(untagged)]
enum LimitSetting {
    Range([f32; 2]),
    Enabled(bool),
}

impl AxisOverrides {
    fn apply(self, name: &str, base: AxisConfig) -> Result<AxisConfig, String> {
        let mut axis = base;
        if let Some(change_speed) = self.change_speed {
            axis.change_speed = change_speed;
        }
        if let Some(smoothing_time) = self.smoothing_time {
            axis.smoothing_time = smoothing_time;
        }
        match self.limit {
            None => {}
            Some(LimitSetting::Range([min, max])) => {
                axis.has_limit = true;
                axis.limit_min = min;
                axis.limit_max = max;
            }
            Some(LimitSetting::Enabled(false)) => axis.has_limit = false,
            Some(LimitSetting::Enabled(true)) => {
                return Err(format!("{name}.limit = true needs a [min, max] range instead"));
            }
        }
        Ok(axis)
    }
}

impl CraneConfigFile {
    fn into_config(self) -> Result<CraneConfig, String> {
        let base = CraneConfig::default();
        Ok(CraneConfig {
            fixed_dt: self.fixed_dt.unwrap_or(base.fixed_dt),
            max_frame_dt: self.max_frame_dt.unwrap_or(base.max_frame_dt),
            rope_segments: self.rope_segments.unwrap_or(base.rope_segments),
            rotation: self.rotation.apply("rotation", base.rotation)?,
            rope_length: self.rope_length.apply("rope_length", base.rope_length)?,
            carriage: self.carriage.apply("carriage", base.carriage)?,
            keys: self.keys,
        })
    }
}

impl<'de> Deserialize<'de> for CraneConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CraneConfigFile::deserialize(deserializer)?
            .into_config()
            .map_err(serde::de::Error::custom)
    }
}

impl Default for CraneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 0.02,
            max_frame_dt: 0.1,
            rope_segments: 8,
            rotation: AxisConfig::unlimited(20.0, 0.5),
            rope_length: AxisConfig::limited(2.0, 0.2, -12.0, -1.0),
            carriage: AxisConfig::limited(1.5, 0.3, 1.0, 9.0),
            keys: KeyBindings::default(),
        }
    }
}

impl CraneConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("fixed_dt", self.fixed_dt), ("max_frame_dt", self.max_frame_dt)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be positive and finite, got {value}")));
            }
        }
        if self.rope_segments == 0 {
            return Err(ConfigError::Invalid("rope_segments cannot be zero".to_string()));
        }

        for (name, axis) in [
            ("rotation", &self.rotation),
            ("rope_length", &self.rope_length),
            ("carriage", &self.carriage),
        ] {
            if !(axis.change_speed >= 0.0) || !axis.change_speed.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name}.change_speed must be finite and non-negative, got {}",
                    axis.change_speed
                )));
            }
            if !(axis.smoothing_time >= 0.0) || !axis.smoothing_time.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name}.smoothing_time must be finite and non-negative, got {}",
                    axis.smoothing_time
                )));
            }
            if axis.has_limit {
                if !axis.limit_min.is_finite() || !axis.limit_max.is_finite() {
                    return Err(ConfigError::Invalid(format!(
                        "{name}.limit must be finite: [{}, {}]",
                        axis.limit_min, axis.limit_max
                    )));
                }
                if axis.limit_min > axis.limit_max {
                    return Err(ConfigError::Invalid(format!(
                        "{name}.limit is inverted: [{}, {}]",
                        axis.limit_min, axis.limit_max
                    )));
                }
            }
        }

        Ok(())
    }
}
