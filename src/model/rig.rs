use glam::Vec3;

use crate::config::CraneConfig;
use crate::error::CraneError;

/// A scalar an axis can read and drive
pub trait AxisTarget {
    fn value(&self) -> f32;
    fn set_value(&mut self, value: f32);
}

/// Rotating turret; the rotation axis drives yaw (`euler_angles.y`, degrees).
///
/// Yaw is read back exactly as written, not wrapped into `[0, 360)` the way an
/// engine transform reports euler angles, so a rotation limit applies to the raw angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurretTransform {
    pub euler_angles: Vec3,
}

impl AxisTarget for TurretTransform {
    fn value(&self) -> f32 {
        self.euler_angles.y
    }

    fn set_value(&mut self, value: f32) {
        self.euler_angles.y = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RopeJoint {
    pub connected_anchor: Vec3,
}

/// Joints simulating the rope. They always share one connected anchor,
/// whose height sets the rope length.
#[derive(Debug, Clone, PartialEq)]
pub struct RopeJoints {
    joints: Vec<RopeJoint>,
}

impl RopeJoints {
    pub fn new(joints: Vec<RopeJoint>) -> Result<Self, CraneError> {
        if joints.is_empty() {
            return Err(CraneError::EmptyRope);
        }
        Ok(Self { joints })
    }

    /// `segments` joints all hanging from `anchor`
    pub fn uniform(segments: usize, anchor: Vec3) -> Result<Self, CraneError> {
        Self::new(vec![RopeJoint { connected_anchor: anchor }; segments])
    }

    pub fn joints(&self) -> &[RopeJoint] {
        &self.joints
    }

    pub fn anchor(&self) -> Vec3 {
        self.joints[0].connected_anchor
    }
}

impl AxisTarget for RopeJoints {
    fn value(&self) -> f32 {
        self.anchor().y
    }

    fn set_value(&mut self, value: f32) {
        let mut anchor = self.anchor();
        anchor.y = value;
        for joint in self.joints.iter_mut() {
            joint.connected_anchor = anchor;
        }
    }
}

/// Kinematic body parented to the jib; the carriage axis slides it along local X
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarriageAnchor {
    pub local_position: Vec3,
}

impl AxisTarget for CarriageAnchor {
    fn value(&self) -> f32 {
        self.local_position.x
    }

    fn set_value(&mut self, value: f32) {
        self.local_position.x = value;
    }
}

/// Everything the crane controller moves
#[derive(Debug, Clone, PartialEq)]
pub struct CraneRig {
    pub turret: TurretTransform,
    pub rope: RopeJoints,
    pub carriage: CarriageAnchor,
}

impl CraneRig {
    pub fn new(turret: TurretTransform, rope: RopeJoints, carriage: CarriageAnchor) -> Self {
        Self { turret, rope, carriage }
    }

    /// Turret facing forward, rope of `rope_segments` joints hanging 4m below the jib,
    /// carriage 5m out
    pub fn with_rope_segments(rope_segments: usize) -> Result<Self, CraneError> {
        Ok(Self::new(
            TurretTransform::default(),
            RopeJoints::uniform(rope_segments, Vec3::new(0.0, -4.0, 0.0))?,
            CarriageAnchor {
                local_position: Vec3::new(5.0, 0.0, 0.0),
            },
        ))
    }

    /// Default layout sized by a validated config
    pub fn from_config(config: &CraneConfig) -> Result<Self, CraneError> {
        config.validate()?;
        Self::with_rope_segments(config.rope_segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rope_is_rejected() {
        assert!(matches!(RopeJoints::new(Vec::new()), Err(CraneError::EmptyRope)));
    }

    #[test]
    fn test_rope_writes_every_joint() {
        let mut rope = RopeJoints::new(vec![
            RopeJoint { connected_anchor: Vec3::new(1.0, -2.0, 3.0) },
            RopeJoint { connected_anchor: Vec3::new(9.0, 9.0, 9.0) },
            RopeJoint { connected_anchor: Vec3::ZERO },
        ])
        .unwrap();

        assert_eq!(rope.value(), -2.0);
        rope.set_value(-5.5);

        for joint in rope.joints() {
            assert_eq!(joint.connected_anchor, Vec3::new(1.0, -5.5, 3.0));
        }
    }

    #[test]
    fn test_turret_and_carriage_drive_one_component() {
        let mut turret = TurretTransform { euler_angles: Vec3::new(10.0, 20.0, 30.0) };
        turret.set_value(380.0);
        assert_eq!(turret.euler_angles, Vec3::new(10.0, 380.0, 30.0));

        let mut carriage = CarriageAnchor { local_position: Vec3::new(1.0, 2.0, 3.0) };
        carriage.set_value(-4.0);
        assert_eq!(carriage.local_position, Vec3::new(-4.0, 2.0, 3.0));
        assert_eq!(carriage.value(), -4.0);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = CraneConfig {
            fixed_dt: f32::INFINITY,
            ..CraneConfig::default()
        };
        assert!(matches!(CraneRig::from_config(&config), Err(CraneError::Config(_))));

        let rig = CraneRig::from_config(&CraneConfig::default()).unwrap();
        assert_eq!(rig.rope.joints().len(), CraneConfig::default().rope_segments);
    }

    #[test]
    fn test_default_rig_layout() {
        let rig = CraneRig::with_rope_segments(8).unwrap();
        assert_eq!(rig.rope.joints().len(), 8);
        assert_eq!(rig.rope.value(), -4.0);
        assert_eq!(rig.carriage.value(), 5.0);
    }
}
