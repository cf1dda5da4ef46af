use tracing::info;

use super::axis::{AxisMover, AxisStep};
use super::input::KeyInput;
use crate::config::CraneConfig;
use crate::model::CraneRig;

/// Result of one controller tick, per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraneStep {
    pub rotation: AxisStep,
    pub rope_length: AxisStep,
    pub carriage: AxisStep,
}

/// Drives turret rotation, rope length and carriage position from held keys
#[derive(Debug, Clone)]
pub struct CraneController {
    pub rotation: AxisMover,
    pub rope_length: AxisMover,
    pub carriage: AxisMover,
}

impl CraneController {
    pub fn new(config: &CraneConfig) -> Self {
        info!(
            rotation = ?config.keys.rotation,
            rope_length = ?config.keys.rope_length,
            carriage = ?config.keys.carriage,
            "crane controller ready"
        );
        Self {
            rotation: AxisMover::new("rotation", config.keys.rotation.clone(), config.rotation),
            rope_length: AxisMover::new("rope_length", config.keys.rope_length.clone(), config.rope_length),
            carriage: AxisMover::new("carriage", config.keys.carriage.clone(), config.carriage),
        }
    }

    /// One fixed simulation step
    pub fn tick(&mut self, input: &impl KeyInput, rig: &mut CraneRig, dt: f32) -> CraneStep {
        CraneStep {
            rotation: self.rotation.tick(input, &mut rig.turret, dt),
            rope_length: self.rope_length.tick(input, &mut rig.rope, dt),
            carriage: self.carriage.tick(input, &mut rig.carriage, dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{AxisPhase, InputEvent, InputState};

    const DT: f32 = 0.02;

    #[test]
    fn test_axes_move_independently() {
        let config = CraneConfig::default();
        let mut controller = CraneController::new(&config);
        let mut rig = CraneRig::with_rope_segments(4).unwrap();
        let start = rig.clone();

        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("e".to_string()));
        input.process_event(&InputEvent::KeyDown("s".to_string()));

        let step = controller.tick(&input, &mut rig, DT);

        assert_eq!(step.rotation.phase, AxisPhase::MovingPositive);
        assert_eq!(step.rope_length.phase, AxisPhase::MovingNegative);
        assert_eq!(step.carriage.phase, AxisPhase::Idle);

        assert!(rig.turret.euler_angles.y > 0.0);
        assert!(rig.rope.anchor().y < start.rope.anchor().y);
        assert_eq!(rig.carriage, start.carriage);
        assert!(rig.rope.joints().iter().all(|j| j.connected_anchor == rig.rope.anchor()));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut controller = CraneController::new(&CraneConfig::default());
        let mut rig = CraneRig::with_rope_segments(2).unwrap();
        let start = rig.clone();

        let mut input = InputState::new();
        for key in ["e", "q", "w", "s", "d", "a"] {
            input.process_event(&InputEvent::KeyDown(key.to_string()));
        }
        for _ in 0..10 {
            controller.tick(&input, &mut rig, DT);
        }

        assert_eq!(rig, start);
    }
}
