// MODEL: Crane rig state driven by the controller
pub mod rig;

pub use rig::{AxisTarget, CarriageAnchor, CraneRig, RopeJoint, RopeJoints, TurretTransform};
