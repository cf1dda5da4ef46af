// CONTROLLER: Input, axis smoothing, and the fixed-step update loop
pub mod input;
pub mod smoothing;
pub mod axis;
pub mod crane_controller;
pub mod frame_loop;

pub use input::{AxisKeys, Direction, InputEvent, InputState, KeyBindings, KeyInput};
pub use smoothing::{AxisConfig, AxisRuntimeState, AxisSmoother};
pub use axis::{AxisMover, AxisPhase, AxisStep};
pub use crane_controller::{CraneController, CraneStep};
pub use frame_loop::FixedStepDriver;
