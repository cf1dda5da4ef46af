use crane_rig::controller::{AxisPhase, CraneController, FixedStepDriver, InputEvent, InputState};
use crane_rig::model::CraneRig;
use crane_rig::CraneConfig;

fn press(input: &mut InputState, key: &str) {
    input.process_event(&InputEvent::KeyDown(key.to_string()));
}

fn release(input: &mut InputState, key: &str) {
    input.process_event(&InputEvent::KeyUp(key.to_string()));
}

/// Run `frames` frames of `frame_dt` seconds through the fixed-step driver
fn run_frames(
    driver: &mut FixedStepDriver,
    controller: &mut CraneController,
    input: &InputState,
    rig: &mut CraneRig,
    frames: u32,
    frame_dt: f32,
) -> u32 {
    let mut ticks = 0;
    for _ in 0..frames {
        for _ in 0..driver.advance(frame_dt) {
            controller.tick(input, rig, driver.fixed_dt());
            ticks += 1;
        }
    }
    ticks
}

#[test]
fn rope_winds_down_to_its_limit_and_stops() {
    let config = CraneConfig::default();
    let mut driver = FixedStepDriver::from_config(&config).unwrap();
    let mut controller = CraneController::new(&config);
    let mut rig = CraneRig::with_rope_segments(config.rope_segments).unwrap();
    let mut input = InputState::new();

    press(&mut input, "s");
    // Ten seconds at 60 fps is far more than the rope needs to reach the bottom.
    let ticks = run_frames(&mut driver, &mut controller, &input, &mut rig, 600, 1.0 / 60.0);

    assert!(ticks > 0);
    assert_eq!(rig.rope.anchor().y, config.rope_length.limit_min);
    assert!(rig
        .rope
        .joints()
        .iter()
        .all(|joint| joint.connected_anchor.y == config.rope_length.limit_min));
}

#[test]
fn carriage_stays_inside_its_rail() {
    let config = CraneConfig::default();
    let mut driver = FixedStepDriver::from_config(&config).unwrap();
    let mut controller = CraneController::new(&config);
    let mut rig = CraneRig::with_rope_segments(config.rope_segments).unwrap();
    let mut input = InputState::new();

    for (key, seconds) in [("d", 8), ("a", 3), ("d", 1), ("a", 12)] {
        press(&mut input, key);
        for _ in 0..seconds * 30 {
            run_frames(&mut driver, &mut controller, &input, &mut rig, 1, 1.0 / 30.0);
            let x = rig.carriage.local_position.x;
            assert!(x >= config.carriage.limit_min - 1e-4 && x <= config.carriage.limit_max + 1e-4);
        }
        release(&mut input, key);
    }

    assert!((rig.carriage.local_position.x - config.carriage.limit_min).abs() < 1e-4);
}

#[test]
fn turret_spins_freely_and_reverses_smoothly() {
    let config = CraneConfig::default();
    let mut controller = CraneController::new(&config);
    let mut rig = CraneRig::with_rope_segments(1).unwrap();
    let mut input = InputState::new();
    let dt = config.fixed_dt;

    press(&mut input, "e");
    let mut last = controller.tick(&input, &mut rig, dt);
    for _ in 0..100 {
        last = controller.tick(&input, &mut rig, dt);
    }
    assert_eq!(last.rotation.phase, AxisPhase::MovingPositive);
    let full_speed_delta = last.rotation.delta;
    assert!(full_speed_delta <= config.rotation.change_speed * dt + 1e-5);

    release(&mut input, "e");
    press(&mut input, "q");
    let reversed = controller.tick(&input, &mut rig, dt);

    assert_eq!(reversed.rotation.phase, AxisPhase::MovingNegative);
    assert!(reversed.rotation.delta < 0.0);
    assert!(reversed.rotation.delta.abs() < full_speed_delta);
    // Untouched axes report idle.
    assert_eq!(reversed.rope_length.phase, AxisPhase::Idle);
    assert_eq!(reversed.carriage.phase, AxisPhase::Idle);
}

#[test]
fn custom_bindings_from_toml() {
    let config = CraneConfig::from_toml(
        r#"
        [keys]
        rotation = ["ArrowRight", "ArrowLeft"]
        "#,
    )
    .unwrap();
    let mut controller = CraneController::new(&config);
    let mut rig = CraneRig::with_rope_segments(2).unwrap();
    let mut input = InputState::new();

    press(&mut input, "e");
    controller.tick(&input, &mut rig, config.fixed_dt);
    assert_eq!(rig.turret.euler_angles.y, 0.0);

    press(&mut input, "ArrowLeft");
    controller.tick(&input, &mut rig, config.fixed_dt);
    assert!(rig.turret.euler_angles.y < 0.0);
}
