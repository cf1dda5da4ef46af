use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::Key,
    window::Window,
};

// Import from the library crate
use crane_rig::{
    logging, controller, model,
    CraneConfig,
};

use controller::{CraneController, FixedStepDriver, InputEvent, InputState};
use model::CraneRig;

#[derive(Parser)]
#[command(name = "crane_rig", about = "Keyboard-driven crane rig: turret, rope and carriage")]
struct Cli {
    /// TOML file with axis tuning and key bindings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run this many fixed steps without opening a window
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,

    /// Key held for the whole headless run (repeatable)
    #[arg(long = "hold", value_name = "KEY")]
    hold: Vec<String>,
}

struct App {
    window: Window,
    config: CraneConfig,
    rig: CraneRig,
    controller: CraneController,
    driver: FixedStepDriver,
    input_state: InputState,

    // Frame timing
    last_frame_time: Instant,
    report_timer: f32,
}

impl App {
    fn new(window: Window, config: CraneConfig) -> Result<Self> {
        let rig = CraneRig::from_config(&config)?;
        let driver = FixedStepDriver::from_config(&config)?;
        let controller = CraneController::new(&config);
        Ok(Self {
            window,
            config,
            rig,
            controller,
            driver,
            input_state: InputState::new(),
            last_frame_time: Instant::now(),
            report_timer: 0.0,
        })
    }

    /// Returns true if the event was consumed as crane input
    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = key_name(&event.logical_key) else {
                    return false;
                };
                let input = match event.state {
                    ElementState::Pressed => InputEvent::KeyDown(key),
                    ElementState::Released => InputEvent::KeyUp(key),
                };
                self.input_state.process_event(&input);
                true
            }
            WindowEvent::Focused(false) => {
                self.input_state.process_event(&InputEvent::FocusLost);
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, frame_dt: f32) {
        let steps = self.driver.advance(frame_dt);
        for _ in 0..steps {
            self.controller.tick(&self.input_state, &mut self.rig, self.driver.fixed_dt());
        }

        self.report_timer += frame_dt;
        if self.report_timer >= 1.0 {
            self.report_timer = 0.0;
            report(&self.rig);
        }
    }

    fn next_wake(&self) -> Instant {
        Instant::now() + Duration::from_secs_f32(self.config.fixed_dt)
    }
}

fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_string()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

fn report(rig: &CraneRig) {
    tracing::info!(
        yaw = rig.turret.euler_angles.y,
        rope_anchor = rig.rope.anchor().y,
        carriage = rig.carriage.local_position.x,
        "crane state"
    );
}

fn run_headless(config: &CraneConfig, ticks: u32, hold: &[String]) -> Result<()> {
    let mut rig = CraneRig::from_config(config)?;
    let mut controller = CraneController::new(config);
    let mut input = InputState::new();
    for key in hold {
        input.process_event(&InputEvent::KeyDown(key.clone()));
    }

    tracing::info!(ticks, ?hold, "running headless");
    for _ in 0..ticks {
        controller.tick(&input, &mut rig, config.fixed_dt);
    }
    report(&rig);
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CraneConfig::from_file(path)
            .with_context(|| format!("failed to load crane config from {}", path.display()))?,
        None => CraneConfig::default(),
    };

    if let Some(ticks) = cli.headless {
        return run_headless(&config, ticks, &cli.hold);
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let window_attributes = Window::default_attributes()
        .with_title("Crane Rig - Native")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360));
    let window = event_loop
        .create_window(window_attributes)
        .context("failed to create window")?;

    let mut app = App::new(window, config)?;

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    if let WindowEvent::CloseRequested = event {
                        elwt.exit();
                    }
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = (now - app.last_frame_time).as_secs_f32();
                app.last_frame_time = now;

                app.update(dt);
                elwt.set_control_flow(ControlFlow::WaitUntil(app.next_wake()));
            }
            _ => {}
        }
    }).context("event loop terminated with an error")?;

    Ok(())
}
