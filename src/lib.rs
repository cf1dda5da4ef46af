// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod error;
pub mod config;

// MVC Architecture
pub mod model;
pub mod controller;

pub use config::CraneConfig;
pub use error::{ConfigError, CraneError};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue, prelude::wasm_bindgen};
#[cfg(target_arch = "wasm32")]
use web_sys::{Window, Document, KeyboardEvent, Event};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
use controller::{CraneController, FixedStepDriver, InputEvent, InputState};
#[cfg(target_arch = "wasm32")]
use model::CraneRig;


#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let window = web_sys::window().ok_or(js_error("no global `window`"))?;
    let document = window.document().ok_or(js_error("no document on window"))?;
    setup_app(&window, &document, CraneConfig::default())
}

/// Wire keyboard listeners and the fixed-step loop for the browser
#[cfg(target_arch = "wasm32")]
fn setup_app(window: &Window, document: &Document, config: CraneConfig) -> Result<(), JsValue> {
    let mut rig = CraneRig::from_config(&config)
        .map_err(|e| js_error(e.to_string()))?;
    let mut driver = FixedStepDriver::from_config(&config)
        .map_err(|e| js_error(e.to_string()))?;
    let mut controller = CraneController::new(&config);

    let input_state = Rc::new(RefCell::new(InputState::new()));
    setup_input_listeners(document, window, input_state.clone())?;

    let performance = window.performance().ok_or(js_error("no performance on window"))?;
    let mut last_time = performance.now();
    let mut since_report = 0.0f32;

    let f = RcCellCallback::new(window.clone(), move || {
        let now = performance.now();
        let frame_dt = ((now - last_time) / 1000.0) as f32;
        last_time = now;

        let steps = driver.advance(frame_dt);
        let input = input_state.borrow();
        for _ in 0..steps {
            controller.tick(&*input, &mut rig, driver.fixed_dt());
        }

        since_report += frame_dt;
        if since_report >= 1.0 {
            since_report = 0.0;
            tracing::info!(
                yaw = rig.turret.euler_angles.y,
                rope_anchor = rig.rope.anchor().y,
                carriage = rig.carriage.local_position.x,
                "crane state"
            );
        }
    });
    f.start();

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    document: &Document,
    window: &Window,
    input_state: Rc<RefCell<InputState>>,
) -> Result<(), JsValue> {
    // Keyboard down
    {
        let input_state = input_state.clone();
        let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let event = controller::input::wasm::keyboard_event_to_input(&e, true);
            input_state.borrow_mut().process_event(&event);
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Keyboard up
    {
        let input_state = input_state.clone();
        let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let event = controller::input::wasm::keyboard_event_to_input(&e, false);
            input_state.borrow_mut().process_event(&event);
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        keyup.forget();
    }

    // Focus loss - release all keys
    {
        let input_state = input_state.clone();
        let blur = Closure::wrap(Box::new(move |_e: Event| {
            input_state.borrow_mut().process_event(&InputEvent::FocusLost);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        blur.forget();
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn js_error<E: Into<String>>(msg: E) -> JsValue {
    JsValue::from_str(&msg.into())
}

#[cfg(target_arch = "wasm32")]
struct RcCellCallback {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
    window: Window,
}

#[cfg(target_arch = "wasm32")]
impl RcCellCallback {
    fn new(window: Window, f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
            window,
        }
    }

    fn start(self) {
        let inner = self.inner.clone();
        let window = self.window.clone();

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            inner.borrow_mut().as_mut()();

            // Schedule next frame
            if let Some(cb) = callback_clone.borrow().as_ref() {
                if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_err() {
                    tracing::error!("requestAnimationFrame failed, crane loop stopped");
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = callback.borrow().as_ref() {
            if self.window.request_animation_frame(cb.as_ref().unchecked_ref()).is_err() {
                tracing::error!("requestAnimationFrame failed, crane loop not started");
            }
        }

        // Leak the closure to keep it alive
        std::mem::forget(callback);
    }
}
