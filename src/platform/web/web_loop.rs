use std::panic;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::engine_binding::{WasmEngine, WasmEngineFactory};
use crate::{
    arrow_endpoint, color_from_speed, FrameSamples, SimulationConfig, SimulationDriver, VisualizationParams, FT,
};

#[wasm_bindgen]
extern "C" {
    // Display hooks provided by the host page. The actual drawing lives there;
    // this side only stages flat vertex data.
    #[wasm_bindgen(js_namespace = display, js_name = drawParticles)]
    fn draw_particles(data: &[f32], radius: f32);

    #[wasm_bindgen(js_namespace = display, js_name = drawArrows)]
    fn draw_arrows(data: &[f32]);
}

/// Written by the exported setters, read by the frame callback. Both sides run
/// on the same cooperative thread; the mutex only satisfies the static's
/// `Sync` bound.
#[derive(Debug, Clone, Copy)]
pub struct ControlState {
    pub simulation_enabled: bool,
}

pub struct GlobalState {
    pub driver: SimulationDriver<WasmEngine>,
    pub shared_controls: Arc<Mutex<ControlState>>,
    pub shared_visualization_params: Arc<Mutex<VisualizationParams>>,
    pub shared_restart: Arc<Mutex<bool>>,
    pub pending_config: Arc<Mutex<SimulationConfig>>,
    pub raf_handle: i32,
}

pub static GLOBAL_STATE: Lazy<Mutex<SendWrapper<Option<GlobalState>>>> =
    Lazy::new(|| Mutex::new(SendWrapper::new(None)));

static FRAME_CLOSURE: Lazy<Mutex<SendWrapper<Option<Closure<dyn FnMut(f64)>>>>> =
    Lazy::new(|| Mutex::new(SendWrapper::new(None)));

fn now_seconds() -> f64 {
    web_sys::window().unwrap().performance().unwrap().now() / 1000.
}

fn schedule_frame() -> i32 {
    let closure_guard = FRAME_CLOSURE.lock().unwrap();
    let closure = closure_guard.as_ref().unwrap();
    let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
    web_sys::window()
        .unwrap()
        .request_animation_frame(callback)
        .unwrap()
}

#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    panic::set_hook(Box::new(console_error_panic_hook::hook));

    let config_yaml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/default-config-web.yaml"));
    let mut config: SimulationConfig =
        serde_yaml::from_str(config_yaml).expect("failed parsing default simulation config");

    let window = web_sys::window().unwrap();
    config.viewport_width = window.inner_width()?.as_f64().unwrap() as FT;
    config.viewport_height = window.inner_height()?.as_f64().unwrap() as FT;

    let driver = match SimulationDriver::initialize(config, &WasmEngineFactory, now_seconds()) {
        Ok(driver) => driver,
        Err(err) => {
            // no retry; a new top-level start() is required
            console_log!("initialization failed: {}", err);
            return Err(JsValue::from_str(&err.to_string()));
        }
    };

    *FRAME_CLOSURE.lock().unwrap() = SendWrapper::new(Some(Closure::<dyn FnMut(f64)>::new(on_frame)));

    *GLOBAL_STATE.lock().unwrap() = SendWrapper::new(Some(GlobalState {
        driver,
        shared_controls: Arc::new(Mutex::new(ControlState {
            simulation_enabled: true,
        })),
        shared_visualization_params: Arc::new(Mutex::new(VisualizationParams::default())),
        shared_restart: Arc::new(Mutex::new(false)),
        pending_config: Arc::new(Mutex::new(config)),
        raf_handle: 0,
    }));

    let handle = schedule_frame();
    GLOBAL_STATE.lock().unwrap().as_mut().unwrap().raf_handle = handle;

    Ok(())
}

fn on_frame(now_ms: f64) {
    let frame = {
        let mut mutex_guard = GLOBAL_STATE.lock().unwrap();
        let state = match mutex_guard.as_mut() {
            Some(state) => state,
            // stray callback after teardown
            None => return,
        };

        {
            let mut shared_restart_mut = state.shared_restart.lock().unwrap();
            if *shared_restart_mut {
                let pending_config = { *state.pending_config.lock().unwrap() };
                state.driver.teardown();
                match SimulationDriver::initialize(pending_config, &WasmEngineFactory, now_ms / 1000.) {
                    Ok(driver) => state.driver = driver,
                    Err(err) => {
                        // the old engine is already released; stop scheduling
                        console_log!("reinitialization failed: {}", err);
                        return;
                    }
                }
                *shared_restart_mut = false;
            }
        }

        let simulation_enabled = { state.shared_controls.lock().unwrap().simulation_enabled };
        let visualization_params = { *state.shared_visualization_params.lock().unwrap() };
        let smoothing_radius = state.driver.config().smoothing_radius;

        match state.driver.on_frame(now_ms / 1000., simulation_enabled) {
            Ok(Some(samples)) => Some((samples, smoothing_radius, visualization_params)),
            Ok(None) => return,
            // a bad frame is logged and skipped, never torn down
            Err(err) => {
                console_log!("frame dropped: {}", err);
                None
            }
        }
    };

    // the display hooks may call back into the exported setters, so the
    // global lock must not be held while they run
    if let Some((samples, smoothing_radius, visualization_params)) = frame {
        publish(&samples, smoothing_radius, visualization_params);
    }

    let mut mutex_guard = GLOBAL_STATE.lock().unwrap();
    if let Some(state) = mutex_guard.as_mut() {
        state.raf_handle = schedule_frame();
    }
}

/// Stages the samples as flat vertex data for the host display layer:
/// `[x, y, hue]` per particle, `[tail_x, tail_y, head_x, head_y]` per arrow.
fn publish(samples: &FrameSamples, smoothing_radius: FT, visualization_params: VisualizationParams) {
    let mut particle_vertices: Vec<f32> = Vec::with_capacity(samples.particles.len() * 3);
    for particle in &samples.particles {
        let color = color_from_speed(particle.speed(), visualization_params.max_speed);
        particle_vertices.extend_from_slice(&[particle.x, particle.y, color.hue]);
    }

    let mut arrow_vertices: Vec<f32> = Vec::with_capacity(samples.gradients.len() * 4);
    for gradient in &samples.gradients {
        let head = arrow_endpoint(gradient, visualization_params.arrow_scale);
        arrow_vertices.extend_from_slice(&[gradient.x, gradient.y, head.x, head.y]);
    }

    draw_particles(&particle_vertices, smoothing_radius);
    draw_arrows(&arrow_vertices);
}

#[wasm_bindgen]
pub fn teardown() {
    let mut mutex_guard = GLOBAL_STATE.lock().unwrap();
    if let Some(state) = mutex_guard.as_mut() {
        web_sys::window()
            .unwrap()
            .cancel_animation_frame(state.raf_handle)
            .unwrap();
        state.driver.teardown();
    }
    *mutex_guard = SendWrapper::new(None);
}

#[wasm_bindgen]
pub fn set_simulation_enabled(enabled: bool) {
    let mut mutex_guard = GLOBAL_STATE.lock().unwrap();
    if let Some(state) = mutex_guard.as_mut() {
        state.shared_controls.lock().unwrap().simulation_enabled = enabled;
    }
}

fn update_config(update: impl FnOnce(&mut SimulationConfig)) {
    let mut mutex_guard = GLOBAL_STATE.lock().unwrap();
    if let Some(state) = mutex_guard.as_mut() {
        update(&mut *state.pending_config.lock().unwrap());
        // the engine cannot be reconfigured in place
        *state.shared_restart.lock().unwrap() = true;
    }
}

#[wasm_bindgen]
pub fn set_particle_count(particle_count: u32) {
    update_config(|config| config.particle_count = particle_count as usize);
}

#[wasm_bindgen]
pub fn set_smoothing_radius(smoothing_radius: f32) {
    update_config(|config| config.smoothing_radius = smoothing_radius);
}

#[wasm_bindgen]
pub fn set_fixed_step_seconds(fixed_step_seconds: f32) {
    update_config(|config| config.fixed_step_seconds = fixed_step_seconds);
}

#[wasm_bindgen]
pub fn set_grid_columns(grid_columns: u32) {
    update_config(|config| config.grid_columns = grid_columns as usize);
}

#[wasm_bindgen]
pub fn set_viewport(width: f32, height: f32) {
    update_config(|config| {
        config.viewport_width = width;
        config.viewport_height = height;
    });
}

#[wasm_bindgen]
pub fn set_max_speed(max_speed: f32) {
    let mut mutex_guard = GLOBAL_STATE.lock().unwrap();
    if let Some(state) = mutex_guard.as_mut() {
        state.shared_visualization_params.lock().unwrap().max_speed = max_speed;
    }
}

#[wasm_bindgen]
pub fn set_arrow_scale(arrow_scale: f32) {
    let mut mutex_guard = GLOBAL_STATE.lock().unwrap();
    if let Some(state) = mutex_guard.as_mut() {
        state.shared_visualization_params.lock().unwrap().arrow_scale = arrow_scale;
    }
}
