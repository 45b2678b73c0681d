/*!
Binding to the pre-built simulation engine. The engine is an opaque resource
loaded by the host page under the `engine` namespace; everything it does is
reached through the narrow interface below.
*/

use wasm_bindgen::prelude::*;

use crate::engine::{Engine, EngineError, EngineFactory, EngineSpec};
use crate::FT;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = engine)]
    pub type ParticleWorld;

    #[wasm_bindgen(constructor, js_namespace = engine, catch)]
    fn new(
        height: f32,
        width: f32,
        amount_particles: u32,
        smoothing_radius: f32,
        grid_rows: u32,
        grid_cols: u32,
    ) -> Result<ParticleWorld, JsValue>;

    #[wasm_bindgen(method)]
    fn tick(this: &ParticleWorld, dt: f32);

    #[wasm_bindgen(method)]
    fn positions(this: &ParticleWorld, buf: &mut [f32]);

    #[wasm_bindgen(method)]
    fn velocities(this: &ParticleWorld, buf: &mut [f32]);

    #[wasm_bindgen(method)]
    fn gradients_x(this: &ParticleWorld, buf: &mut [f32]);

    #[wasm_bindgen(method)]
    fn gradients_y(this: &ParticleWorld, buf: &mut [f32]);
}

pub struct WasmEngine {
    world: ParticleWorld,
}

impl Engine for WasmEngine {
    fn tick(&mut self, dt: FT) {
        self.world.tick(dt);
    }

    fn positions(&self, buf: &mut [FT]) {
        self.world.positions(buf);
    }

    fn velocities(&self, buf: &mut [FT]) {
        self.world.velocities(buf);
    }

    fn gradients_x(&self, buf: &mut [FT]) {
        self.world.gradients_x(buf);
    }

    fn gradients_y(&self, buf: &mut [FT]) {
        self.world.gradients_y(buf);
    }
}

pub struct WasmEngineFactory;

impl EngineFactory for WasmEngineFactory {
    type Engine = WasmEngine;

    fn create(&self, spec: &EngineSpec) -> Result<WasmEngine, EngineError> {
        let world = ParticleWorld::new(
            spec.viewport_height,
            spec.viewport_width,
            spec.particle_count as u32,
            spec.smoothing_radius,
            spec.grid_rows as u32,
            spec.grid_cols as u32,
        )
        .map_err(|err| EngineError::Unavailable(format!("{:?}", err)))?;

        Ok(WasmEngine { world })
    }
}
