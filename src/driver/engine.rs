use thiserror::Error;

use crate::FT;

/// Construction parameters for one engine instance. The grid dimensions size
/// the engine's gradient output buffers, so they must come from the same
/// `FieldGrid` the marshaler reads with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSpec {
    pub viewport_height: FT,
    pub viewport_width: FT,
    pub particle_count: usize,
    pub smoothing_radius: FT,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

/// The narrow call interface to the opaque simulation engine.
///
/// `tick` advances the simulation by exactly `dt` seconds. The read-back
/// methods overwrite caller-supplied buffers: `positions`/`velocities` write
/// `particle_count * 2` floats, `gradients_x`/`gradients_y` write
/// `grid_rows * grid_cols` floats in row-major order. Exact buffer sizing is
/// the caller's responsibility.
pub trait Engine {
    fn tick(&mut self, dt: FT);
    fn positions(&self, buf: &mut [FT]);
    fn velocities(&self, buf: &mut [FT]);
    fn gradients_x(&self, buf: &mut [FT]);
    fn gradients_y(&self, buf: &mut [FT]);
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine resource could not be obtained. Reported once; there is no
    /// automatic retry, a new top-level initialization attempt is required.
    #[error("engine unavailable: {0}")]
    Unavailable(String),
}

/// Creates engine instances. The driver goes through this seam so the opaque
/// wasm-imported engine and the test engines are interchangeable.
pub trait EngineFactory {
    type Engine: Engine;

    fn create(&self, spec: &EngineSpec) -> Result<Self::Engine, EngineError>;
}
