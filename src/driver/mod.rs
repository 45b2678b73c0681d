pub mod config;
pub mod driver;
pub mod engine;
pub mod field_grid;
pub mod marshal;
pub mod render_map;

/// The engine's wire format is `Float32Array`, so every quantity that crosses
/// the call boundary is an `f32`.
pub type FT = f32;

pub type V2 = nalgebra::Vector2<FT>;

pub fn vec2f(x: FT, y: FT) -> V2 {
    [x, y].into()
}

pub use config::{InitializationError, SimulationConfig};
pub use driver::{FrameSamples, SimulationDriver};
pub use engine::{Engine, EngineError, EngineFactory, EngineSpec};
pub use field_grid::{sampling_grid, FieldGrid};
pub use marshal::{marshal_gradients, marshal_particles, BufferSizeError, GradientSample, ParticleSample};
pub use render_map::{arrow_endpoint, color_from_speed, Hsl, VisualizationParams};
