use crate::config::{InitializationError, SimulationConfig};
use crate::engine::{Engine, EngineFactory, EngineSpec};
use crate::field_grid::{sampling_grid, FieldGrid};
use crate::marshal::{marshal_gradients, marshal_particles, BufferSizeError, GradientSample, ParticleSample};
use crate::FT;

/// Everything the display surface needs for one frame, rebuilt from the
/// engine's buffers on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSamples {
    pub particles: Vec<ParticleSample>,
    pub gradients: Vec<GradientSample>,
}

/// Owns the engine resource and converts wall-clock frame timestamps into a
/// deterministic number of fixed-size simulation steps.
///
/// Lifecycle: `initialize` is the only way to obtain a running driver (a
/// validation or engine failure leaves nothing initialized); `teardown`
/// releases the engine and is terminal. A frame callback that fires after
/// teardown sees a released engine and no-ops instead of dereferencing it.
pub struct SimulationDriver<E: Engine> {
    config: SimulationConfig,
    grid: FieldGrid,
    engine: Option<E>,
    accumulator: FT,
    last_timestamp: f64,
    pos_buf: Vec<FT>,
    vel_buf: Vec<FT>,
    gx_buf: Vec<FT>,
    gy_buf: Vec<FT>,
}

impl<E: Engine> SimulationDriver<E> {
    /// Validates the configuration, derives the sampling grid, constructs the
    /// engine and allocates the read-back buffers at their exact sizes.
    /// `now` is the current frame timestamp in seconds.
    pub fn initialize<F>(
        config: SimulationConfig,
        factory: &F,
        now: f64,
    ) -> Result<Self, InitializationError>
    where
        F: EngineFactory<Engine = E>,
    {
        config.validate()?;

        let grid = sampling_grid(config.viewport_width, config.viewport_height, config.grid_columns);
        let engine = factory.create(&EngineSpec {
            viewport_height: config.viewport_height,
            viewport_width: config.viewport_width,
            particle_count: config.particle_count,
            smoothing_radius: config.smoothing_radius,
            grid_rows: grid.rows,
            grid_cols: grid.cols,
        })?;

        Ok(SimulationDriver {
            config,
            grid,
            engine: Some(engine),
            accumulator: 0.,
            last_timestamp: now,
            pos_buf: vec![0.; config.particle_count * 2],
            vel_buf: vec![0.; config.particle_count * 2],
            gx_buf: vec![0.; grid.rows * grid.cols],
            gy_buf: vec![0.; grid.rows * grid.cols],
        })
    }

    /// Advances the simulation by every owed fixed step and marshals a fresh
    /// sample set. `now` is the frame timestamp in seconds.
    ///
    /// While `simulation_enabled` is false, elapsed time is not accumulated,
    /// but a remainder owed from before the pause is kept and drained on
    /// resume. No owed step is ever dropped; after a long stall the whole
    /// backlog is executed before this frame's samples are produced.
    ///
    /// Returns `Ok(None)` without side effects if the driver was torn down.
    pub fn on_frame(
        &mut self,
        now: f64,
        simulation_enabled: bool,
    ) -> Result<Option<FrameSamples>, BufferSizeError> {
        let engine = match self.engine.as_mut() {
            Some(engine) => engine,
            None => return Ok(None),
        };

        let elapsed = (now - self.last_timestamp) as FT;
        self.last_timestamp = now;

        if simulation_enabled {
            self.accumulator += elapsed;
        }
        while self.accumulator >= self.config.fixed_step_seconds {
            engine.tick(self.config.fixed_step_seconds);
            self.accumulator -= self.config.fixed_step_seconds;
        }

        engine.positions(&mut self.pos_buf);
        engine.velocities(&mut self.vel_buf);
        engine.gradients_x(&mut self.gx_buf);
        engine.gradients_y(&mut self.gy_buf);

        let particles = marshal_particles(&self.pos_buf, &self.vel_buf, self.config.particle_count)?;
        let gradients = marshal_gradients(&self.gx_buf, &self.gy_buf, &self.grid)?;

        Ok(Some(FrameSamples { particles, gradients }))
    }

    /// Releases the engine. Idempotent; all later `on_frame` calls no-op.
    pub fn teardown(&mut self) {
        self.engine = None;
    }

    pub fn is_live(&self) -> bool {
        self.engine.is_some()
    }

    pub fn accumulator(&self) -> FT {
        self.accumulator
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }
}
