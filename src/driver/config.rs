use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;
use crate::FT;

/// Parameters for one engine instance. The engine cannot be resized in place,
/// so any change to these values requires tearing the driver down and
/// initializing a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub viewport_width: FT,
    pub viewport_height: FT,
    pub particle_count: usize,
    pub smoothing_radius: FT,
    pub fixed_step_seconds: FT,
    pub grid_columns: usize,
}

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("particle_count must be positive")]
    InvalidParticleCount,
    #[error("smoothing_radius must be positive (got {0})")]
    InvalidSmoothingRadius(FT),
    #[error("fixed_step_seconds must be positive (got {0})")]
    InvalidFixedStep(FT),
    #[error("grid_columns must be positive")]
    InvalidGridColumns,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl SimulationConfig {
    /// Rejects invalid parameters outright; nothing is clamped or corrected.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.particle_count == 0 {
            return Err(InitializationError::InvalidParticleCount);
        }
        if !(self.smoothing_radius > 0.) {
            return Err(InitializationError::InvalidSmoothingRadius(self.smoothing_radius));
        }
        if !(self.fixed_step_seconds > 0.) {
            return Err(InitializationError::InvalidFixedStep(self.fixed_step_seconds));
        }
        if self.grid_columns == 0 {
            return Err(InitializationError::InvalidGridColumns);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SimulationConfig {
        SimulationConfig {
            viewport_width: 800.,
            viewport_height: 600.,
            particle_count: 100,
            smoothing_radius: 10.,
            fixed_step_seconds: 1. / 120.,
            grid_columns: 10,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn zero_particle_count_rejected() {
        let mut config = base_config();
        config.particle_count = 0;
        assert!(matches!(
            config.validate(),
            Err(InitializationError::InvalidParticleCount)
        ));
    }

    #[test]
    fn non_positive_smoothing_radius_rejected() {
        for bad in [0., -1., FT::NAN] {
            let mut config = base_config();
            config.smoothing_radius = bad;
            assert!(matches!(
                config.validate(),
                Err(InitializationError::InvalidSmoothingRadius(_))
            ));
        }
    }

    #[test]
    fn non_positive_fixed_step_rejected() {
        let mut config = base_config();
        config.fixed_step_seconds = 0.;
        assert!(matches!(
            config.validate(),
            Err(InitializationError::InvalidFixedStep(_))
        ));
    }

    #[test]
    fn zero_grid_columns_rejected() {
        let mut config = base_config();
        config.grid_columns = 0;
        assert!(matches!(
            config.validate(),
            Err(InitializationError::InvalidGridColumns)
        ));
    }
}
