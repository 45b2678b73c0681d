use thiserror::Error;

use crate::{FieldGrid, FT};

/// One particle as read back from the engine's flat buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    pub x: FT,
    pub y: FT,
    pub dx: FT,
    pub dy: FT,
}

impl ParticleSample {
    pub fn speed(&self) -> FT {
        FT::hypot(self.dx, self.dy)
    }
}

/// One gradient vector anchored at the center of its grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSample {
    pub x: FT,
    pub y: FT,
    pub gx: FT,
    pub gy: FT,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{buffer} buffer too short: need {required} floats, got {actual}")]
pub struct BufferSizeError {
    pub buffer: &'static str,
    pub required: usize,
    pub actual: usize,
}

fn check_len(buffer: &'static str, buf: &[FT], required: usize) -> Result<(), BufferSizeError> {
    if buf.len() < required {
        return Err(BufferSizeError {
            buffer,
            required,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Interleaves positions and velocities into ordered particle samples.
/// Element `i` reads floats `2i` and `2i+1` from each buffer.
pub fn marshal_particles(
    positions: &[FT],
    velocities: &[FT],
    count: usize,
) -> Result<Vec<ParticleSample>, BufferSizeError> {
    check_len("positions", positions, 2 * count)?;
    check_len("velocities", velocities, 2 * count)?;

    Ok((0..count)
        .map(|i| ParticleSample {
            x: positions[2 * i],
            y: positions[2 * i + 1],
            dx: velocities[2 * i],
            dy: velocities[2 * i + 1],
        })
        .collect())
}

/// Pairs the row-major gradient components with their cell-center positions.
pub fn marshal_gradients(
    gx: &[FT],
    gy: &[FT],
    grid: &FieldGrid,
) -> Result<Vec<GradientSample>, BufferSizeError> {
    let required = grid.cell_count();
    check_len("gradients_x", gx, required)?;
    check_len("gradients_y", gy, required)?;

    let mut samples = Vec::with_capacity(required);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let i = row * grid.cols + col;
            let center = grid.cell_center(row, col);
            samples.push(GradientSample {
                x: center.x,
                y: center.y,
                gx: gx[i],
                gy: gy[i],
            });
        }
    }
    Ok(samples)
}
