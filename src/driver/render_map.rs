use serde::{Deserialize, Serialize};

use crate::{vec2f, GradientSample, FT, V2};

/// Tunables for the speed/gradient visual mapping. Shared with the control
/// surface the same way the simulation parameters are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualizationParams {
    /// Speed at which the particle color saturates to red.
    pub max_speed: FT,
    /// Fixed multiplier from gradient magnitude to arrow length, in pixels.
    /// Not derived from the data range; large gradients may extend past the
    /// viewport.
    pub arrow_scale: FT,
}

impl Default for VisualizationParams {
    fn default() -> Self {
        VisualizationParams {
            max_speed: 600.,
            arrow_scale: 1.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: FT,
    pub saturation: FT,
    pub lightness: FT,
}

impl Hsl {
    pub fn css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Blue (hue 240) at rest, red (hue 0) at or above `max_speed`. Speeds above
/// `max_speed` clamp instead of extrapolating.
pub fn color_from_speed(speed: FT, max_speed: FT) -> Hsl {
    let t = FT::min(speed / max_speed, 1.);
    Hsl {
        hue: 240. - 240. * t,
        saturation: 100.,
        lightness: 50.,
    }
}

/// Head of the arrow whose tail sits at the sample's cell center.
pub fn arrow_endpoint(sample: &GradientSample, scale: FT) -> V2 {
    vec2f(sample.x + sample.gx * scale, sample.y + sample.gy * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_is_blue_at_rest() {
        assert_eq!(color_from_speed(0., 600.).hue, 240.);
    }

    #[test]
    fn hue_is_red_at_max_speed() {
        assert_eq!(color_from_speed(600., 600.).hue, 0.);
    }

    #[test]
    fn hue_clamps_above_max_speed() {
        assert_eq!(color_from_speed(1200., 600.).hue, 0.);
    }

    #[test]
    fn hue_interpolates_linearly() {
        let color = color_from_speed(5., 600.);
        assert_eq!(color.hue, 238.);
        assert_eq!(color.saturation, 100.);
        assert_eq!(color.lightness, 50.);
    }

    #[test]
    fn css_string_matches_display_format() {
        assert_eq!(color_from_speed(0., 600.).css(), "hsl(240, 100%, 50%)");
    }

    #[test]
    fn arrow_endpoint_offsets_by_scaled_gradient() {
        let sample = GradientSample {
            x: 280.,
            y: 187.5,
            gx: 2.,
            gy: -3.,
        };
        let head = arrow_endpoint(&sample, 10.);
        assert_eq!(head.x, 300.);
        assert_eq!(head.y, 157.5);
    }
}
