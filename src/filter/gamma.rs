use super::Filter;
use crate::color::quantize_channel;
use crate::error::Error;
use crate::image::Image;
use crate::Result;

const GAMMA_FILTER_NAME: &str = "gamma";

/// Raises every channel to `1 / gamma` and rounds to the nearest 8-bit level.
/// Values above one brighten the image, values below one darken it.
pub struct GammaFilter {
    exponent: f32,
}

impl GammaFilter {
    pub fn new(gamma: f32) -> Result<Self> {
        if !(gamma > 0.0 && gamma.is_finite()) {
            return Err(Error::invalid_parameter(GAMMA_FILTER_NAME, "value", gamma));
        }
        Ok(GammaFilter {
            exponent: 1.0 / gamma,
        })
    }
}

impl Filter for GammaFilter {
    fn name(&self) -> &'static str {
        GAMMA_FILTER_NAME
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        Ok(image.map_dots(|dot| {
            dot.map(|channel| quantize_channel(channel.clamp(0.0, 1.0).powf(self.exponent)))
        }))
    }
}
