use super::Filter;
use crate::image::Image;
use crate::Result;

/// Inverts every channel.
pub struct NegativeFilter;

impl Filter for NegativeFilter {
    fn name(&self) -> &'static str {
        "negative"
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        Ok(image.map_dots(|dot| dot.map(|channel| 1.0 - channel).clamped()))
    }
}
