use super::Filter;
use crate::color::RGBColorFormat;
use crate::image::Image;
use crate::Result;

/// Replaces every pixel by its luma `0.299 r + 0.587 g + 0.114 b`.
pub struct GrayscaleFilter;

impl GrayscaleFilter {
    pub(crate) fn to_grayscale(image: &Image<f32>) -> Image<f32> {
        image.map_dots(|dot| RGBColorFormat::gray(dot.luma()).clamped())
    }
}

impl Filter for GrayscaleFilter {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        Ok(Self::to_grayscale(image))
    }
}
