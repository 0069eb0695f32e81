use std::sync::Arc;

use super::convolution::ConvolutionFilter;
use super::kernel::Kernel;
use super::row_executor::RowExecutor;
use super::Filter;
use crate::error::Error;
use crate::image::Image;
use crate::Result;

const BLUR_FILTER_NAME: &str = "blur";
pub const MAX_BLUR_RADIUS: u32 = 1024;

/// Normalized 1D Gaussian weights covering `ceil(3 sigma)` pixels to each side,
/// at most [`MAX_BLUR_RADIUS`].
pub fn gaussian_weights(sigma: f32) -> Result<Vec<f32>> {
    let radius = (3.0 * sigma).ceil().max(1.0);
    if !(sigma > 0.0 && radius <= MAX_BLUR_RADIUS as f32) {
        return Err(Error::invalid_parameter(BLUR_FILTER_NAME, "sigma", sigma));
    }
    let radius = radius as i32;
    let denominator = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|i| {
            let offset = i as f32;
            (-(offset * offset) / denominator).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    for weight in weights.iter_mut() {
        *weight /= sum;
    }
    Ok(weights)
}

/// Separable Gaussian blur: one horizontal and one vertical pass with the same
/// 1D kernel, each clamping at the image border.
pub struct GaussianBlurFilter {
    sigma: f32,
    horizontal: ConvolutionFilter,
    vertical: ConvolutionFilter,
}

impl GaussianBlurFilter {
    pub fn new(sigma: f32, executor: RowExecutor) -> Result<Self> {
        let weights = gaussian_weights(sigma)?;
        log::debug!("Gaussian kernel for sigma {} has {} taps", sigma, weights.len());
        Ok(GaussianBlurFilter {
            sigma,
            horizontal: ConvolutionFilter::new(Kernel::horizontal(&weights)?, executor.clone()),
            vertical: ConvolutionFilter::new(Kernel::vertical(&weights)?, executor),
        })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl Filter for GaussianBlurFilter {
    fn name(&self) -> &'static str {
        BLUR_FILTER_NAME
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        let blurred_rows = self.horizontal.convolve(Arc::new(image.clone()))?;
        self.vertical.convolve(Arc::new(blurred_rows))
    }
}
