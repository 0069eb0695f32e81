use std::sync::Arc;

use super::convolution::ConvolutionFilter;
use super::grayscale::GrayscaleFilter;
use super::kernel::{Kernel, LAPLACIAN_KERNEL};
use super::row_executor::RowExecutor;
use super::Filter;
use crate::color::RGBColorFormat;
use crate::error::Error;
use crate::image::Image;
use crate::Result;

const EDGE_FILTER_NAME: &str = "edge";

/// Binarized Laplacian response of the grayscale image.
///
/// The threshold lives on the same normalized `[0, 1]` scale as the pixel
/// channels. Values outside that range are accepted and simply produce an
/// all-white or all-black image.
pub struct EdgeDetectFilter {
    threshold: f32,
    laplacian: ConvolutionFilter,
}

impl EdgeDetectFilter {
    pub fn new(threshold: f32, executor: RowExecutor) -> Result<Self> {
        if threshold.is_nan() {
            return Err(Error::invalid_parameter(
                EDGE_FILTER_NAME,
                "threshold",
                threshold,
            ));
        }
        let kernel = Kernel::from_rows(&LAPLACIAN_KERNEL)?;
        Ok(EdgeDetectFilter {
            threshold,
            laplacian: ConvolutionFilter::new(kernel, executor),
        })
    }
}

impl Filter for EdgeDetectFilter {
    fn name(&self) -> &'static str {
        EDGE_FILTER_NAME
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        let grayscale = Arc::new(GrayscaleFilter::to_grayscale(image));
        let response = self.laplacian.convolve(grayscale)?;
        Ok(response.map_dots(|dot| {
            if dot.red > self.threshold {
                RGBColorFormat::white()
            } else {
                RGBColorFormat::black()
            }
        }))
    }
}
