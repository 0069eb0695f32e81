use std::sync::Arc;

use super::convolution::ConvolutionFilter;
use super::kernel::{Kernel, SHARPEN_KERNEL};
use super::row_executor::RowExecutor;
use super::Filter;
use crate::image::Image;
use crate::Result;

pub struct SharpenFilter {
    convolution: ConvolutionFilter,
}

impl SharpenFilter {
    pub fn new(executor: RowExecutor) -> Result<Self> {
        let kernel = Kernel::from_rows(&SHARPEN_KERNEL)?;
        Ok(SharpenFilter {
            convolution: ConvolutionFilter::new(kernel, executor),
        })
    }
}

impl Filter for SharpenFilter {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        self.convolution.convolve(Arc::new(image.clone()))
    }
}
