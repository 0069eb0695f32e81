use std::sync::Arc;

use super::kernel::Kernel;
use super::row_executor::RowExecutor;
use super::Filter;
use crate::color::RGBColorFormat;
use crate::image::Image;
use crate::Result;

/// Weighted sum of the clamped neighborhood around every pixel.
///
/// The kernel is centered on the output pixel; samples that fall outside the
/// image repeat the nearest border pixel. Channels are clamped to `[0, 1]`
/// after summation.
pub struct ConvolutionFilter {
    kernel: Arc<Kernel>,
    executor: RowExecutor,
}

impl ConvolutionFilter {
    pub fn new(kernel: Kernel, executor: RowExecutor) -> Self {
        ConvolutionFilter {
            kernel: Arc::new(kernel),
            executor,
        }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub(crate) fn convolve(&self, source: Arc<Image<f32>>) -> Result<Image<f32>> {
        let kernel = Arc::clone(&self.kernel);
        self.executor
            .map_rows(source, move |image, y| convolve_row(image, &kernel, y))
    }
}

impl Filter for ConvolutionFilter {
    fn name(&self) -> &'static str {
        "convolution"
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        self.convolve(Arc::new(image.clone()))
    }
}

fn convolve_row(image: &Image<f32>, kernel: &Kernel, y: usize) -> Vec<RGBColorFormat<f32>> {
    let radius_x = kernel.radius_x() as isize;
    let radius_y = kernel.radius_y() as isize;
    let y = y as isize;
    (0..image.width() as isize)
        .map(|x| {
            let mut sum = RGBColorFormat::black();
            for row in 0..kernel.height() {
                let sample_y = y + row as isize - radius_y;
                for column in 0..kernel.width() {
                    let weight = kernel.weight(column, row);
                    if weight == 0.0 {
                        continue;
                    }
                    let sample_x = x + column as isize - radius_x;
                    sum += image.get_clamped(sample_x, sample_y) * weight;
                }
            }
            sum.clamped()
        })
        .collect()
}
