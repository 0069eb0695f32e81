use crate::image::Image;
use crate::Result;

use blur::GaussianBlurFilter;
use crop::CropFilter;
use edge::EdgeDetectFilter;
use gamma::GammaFilter;
use grayscale::GrayscaleFilter;
use histogram::HistogramEqualizeFilter;
use median::MedianFilter;
use negative::NegativeFilter;
use row_executor::RowExecutor;
use sharpen::SharpenFilter;

pub mod blur;
pub mod convolution;
pub mod crop;
pub mod edge;
pub mod gamma;
pub mod grayscale;
pub mod histogram;
pub mod kernel;
pub mod median;
pub mod negative;
pub mod row_executor;
pub mod sharpen;

/// An image-to-image transformation. Filters never modify their input.
pub trait Filter {
    fn name(&self) -> &'static str;
    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>>;
}

/// Parameterized description of a filter, as given on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterSpec {
    Crop { width: i32, height: i32 },
    Grayscale,
    Negative,
    Sharpen,
    EdgeDetect { threshold: f32 },
    GaussianBlur { sigma: f32 },
    Median { radius: i32 },
    Gamma { value: f32 },
    HistogramEqualize,
}

impl FilterSpec {
    /// Validates the parameters and constructs the filter. Filters that work
    /// row by row share `executor`.
    pub fn build(&self, executor: &RowExecutor) -> Result<Box<dyn Filter>> {
        let filter: Box<dyn Filter> = match *self {
            FilterSpec::Crop { width, height } => Box::new(CropFilter::new(width, height)?),
            FilterSpec::Grayscale => Box::new(GrayscaleFilter),
            FilterSpec::Negative => Box::new(NegativeFilter),
            FilterSpec::Sharpen => Box::new(SharpenFilter::new(executor.clone())?),
            FilterSpec::EdgeDetect { threshold } => {
                Box::new(EdgeDetectFilter::new(threshold, executor.clone())?)
            }
            FilterSpec::GaussianBlur { sigma } => {
                Box::new(GaussianBlurFilter::new(sigma, executor.clone())?)
            }
            FilterSpec::Median { radius } => Box::new(MedianFilter::new(radius, executor.clone())?),
            FilterSpec::Gamma { value } => Box::new(GammaFilter::new(value)?),
            FilterSpec::HistogramEqualize => Box::new(HistogramEqualizeFilter),
        };
        Ok(filter)
    }
}
