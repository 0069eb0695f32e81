use crate::filter::row_executor::RowExecutor;
use crate::filter::{Filter, FilterSpec};
use crate::image::Image;
use crate::Result;

/// An ordered list of filters; the output of each one feeds the next.
#[derive(Default)]
pub struct Pipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl Pipeline {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Pipeline { filters }
    }

    /// Builds every filter up front, so an invalid parameter is reported
    /// before any pixel is touched.
    pub fn from_specs(specs: &[FilterSpec], executor: &RowExecutor) -> Result<Self> {
        let filters = specs
            .iter()
            .map(|spec| spec.build(executor))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(filters))
    }

    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Applies the filters in order. The first failure aborts the run.
    pub fn apply(&self, image: Image<f32>) -> Result<Image<f32>> {
        let mut image = image;
        for (index, filter) in self.filters.iter().enumerate() {
            log::info!(
                "Applying filter {}/{}: {} to {}x{} image",
                index + 1,
                self.filters.len(),
                filter.name(),
                image.width(),
                image.height()
            );
            image = filter.apply(&image).inspect_err(|e| {
                log::error!("Filter {} failed: {}", filter.name(), e);
            })?;
        }
        Ok(image)
    }
}
