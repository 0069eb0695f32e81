use super::Filter;
use crate::error::Error;
use crate::image::Image;
use crate::Result;

const CROP_FILTER_NAME: &str = "crop";

/// Keeps the top-left `width` x `height` region, limited to the image size.
pub struct CropFilter {
    width: usize,
    height: usize,
}

impl CropFilter {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 {
            return Err(Error::invalid_parameter(CROP_FILTER_NAME, "width", width));
        }
        if height <= 0 {
            return Err(Error::invalid_parameter(CROP_FILTER_NAME, "height", height));
        }
        Ok(CropFilter {
            width: width as usize,
            height: height as usize,
        })
    }
}

impl Filter for CropFilter {
    fn name(&self) -> &'static str {
        CROP_FILTER_NAME
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        let width = self.width.min(image.width());
        let height = self.height.min(image.height());
        let dots = image
            .rows()
            .take(height)
            .flat_map(|row| row[..width].iter().copied())
            .collect();
        Image::new(width, height, dots)
    }
}
