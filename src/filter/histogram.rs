use super::Filter;
use crate::color::{channel_from_sample, channel_to_sample, RGBColorFormat};
use crate::image::Image;
use crate::Result;

const NUMBER_OF_BUCKETS: usize = 256;

/// Spreads the luma distribution over the full range and returns a grayscale
/// image. An image whose pixels all share one luma level is returned as is.
pub struct HistogramEqualizeFilter;

struct LumaHistogram {
    levels: Vec<u8>,
    counts: [u64; NUMBER_OF_BUCKETS],
}

impl LumaHistogram {
    fn of(image: &Image<f32>) -> Self {
        let levels: Vec<u8> = image
            .dots()
            .iter()
            .map(|dot| channel_to_sample(dot.luma()))
            .collect();
        let mut counts = [0u64; NUMBER_OF_BUCKETS];
        for &level in &levels {
            counts[level as usize] += 1;
        }
        LumaHistogram { levels, counts }
    }

    fn cumulative(&self) -> [u64; NUMBER_OF_BUCKETS] {
        let mut cdf = [0u64; NUMBER_OF_BUCKETS];
        let mut running = 0;
        for (bucket, count) in cdf.iter_mut().zip(self.counts) {
            running += count;
            *bucket = running;
        }
        cdf
    }
}

impl Filter for HistogramEqualizeFilter {
    fn name(&self) -> &'static str {
        "histogram equalization"
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        let histogram = LumaHistogram::of(image);
        let cdf = histogram.cumulative();
        let total = histogram.levels.len() as u64;
        let cdf_min = cdf.iter().copied().find(|&count| count > 0).unwrap_or(0);
        if total == cdf_min {
            log::warn!("Every pixel has the same luma, skipping histogram equalization");
            return Ok(image.clone());
        }
        let range = (total - cdf_min) as f64;
        let mapping: Vec<f32> = cdf
            .iter()
            .map(|&count| {
                let scaled = (count.saturating_sub(cdf_min) as f64 / range * 255.0).round();
                channel_from_sample(scaled.clamp(0.0, 255.0) as u8)
            })
            .collect();
        let dots = histogram
            .levels
            .iter()
            .map(|&level| RGBColorFormat::gray(mapping[level as usize]))
            .collect();
        Image::new(image.width(), image.height(), dots)
    }
}
