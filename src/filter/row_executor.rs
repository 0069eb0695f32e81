use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use crate::color::RGBColorFormat;
use crate::error::Error;
use crate::image::Image;
use crate::Result;

type Row = Vec<RGBColorFormat<f32>>;

/// Computes the rows of a filter output, either inline or in contiguous row
/// bands on a thread pool. Every band evaluates the same per-row function on
/// the same immutable source, so both modes yield identical images.
#[derive(Clone)]
pub struct RowExecutor {
    threadpool: Option<ThreadPool>,
}

impl RowExecutor {
    pub fn sequential() -> Self {
        RowExecutor { threadpool: None }
    }

    pub fn with_threads(number_of_threads: usize) -> Self {
        if number_of_threads <= 1 {
            return Self::sequential();
        }
        RowExecutor {
            threadpool: Some(ThreadPool::new(number_of_threads)),
        }
    }

    pub fn number_of_threads(&self) -> usize {
        self.threadpool
            .as_ref()
            .map_or(1, |threadpool| threadpool.max_count())
    }

    /// Builds an image of the source's size whose row `y` is `compute_row(source, y)`.
    pub fn map_rows<F>(&self, source: Arc<Image<f32>>, compute_row: F) -> Result<Image<f32>>
    where
        F: Fn(&Image<f32>, usize) -> Row + Send + Sync + 'static,
    {
        let width = source.width();
        let height = source.height();
        let dots = match &self.threadpool {
            Some(threadpool) if height > 1 => {
                Self::map_row_bands(threadpool, source, compute_row)?
            }
            _ => (0..height).flat_map(|y| compute_row(&source, y)).collect(),
        };
        Image::new(width, height, dots)
    }

    fn map_row_bands<F>(threadpool: &ThreadPool, source: Arc<Image<f32>>, compute_row: F) -> Result<Row>
    where
        F: Fn(&Image<f32>, usize) -> Row + Send + Sync + 'static,
    {
        let height = source.height();
        let number_of_bands = threadpool.max_count().min(height);
        let rows_per_band = height.div_ceil(number_of_bands);
        let compute_row = Arc::new(compute_row);
        let (sender, receiver) = mpsc::channel();
        let mut expected_bands = 0;
        for (band_index, first_row) in (0..height).step_by(rows_per_band).enumerate() {
            let last_row = (first_row + rows_per_band).min(height);
            let source = Arc::clone(&source);
            let compute_row = Arc::clone(&compute_row);
            let sender = sender.clone();
            threadpool.execute(move || {
                let band: Row = (first_row..last_row)
                    .flat_map(|y| compute_row(&source, y))
                    .collect();
                // the receiver only disappears after an earlier band failed
                let _ = sender.send((band_index, band));
            });
            expected_bands += 1;
        }
        drop(sender);

        let mut bands: Vec<(usize, Row)> = receiver.iter().collect();
        if bands.len() != expected_bands {
            return Err(Error::RowWorkerFailed(bands.len(), expected_bands));
        }
        bands.sort_by_key(|(band_index, _)| *band_index);
        Ok(bands.into_iter().flat_map(|(_, band)| band).collect())
    }
}

impl Default for RowExecutor {
    fn default() -> Self {
        Self::sequential()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::RowExecutor;
    use crate::color::RGBColorFormat;
    use crate::image::Image;

    fn numbered_image(width: usize, height: usize) -> Image<f32> {
        let dots = (0..width * height)
            .map(|i| RGBColorFormat::gray(i as f32 / 100.0))
            .collect();
        Image::new(width, height, dots).unwrap()
    }

    fn shifted_row(image: &Image<f32>, y: usize) -> Vec<RGBColorFormat<f32>> {
        (0..image.width() as isize)
            .map(|x| image.get_clamped(x + 1, y as isize - 1))
            .collect()
    }

    #[test]
    fn sequential_mode_follows_row_function() {
        let image = Arc::new(numbered_image(4, 3));
        let result = RowExecutor::sequential()
            .map_rows(Arc::clone(&image), shifted_row)
            .unwrap();
        assert_eq!(result.get(0, 0).unwrap(), image.get(1, 0).unwrap());
        assert_eq!(result.get(3, 2).unwrap(), image.get(3, 1).unwrap());
    }

    #[test]
    fn thread_pool_matches_sequential_result() {
        let image = Arc::new(numbered_image(5, 11));
        let expected = RowExecutor::sequential()
            .map_rows(Arc::clone(&image), shifted_row)
            .unwrap();
        for threads in [2, 3, 4, 16] {
            let actual = RowExecutor::with_threads(threads)
                .map_rows(Arc::clone(&image), shifted_row)
                .unwrap();
            assert_eq!(actual, expected, "{} threads differ", threads);
        }
    }

    #[test]
    fn single_thread_runs_inline() {
        assert_eq!(RowExecutor::with_threads(0).number_of_threads(), 1);
        assert_eq!(RowExecutor::with_threads(1).number_of_threads(), 1);
        assert_eq!(RowExecutor::with_threads(3).number_of_threads(), 3);
    }

    #[test]
    fn failing_band_is_reported() {
        let image = Arc::new(numbered_image(2, 4));
        let result = RowExecutor::with_threads(2).map_rows(image, |image, y| {
            if y == 3 {
                panic!("row worker test panic");
            }
            vec![RGBColorFormat::black(); image.width()]
        });
        assert!(result.is_err(), "panicking band must surface as error");
    }
}
