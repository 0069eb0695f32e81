use std::sync::Arc;

use super::row_executor::RowExecutor;
use super::Filter;
use crate::color::RGBColorFormat;
use crate::error::Error;
use crate::image::Image;
use crate::Result;

const MEDIAN_FILTER_NAME: &str = "median";
pub const MAX_MEDIAN_RADIUS: i32 = 64;

/// Per-channel median over the `(2 radius + 1)²` clamped neighborhood. The
/// radius ranges from 1 to [`MAX_MEDIAN_RADIUS`].
pub struct MedianFilter {
    radius: usize,
    executor: RowExecutor,
}

impl MedianFilter {
    pub fn new(radius: i32, executor: RowExecutor) -> Result<Self> {
        if !(1..=MAX_MEDIAN_RADIUS).contains(&radius) {
            return Err(Error::invalid_parameter(MEDIAN_FILTER_NAME, "radius", radius));
        }
        Ok(MedianFilter {
            radius: radius as usize,
            executor,
        })
    }

    pub fn window_side(&self) -> usize {
        2 * self.radius + 1
    }
}

impl Filter for MedianFilter {
    fn name(&self) -> &'static str {
        MEDIAN_FILTER_NAME
    }

    fn apply(&self, image: &Image<f32>) -> Result<Image<f32>> {
        let radius = self.radius;
        self.executor
            .map_rows(Arc::new(image.clone()), move |image, y| {
                median_row(image, radius, y)
            })
    }
}

struct Window {
    red: Vec<f32>,
    green: Vec<f32>,
    blue: Vec<f32>,
}

impl Window {
    fn with_capacity(capacity: usize) -> Self {
        Window {
            red: Vec::with_capacity(capacity),
            green: Vec::with_capacity(capacity),
            blue: Vec::with_capacity(capacity),
        }
    }

    fn clear(&mut self) {
        self.red.clear();
        self.green.clear();
        self.blue.clear();
    }

    fn push(&mut self, dot: RGBColorFormat<f32>) {
        self.red.push(dot.red);
        self.green.push(dot.green);
        self.blue.push(dot.blue);
    }

    fn median(&mut self) -> RGBColorFormat<f32> {
        RGBColorFormat::new(
            select_middle(&mut self.red),
            select_middle(&mut self.green),
            select_middle(&mut self.blue),
        )
    }
}

fn select_middle(values: &mut [f32]) -> f32 {
    let middle = values.len() / 2;
    *values.select_nth_unstable_by(middle, f32::total_cmp).1
}

fn median_row(image: &Image<f32>, radius: usize, y: usize) -> Vec<RGBColorFormat<f32>> {
    let radius = radius as isize;
    let side = (2 * radius + 1) as usize;
    let y = y as isize;
    let mut window = Window::with_capacity(side * side);
    (0..image.width() as isize)
        .map(|x| {
            window.clear();
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    window.push(image.get_clamped(x + dx, y + dy));
                }
            }
            window.median()
        })
        .collect()
}
