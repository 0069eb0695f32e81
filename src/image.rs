use crate::color::RGBColorFormat;
use crate::error::Error;
use crate::Result;

pub mod bmp_header;
pub mod reader;
pub mod writer;

pub trait ImageReader<T> {
    fn read_image(&mut self) -> Result<Image<T>>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> Result<()>;
}

/// A non-empty grid of pixels stored row by row, `y = 0` being the visual top.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    dots: Vec<RGBColorFormat<T>>,
}

impl<T: Copy> Image<T> {
    pub fn new(width: usize, height: usize, dots: Vec<RGBColorFormat<T>>) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        if width.checked_mul(height) != Some(dots.len()) {
            return Err(Error::InvalidDimensions(width as i64, height as i64));
        }
        Ok(Image {
            width,
            height,
            dots,
        })
    }

    pub fn filled(width: usize, height: usize, dot: RGBColorFormat<T>) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        let length = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions(width as i64, height as i64))?;
        Ok(Image {
            width,
            height,
            dots: vec![dot; length],
        })
    }

    fn check_dimensions(width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(width as i64, height as i64));
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dots(&self) -> &[RGBColorFormat<T>] {
        &self.dots
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[RGBColorFormat<T>]> {
        self.dots.chunks_exact(self.width)
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::PixelIndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<RGBColorFormat<T>> {
        let index = self.index_of(x, y)?;
        Ok(self.dots[index])
    }

    pub fn set(&mut self, x: usize, y: usize, dot: RGBColorFormat<T>) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.dots[index] = dot;
        Ok(())
    }

    /// Replicates the border: each coordinate is clamped into the image on
    /// its own, so any `x` and `y` resolve to a pixel.
    pub fn get_clamped(&self, x: isize, y: isize) -> RGBColorFormat<T> {
        let last_column = self.width as isize - 1;
        let last_row = self.height as isize - 1;
        let x = x.clamp(0, last_column) as usize;
        let y = y.clamp(0, last_row) as usize;
        self.dots[y * self.width + x]
    }

    /// Builds a new image of the same size from a per-pixel transformation.
    pub fn map_dots<F>(&self, f: F) -> Image<T>
    where
        F: Fn(RGBColorFormat<T>) -> RGBColorFormat<T>,
    {
        Image {
            width: self.width,
            height: self.height,
            dots: self.dots.iter().copied().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Image;
    use crate::color::RGBColorFormat;
    use crate::error::ErrorKind;

    fn numbered_image(width: usize, height: usize) -> Image<f32> {
        let dots = (0..width * height)
            .map(|i| RGBColorFormat::gray(i as f32))
            .collect();
        Image::new(width, height, dots).expect("dimensions are valid")
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for (width, height) in [(0, 3), (3, 0), (0, 0)] {
            let result = Image::filled(width, height, RGBColorFormat::black());
            let error = result.expect_err("empty image must be rejected");
            assert_eq!(error.kind(), ErrorKind::InvalidDimensions);
        }
    }

    #[test]
    fn dot_count_must_match_dimensions() {
        let dots = vec![RGBColorFormat::black(); 5];
        let error = Image::new(2, 3, dots).expect_err("5 dots cannot fill 2x3");
        assert_eq!(error.kind(), ErrorKind::InvalidDimensions);
    }

    #[test]
    fn get_and_set_use_row_major_order() {
        let mut image = numbered_image(3, 2);
        assert_eq!(image.get(2, 1).unwrap().red, 5.0);
        image.set(0, 1, RGBColorFormat::gray(42.0)).unwrap();
        assert_eq!(image.dots()[3].green, 42.0);
    }

    #[test]
    fn out_of_bounds_access_fails() {
        let mut image = numbered_image(3, 2);
        assert_eq!(image.get(3, 0).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(image.get(0, 2).unwrap_err().kind(), ErrorKind::Index);
        let error = image.set(5, 5, RGBColorFormat::black()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Index);
    }

    #[test]
    fn clamped_access_replicates_edges() {
        let image = numbered_image(3, 2);
        assert_eq!(image.get_clamped(-4, -1).red, 0.0);
        assert_eq!(image.get_clamped(7, 0).red, 2.0);
        assert_eq!(image.get_clamped(1, 9).red, 4.0);
        assert_eq!(image.get_clamped(-1, 9).red, 3.0);
        assert_eq!(image.get_clamped(1, 1).red, 4.0);
    }

    #[test]
    fn rows_split_by_width() {
        let image = numbered_image(4, 3);
        let rows: Vec<_> = image.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][0].red, 8.0);
    }
}
