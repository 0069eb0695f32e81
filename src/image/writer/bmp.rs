use std::io::Write;

use super::super::bmp_header::{
    row_stride, FileHeader, InfoHeader, BYTES_PER_PIXEL, PIXEL_DATA_OFFSET,
};
use super::super::{Image, ImageWriter};
use crate::error::Error;

pub struct BmpImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Image<f32>,
}

impl<'a, T: Write> BmpImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Image<f32>) -> Self {
        Self { writer, image }
    }

    fn invalid_dimensions(&self) -> Error {
        Error::InvalidDimensions(self.image.width() as i64, self.image.height() as i64)
    }

    fn create_headers(&self) -> crate::Result<(FileHeader, InfoHeader)> {
        let width = self.image.width();
        let height = self.image.height();
        if width == 0 || height == 0 {
            return Err(self.invalid_dimensions());
        }
        let image_size = row_stride(width)
            .checked_mul(height)
            .and_then(|size| u32::try_from(size).ok())
            .ok_or_else(|| self.invalid_dimensions())?;
        let file_size = image_size
            .checked_add(PIXEL_DATA_OFFSET)
            .ok_or_else(|| self.invalid_dimensions())?;
        let width = i32::try_from(width).map_err(|_| self.invalid_dimensions())?;
        let height = i32::try_from(height).map_err(|_| self.invalid_dimensions())?;
        let file_header = FileHeader {
            file_size,
            pixel_data_offset: PIXEL_DATA_OFFSET,
        };
        Ok((file_header, InfoHeader::for_dimensions(width, height, image_size)))
    }

    /// Rows are always written bottom-up, so the last image row comes first.
    fn write_pixel_data(&mut self) -> std::io::Result<()> {
        let width = self.image.width();
        let padding = row_stride(width) - width * BYTES_PER_PIXEL;
        let mut row_bytes = Vec::with_capacity(row_stride(width));
        for row in self.image.rows().rev() {
            row_bytes.clear();
            for dot in row {
                row_bytes.extend_from_slice(&dot.to_bgr_samples());
            }
            row_bytes.resize(row_bytes.len() + padding, 0);
            self.writer.write_all(&row_bytes)?;
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for BmpImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let (file_header, info_header) = self.create_headers()?;
        log::debug!("Writing BMP info header {:?}", info_header);
        file_header
            .write_to(&mut self.writer)
            .map_err(Error::FailedToWriteOutputFile)?;
        info_header
            .write_to(&mut self.writer)
            .map_err(Error::FailedToWriteOutputFile)?;
        self.write_pixel_data()
            .map_err(Error::FailedToWriteOutputFile)?;
        self.writer.flush().map_err(Error::FailedToWriteOutputFile)
    }
}
