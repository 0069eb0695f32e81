use std::io::{Read, Seek, SeekFrom};

use super::super::bmp_header::{row_stride, FileHeader, InfoHeader, BYTES_PER_PIXEL};
use super::super::{Image, ImageReader};
use crate::color::RGBColorFormat;
use crate::error::Error;

const PIXEL_DATA_SECTION: &str = "pixel data";
const ROW_PADDING_SECTION: &str = "row padding";

pub struct BmpImageReader<T: Read + Seek> {
    reader: T,
}

impl<T: Read + Seek> BmpImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    fn seek_to_pixel_data(&mut self, file_header: &FileHeader) -> crate::Result<()> {
        self.reader
            .seek(SeekFrom::Start(file_header.pixel_data_offset as u64))
            .map_err(Error::FailedToReadInputFile)?;
        Ok(())
    }

    /// Fails with truncation when the stream cannot hold the declared rows.
    fn check_pixel_data_length(
        &mut self,
        file_header: &FileHeader,
        info_header: &InfoHeader,
    ) -> crate::Result<()> {
        let stream_length = self
            .reader
            .seek(SeekFrom::End(0))
            .map_err(Error::FailedToReadInputFile)?;
        let required_length = (row_stride(info_header.pixel_width()) as u64)
            .checked_mul(info_header.pixel_height() as u64)
            .and_then(|size| size.checked_add(file_header.pixel_data_offset as u64));
        match required_length {
            Some(required_length) if required_length <= stream_length => Ok(()),
            _ => Err(Error::TruncatedFile(PIXEL_DATA_SECTION)),
        }
    }

    fn read_row(&mut self, row: &mut [u8]) -> crate::Result<()> {
        self.reader
            .read_exact(row)
            .map_err(|e| Error::from_read_error(e, PIXEL_DATA_SECTION))
    }

    fn skip_padding(&mut self, padding: usize) -> crate::Result<()> {
        let mut padding_bytes = [0u8; 3];
        self.reader
            .read_exact(&mut padding_bytes[..padding])
            .map_err(|e| Error::from_read_error(e, ROW_PADDING_SECTION))
    }

    fn read_dots(&mut self, info_header: &InfoHeader) -> crate::Result<Vec<RGBColorFormat<f32>>> {
        let width = info_header.pixel_width();
        let height = info_header.pixel_height();
        let row_length = width * BYTES_PER_PIXEL;
        let padding = row_stride(width) - row_length;
        let number_of_dots = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions(info_header.width as i64, info_header.height as i64))?;
        let mut dots = vec![RGBColorFormat::black(); number_of_dots];
        let mut row = vec![0u8; row_length];
        for stored_row_index in 0..height {
            self.read_row(&mut row)?;
            self.skip_padding(padding)?;
            let y = if info_header.is_top_down() {
                stored_row_index
            } else {
                height - 1 - stored_row_index
            };
            let target = &mut dots[y * width..(y + 1) * width];
            for (dot, samples) in target.iter_mut().zip(row.chunks_exact(BYTES_PER_PIXEL)) {
                *dot = RGBColorFormat::from_bgr_samples([samples[0], samples[1], samples[2]]);
            }
        }
        Ok(dots)
    }
}

impl<T: Read + Seek> ImageReader<f32> for BmpImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image<f32>> {
        let file_header = FileHeader::read_from(&mut self.reader)?;
        let info_header = InfoHeader::read_from(&mut self.reader)?;
        log::debug!("BMP file header {:?}", file_header);
        log::debug!("BMP info header {:?}", info_header);
        info_header.check_supported()?;
        self.check_pixel_data_length(&file_header, &info_header)?;
        self.seek_to_pixel_data(&file_header)?;
        let dots = self.read_dots(&info_header)?;
        Image::new(info_header.pixel_width(), info_header.pixel_height(), dots)
    }
}
