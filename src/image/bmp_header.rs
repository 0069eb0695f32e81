//! The two fixed headers in front of the pixel data of a BMP file.
//!
//! Only the 40 byte `BITMAPINFOHEADER` layout is interpreted. Larger info
//! headers are accepted, their extra fields are skipped by seeking to the
//! pixel data offset.

use std::io::{self, Read, Write};

use crate::binary_stream::{LittleEndianReader, LittleEndianWriter};
use crate::error::Error;
use crate::Result;

pub const SIGNATURE: [u8; 2] = *b"BM";
pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
pub const BYTES_PER_PIXEL: usize = 3;
const SUPPORTED_PLANES: u16 = 1;
const SUPPORTED_BITS_PER_PIXEL: u16 = 24;
const UNCOMPRESSED: u32 = 0;

const FILE_HEADER_SECTION: &str = "file header";
const INFO_HEADER_SECTION: &str = "info header";

/// Bytes one stored row occupies, padded up to a multiple of four.
pub fn row_stride(width: usize) -> usize {
    (width * BYTES_PER_PIXEL).div_ceil(4) * 4
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FileHeader {
    pub file_size: u32,
    pub pixel_data_offset: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub horizontal_resolution: i32,
    pub vertical_resolution: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl FileHeader {
    pub fn read_from<T: Read>(reader: &mut T) -> Result<Self> {
        let mut reader = LittleEndianReader::new(reader, FILE_HEADER_SECTION);
        let signature = reader.read_bytes::<2>()?;
        if signature != SIGNATURE {
            return Err(Error::InvalidSignature(signature));
        }
        let file_size = reader.read_u32()?;
        let _reserved = reader.read_u16()?;
        let _reserved = reader.read_u16()?;
        let pixel_data_offset = reader.read_u32()?;
        Ok(FileHeader {
            file_size,
            pixel_data_offset,
        })
    }

    pub fn write_to<T: Write>(&self, writer: &mut T) -> io::Result<()> {
        let mut writer = LittleEndianWriter::new(writer);
        writer.write_bytes(&SIGNATURE)?;
        writer.write_u32(self.file_size)?;
        writer.write_u16(0)?;
        writer.write_u16(0)?;
        writer.write_u32(self.pixel_data_offset)
    }
}

impl InfoHeader {
    /// Header for an uncompressed bottom-up 24 bit image.
    pub fn for_dimensions(width: i32, height: i32, image_size: u32) -> Self {
        InfoHeader {
            header_size: INFO_HEADER_SIZE,
            width,
            height,
            planes: SUPPORTED_PLANES,
            bits_per_pixel: SUPPORTED_BITS_PER_PIXEL,
            compression: UNCOMPRESSED,
            image_size,
            horizontal_resolution: 0,
            vertical_resolution: 0,
            colors_used: 0,
            important_colors: 0,
        }
    }

    pub fn read_from<T: Read>(reader: &mut T) -> Result<Self> {
        let mut reader = LittleEndianReader::new(reader, INFO_HEADER_SECTION);
        let header_size = reader.read_u32()?;
        if header_size < INFO_HEADER_SIZE {
            return Err(Error::UnsupportedInfoHeaderSize(header_size));
        }
        Ok(InfoHeader {
            header_size,
            width: reader.read_i32()?,
            height: reader.read_i32()?,
            planes: reader.read_u16()?,
            bits_per_pixel: reader.read_u16()?,
            compression: reader.read_u32()?,
            image_size: reader.read_u32()?,
            horizontal_resolution: reader.read_i32()?,
            vertical_resolution: reader.read_i32()?,
            colors_used: reader.read_u32()?,
            important_colors: reader.read_u32()?,
        })
    }

    pub fn write_to<T: Write>(&self, writer: &mut T) -> io::Result<()> {
        let mut writer = LittleEndianWriter::new(writer);
        writer.write_u32(self.header_size)?;
        writer.write_i32(self.width)?;
        writer.write_i32(self.height)?;
        writer.write_u16(self.planes)?;
        writer.write_u16(self.bits_per_pixel)?;
        writer.write_u32(self.compression)?;
        writer.write_u32(self.image_size)?;
        writer.write_i32(self.horizontal_resolution)?;
        writer.write_i32(self.vertical_resolution)?;
        writer.write_u32(self.colors_used)?;
        writer.write_u32(self.important_colors)
    }

    pub fn check_supported(&self) -> Result<()> {
        if self.planes != SUPPORTED_PLANES {
            return Err(Error::UnsupportedNumberOfPlanes(self.planes));
        }
        if self.bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
            return Err(Error::UnsupportedBitsPerPixel(self.bits_per_pixel));
        }
        if self.compression != UNCOMPRESSED {
            return Err(Error::UnsupportedCompression(self.compression));
        }
        if self.width <= 0 || self.height == 0 {
            return Err(Error::InvalidDimensions(
                self.width as i64,
                self.height as i64,
            ));
        }
        Ok(())
    }

    /// Rows are stored top to bottom only when the height is negative.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    pub fn pixel_width(&self) -> usize {
        self.width.unsigned_abs() as usize
    }

    pub fn pixel_height(&self) -> usize {
        self.height.unsigned_abs() as usize
    }
}
