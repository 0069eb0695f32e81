use std::io;
use std::io::{Read, Write};

use crate::error::Error;
use crate::Result;

/// Reads little-endian header fields, reporting short reads as truncation of
/// the named file section.
pub struct LittleEndianReader<'a, T: Read> {
    /// the underlying input stream
    reader: &'a mut T,
    /// file section reported when the stream ends early
    section: &'static str,
}

impl<'a, T: Read> LittleEndianReader<'a, T> {
    pub fn new(reader: &'a mut T, section: &'static str) -> LittleEndianReader<'a, T> {
        LittleEndianReader { reader, section }
    }

    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buffer = [0; N];
        self.reader
            .read_exact(&mut buffer)
            .map_err(|e| Error::from_read_error(e, self.section))?;
        Ok(buffer)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_bytes()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_bytes()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_bytes()?))
    }
}

/// Writes little-endian header fields to the underlying stream.
pub struct LittleEndianWriter<'a, T: Write> {
    writer: &'a mut T,
}

impl<'a, T: Write> LittleEndianWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> LittleEndianWriter<'a, T> {
        LittleEndianWriter { writer }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }
}
