use std::fmt::Display;
use std::io;

/// Coarse classification of [`Error`], used by callers that only care about
/// which stage rejected the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    UnsupportedFormat,
    TruncatedFile,
    InvalidDimensions,
    InvalidParameter,
    Index,
    Io,
    Usage,
    Execution,
}

#[derive(Debug)]
pub enum Error {
    InvalidSignature([u8; 2]),
    UnsupportedInfoHeaderSize(u32),
    UnsupportedNumberOfPlanes(u16),
    UnsupportedBitsPerPixel(u16),
    UnsupportedCompression(u32),
    TruncatedFile(&'static str),
    InvalidDimensions(i64, i64),
    InvalidParameter {
        filter: &'static str,
        parameter: &'static str,
        value: String,
    },
    PixelIndexOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    UnableToOpenInputFileForReading(String, io::Error),
    UnableToOpenOutputFileForWriting(String, io::Error),
    FailedToReadInputFile(io::Error),
    FailedToWriteOutputFile(io::Error),
    UnknownFilter(String),
    MissingFilterArgument(&'static str, &'static str),
    InvalidFilterArgument(&'static str, &'static str, String),
    RowWorkerFailed(usize, usize),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSignature(_) | Self::UnsupportedInfoHeaderSize(_) => ErrorKind::Format,
            Self::UnsupportedNumberOfPlanes(_)
            | Self::UnsupportedBitsPerPixel(_)
            | Self::UnsupportedCompression(_) => ErrorKind::UnsupportedFormat,
            Self::TruncatedFile(_) => ErrorKind::TruncatedFile,
            Self::InvalidDimensions(_, _) => ErrorKind::InvalidDimensions,
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::PixelIndexOutOfBounds { .. } => ErrorKind::Index,
            Self::UnableToOpenInputFileForReading(_, _)
            | Self::UnableToOpenOutputFileForWriting(_, _)
            | Self::FailedToReadInputFile(_)
            | Self::FailedToWriteOutputFile(_) => ErrorKind::Io,
            Self::UnknownFilter(_)
            | Self::MissingFilterArgument(_, _)
            | Self::InvalidFilterArgument(_, _, _) => ErrorKind::Usage,
            Self::RowWorkerFailed(_, _) => ErrorKind::Execution,
        }
    }

    pub(crate) fn invalid_parameter(
        filter: &'static str,
        parameter: &'static str,
        value: impl Display,
    ) -> Self {
        Self::InvalidParameter {
            filter,
            parameter,
            value: value.to_string(),
        }
    }

    /// Maps a failed read to a truncation error when the stream simply ran
    /// out of bytes, keeping every other I/O failure as it is.
    pub(crate) fn from_read_error(error: io::Error, section: &'static str) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Self::TruncatedFile(section)
        } else {
            Self::FailedToReadInputFile(error)
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSignature(signature) => {
                write!(
                    f,
                    "Not a BMP file: expected signature 'BM', found {:02X} {:02X}",
                    signature[0], signature[1]
                )
            }
            Self::UnsupportedInfoHeaderSize(size) => {
                write!(
                    f,
                    "Unsupported BMP info header of {} bytes, at least 40 bytes are required",
                    size
                )
            }
            Self::UnsupportedNumberOfPlanes(planes) => {
                write!(f, "Unsupported number of BMP planes: {}", planes)
            }
            Self::UnsupportedBitsPerPixel(bits) => {
                write!(f, "Unsupported BMP bit depth {}, only 24 bit is supported", bits)
            }
            Self::UnsupportedCompression(compression) => {
                write!(
                    f,
                    "Unsupported BMP compression {}, only uncompressed images are supported",
                    compression
                )
            }
            Self::TruncatedFile(section) => {
                write!(f, "Unexpected end of file while reading {}", section)
            }
            Self::InvalidDimensions(width, height) => {
                write!(f, "Invalid image dimensions {}x{}", width, height)
            }
            Self::InvalidParameter {
                filter,
                parameter,
                value,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for parameter '{}' of filter '{}'",
                    value, parameter, filter
                )
            }
            Self::PixelIndexOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Pixel ({}, {}) is outside of the {}x{} image",
                    x, y, width, height
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadInputFile(error) => write!(f, "Failed to read input file: {}", error),
            Self::FailedToWriteOutputFile(error) => {
                write!(f, "Failed to write output file: {}", error)
            }
            Self::UnknownFilter(name) => write!(f, "Unknown filter '{}'", name),
            Self::MissingFilterArgument(filter, argument) => {
                write!(f, "Filter '{}' requires argument <{}>", filter, argument)
            }
            Self::InvalidFilterArgument(filter, argument, token) => {
                write!(
                    f,
                    "Argument <{}> of filter '{}' could not be parsed from '{}'",
                    argument, filter, token
                )
            }
            Self::RowWorkerFailed(received, expected) => {
                write!(
                    f,
                    "Row worker failed: received {} of {} row bands",
                    received, expected
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadInputFile(error)
            | Self::FailedToWriteOutputFile(error) => Some(error),
            _ => None,
        }
    }
}
