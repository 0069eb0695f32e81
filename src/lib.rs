use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
use error::Error;
use filter::{row_executor::RowExecutor, FilterSpec};
use image::{
    reader::bmp::BmpImageReader, writer::bmp::BmpImageWriter, Image, ImageReader, ImageWriter,
};
use pipeline::Pipeline;

pub mod binary_stream;
mod cli;
pub mod color;
pub mod error;
pub mod filter;
pub mod image;
mod logger;
pub mod pipeline;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    filters: Vec<FilterSpec>,
    number_of_threads: usize,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Decodes a 24-bit uncompressed BMP stream.
pub fn read_bitmap<T: Read + Seek>(reader: T) -> Result<Image<f32>> {
    BmpImageReader::new(reader).read_image()
}

/// Encodes `image` as a bottom-up 24-bit BMP stream.
pub fn write_bitmap<T: Write>(writer: T, image: &Image<f32>) -> Result<()> {
    BmpImageWriter::new(writer, image).write_image()
}

/// Reads the input file, runs the filter chain and writes the result. The
/// output file is only created once every filter has succeeded.
pub fn filter_bitmap_file(arguments: &Arguments) -> Result<()> {
    let executor = RowExecutor::with_threads(arguments.number_of_threads);
    let pipeline = Pipeline::from_specs(&arguments.filters, &executor)?;
    log::info!(
        "Filter chain [{}] on {} thread(s)",
        pipeline.filter_names().join(", "),
        executor.number_of_threads()
    );
    let input_file = open_input_file(&arguments.input_file)?;
    let image = read_bitmap(BufReader::new(input_file))?;
    log::info!(
        "Read {}x{} image from {}",
        image.width(),
        image.height(),
        arguments.input_file.display()
    );
    let image = pipeline.apply(image)?;
    let output_file = open_output_file(&arguments.output_file)?;
    write_bitmap(BufWriter::new(output_file), &image)?;
    log::info!(
        "Wrote {}x{} image to {}",
        image.width(),
        image.height(),
        arguments.output_file.display()
    );
    Ok(())
}
