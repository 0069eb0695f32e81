use bmp_filter_chain::error::ErrorKind;
use bmp_filter_chain::{filter_bitmap_file, read_bitmap, CLIParser};
use std::io::Cursor;
use std::path::PathBuf;
use std::{env, fs, process};

#[rustfmt::skip]
const TWO_BY_TWO_BITMAP: &[u8] = &[
    b'B', b'M', 70, 0, 0, 0, 0, 0, 0, 0, 54, 0, 0, 0,
    40, 0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0, 1, 0, 24, 0,
    0, 0, 0, 0, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    // bottom row: blue, white
    255, 0, 0,   255, 255, 255, 0, 0,
    // top row: red, green
    0, 0, 255,   0, 255, 0,     0, 0,
];

struct TestFiles {
    input: PathBuf,
    output: PathBuf,
}

impl TestFiles {
    fn new(name: &str, input_bytes: &[u8]) -> Self {
        let directory = env::temp_dir();
        let prefix = format!("bmp-filter-chain-{}-{}", process::id(), name);
        let files = TestFiles {
            input: directory.join(format!("{}-input.bmp", prefix)),
            output: directory.join(format!("{}-output.bmp", prefix)),
        };
        files.cleanup();
        fs::write(&files.input, input_bytes).expect("Creation of input file failed");
        files
    }

    fn run(&self, filters: &[&str]) -> bmp_filter_chain::Result<()> {
        let mut command_line = vec![
            "test",
            "--threads",
            "2",
            self.input.to_str().unwrap(),
            self.output.to_str().unwrap(),
        ];
        command_line.extend_from_slice(filters);
        let arguments = CLIParser::new().parse(command_line)?;
        filter_bitmap_file(&arguments)
    }

    fn output_bytes(&self) -> Vec<u8> {
        fs::read(&self.output).expect("Output file was not created")
    }

    fn cleanup(&self) {
        for path in [&self.input, &self.output] {
            if path.exists() && path.is_file() {
                fs::remove_file(path).expect("Deletion of test file failed");
            }
        }
    }
}

impl Drop for TestFiles {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[test]
fn test_negative_of_two_by_two_bitmap() {
    let files = TestFiles::new("negative", TWO_BY_TWO_BITMAP);
    files.run(&["-neg"]).expect("Filtering failed");
    let bytes = files.output_bytes();
    assert_eq!(bytes.len(), 70);
    assert_eq!(&bytes[..54], &TWO_BY_TWO_BITMAP[..54]);
    #[rustfmt::skip]
    let expected_pixels: &[u8] = &[
        0, 255, 255,   0, 0, 0,       0, 0,
        255, 255, 0,   255, 0, 255,   0, 0,
    ];
    assert_eq!(&bytes[54..], expected_pixels);
}

#[test]
fn test_empty_filter_chain_reproduces_pixels() {
    let files = TestFiles::new("identity", TWO_BY_TWO_BITMAP);
    files.run(&[]).expect("Filtering failed");
    assert_eq!(files.output_bytes(), TWO_BY_TWO_BITMAP);
}

#[test]
fn test_crop_and_grayscale_change_dimensions() {
    let files = TestFiles::new("crop", TWO_BY_TWO_BITMAP);
    files
        .run(&["-crop", "1", "5", "-gs", "-blur", "0.8", "-sharp"])
        .expect("Filtering failed");
    let image = read_bitmap(Cursor::new(files.output_bytes())).unwrap();
    assert_eq!((image.width(), image.height()), (1, 2));
    for dot in image.dots() {
        assert_eq!(dot.red, dot.green);
        assert_eq!(dot.green, dot.blue);
    }
}

#[test]
fn test_invalid_filter_parameter_creates_no_output() {
    let files = TestFiles::new("invalid-parameter", TWO_BY_TWO_BITMAP);
    let error = files.run(&["-gs", "-med", "0"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidParameter);
    assert!(!files.output.exists(), "Output file must not be created");
}

#[test]
fn test_unknown_filter_is_reported() {
    let files = TestFiles::new("unknown-filter", TWO_BY_TWO_BITMAP);
    let error = files.run(&["-swirl"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Usage);
    assert!(!files.output.exists(), "Output file must not be created");
}

#[test]
fn test_foreign_file_is_rejected() {
    let files = TestFiles::new("foreign", b"P6\n2 2\n255\n............");
    let error = files.run(&["-gs"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Format);
    assert!(!files.output.exists(), "Output file must not be created");
}

#[test]
fn test_missing_input_file_is_reported() {
    let files = TestFiles::new("missing-input", TWO_BY_TWO_BITMAP);
    fs::remove_file(&files.input).unwrap();
    let error = files.run(&[]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
}
