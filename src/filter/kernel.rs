use crate::error::Error;
use crate::Result;

const KERNEL_FILTER_NAME: &str = "convolution";

#[rustfmt::skip]
pub const SHARPEN_KERNEL: [[f32; 3]; 3] = [
    [ 0.0, -1.0,  0.0],
    [-1.0,  5.0, -1.0],
    [ 0.0, -1.0,  0.0],
];

#[rustfmt::skip]
pub const LAPLACIAN_KERNEL: [[f32; 3]; 3] = [
    [ 0.0, -1.0,  0.0],
    [-1.0,  4.0, -1.0],
    [ 0.0, -1.0,  0.0],
];

/// A rectangular grid of weights with odd side lengths, centered on the
/// pixel being computed.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
}

impl Kernel {
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 || height == 0 {
            return Err(Self::invalid_shape(width, height));
        }
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(Error::invalid_parameter(
                KERNEL_FILTER_NAME,
                "kernel",
                "rows of unequal length",
            ));
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(Self::invalid_shape(width, height));
        }
        let weights = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Ok(Kernel {
            width,
            height,
            weights,
        })
    }

    fn invalid_shape(width: usize, height: usize) -> Error {
        Error::invalid_parameter(
            KERNEL_FILTER_NAME,
            "kernel",
            format!("{}x{} (both sides must be odd and positive)", width, height),
        )
    }

    /// A single horizontal row of weights.
    pub fn horizontal(weights: &[f32]) -> Result<Self> {
        Self::from_rows(&[weights])
    }

    /// A single vertical column of weights.
    pub fn vertical(weights: &[f32]) -> Result<Self> {
        let rows: Vec<[f32; 1]> = weights.iter().map(|&weight| [weight]).collect();
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn radius_x(&self) -> usize {
        self.width / 2
    }

    pub fn radius_y(&self) -> usize {
        self.height / 2
    }

    /// Weight at column `column` and row `row` of the grid.
    pub fn weight(&self, column: usize, row: usize) -> f32 {
        self.weights[row * self.width + column]
    }
}

#[cfg(test)]
mod test {
    use super::{Kernel, SHARPEN_KERNEL};
    use crate::error::ErrorKind;

    #[test]
    fn radius_is_half_of_each_side() {
        let kernel = Kernel::from_rows(&[[0.0_f32; 5]; 3]).unwrap();
        assert_eq!(kernel.radius_x(), 2);
        assert_eq!(kernel.radius_y(), 1);
    }

    #[test]
    fn weights_keep_row_major_position() {
        let kernel = Kernel::from_rows(&SHARPEN_KERNEL).unwrap();
        assert_eq!(kernel.weight(1, 1), 5.0);
        assert_eq!(kernel.weight(0, 1), -1.0);
        assert_eq!(kernel.weight(2, 2), 0.0);
    }

    #[test]
    fn even_sides_are_rejected() {
        let error = Kernel::from_rows(&[[1.0_f32; 2]; 3]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParameter);
        let error = Kernel::from_rows(&[[1.0_f32; 3]; 4]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn empty_and_ragged_kernels_are_rejected() {
        let empty: [[f32; 0]; 0] = [];
        assert!(Kernel::from_rows(&empty).is_err());
        let ragged: Vec<Vec<f32>> = vec![vec![1.0, 1.0, 1.0], vec![1.0]];
        assert!(Kernel::from_rows(&ragged).is_err());
    }

    #[test]
    fn vertical_kernel_is_one_column() {
        let kernel = Kernel::vertical(&[0.25, 0.5, 0.25]).unwrap();
        assert_eq!(kernel.width(), 1);
        assert_eq!(kernel.height(), 3);
        assert_eq!(kernel.weight(0, 2), 0.25);
    }
}
