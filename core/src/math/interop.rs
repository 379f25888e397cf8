use crate::math::matrix::{Element, Matrix};
use crate::prelude::{MatrixError, MatrixResult};
use ndarray::{Array2, ArrayView2};

impl Matrix {
    /// Copies the matrix into an owned `ndarray` array of the same shape.
    pub fn to_array(&self) -> Array2<Element> {
        let (rows, cols) = (self.nrows(), self.ncols());
        Array2::from_shape_fn((rows, cols), |(i, j)| self.as_slice()[self.offset(i, j)])
    }

    /// Builds a matrix from any 2-D `ndarray` view, whatever its memory order.
    pub fn from_array(name: impl Into<String>, array: ArrayView2<Element>) -> MatrixResult<Self> {
        let name = name.into();
        let (rows, cols) = array.dim();
        if rows == 0 || cols == 0 {
            return Err(MatrixError::Conversion {
                name,
                reason: format!("array has an empty axis ({} x {})", rows, cols),
            });
        }
        let data: Vec<Element> = array.iter().copied().collect();
        Matrix::from_vec(name, rows, cols, data)
    }
}
