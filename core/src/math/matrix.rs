use crate::prelude::{MatrixError, MatrixResult, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::slice::ChunksExact;

/// Scalar type stored in every matrix.
pub type Element = i64;

/// Named, fixed-shape integer matrix stored in row-major order.
///
/// The buffer always holds exactly `rows * cols` elements and is never shared
/// with another `Matrix`; every operation producing a matrix allocates anew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct Matrix {
    name: String,
    rows: usize,
    cols: usize,
    data: Vec<Element>,
}

impl Matrix {
    /// Allocates a zero-filled `rows x cols` matrix.
    ///
    /// Zero-sized dimensions are rejected rather than producing an empty
    /// buffer, as is a shape whose element count does not fit in `usize`.
    pub fn new(name: impl Into<String>, rows: usize, cols: usize) -> MatrixResult<Self> {
        let name = name.into();
        let len = match rows.checked_mul(cols) {
            Some(len) if len > 0 => len,
            _ => return Err(MatrixError::InvalidDimension { name, rows, cols }),
        };
        Ok(Self {
            name,
            rows,
            cols,
            data: vec![0; len],
        })
    }

    /// Builds a matrix from a complete row-major buffer.
    pub fn from_vec(
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        data: Vec<Element>,
    ) -> MatrixResult<Self> {
        let mut matrix = Self::new(name, rows, cols)?;
        if data.len() != matrix.data.len() {
            return Err(MatrixError::Conversion {
                name: matrix.name,
                reason: format!(
                    "expected {} elements for shape {} x {}, got {}",
                    rows * cols,
                    rows,
                    cols,
                    data.len()
                ),
            });
        }
        matrix.data = data;
        Ok(matrix)
    }

    /// Copies `values` into the leading slots of the buffer.
    ///
    /// Slots past `values.len()` keep their previous contents. Nothing is
    /// written when `values` holds more elements than the matrix has slots.
    pub fn load(&mut self, values: &[Element]) -> MatrixResult<()> {
        let capacity = self.data.len();
        if values.len() > capacity {
            return Err(MatrixError::CapacityExceeded {
                name: self.name.clone(),
                supplied: values.len(),
                capacity,
            });
        }
        self.data[..values.len()].copy_from_slice(values);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a live matrix; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }

    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Element> {
        if row < self.rows && col < self.cols {
            Some(self.data[self.offset(row, col)])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Element]> {
        if row < self.rows {
            let start = self.offset(row, 0);
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// Lazy row-major view, one slice per row.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            inner: self.data.chunks_exact(self.cols),
        }
    }

    pub(crate) fn with_data(name: String, shape: Shape, data: Vec<Element>) -> Self {
        debug_assert_eq!(Some(data.len()), shape.element_count());
        Self {
            name,
            rows: shape.rows,
            cols: shape.cols,
            data,
        }
    }
}

/// Unchecked wire form; validated through `Matrix::from_vec` on the way in.
#[derive(Deserialize)]
struct MatrixRepr {
    name: String,
    rows: usize,
    cols: usize,
    data: Vec<Element>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = MatrixError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        Matrix::from_vec(repr.name, repr.rows, repr.cols, repr.data)
    }
}

/// Iterator over the rows of a [`Matrix`].
pub struct Rows<'a> {
    inner: ChunksExact<'a, Element>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a [Element];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for value in row {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}", value)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
