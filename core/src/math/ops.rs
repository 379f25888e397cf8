//! Algebraic operations over [`Matrix`].
//!
//! Every operation allocates a fresh result buffer and leaves its operands
//! untouched. Element arithmetic wraps on `i64` overflow instead of panicking.

use crate::math::matrix::{Element, Matrix};
use crate::prelude::{MatrixError, MatrixResult, Shape};
use std::fmt;

/// One of the engine's algebraic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    MulScalar(Element),
    Transpose,
}

impl Operation {
    /// Label spliced into derived result names.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Add => "Add",
            Operation::Sub => "Sub",
            Operation::Mul => "Mul",
            Operation::MulScalar(_) => "Mul_Scalar",
            Operation::Transpose => "Transpose",
        }
    }

    /// Number of matrix operands the operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Operation::Add | Operation::Sub | Operation::Mul => 2,
            Operation::MulScalar(_) | Operation::Transpose => 1,
        }
    }

    /// Applies the operation; `rhs` is required by binary operations and
    /// rejected by unary ones.
    pub fn apply(&self, lhs: &Matrix, rhs: Option<&Matrix>) -> MatrixResult<Matrix> {
        match (self, rhs) {
            (Operation::Transpose, None) => Ok(lhs.transpose()),
            (Operation::MulScalar(scalar), None) => Ok(lhs.mul_scalar(*scalar)),
            (Operation::Transpose | Operation::MulScalar(_), Some(rhs)) => {
                Err(MatrixError::UnexpectedOperand {
                    op: self.label(),
                    lhs: lhs.name().to_string(),
                    rhs: rhs.name().to_string(),
                })
            }
            (Operation::Add, Some(rhs)) => lhs.add(rhs),
            (Operation::Sub, Some(rhs)) => lhs.sub(rhs),
            (Operation::Mul, Some(rhs)) => lhs.mul(rhs),
            (op, None) => Err(MatrixError::MissingOperand {
                op: op.label(),
                lhs: lhs.name().to_string(),
            }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn derived_name(lhs: &str, op: &str, rhs: &str) -> String {
    format!("{}_{}_{}", lhs, op, rhs)
}

fn mismatch(op: &'static str, lhs: &Matrix, rhs: &Matrix) -> MatrixError {
    MatrixError::DimensionMismatch {
        op,
        lhs: lhs.name().to_string(),
        lhs_shape: lhs.shape(),
        rhs: rhs.name().to_string(),
        rhs_shape: rhs.shape(),
    }
}

impl Matrix {
    /// Returns a new matrix with rows and columns swapped, keeping the name.
    pub fn transpose(&self) -> Matrix {
        let shape = self.shape().transposed();
        let mut data = Vec::with_capacity(self.len());
        for col in 0..self.ncols() {
            for row in 0..self.nrows() {
                data.push(self.as_slice()[self.offset(row, col)]);
            }
        }
        Matrix::with_data(self.name().to_string(), shape, data)
    }

    /// Element-wise sum; both operands must share a shape.
    pub fn add(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        self.zip_with(rhs, Operation::Add, "addition", Element::wrapping_add)
    }

    /// Element-wise difference; both operands must share a shape.
    pub fn sub(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        self.zip_with(rhs, Operation::Sub, "subtraction", Element::wrapping_sub)
    }

    /// Standard matrix product; requires `self.ncols() == rhs.nrows()`.
    pub fn mul(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        if self.ncols() != rhs.nrows() {
            return Err(mismatch("multiplication", self, rhs));
        }

        let name = derived_name(self.name(), Operation::Mul.label(), rhs.name());
        let shape = Shape::new(self.nrows(), rhs.ncols());
        let len = shape
            .element_count()
            .ok_or_else(|| MatrixError::InvalidDimension {
                name: name.clone(),
                rows: shape.rows,
                cols: shape.cols,
            })?;
        let lhs_data = self.as_slice();
        let rhs_data = rhs.as_slice();
        let mut data = Vec::with_capacity(len);
        for i in 0..shape.rows {
            for j in 0..shape.cols {
                let mut sum: Element = 0;
                for k in 0..self.ncols() {
                    let product =
                        lhs_data[self.offset(i, k)].wrapping_mul(rhs_data[rhs.offset(k, j)]);
                    sum = sum.wrapping_add(product);
                }
                data.push(sum);
            }
        }

        Ok(Matrix::with_data(name, shape, data))
    }

    /// Multiplies every element by `scalar`.
    pub fn mul_scalar(&self, scalar: Element) -> Matrix {
        let data = self
            .as_slice()
            .iter()
            .map(|v| v.wrapping_mul(scalar))
            .collect();
        let name = derived_name(
            self.name(),
            Operation::MulScalar(scalar).label(),
            &scalar.to_string(),
        );
        Matrix::with_data(name, self.shape(), data)
    }

    fn zip_with<F>(
        &self,
        rhs: &Matrix,
        op: Operation,
        verb: &'static str,
        f: F,
    ) -> MatrixResult<Matrix>
    where
        F: Fn(Element, Element) -> Element,
    {
        if self.shape() != rhs.shape() {
            return Err(mismatch(verb, self, rhs));
        }
        let data = self
            .as_slice()
            .iter()
            .zip(rhs.as_slice())
            .map(|(&a, &b)| f(a, b))
            .collect();
        let name = derived_name(self.name(), op.label(), rhs.name());
        Ok(Matrix::with_data(name, self.shape(), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn loaded(name: &str, rows: usize, cols: usize, values: &[Element]) -> Matrix {
        let mut m = Matrix::new(name, rows, cols).unwrap();
        m.load(values).unwrap();
        m
    }

    fn random(rng: &mut StdRng, name: &str, rows: usize, cols: usize) -> Matrix {
        let values: Vec<Element> = (0..rows * cols).map(|_| rng.gen_range(-50..=50)).collect();
        loaded(name, rows, cols, &values)
    }

    #[test]
    fn multiply_alpha_by_beta() {
        let alpha = loaded("Alpha", 3, 2, &[3, 0, -1, 2, 1, 1]);
        let beta = loaded("Beta", 2, 3, &[1, 4, 2, 3, 1, 5]);
        let product = alpha.mul(&beta).unwrap();
        assert_eq!(product.shape(), Shape::new(3, 3));
        assert_eq!(product.as_slice(), &[3, 12, 6, 5, -2, 8, 4, 5, 7]);
        assert_eq!(product.name(), "Alpha_Mul_Beta");
    }

    #[test]
    fn transpose_square_matrix() {
        let a = loaded("A", 2, 2, &[1, 2, 3, 4]);
        let t = a.transpose();
        assert_eq!(t.shape(), Shape::new(2, 2));
        assert_eq!(t.as_slice(), &[1, 3, 2, 4]);
        assert_eq!(t.name(), "A");
    }

    #[test]
    fn transpose_swaps_shape() {
        let a = loaded("A", 2, 3, &[1, 2, 3, 4, 5, 6]);
        let t = a.transpose();
        assert_eq!(t.shape(), Shape::new(3, 2));
        assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(a.get(i, j), t.get(j, i));
            }
        }
    }

    #[test]
    fn add_and_sub_square_matrices() {
        let a = loaded("A", 2, 2, &[1, 2, 3, 4]);
        let b = loaded("B", 2, 2, &[5, 6, 7, 8]);
        let sum = a.add(&b).unwrap();
        let diff = a.sub(&b).unwrap();
        assert_eq!(sum.as_slice(), &[6, 8, 10, 12]);
        assert_eq!(sum.name(), "A_Add_B");
        assert_eq!(diff.as_slice(), &[-4, -4, -4, -4]);
        assert_eq!(diff.name(), "A_Sub_B");
    }

    #[test]
    fn mismatched_add_produces_no_result() {
        let a = Matrix::new("A", 2, 2).unwrap();
        let b = Matrix::new("B", 3, 3).unwrap();
        let err = a.add(&b).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                op: "addition",
                lhs: "A".into(),
                lhs_shape: Shape::new(2, 2),
                rhs: "B".into(),
                rhs_shape: Shape::new(3, 3),
            }
        );
        let message = err.to_string();
        assert!(message.contains("A is 2 x 2"));
        assert!(message.contains("B is 3 x 3"));
        assert!(a.sub(&b).is_err());
    }

    #[test]
    fn mismatched_mul_is_rejected() {
        let a = Matrix::new("A", 2, 3).unwrap();
        let b = Matrix::new("B", 2, 3).unwrap();
        assert!(matches!(
            a.mul(&b),
            Err(MatrixError::DimensionMismatch { op: "multiplication", .. })
        ));
    }

    #[test]
    fn scalar_multiplication_names_and_scales() {
        let a = loaded("A", 2, 2, &[1, -2, 3, 4]);
        let tripled = a.mul_scalar(3);
        assert_eq!(tripled.as_slice(), &[3, -6, 9, 12]);
        assert_eq!(tripled.name(), "A_Mul_Scalar_3");
        assert_eq!(a.mul_scalar(-1).name(), "A_Mul_Scalar_-1");
    }

    #[test]
    fn scalar_identity_and_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = random(&mut rng, "M", 3, 4);
        assert_eq!(m.mul_scalar(1).as_slice(), m.as_slice());
        let zero = m.mul_scalar(0);
        assert_eq!(zero.shape(), m.shape());
        assert!(zero.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn transpose_round_trip_restores_matrix() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            let rows = rng.gen_range(1..6);
            let cols = rng.gen_range(1..6);
            let m = random(&mut rng, "M", rows, cols);
            assert_eq!(m.transpose().transpose(), m);
        }
    }

    #[test]
    fn add_commutes_and_sub_anticommutes() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..16 {
            let rows = rng.gen_range(1..6);
            let cols = rng.gen_range(1..6);
            let a = random(&mut rng, "A", rows, cols);
            let b = random(&mut rng, "B", rows, cols);
            assert_eq!(a.add(&b).unwrap().as_slice(), b.add(&a).unwrap().as_slice());
            let ab = a.sub(&b).unwrap();
            let ba = b.sub(&a).unwrap();
            assert_eq!(ab.as_slice(), ba.mul_scalar(-1).as_slice());
        }
    }

    #[test]
    fn multiplication_is_associative() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            let (n, m, p, q) = (
                rng.gen_range(1..5),
                rng.gen_range(1..5),
                rng.gen_range(1..5),
                rng.gen_range(1..5),
            );
            let a = random(&mut rng, "A", n, m);
            let b = random(&mut rng, "B", m, p);
            let c = random(&mut rng, "C", p, q);
            let left = a.mul(&b).unwrap().mul(&c).unwrap();
            let right = a.mul(&b.mul(&c).unwrap()).unwrap();
            assert_eq!(left.shape(), right.shape());
            assert_eq!(left.as_slice(), right.as_slice());
        }
    }

    #[test]
    fn results_never_alias_operands() {
        let a = loaded("A", 2, 2, &[1, 2, 3, 4]);
        let mut t = a.transpose();
        t.load(&[0, 0, 0, 0]).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn overflow_wraps_instead_of_panicking() {
        let a = loaded("A", 1, 1, &[Element::MAX]);
        assert_eq!(a.mul_scalar(2).as_slice(), &[-2]);
        assert_eq!(a.add(&a).unwrap().as_slice(), &[-2]);
    }

    #[test]
    fn operation_apply_dispatches_by_arity() {
        let a = loaded("A", 2, 2, &[1, 2, 3, 4]);
        let b = loaded("B", 2, 2, &[5, 6, 7, 8]);
        assert_eq!(Operation::Add.arity(), 2);
        assert_eq!(Operation::Transpose.arity(), 1);
        let product = Operation::Mul.apply(&a, Some(&b)).unwrap();
        assert_eq!(product.as_slice(), &[19, 22, 43, 50]);
        let scaled = Operation::MulScalar(2).apply(&a, None).unwrap();
        assert_eq!(scaled.as_slice(), &[2, 4, 6, 8]);
        assert!(matches!(
            Operation::Sub.apply(&a, None),
            Err(MatrixError::MissingOperand { op: "Sub", .. })
        ));
    }

    #[test]
    fn unary_operation_rejects_second_operand() {
        let a = loaded("A", 2, 2, &[1, 2, 3, 4]);
        let b = loaded("B", 2, 2, &[5, 6, 7, 8]);
        let err = Operation::Transpose.apply(&a, Some(&b)).unwrap_err();
        assert_eq!(
            err,
            MatrixError::UnexpectedOperand {
                op: "Transpose",
                lhs: "A".into(),
                rhs: "B".into(),
            }
        );
        assert!(matches!(
            Operation::MulScalar(2).apply(&a, Some(&b)),
            Err(MatrixError::UnexpectedOperand { op: "Mul_Scalar", .. })
        ));
    }
}
