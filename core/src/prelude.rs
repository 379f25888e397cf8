use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::engine::MatrixEngine;
pub use crate::math::matrix::{Element, Matrix};
pub use crate::math::ops::Operation;

/// Shared configuration for a `MatrixEngine`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Emit an informational line for every matrix the engine creates.
    pub log_creation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { log_creation: true }
    }
}

/// Row/column extent of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of elements, or `None` when `rows * cols` overflows `usize`.
    pub fn element_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub fn transposed(&self) -> Self {
        Self::new(self.cols, self.rows)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.rows, self.cols)
    }
}

/// Common error type for matrix construction and algebra.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matrix sizes do not match for {op}: matrix {lhs} is {lhs_shape}, matrix {rhs} is {rhs_shape}")]
    DimensionMismatch {
        op: &'static str,
        lhs: String,
        lhs_shape: Shape,
        rhs: String,
        rhs_shape: Shape,
    },
    #[error("the number of data elements ({supplied}) exceeds the capacity of matrix {name} ({capacity})")]
    CapacityExceeded {
        name: String,
        supplied: usize,
        capacity: usize,
    },
    #[error("invalid dimensions for matrix {name}: {rows} x {cols}")]
    InvalidDimension {
        name: String,
        rows: usize,
        cols: usize,
    },
    #[error("operation {op} on matrix {lhs} needs a second operand")]
    MissingOperand { op: &'static str, lhs: String },
    #[error("operation {op} on matrix {lhs} takes no second operand, got {rhs}")]
    UnexpectedOperand {
        op: &'static str,
        lhs: String,
        rhs: String,
    },
    #[error("cannot convert array into matrix {name}: {reason}")]
    Conversion { name: String, reason: String },
}

pub type MatrixResult<T> = Result<T, MatrixError>;
