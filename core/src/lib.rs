//! In-memory dense integer matrix algebra.
//!
//! Matrices are named, fixed-shape and row-major. The `MatrixEngine` is the
//! entry point used by the pipeline driver: it creates and loads matrices and
//! runs the algebraic operations, reporting every rejected call as a typed
//! `MatrixError` alongside the diagnostic log stream.

pub mod engine;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use engine::MatrixEngine;
pub use math::{Element, Matrix, Operation, Rows};
pub use prelude::{EngineConfig, MatrixError, MatrixResult, Shape};
