pub mod interop;
pub mod matrix;
pub mod ops;

pub use matrix::{Element, Matrix, Rows};
pub use ops::Operation;
