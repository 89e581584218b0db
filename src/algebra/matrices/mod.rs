//! Sparse matrices over a field.

pub mod bimajor;
pub mod operations;
