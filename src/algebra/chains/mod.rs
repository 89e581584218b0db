//! Sparse linear combinations and their text form.

pub mod sparse;
pub mod text;
