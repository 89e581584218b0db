//! Linear algebra over finite fields: coefficients, chains, and matrices.

pub mod chains;
pub mod matrices;
pub mod rings;
