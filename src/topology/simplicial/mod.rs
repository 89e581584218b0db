//! The order complex: its generators, boundary, and Whitney chains.

pub mod basis;
pub mod boundary;
pub mod whitney;
