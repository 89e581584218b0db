//! Posets, their order complexes, and homology.

pub mod homology;
pub mod poset;
pub mod simplicial;
