//! Chain complexes of finite posets over the two-element field.
//!
//! The crate turns a finite poset, given by its covering arrows, into the
//! order complex whose simplices are the chains of the poset, and then
//! computes with it:
//!
//! - [`topology::simplicial::basis`] enumerates the faces of the maximal
//!   chains into a frozen, ordered basis of generators;
//! - [`topology::poset::euler`] tests the Euler parity condition;
//! - [`topology::homology`] factors the boundary matrix and reads off Betti
//!   numbers, cycle representatives, and the decomposition of a cycle;
//! - [`topology::simplicial::whitney`] builds Whitney chains from the
//!   regularity predicate.
//!
//! All of this is written in terms of two algebraic types:
//! [`algebra::chains::sparse::SparseChain`], an ordered sparse vector, and
//! [`algebra::matrices::bimajor::MatrixBimajor`], a sparse matrix that stores
//! its rows and its columns as sparse chains.
//!
//! [`pipeline`] strings the steps together for one input file, which is what
//! the `posethom` binary runs.
//!
//! # Example
//!
//! ```
//! use posethom::algebra::rings::field_prime_order::Z2;
//! use posethom::topology::homology::FactoredBoundaryMatrix;
//! use posethom::topology::poset::Poset;
//! use posethom::topology::poset::parse::parse_arrows;
//! use posethom::topology::simplicial::basis::GeneratorBasis;
//!
//! // two points below two points: a circle
//! let arrows = parse_arrows( "{1,3}\n{1,4}\n{2,3}\n{2,4}\n" ).unwrap();
//! let poset = Poset::from_arrows( arrows ).unwrap();
//! let basis = GeneratorBasis::from_poset( &poset );
//!
//! let factored = FactoredBoundaryMatrix::< Z2 >::factor( &basis ).unwrap();
//! assert_eq!( factored.betti_numbers(), vec![ 1, 1 ] );
//! ```

pub mod algebra;
pub mod error;
pub mod pipeline;
pub mod topology;
pub mod utilities;

pub use error::{Error, Result};
