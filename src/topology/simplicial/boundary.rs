//! The boundary matrix of the order complex.
//!
//! Column `j` holds the boundary of generator `j`: the alternating sum of the
//! faces obtained by deleting one vertex. Rows and columns are both indexed by
//! the [`GeneratorBasis`], so the matrix is square and strictly upper
//! triangular (every face precedes its simplex in basis order).

use log::debug;

use crate::algebra::chains::sparse::SparseChain;
use crate::algebra::matrices::bimajor::MatrixBimajor;
use crate::algebra::rings::FieldElement;
use crate::error::{Error, Result};
use crate::topology::simplicial::basis::GeneratorBasis;


/// The boundary of `simplex`, as a chain over the identifiers of `basis`.
///
/// A single vertex has zero boundary. Fails with [`Error::UnknownSimplex`] if a
/// face is missing from the basis.
pub fn boundary_chain< R: FieldElement >( basis: &GeneratorBasis, simplex: &[ usize ] ) -> Result< SparseChain< R > > {
    let mut chain = SparseChain::new();
    if simplex.len() < 2 { return Ok( chain ) }
    for i in 0 .. simplex.len() {
        let mut face = simplex.to_vec();
        face.remove( i );
        let id = basis.index_of( &face ).ok_or_else( || Error::UnknownSimplex( face.clone() ) )?;
        let sign = if i % 2 == 0 { 1 } else { -1 };
        chain.add_entry( id, R::from_integer( sign ) );
    }
    Ok( chain )
}

/// The full boundary matrix of `basis`.
pub fn boundary_matrix< R: FieldElement >( basis: &GeneratorBasis ) -> Result< MatrixBimajor< R > > {
    let columns = basis.simplices().iter()
        .map( |simplex| boundary_chain( basis, simplex ) )
        .collect::< Result< Vec< _ > > >()?;
    let matrix = MatrixBimajor::from_columns( basis.len(), columns )?;
    debug!( "boundary matrix {}x{} with {} nonzero entries", matrix.nrows(), matrix.ncols(), matrix.nnz() );
    Ok( matrix )
}
