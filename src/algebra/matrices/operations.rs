//! Products, inversion, and echelon reduction of bimajor matrices.
//!
//! The reduction here is the column algorithm used to compute homology: every
//! column is cleared against earlier columns until its lowest nonzero row is
//! not the lowest row of any earlier column. The same column operations are
//! applied to a second matrix, so starting from the identity it records the
//! base change `V` with `original * V = reduced`.

use derive_getters::Getters;
use log::debug;

use crate::algebra::chains::sparse::SparseChain;
use crate::algebra::matrices::bimajor::MatrixBimajor;
use crate::algebra::rings::FieldElement;
use crate::error::{Error, Result};



//  ===========================================================================
//  PRODUCTS
//  ===========================================================================


/// The product `matrix * chain`, where `chain` is read as a column vector.
pub fn apply< R: FieldElement >( matrix: &MatrixBimajor< R >, chain: &SparseChain< R > ) -> Result< SparseChain< R > > {
    let mut product = SparseChain::new();
    for ( k, c ) in chain.iter() {
        product.add_chain( matrix.column( k )?, c );
    }
    Ok( product )
}

/// The product `matrix * chain` as an `nrows x 1` matrix.
pub fn apply_action< R: FieldElement >( matrix: &MatrixBimajor< R >, chain: &SparseChain< R > ) -> Result< MatrixBimajor< R > > {
    MatrixBimajor::from_columns( matrix.nrows(), vec![ apply( matrix, chain )? ] )
}

/// The product `a * b`.
pub fn multiply< R: FieldElement >( a: &MatrixBimajor< R >, b: &MatrixBimajor< R > ) -> Result< MatrixBimajor< R > > {
    if a.ncols() != b.nrows() {
        return Err( mismatch( a, b ) )
    }
    let columns = b.columns().iter()
        .map( |col| apply( a, col ) )
        .collect::< Result< Vec< _ > > >()?;
    MatrixBimajor::from_columns( a.nrows(), columns )
}

fn mismatch< R: FieldElement >( a: &MatrixBimajor< R >, b: &MatrixBimajor< R > ) -> Error {
    Error::DimensionMismatch{ left_rows: a.nrows(), left_cols: a.ncols(), right_rows: b.nrows(), right_cols: b.ncols() }
}



//  ===========================================================================
//  INVERSION
//  ===========================================================================


/// The inverse of a square matrix, by Gauss-Jordan elimination on rows.
///
/// In each column the pivot is chosen with
/// [`SparseChain::find_best`] among the rows not yet used, using the current
/// rows as the tie-breaking table so that short rows are preferred.
pub fn invert< R: FieldElement >( matrix: &MatrixBimajor< R > ) -> Result< MatrixBimajor< R > > {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err( mismatch( matrix, matrix ) )
    }
    let mut work = matrix.clone();
    let mut inverse = MatrixBimajor::identity( n )?;

    for c in 0 .. n {
        let candidates: SparseChain< R > = work.column( c )?.iter().filter( |&(i, _)| i >= c ).collect();
        let position = candidates.find_best( Some( work.rows() ) )?.ok_or( Error::NotInvertible{ column: c } )?;
        let pivot_row = candidates.num( position )?;
        if pivot_row != c {
            work.swap_rows( pivot_row, c )?;
            inverse.swap_rows( pivot_row, c )?;
        }

        let scale = work.get( c, c )?.inverse().ok_or( Error::NotInvertible{ column: c } )?;
        work.multiply_row( c, scale )?;
        inverse.multiply_row( c, scale )?;

        let others: Vec< (usize, R) > = work.column( c )?.iter().filter( |&(i, _)| i != c ).collect();
        for ( k, a ) in others {
            work.add_row( c, k, -a )?;
            inverse.add_row( c, k, -a )?;
        }
    }
    Ok( inverse )
}



//  ===========================================================================
//  ECHELON REDUCTION
//  ===========================================================================


/// Pivot bookkeeping of a column-reduced matrix.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
pub struct EchelonPivots {
    /// For each row, the column whose lowest nonzero entry lies in that row.
    column_of_row:      Vec< Option< usize > >,
    /// For each column, its lowest nonzero row (`None` for a zero column).
    row_of_column:      Vec< Option< usize > >,
}

impl EchelonPivots {

    /// Number of nonzero columns.
    pub fn rank( &self ) -> usize { self.row_of_column.iter().flatten().count() }

    /// `true` if row `i` is the lowest row of some column.
    pub fn is_pivot_row( &self, i: usize ) -> bool {
        self.column_of_row.get( i ).map_or( false, |c| c.is_some() )
    }
}

/// Column-reduce `matrix` in place, applying each operation to `base_change`.
///
/// `base_change` must be square with one row per column of `matrix`. If it
/// starts as the identity, on return `original * base_change == matrix`.
pub fn reduce_to_echelon< R: FieldElement >(
            matrix:         &mut MatrixBimajor< R >,
            base_change:    &mut MatrixBimajor< R >,
        ) -> Result< EchelonPivots >
{
    let ncols = matrix.ncols();
    if base_change.nrows() != ncols || base_change.ncols() != ncols {
        return Err( mismatch( matrix, base_change ) )
    }

    let mut column_of_row = vec![ None; matrix.nrows() ];
    let mut row_of_column = vec![ None; ncols ];
    let mut additions = 0usize;

    for j in 0 .. ncols {
        while let Some( ( low, a ) ) = matrix.column( j )?.last_entry() {
            match column_of_row[ low ] {
                Some( k ) => {
                    let b = matrix.get( low, k )?;
                    let scale = -( a * b.inverse().ok_or( Error::NotInvertible{ column: k } )? );
                    matrix.add_col( k, j, scale )?;
                    base_change.add_col( k, j, scale )?;
                    additions += 1;
                }
                None => {
                    column_of_row[ low ] = Some( j );
                    row_of_column[ j ] = Some( low );
                    break
                }
            }
        }
    }
    debug!( "echelon reduction of {} columns used {} column additions", ncols, additions );
    Ok( EchelonPivots{ column_of_row, row_of_column } )
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::rings::field_prime_order::{PrimeOrderField, Z2};

    type F3 = PrimeOrderField< 3 >;

    fn matrix_z2( nrows: usize, columns: &[ &[ usize ] ] ) -> MatrixBimajor {
        let columns = columns.iter()
            .map( |ids| ids.iter().map( |&i| ( i, Z2::from_integer( 1 ) ) ).collect() )
            .collect();
        MatrixBimajor::from_columns( nrows, columns ).unwrap()
    }

    #[test]
    fn test_multiply_and_apply() {
        // a = [ 1 1 ]   b = [ 1 0 ]
        //     [ 0 1 ]       [ 1 1 ]
        let a = matrix_z2( 2, &[ &[ 0 ], &[ 0, 1 ] ] );
        let b = matrix_z2( 2, &[ &[ 0, 1 ], &[ 1 ] ] );
        let ab = multiply( &a, &b ).unwrap();
        assert_eq!( ab.to_dense_string(), "0 1\n1 1\n" );

        let v: SparseChain = vec![ ( 1, Z2::from_integer( 1 ) ) ].into_iter().collect();
        assert_eq!( apply( &a, &v ).unwrap().ids().collect::< Vec<_> >(), vec![ 0, 1 ] );
        let action = apply_action( &a, &v ).unwrap();
        assert_eq!( action.ncols(), 1 );
        assert_eq!( action.to_dense_string(), "1\n1\n" );
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = matrix_z2( 2, &[ &[ 0 ], &[ 1 ], &[] ] );
        let b = matrix_z2( 2, &[ &[ 0 ] ] );
        assert_eq!(
            multiply( &a, &b ),
            Err( Error::DimensionMismatch{ left_rows: 2, left_cols: 3, right_rows: 2, right_cols: 1 } ),
        );
    }

    #[test]
    fn test_invert_z2() {
        // [ 0 1 1 ]
        // [ 1 1 0 ]
        // [ 0 0 1 ]
        let m = matrix_z2( 3, &[ &[ 1 ], &[ 0, 1 ], &[ 0, 2 ] ] );
        let inv = invert( &m ).unwrap();
        let identity = MatrixBimajor::identity( 3 ).unwrap();
        assert_eq!( multiply( &m, &inv ).unwrap(), identity );
        assert_eq!( multiply( &inv, &m ).unwrap(), identity );
        assert_eq!( invert( &identity ).unwrap(), identity );
    }

    #[test]
    fn test_invert_f3() {
        let two = F3::from_integer( 2 );
        let one = F3::from_integer( 1 );
        let mut m = MatrixBimajor::< F3 >::new( 2, 2 ).unwrap();
        m.add_entry( 0, 0, two ).unwrap();
        m.add_entry( 0, 1, one ).unwrap();
        m.add_entry( 1, 1, two ).unwrap();
        let inv = invert( &m ).unwrap();
        assert_eq!( multiply( &m, &inv ).unwrap(), MatrixBimajor::identity( 2 ).unwrap() );
    }

    #[test]
    fn test_invert_singular() {
        let m = matrix_z2( 2, &[ &[ 0, 1 ], &[ 0, 1 ] ] );
        assert_eq!( invert( &m ), Err( Error::NotInvertible{ column: 1 } ) );
    }

    #[test]
    fn test_reduce_to_echelon_tracks_base_change() {
        // boundary of the triangle on vertices 0,1,2 with edges 3 = {0,1}, 4 = {0,2}, 5 = {1,2}
        let original = matrix_z2( 6, &[ &[], &[], &[], &[ 0, 1 ], &[ 0, 2 ], &[ 1, 2 ] ] );
        let mut reduced = original.clone();
        let mut base_change = MatrixBimajor::identity( 6 ).unwrap();
        let pivots = reduce_to_echelon( &mut reduced, &mut base_change ).unwrap();

        assert_eq!( pivots.rank(), 2 );
        assert_eq!( pivots.row_of_column(), &vec![ None, None, None, Some( 1 ), Some( 2 ), None ] );
        assert!( pivots.is_pivot_row( 2 ) );
        assert!( ! pivots.is_pivot_row( 0 ) );
        assert!( reduced.column( 5 ).unwrap().is_empty() );
        // the cycle 3 + 4 + 5
        assert_eq!( base_change.column( 5 ).unwrap().ids().collect::< Vec<_> >(), vec![ 3, 4, 5 ] );
        assert_eq!( multiply( &original, &base_change ).unwrap(), reduced );
    }
}
