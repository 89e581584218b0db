//! Sparse matrices stored in both row-major and column-major form.
//!
//! A [`MatrixBimajor`] keeps every row and every column as a
//! [`SparseChain`]. Each elementary operation edits the lines it targets and
//! mirrors the change into the transposed lines, so the two views always
//! describe the same matrix. Reduction code can therefore ask for a row or a
//! column at any time without paying for a transpose.
//!
//! # Example
//!
//! ```
//! use posethom::algebra::matrices::bimajor::MatrixBimajor;
//! use posethom::algebra::rings::field_prime_order::Z2;
//! use posethom::algebra::rings::FieldElement;
//!
//! let one = Z2::from_integer( 1 );
//!
//! // [ 1 1 ]
//! // [ 0 1 ]
//! let mut matrix = MatrixBimajor::new( 2, 2 ).unwrap();
//! matrix.add_entry( 0, 0, one ).unwrap();
//! matrix.add_entry( 0, 1, one ).unwrap();
//! matrix.add_entry( 1, 1, one ).unwrap();
//!
//! // column 1 += column 0
//! matrix.add_col( 0, 1, one ).unwrap();
//! assert_eq!( matrix.row( 0 ).unwrap().ids().collect::< Vec<_> >(), vec![ 0 ] );
//! assert_eq!( matrix.column( 1 ).unwrap().ids().collect::< Vec<_> >(), vec![ 1 ] );
//! ```

use crate::algebra::chains::sparse::SparseChain;
use crate::algebra::rings::field_prime_order::Z2;
use crate::algebra::rings::FieldElement;
use crate::error::{try_reserve, Error, Result};


/// A sparse matrix whose rows and columns are both stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixBimajor< R = Z2 > {
    rows:       Vec< SparseChain< R > >,
    cols:       Vec< SparseChain< R > >,
}

impl < R: FieldElement > MatrixBimajor< R > {

    //  -----------------------------------------------------------------------
    //  CONSTRUCTORS
    //  -----------------------------------------------------------------------

    /// The zero matrix with `nrows` rows and `ncols` columns.
    pub fn new( nrows: usize, ncols: usize ) -> Result< Self > {
        Ok( MatrixBimajor{ rows: empty_lines( nrows )?, cols: empty_lines( ncols )? } )
    }

    /// The `n x n` identity.
    pub fn identity( n: usize ) -> Result< Self > {
        let mut matrix = Self::new( n, n )?;
        for i in 0 .. n {
            matrix.rows[ i ].add_entry( i, R::one() );
            matrix.cols[ i ].add_entry( i, R::one() );
        }
        Ok( matrix )
    }

    /// Assemble a matrix from its columns.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if a column has an entry at or
    /// beyond row `nrows`.
    pub fn from_columns( nrows: usize, cols: Vec< SparseChain< R > > ) -> Result< Self > {
        let mut rows = empty_lines( nrows )?;
        for ( j, col ) in cols.iter().enumerate() {
            for ( i, c ) in col.iter() {
                let row = rows.get_mut( i ).ok_or( Error::IndexOutOfRange{ index: i, len: nrows } )?;
                row.add_entry( j, c );
            }
        }
        Ok( MatrixBimajor{ rows, cols } )
    }

    //  -----------------------------------------------------------------------
    //  QUERIES
    //  -----------------------------------------------------------------------

    pub fn nrows( &self ) -> usize { self.rows.len() }

    pub fn ncols( &self ) -> usize { self.cols.len() }

    pub fn rows( &self ) -> &[ SparseChain< R > ] { &self.rows }

    pub fn columns( &self ) -> &[ SparseChain< R > ] { &self.cols }

    pub fn row( &self, i: usize ) -> Result< &SparseChain< R > > {
        self.rows.get( i ).ok_or( Error::IndexOutOfRange{ index: i, len: self.nrows() } )
    }

    pub fn column( &self, j: usize ) -> Result< &SparseChain< R > > {
        self.cols.get( j ).ok_or( Error::IndexOutOfRange{ index: j, len: self.ncols() } )
    }

    /// The entry in row `i`, column `j`.
    pub fn get( &self, i: usize, j: usize ) -> Result< R > {
        self.row( i )?;
        Ok( self.column( j )?.coefficient_of( Some( i ) ) )
    }

    /// Number of nonzero entries.
    pub fn nnz( &self ) -> usize { self.cols.iter().map( |c| c.size() ).sum() }

    //  -----------------------------------------------------------------------
    //  ELEMENTARY OPERATIONS
    //  -----------------------------------------------------------------------

    /// Add `coefficient` to the entry in row `i`, column `j`.
    pub fn add_entry( &mut self, i: usize, j: usize, coefficient: R ) -> Result< () > {
        self.check_row( i )?;
        self.check_col( j )?;
        self.rows[ i ].add_entry( j, coefficient );
        self.cols[ j ].add_entry( i, coefficient );
        Ok(())
    }

    /// Column `dst` += `coefficient` * column `src`.
    pub fn add_col( &mut self, src: usize, dst: usize, coefficient: R ) -> Result< () > {
        self.check_col( src )?;
        self.check_col( dst )?;
        if src == dst {
            return self.multiply_col( dst, R::one() + coefficient )
        }
        let source = self.cols[ src ].clone();
        let MatrixBimajor{ rows, cols } = self;
        cols[ dst ].add_chain_mirrored( &source, coefficient, dst, rows )
    }

    /// Row `dst` += `coefficient` * row `src`.
    pub fn add_row( &mut self, src: usize, dst: usize, coefficient: R ) -> Result< () > {
        self.check_row( src )?;
        self.check_row( dst )?;
        if src == dst {
            return self.multiply_row( dst, R::one() + coefficient )
        }
        let source = self.rows[ src ].clone();
        let MatrixBimajor{ rows, cols } = self;
        rows[ dst ].add_chain_mirrored( &source, coefficient, dst, cols )
    }

    pub fn swap_cols( &mut self, a: usize, b: usize ) -> Result< () > {
        self.check_col( a )?;
        self.check_col( b )?;
        if a == b { return Ok(()) }
        let MatrixBimajor{ rows, cols } = self;
        let ( first, second ) = pair_mut( cols, a, b );
        first.swap_mirrored( second, a, b, rows )
    }

    pub fn swap_rows( &mut self, a: usize, b: usize ) -> Result< () > {
        self.check_row( a )?;
        self.check_row( b )?;
        if a == b { return Ok(()) }
        let MatrixBimajor{ rows, cols } = self;
        let ( first, second ) = pair_mut( rows, a, b );
        first.swap_mirrored( second, a, b, cols )
    }

    /// Scale column `j`; a zero coefficient clears it.
    pub fn multiply_col( &mut self, j: usize, coefficient: R ) -> Result< () > {
        self.check_col( j )?;
        let ids: Vec< usize > = self.cols[ j ].ids().collect();
        self.cols[ j ].multiply( coefficient, None );
        for i in ids { self.rows[ i ].multiply( coefficient, Some( j ) ); }
        Ok(())
    }

    /// Scale row `i`; a zero coefficient clears it.
    pub fn multiply_row( &mut self, i: usize, coefficient: R ) -> Result< () > {
        self.check_row( i )?;
        let ids: Vec< usize > = self.rows[ i ].ids().collect();
        self.rows[ i ].multiply( coefficient, None );
        for j in ids { self.cols[ j ].multiply( coefficient, Some( i ) ); }
        Ok(())
    }

    /// Exchange the roles of rows and columns.
    pub fn transpose( self ) -> Self {
        MatrixBimajor{ rows: self.cols, cols: self.rows }
    }

    fn check_row( &self, i: usize ) -> Result< () > { self.row( i ).map( |_| () ) }

    fn check_col( &self, j: usize ) -> Result< () > { self.column( j ).map( |_| () ) }
}

impl < R: FieldElement + Into< u32 > > MatrixBimajor< R > {

    /// Export as a compressed sparse column matrix of residues.
    pub fn to_csmat( &self ) -> sprs::CsMat< u32 > {
        let mut indptr = Vec::with_capacity( self.ncols() + 1 );
        let mut indices = Vec::with_capacity( self.nnz() );
        let mut data = Vec::with_capacity( self.nnz() );
        indptr.push( 0 );
        for col in self.cols.iter() {
            for ( i, c ) in col.iter() {
                indices.push( i );
                data.push( c.into() );
            }
            indptr.push( indices.len() );
        }
        sprs::CsMat::new_csc( ( self.nrows(), self.ncols() ), indptr, indices, data )
    }
}

fn empty_lines< R: FieldElement >( n: usize ) -> Result< Vec< SparseChain< R > > > {
    let mut lines = Vec::new();
    try_reserve( &mut lines, n )?;
    lines.resize_with( n, SparseChain::new );
    Ok( lines )
}

/// Two distinct mutable elements of a slice.
fn pair_mut< T >( slice: &mut [ T ], a: usize, b: usize ) -> ( &mut T, &mut T ) {
    if a < b {
        let ( left, right ) = slice.split_at_mut( b );
        ( &mut left[ a ], &mut right[ 0 ] )
    } else {
        let ( left, right ) = slice.split_at_mut( a );
        ( &mut right[ 0 ], &mut left[ b ] )
    }
}

impl < R: FieldElement > MatrixBimajor< R > {

    /// `true` if every entry is zero.
    pub fn is_zero( &self ) -> bool { self.cols.iter().all( |c| c.is_empty() ) }

    /// Dense rendering, one line per row; used in diagnostics.
    pub fn to_dense_string( &self ) -> String {
        let mut out = String::new();
        for row in self.rows.iter() {
            let line: Vec< String > = ( 0 .. self.ncols() )
                .map( |j| {
                    let c = row.coefficient_of( Some( j ) );
                    if c.is_zero() { "0".to_string() } else { c.to_string() }
                } )
                .collect();
            out.push_str( &line.join( " " ) );
            out.push( '\n' );
        }
        out
    }
}
