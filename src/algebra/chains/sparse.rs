//! Sparse chains: linear combinations of integer identifiers.
//!
//! A [`SparseChain`] is a finite formal sum `c1*n1 + c2*n2 + ...` where each
//! `ni` is a non-negative identifier (a generator index, or a row/column index
//! of a matrix) and each `ci` is a nonzero field element. Entries are kept in
//! one vector sorted by strictly ascending identifier, so every update is a
//! merge and iteration always visits identifiers in ascending order.
//!
//! Chains are the currency of the whole crate: they are the rows and columns
//! of [`MatrixBimajor`](crate::algebra::matrices::bimajor::MatrixBimajor), the
//! representatives of homology classes, and the Whitney chains.
//!
//! # Example
//!
//! ```
//! use posethom::algebra::chains::sparse::SparseChain;
//! use posethom::algebra::rings::field_prime_order::Z2;
//! use posethom::algebra::rings::FieldElement;
//!
//! let one = Z2::from_integer( 1 );
//!
//! let mut a = SparseChain::new();
//! a.add_entry( 4, one ).add_entry( 1, one );
//! assert_eq!( a.entries(), &[ (1, one), (4, one) ] );
//!
//! let mut b = SparseChain::new();
//! b.add_entry( 4, one ).add_entry( 6, one );
//!
//! // over Z2 the shared identifier cancels
//! a.add_chain( &b, one );
//! assert_eq!( a.entries(), &[ (1, one), (6, one) ] );
//! ```

use std::cmp::Ordering;
use std::mem;

use itertools::{EitherOrBoth, Itertools};
use serde::{Deserialize, Serialize};

use crate::algebra::rings::field_prime_order::Z2;
use crate::algebra::rings::FieldElement;
use crate::error::{try_reserve, Error, Result};



//  ===========================================================================
//  SPARSE CHAIN
//  ===========================================================================


/// An ordered sparse vector of `(identifier, coefficient)` pairs.
///
/// Invariants: identifiers are strictly increasing and no coefficient is zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    into = "Vec<(usize, R)>",
    try_from = "Vec<(usize, R)>",
    bound( serialize = "R: Serialize + Clone", deserialize = "R: FieldElement + Deserialize<'de>" )
)]
pub struct SparseChain< R = Z2 > {
    entries:    Vec< (usize, R) >,
}

impl < R > Default for SparseChain< R > {
    fn default() -> Self { SparseChain{ entries: Vec::new() } }
}

impl < R: FieldElement > SparseChain< R > {

    /// The zero chain.
    pub fn new() -> Self { SparseChain{ entries: Vec::new() } }

    /// The zero chain, with room for `capacity` entries.
    pub fn try_with_capacity( capacity: usize ) -> Result< Self > {
        let mut entries = Vec::new();
        try_reserve( &mut entries, capacity )?;
        Ok( SparseChain{ entries } )
    }

    /// The chain with a single entry; zero if `coefficient` is zero.
    pub fn singleton( id: usize, coefficient: R ) -> Self {
        let mut chain = SparseChain::new();
        chain.add_entry( id, coefficient );
        chain
    }

    /// Build a chain from pairs given in any order.
    ///
    /// Pairs sharing an identifier are summed. A zero coefficient in the input is
    /// rejected with [`Error::ZeroCoefficient`].
    pub fn from_entries( pairs: Vec< (usize, R) > ) -> Result< Self > {
        let mut chain = SparseChain::try_with_capacity( pairs.len() )?;
        for ( id, coefficient ) in pairs {
            if coefficient.is_zero() { return Err( Error::ZeroCoefficient{ id } ) }
            chain.add_entry( id, coefficient );
        }
        Ok( chain )
    }

    //  -----------------------------------------------------------------------
    //  QUERIES
    //  -----------------------------------------------------------------------

    /// Number of nonzero entries.
    pub fn size( &self ) -> usize { self.entries.len() }

    pub fn is_empty( &self ) -> bool { self.entries.is_empty() }

    /// The entries, in ascending order of identifier.
    pub fn entries( &self ) -> &[ (usize, R) ] { &self.entries }

    pub fn iter( &self ) -> impl Iterator< Item = (usize, R) > + '_ { self.entries.iter().cloned() }

    /// The identifiers with a nonzero coefficient, ascending.
    pub fn ids( &self ) -> impl Iterator< Item = usize > + '_ { self.entries.iter().map( |&(id, _)| id ) }

    /// The coefficient at `id`, or zero.
    ///
    /// With `None`, returns the first stored coefficient (zero for the empty chain).
    pub fn coefficient_of( &self, id: Option< usize > ) -> R {
        let id = match id {
            None => return self.entries.first().map( |&(_, c)| c ).unwrap_or_else( R::zero ),
            Some( id ) => id,
        };
        for &( n, c ) in self.entries.iter() {
            match n.cmp( &id ) {
                Ordering::Less => continue,
                Ordering::Equal => return c,
                Ordering::Greater => break,
            }
        }
        R::zero()
    }

    /// Position of `id` among the entries.
    pub fn find_number( &self, id: usize ) -> Option< usize > {
        self.entries.binary_search_by_key( &id, |&(n, _)| n ).ok()
    }

    /// Coefficient of the `i`-th entry.
    pub fn coef( &self, i: usize ) -> Result< R > {
        self.entries.get( i ).map( |&(_, c)| c ).ok_or( Error::IndexOutOfRange{ index: i, len: self.size() } )
    }

    /// Identifier of the `i`-th entry.
    pub fn num( &self, i: usize ) -> Result< usize > {
        self.entries.get( i ).map( |&(n, _)| n ).ok_or( Error::IndexOutOfRange{ index: i, len: self.size() } )
    }

    /// The entry with the largest identifier.
    pub fn last_entry( &self ) -> Option< (usize, R) > { self.entries.last().cloned() }

    /// `true` if some coefficient is neither zero nor invertible.
    pub fn contains_non_invertible( &self ) -> bool {
        self.entries.iter().any( |(_, c)| c.delta() > 1 )
    }

    /// Choose the position of a pivot entry.
    ///
    /// Without a table the first entry with `delta == 1` wins, which favors scan
    /// order over sparsity. Otherwise the entry of minimal `delta` wins; with a
    /// table, ties are broken by the smallest `table[id].size()`, keeping the
    /// earliest entry unless a later one is strictly shorter.
    ///
    /// Returns `None` for the zero chain, and [`Error::IndexOutOfRange`] if the
    /// table has no slot for a candidate identifier.
    pub fn find_best( &self, table: Option< &[ SparseChain< R > ] > ) -> Result< Option< usize > > {
        match self.size() {
            0 => return Ok( None ),
            1 => return Ok( Some( 0 ) ),
            _ => {}
        }
        if table.is_none() {
            if let Some( i ) = self.entries.iter().position( |(_, c)| c.delta() == 1 ) {
                return Ok( Some( i ) )
            }
        }

        let mut best_i = 0;
        let mut best_delta = self.entries[ 0 ].1.delta();
        for ( i, (_, c) ) in self.entries.iter().enumerate().skip( 1 ) {
            let delta = c.delta();
            if delta < best_delta {
                best_delta = delta;
                best_i = i;
            }
        }

        if let Some( table ) = table {
            let length_at = |i: usize| -> Result< usize > {
                let id = self.entries[ i ].0;
                table.get( id ).map( |row| row.size() ).ok_or( Error::IndexOutOfRange{ index: id, len: table.len() } )
            };
            let mut best_len = length_at( best_i )?;
            for i in best_i + 1 .. self.size() {
                if self.entries[ i ].1.delta() != best_delta { continue }
                let len = length_at( i )?;
                if best_len > len {
                    best_len = len;
                    best_i = i;
                }
            }
        }
        Ok( Some( best_i ) )
    }

    //  -----------------------------------------------------------------------
    //  MUTATION
    //  -----------------------------------------------------------------------

    /// Add `coefficient` at `id`, removing the entry if the sum vanishes.
    ///
    /// A zero `coefficient` leaves the chain unchanged.
    pub fn add_entry( &mut self, id: usize, coefficient: R ) -> &mut Self {
        if coefficient.is_zero() { return self }
        match self.entries.binary_search_by_key( &id, |&(n, _)| n ) {
            Ok( pos ) => {
                let sum = self.entries[ pos ].1 + coefficient;
                if sum.is_zero() {
                    self.entries.remove( pos );
                } else {
                    self.entries[ pos ].1 = sum;
                }
            }
            Err( pos ) => self.entries.insert( pos, ( id, coefficient ) ),
        }
        self
    }

    /// `self += coefficient * other`.
    pub fn add_chain( &mut self, other: &SparseChain< R >, coefficient: R ) -> &mut Self {
        self.add_chain_with( other, coefficient, |_, _| {} )
    }

    /// `self += coefficient * other`, reporting each contribution to `mirror`.
    ///
    /// `mirror( k, c )` is called once for every identifier `k` at which `c`
    /// (nonzero) was added to `self`, including identifiers whose entry
    /// cancelled.
    pub fn add_chain_with< F >( &mut self, other: &SparseChain< R >, coefficient: R, mut mirror: F ) -> &mut Self
        where F: FnMut( usize, R )
    {
        if coefficient.is_zero() || other.is_empty() { return self }

        let mut merged = Vec::with_capacity( self.size() + other.size() );
        for item in self.entries.iter().merge_join_by( other.entries.iter(), |a, b| a.0.cmp( &b.0 ) ) {
            match item {
                EitherOrBoth::Left( &( n, c ) ) => merged.push( ( n, c ) ),
                EitherOrBoth::Right( &( n, c ) ) => {
                    let contribution = coefficient * c;
                    if contribution.is_zero() { continue }
                    merged.push( ( n, contribution ) );
                    mirror( n, contribution );
                }
                EitherOrBoth::Both( &( n, a ), &( _, b ) ) => {
                    let contribution = coefficient * b;
                    if contribution.is_zero() {
                        merged.push( ( n, a ) );
                        continue
                    }
                    let sum = a + contribution;
                    if ! sum.is_zero() { merged.push( ( n, sum ) ) }
                    mirror( n, contribution );
                }
            }
        }
        self.entries = merged;
        self
    }

    /// `self += coefficient * other`, keeping `companion` consistent.
    ///
    /// `self` is regarded as line `self_id` of a matrix and `companion` as the
    /// transposed lines of the same matrix: every contribution at `k` is also
    /// added at `self_id` in `companion[k]`. Fails before touching anything if
    /// `companion` has no slot for some identifier of `other`.
    pub fn add_chain_mirrored(
                &mut self,
                other:          &SparseChain< R >,
                coefficient:    R,
                self_id:        usize,
                companion:      &mut [ SparseChain< R > ],
            ) -> Result< () >
    {
        check_slots( other.ids(), companion.len() )?;
        self.add_chain_with( other, coefficient, |k, c| { companion[ k ].add_entry( self_id, c ); } );
        Ok(())
    }

    /// Remove the entry at `id`, returning its coefficient.
    pub fn remove( &mut self, id: usize ) -> Option< R > {
        self.find_number( id ).map( |pos| self.entries.remove( pos ).1 )
    }

    /// Remove every entry.
    pub fn clear( &mut self ) { self.entries.clear() }

    /// Exchange the contents of two chains.
    pub fn swap( &mut self, other: &mut SparseChain< R > ) {
        mem::swap( &mut self.entries, &mut other.entries )
    }

    /// Exchange the contents of lines `self_id` and `other_id` of a matrix whose
    /// transposed lines are `companion`.
    ///
    /// Every identifier present in either chain gets `self_id` and `other_id`
    /// exchanged inside its companion line.
    pub fn swap_mirrored(
                &mut self,
                other:          &mut SparseChain< R >,
                self_id:        usize,
                other_id:       usize,
                companion:      &mut [ SparseChain< R > ],
            ) -> Result< () >
    {
        let touched: Vec< usize > = self.ids().merge( other.ids() ).dedup().collect();
        check_slots( touched.iter().cloned(), companion.len() )?;
        self.swap( other );
        for k in touched {
            companion[ k ].swap_numbers( self_id, other_id );
        }
        Ok(())
    }

    /// Exchange the identifiers `a` and `b`, keeping their coefficients.
    pub fn swap_numbers( &mut self, a: usize, b: usize ) {
        if a == b { return }
        let coefficient_a = self.remove( a );
        let coefficient_b = self.remove( b );
        if let Some( c ) = coefficient_a { self.add_entry( b, c ); }
        if let Some( c ) = coefficient_b { self.add_entry( a, c ); }
    }

    /// Move the contents of `other` into `self`, leaving `other` empty.
    pub fn take( &mut self, other: &mut SparseChain< R > ) {
        self.entries = mem::take( &mut other.entries );
    }

    /// Scale the entry at `id`, or every entry when `id` is `None`.
    ///
    /// Entries whose product vanishes are removed; in particular a zero
    /// coefficient with no `id` clears the chain.
    pub fn multiply( &mut self, coefficient: R, id: Option< usize > ) -> &mut Self {
        match id {
            Some( id ) => {
                if let Some( pos ) = self.find_number( id ) {
                    let product = self.entries[ pos ].1 * coefficient;
                    if product.is_zero() {
                        self.entries.remove( pos );
                    } else {
                        self.entries[ pos ].1 = product;
                    }
                }
            }
            None => {
                if coefficient.is_zero() {
                    self.entries.clear();
                } else {
                    for entry in self.entries.iter_mut() { entry.1 = entry.1 * coefficient }
                    self.entries.retain( |(_, c)| ! c.is_zero() );
                }
            }
        }
        self
    }
}

fn check_slots< I: Iterator< Item = usize > >( ids: I, len: usize ) -> Result< () > {
    match ids.max() {
        Some( index ) if index >= len => Err( Error::IndexOutOfRange{ index, len } ),
        _ => Ok(()),
    }
}

//  ---------------------------------------------------------------------------
//  CONVERSIONS
//  ---------------------------------------------------------------------------

impl < R > From< SparseChain< R > > for Vec< (usize, R) > {
    fn from( chain: SparseChain< R > ) -> Self { chain.entries }
}

impl < R: FieldElement > TryFrom< Vec< (usize, R) > > for SparseChain< R > {
    type Error = Error;
    fn try_from( pairs: Vec< (usize, R) > ) -> Result< Self > { SparseChain::from_entries( pairs ) }
}

/// Collecting sums repeated identifiers and drops zeros.
impl < R: FieldElement > FromIterator< (usize, R) > for SparseChain< R > {
    fn from_iter< I: IntoIterator< Item = (usize, R) > >( iter: I ) -> Self {
        let mut chain = SparseChain::new();
        for ( id, c ) in iter { chain.add_entry( id, c ); }
        chain
    }
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::rings::field_prime_order::PrimeOrderField;
    use num::{One, Zero};

    type F5 = PrimeOrderField< 5 >;

    fn z2( n: i64 ) -> Z2 { Z2::from_integer( n ) }
    fn f5( n: i64 ) -> F5 { F5::from_integer( n ) }

    fn chain_z2( ids: &[ usize ] ) -> SparseChain {
        ids.iter().map( |&id| ( id, Z2::one() ) ).collect()
    }

    #[test]
    fn test_add_entry_keeps_order_and_cancels() {
        let mut c = SparseChain::new();
        c.add_entry( 5, z2( 1 ) ).add_entry( 2, z2( 1 ) ).add_entry( 9, z2( 1 ) );
        assert_eq!( c.ids().collect::< Vec<_> >(), vec![ 2, 5, 9 ] );

        c.add_entry( 5, z2( 1 ) );
        assert_eq!( c.ids().collect::< Vec<_> >(), vec![ 2, 9 ] );
        assert_eq!( c.size(), 2 );

        c.add_entry( 3, z2( 0 ) );
        assert_eq!( c.size(), 2 );
    }

    #[test]
    fn test_coefficient_of() {
        let c: SparseChain< F5 > = vec![ ( 1, f5( 3 ) ), ( 4, f5( 2 ) ) ].into_iter().collect();
        assert_eq!( c.coefficient_of( Some( 4 ) ), f5( 2 ) );
        assert_eq!( c.coefficient_of( Some( 2 ) ), F5::zero() );
        assert_eq!( c.coefficient_of( Some( 100 ) ), F5::zero() );
        assert_eq!( c.coefficient_of( None ), f5( 3 ) );
        assert_eq!( SparseChain::< F5 >::new().coefficient_of( None ), F5::zero() );
    }

    #[test]
    fn test_positional_access() {
        let c = chain_z2( &[ 3, 7 ] );
        assert_eq!( c.num( 1 ), Ok( 7 ) );
        assert_eq!( c.coef( 0 ), Ok( Z2::one() ) );
        assert_eq!( c.num( 2 ), Err( Error::IndexOutOfRange{ index: 2, len: 2 } ) );
        assert_eq!( c.find_number( 7 ), Some( 1 ) );
        assert_eq!( c.find_number( 4 ), None );
    }

    #[test]
    fn test_add_chain_merge() {
        let mut a: SparseChain< F5 > = vec![ ( 0, f5( 1 ) ), ( 2, f5( 4 ) ), ( 5, f5( 1 ) ) ].into_iter().collect();
        let b: SparseChain< F5 > = vec![ ( 2, f5( 2 ) ), ( 3, f5( 1 ) ) ].into_iter().collect();
        a.add_chain( &b, f5( 3 ) );
        // 4 + 3*2 = 10 = 0 cancels at 2; 3*1 = 3 appears at 3
        assert_eq!( a.entries(), &[ ( 0, f5( 1 ) ), ( 3, f5( 3 ) ), ( 5, f5( 1 ) ) ] );
    }

    #[test]
    fn test_add_chain_with_zero_coefficient_is_noop() {
        let mut a = chain_z2( &[ 1 ] );
        a.add_chain( &chain_z2( &[ 1, 2 ] ), Z2::zero() );
        assert_eq!( a, chain_z2( &[ 1 ] ) );
    }

    #[test]
    fn test_add_chain_mirrored_updates_companion() {
        // column 1 of a 3x2 matrix receives column 0
        let mut columns = vec![ chain_z2( &[ 0, 2 ] ), chain_z2( &[ 2 ] ) ];
        let mut rows = vec![ chain_z2( &[ 0 ] ), SparseChain::new(), chain_z2( &[ 0, 1 ] ) ];

        let source = columns[ 0 ].clone();
        columns[ 1 ].add_chain_mirrored( &source, Z2::one(), 1, &mut rows ).unwrap();

        assert_eq!( columns[ 1 ], chain_z2( &[ 0 ] ) );
        assert_eq!( rows[ 0 ], chain_z2( &[ 0, 1 ] ) );
        assert_eq!( rows[ 2 ], chain_z2( &[ 0 ] ) );
    }

    #[test]
    fn test_add_chain_mirrored_checks_bounds_first() {
        let mut target = chain_z2( &[ 0 ] );
        let mut companion = vec![ SparseChain::new(); 2 ];
        let result = target.add_chain_mirrored( &chain_z2( &[ 1, 4 ] ), Z2::one(), 0, &mut companion );
        assert_eq!( result, Err( Error::IndexOutOfRange{ index: 4, len: 2 } ) );
        assert_eq!( target, chain_z2( &[ 0 ] ) );
    }

    #[test]
    fn test_swap_mirrored() {
        // columns of the matrix [[1,0],[1,1]]
        let mut col0 = chain_z2( &[ 0, 1 ] );
        let mut col1 = chain_z2( &[ 1 ] );
        let mut rows = vec![ chain_z2( &[ 0 ] ), chain_z2( &[ 0, 1 ] ) ];
        col0.swap_mirrored( &mut col1, 0, 1, &mut rows ).unwrap();
        assert_eq!( col0, chain_z2( &[ 1 ] ) );
        assert_eq!( col1, chain_z2( &[ 0, 1 ] ) );
        assert_eq!( rows[ 0 ], chain_z2( &[ 1 ] ) );
        assert_eq!( rows[ 1 ], chain_z2( &[ 0, 1 ] ) );
    }

    #[test]
    fn test_take_empties_source() {
        let mut source = chain_z2( &[ 2, 3 ] );
        let before = source.clone();
        let mut target = chain_z2( &[ 9 ] );
        target.take( &mut source );
        assert!( source.is_empty() );
        assert_eq!( target, before );
    }

    #[test]
    fn test_multiply() {
        let mut c: SparseChain< F5 > = vec![ ( 1, f5( 2 ) ), ( 3, f5( 1 ) ) ].into_iter().collect();
        c.multiply( f5( 3 ), Some( 1 ) );
        assert_eq!( c.coefficient_of( Some( 1 ) ), f5( 1 ) );
        c.multiply( f5( 0 ), Some( 3 ) );
        assert_eq!( c.ids().collect::< Vec<_> >(), vec![ 1 ] );
        c.multiply( f5( 2 ), None );
        assert_eq!( c.entries(), &[ ( 1, f5( 2 ) ) ] );
        c.multiply( f5( 0 ), None );
        assert!( c.is_empty() );
    }

    #[test]
    fn test_find_best_fast_path_prefers_scan_order() {
        let c = chain_z2( &[ 0, 1, 2 ] );
        let table = vec![ chain_z2( &[ 0, 1, 2 ] ), chain_z2( &[ 0 ] ), chain_z2( &[ 0, 1 ] ) ];
        assert_eq!( c.find_best( None ), Ok( Some( 0 ) ) );
        // with a table, the shortest companion line wins
        assert_eq!( c.find_best( Some( &table ) ), Ok( Some( 1 ) ) );
    }

    #[test]
    fn test_find_best_tie_keeps_earliest() {
        let c = chain_z2( &[ 0, 1, 2 ] );
        let table = vec![ chain_z2( &[ 5 ] ), chain_z2( &[ 0, 1 ] ), chain_z2( &[ 3 ] ) ];
        assert_eq!( c.find_best( Some( &table ) ), Ok( Some( 0 ) ) );
    }

    #[test]
    fn test_find_best_degenerate_sizes() {
        assert_eq!( SparseChain::< Z2 >::new().find_best( None ), Ok( None ) );
        assert_eq!( chain_z2( &[ 7 ] ).find_best( None ), Ok( Some( 0 ) ) );
        let short_table = vec![ SparseChain::new() ];
        assert_eq!(
            chain_z2( &[ 0, 3 ] ).find_best( Some( &short_table ) ),
            Err( Error::IndexOutOfRange{ index: 3, len: 1 } ),
        );
    }

    #[test]
    fn test_non_invertible_detection() {
        type Z4 = PrimeOrderField< 4 >;
        let c: SparseChain< Z4 > = vec![ ( 0, Z4::from_integer( 1 ) ), ( 1, Z4::from_integer( 2 ) ) ].into_iter().collect();
        assert!( c.contains_non_invertible() );
        // the non-invertible entry loses the minimal-delta contest
        assert_eq!( c.find_best( None ), Ok( Some( 0 ) ) );
        assert!( ! chain_z2( &[ 0, 1 ] ).contains_non_invertible() );
    }

    #[test]
    fn test_from_entries_rejects_zero() {
        assert_eq!(
            SparseChain::from_entries( vec![ ( 3, z2( 1 ) ), ( 1, z2( 0 ) ) ] ),
            Err( Error::ZeroCoefficient{ id: 1 } ),
        );
        let c = SparseChain::from_entries( vec![ ( 3, z2( 1 ) ), ( 1, z2( 1 ) ) ] ).unwrap();
        assert_eq!( c, chain_z2( &[ 1, 3 ] ) );
    }

    #[test]
    fn test_swap_numbers() {
        let mut c: SparseChain< F5 > = vec![ ( 1, f5( 2 ) ), ( 4, f5( 3 ) ) ].into_iter().collect();
        c.swap_numbers( 1, 4 );
        assert_eq!( c.entries(), &[ ( 1, f5( 3 ) ), ( 4, f5( 2 ) ) ] );
        c.swap_numbers( 4, 6 );
        assert_eq!( c.entries(), &[ ( 1, f5( 3 ) ), ( 6, f5( 2 ) ) ] );
    }

    #[test]
    fn test_json_round_trip() {
        let c = chain_z2( &[ 0, 5 ] );
        let text = serde_json::to_string( &c ).unwrap();
        assert_eq!( text, "[[0,1],[5,1]]" );
        let back: SparseChain = serde_json::from_str( &text ).unwrap();
        assert_eq!( back, c );
        assert!( serde_json::from_str::< SparseChain >( "[[0,0]]" ).is_err() );
    }
}
