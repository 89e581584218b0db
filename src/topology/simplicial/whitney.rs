//! Whitney chains of an order complex.
//!
//! A generator `sigma` is *regular* in a generator `tau` when `tau` contains
//! every vertex of `sigma` and leaves certain gaps around `sigma` empty:
//!
//! 1. nothing in `tau` lies strictly below the first vertex of `sigma`;
//! 2. for every odd position `i` (counting from 0) with a successor, nothing in
//!    `tau` lies strictly between `sigma[i]` and `sigma[i+1]`;
//! 3. if `sigma` has an even number of vertices, nothing in `tau` lies strictly
//!    above its last vertex.
//!
//! The Whitney chain in dimension `p` has, at each `p`-dimensional generator,
//! the parity of the number of generators of dimension at least `p` in which
//! it is regular.
//!
//! ```
//! use posethom::topology::poset::{Poset, chain_arrows};
//! use posethom::topology::simplicial::basis::GeneratorBasis;
//! use posethom::topology::simplicial::whitney::{is_regular, whitney_chain};
//!
//! let poset = Poset::from_arrows( chain_arrows( 3 ) ).unwrap();
//! let basis = GeneratorBasis::from_poset( &poset );
//!
//! assert!( is_regular( &poset, &[ 0, 2 ], &[ 0, 1, 2 ] ) );
//! assert!( ! is_regular( &poset, &[ 0, 2 ], &[ 1 ] ) );
//!
//! // only the top vertex survives in dimension 0
//! let w0 = whitney_chain( &poset, &basis, 0 );
//! assert_eq!( w0.ids().collect::< Vec<_> >(), vec![ basis.index_of( &[ 2 ] ).unwrap() ] );
//! ```

use indicatif::ProgressBar;
use log::debug;
use num::{Integer, One};

use crate::algebra::chains::sparse::SparseChain;
use crate::algebra::rings::field_prime_order::Z2;
use crate::topology::poset::{Poset, Vertex};
use crate::topology::simplicial::basis::GeneratorBasis;


/// `true` if `sigma` is regular in `tau`.
pub fn is_regular( poset: &Poset, sigma: &[ Vertex ], tau: &[ Vertex ] ) -> bool {
    let ( first, last ) = match ( sigma.first(), sigma.last() ) {
        ( Some( &first ), Some( &last ) ) => ( first, last ),
        _ => return false,
    };
    if ! sigma.iter().all( |v| tau.contains( v ) ) {
        return false
    }
    if tau.iter().any( |&x| poset.greater( x, first ) ) {
        return false
    }
    for i in ( 1 .. sigma.len().saturating_sub( 1 ) ).step_by( 2 ) {
        let ( low, high ) = ( sigma[ i ], sigma[ i + 1 ] );
        if tau.iter().any( |&x| poset.greater( low, x ) && poset.greater( x, high ) ) {
            return false
        }
    }
    if sigma.len().is_even() && tau.iter().any( |&x| poset.greater( last, x ) ) {
        return false
    }
    true
}

/// The Whitney chain in dimension `p`.
pub fn whitney_chain( poset: &Poset, basis: &GeneratorBasis, p: usize ) -> SparseChain< Z2 > {
    whitney_chain_with_progress( poset, basis, p, &ProgressBar::hidden() )
}

/// As [`whitney_chain`], advancing `progress` once per generator of dimension `p`.
pub fn whitney_chain_with_progress( poset: &Poset, basis: &GeneratorBasis, p: usize, progress: &ProgressBar ) -> SparseChain< Z2 > {
    let block = basis.block( p + 1 );
    let candidates = &basis.simplices()[ block.start .. ];
    let mut chain = SparseChain::new();
    for id in block {
        let sigma = &basis.simplices()[ id ];
        let count = candidates.iter().filter( |tau| is_regular( poset, sigma, tau ) ).count();
        if count.is_odd() {
            chain.add_entry( id, Z2::one() );
        }
        progress.inc( 1 );
    }
    debug!( "whitney chain in dimension {} has {} generators", p, chain.size() );
    chain
}

/// The Whitney chains in every dimension `0 .. basis.dimension()`.
pub fn whitney_chains( poset: &Poset, basis: &GeneratorBasis, progress: &ProgressBar ) -> Vec< SparseChain< Z2 > > {
    progress.set_length( basis.len() as u64 );
    let chains = ( 0 .. basis.dimension() )
        .map( |p| whitney_chain_with_progress( poset, basis, p, progress ) )
        .collect();
    progress.finish_and_clear();
    chains
}

/// The sum of the Whitney chains over all dimensions.
pub fn whitney_chain_total( poset: &Poset, basis: &GeneratorBasis, progress: &ProgressBar ) -> SparseChain< Z2 > {
    let mut total = SparseChain::new();
    for chain in whitney_chains( poset, basis, progress ) {
        total.add_chain( &chain, Z2::one() );
    }
    total
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::poset::boolean_lattice_proper_part_arrows;

    fn three_chain() -> ( Poset, GeneratorBasis ) {
        let poset = Poset::from_arrows( vec![ ( 1, 2 ), ( 2, 3 ) ] ).unwrap();
        let basis = GeneratorBasis::from_poset( &poset );
        ( poset, basis )
    }

    fn simplices( basis: &GeneratorBasis, chain: &SparseChain< Z2 > ) -> Vec< Vec< Vertex > > {
        chain.ids().map( |id| basis.simplices()[ id ].clone() ).collect()
    }

    #[test]
    fn test_regularity() {
        let ( poset, _ ) = three_chain();
        assert!( is_regular( &poset, &[ 1, 3 ], &[ 1, 2, 3 ] ) );
        assert!( is_regular( &poset, &[ 2 ], &[ 2, 3 ] ) );
        assert!( is_regular( &poset, &[ 1 ], &[ 1 ] ) );
        // tau must contain sigma
        assert!( ! is_regular( &poset, &[ 1, 3 ], &[ 2 ] ) );
        // 3 lies above the last vertex of an even-length sigma
        assert!( ! is_regular( &poset, &[ 1, 2 ], &[ 1, 2, 3 ] ) );
        // 1 lies below the first vertex
        assert!( ! is_regular( &poset, &[ 2 ], &[ 1, 2 ] ) );
        assert!( ! is_regular( &poset, &[], &[ 1 ] ) );
    }

    #[test]
    fn test_gap_between_odd_positions() {
        // 0 < 1 < 2 < 3 < 4; sigma = [0,1,3] has a gap between positions 1 and 2
        let poset = Poset::from_arrows( vec![ ( 0, 1 ), ( 1, 2 ), ( 2, 3 ), ( 3, 4 ) ] ).unwrap();
        assert!( is_regular( &poset, &[ 0, 1, 3 ], &[ 0, 1, 3, 4 ] ) );
        assert!( ! is_regular( &poset, &[ 0, 1, 3 ], &[ 0, 1, 2, 3 ] ) );
        // the gap at position 0 is allowed
        assert!( is_regular( &poset, &[ 0, 2, 3 ], &[ 0, 1, 2, 3 ] ) );
    }

    #[test]
    fn test_three_chain() {
        let ( poset, basis ) = three_chain();
        assert_eq!( simplices( &basis, &whitney_chain( &poset, &basis, 0 ) ), vec![ vec![ 3 ] ] );
        // {1,3} is regular in itself and in {1,2,3}
        assert_eq!( simplices( &basis, &whitney_chain( &poset, &basis, 1 ) ), vec![ vec![ 1, 2 ], vec![ 2, 3 ] ] );
        assert_eq!( simplices( &basis, &whitney_chain( &poset, &basis, 2 ) ), vec![ vec![ 1, 2, 3 ] ] );

        let total = whitney_chain_total( &poset, &basis, &ProgressBar::hidden() );
        assert_eq!( total.ids().collect::< Vec<_> >(), vec![ 2, 3, 5, 6 ] );
    }

    #[test]
    fn test_hexagon_marks_every_generator() {
        let poset = Poset::from_arrows( boolean_lattice_proper_part_arrows( 3 ) ).unwrap();
        let basis = GeneratorBasis::from_poset( &poset );
        let chains = whitney_chains( &poset, &basis, &ProgressBar::hidden() );
        assert_eq!( chains.len(), 2 );
        assert_eq!( chains[ 0 ].ids().collect::< Vec<_> >(), ( 0 .. 6 ).collect::< Vec<_> >() );
        assert_eq!( chains[ 1 ].ids().collect::< Vec<_> >(), ( 6 .. 12 ).collect::< Vec<_> >() );
    }

    #[test]
    fn test_empty_basis() {
        let poset = Poset::from_arrows( vec![] ).unwrap();
        let basis = GeneratorBasis::from_poset( &poset );
        assert!( whitney_chain_total( &poset, &basis, &ProgressBar::hidden() ).is_empty() );
    }
}
