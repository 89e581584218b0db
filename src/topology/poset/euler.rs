//! The Euler parity test.
//!
//! A poset passes when, counting generators of its order complex,
//!
//! - for every vertex `v`, the generators lying entirely above `v` are even in
//!   number, and so are the generators lying entirely below `v`;
//! - for every pair of distinct vertices, the generators lying entirely inside
//!   the open interval between them are even in number.
//!
//! Since a generator is a chain, "entirely above `v`" amounts to its first
//! vertex being strictly above `v`, and "entirely below" to its last vertex
//! being strictly below `v`. For an open interval the number of nonempty chains
//! is even exactly when its order complex has even Euler characteristic, which
//! is what the name refers to.
//!
//! ```
//! use posethom::topology::poset::{Poset, boolean_lattice_proper_part_arrows, chain_arrows};
//! use posethom::topology::poset::euler::is_euler;
//! use posethom::topology::simplicial::basis::GeneratorBasis;
//!
//! let hexagon = Poset::from_arrows( boolean_lattice_proper_part_arrows( 3 ) ).unwrap();
//! assert!( is_euler( &hexagon, &GeneratorBasis::from_poset( &hexagon ) ) );
//!
//! let chain = Poset::from_arrows( chain_arrows( 3 ) ).unwrap();
//! assert!( ! is_euler( &chain, &GeneratorBasis::from_poset( &chain ) ) );
//! ```

use std::fmt;

use indicatif::ProgressBar;
use log::{debug, info};
use num::Integer;
use serde::Serialize;

use crate::error::Result;
use crate::topology::poset::{Poset, Vertex};
use crate::topology::simplicial::basis::GeneratorBasis;


/// The first count found to be odd.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EulerViolation {
    /// An odd number of generators lies strictly above `vertex`.
    Above { vertex: Vertex, count: usize },
    /// An odd number of generators lies strictly below `vertex`.
    Below { vertex: Vertex, count: usize },
    /// An odd number of generators lies strictly between `lower` and `upper`.
    Interval { lower: Vertex, upper: Vertex, count: usize },
}

impl fmt::Display for EulerViolation {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
        match self {
            EulerViolation::Above{ vertex, count } =>
                write!( f, "{} generators lie above vertex {}", count, vertex ),
            EulerViolation::Below{ vertex, count } =>
                write!( f, "{} generators lie below vertex {}", count, vertex ),
            EulerViolation::Interval{ lower, upper, count } =>
                write!( f, "{} generators lie between vertices {} and {}", count, lower, upper ),
        }
    }
}

/// `true` if every count of the Euler test is even.
pub fn is_euler( poset: &Poset, basis: &GeneratorBasis ) -> bool {
    find_euler_violation( poset, basis, &ProgressBar::hidden() ).is_none()
}

/// Run the Euler test on a simplicial complex, ordering its vertices by the
/// edges of its basis (each edge read from smaller to larger vertex label).
pub fn is_euler_simplicial( basis: &GeneratorBasis ) -> Result< bool > {
    let poset = Poset::from_skeleton( basis )?;
    Ok( is_euler( &poset, basis ) )
}

/// The first odd count, checking vertices before pairs.
///
/// `progress` advances once per vertex and once per pair.
pub fn find_euler_violation( poset: &Poset, basis: &GeneratorBasis, progress: &ProgressBar ) -> Option< EulerViolation > {
    let vertices = poset.vertices().vec();
    let n = vertices.len();
    progress.set_length( ( n + n * n.saturating_sub( 1 ) / 2 ) as u64 );

    for &vertex in vertices {
        let above = poset.bigger_vertices( vertex );
        let count = basis.simplices().iter().filter( |s| above.contains( &s[ 0 ] ) ).count();
        if count.is_odd() {
            return report( EulerViolation::Above{ vertex, count }, progress )
        }

        let below = poset.smaller_vertices( vertex );
        let count = basis.simplices().iter().filter( |s| below.contains( &s[ s.len() - 1 ] ) ).count();
        if count.is_odd() {
            return report( EulerViolation::Below{ vertex, count }, progress )
        }
        progress.inc( 1 );
    }

    for ( i, &x ) in vertices.iter().enumerate() {
        for &y in vertices[ i + 1 .. ].iter() {
            progress.inc( 1 );
            let between = poset.between_vertices( x, y );
            if between.is_empty() { continue }
            let count = basis.simplices().iter()
                .filter( |s| s.iter().all( |v| between.contains( v ) ) )
                .count();
            if count.is_odd() {
                let ( lower, upper ) = if poset.greater( x, y ) { ( x, y ) } else { ( y, x ) };
                return report( EulerViolation::Interval{ lower, upper, count }, progress )
            }
        }
    }
    progress.finish_and_clear();
    info!( "euler test passed on {} vertices", n );
    None
}

fn report( violation: EulerViolation, progress: &ProgressBar ) -> Option< EulerViolation > {
    progress.abandon();
    debug!( "euler test failed: {}", violation );
    Some( violation )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::poset::{boolean_lattice_proper_part_arrows, chain_arrows};

    fn violation( arrows: Vec< ( Vertex, Vertex ) > ) -> Option< EulerViolation > {
        let poset = Poset::from_arrows( arrows ).unwrap();
        let basis = GeneratorBasis::from_poset( &poset );
        find_euler_violation( &poset, &basis, &ProgressBar::hidden() )
    }

    #[test]
    fn test_spheres_are_euler() {
        assert_eq!( violation( boolean_lattice_proper_part_arrows( 3 ) ), None );
        assert_eq!( violation( boolean_lattice_proper_part_arrows( 4 ) ), None );
    }

    #[test]
    fn test_three_chain_fails() {
        // 0 has the generators {1}, {2}, {1,2} above it
        assert_eq!(
            violation( chain_arrows( 3 ) ),
            Some( EulerViolation::Above{ vertex: 0, count: 3 } ),
        );
    }

    #[test]
    fn test_two_points_fail_below() {
        // above 1: {2}, below 1: nothing; above 2: nothing; below 2: {1}
        assert_eq!(
            violation( vec![ ( 1, 2 ) ] ),
            Some( EulerViolation::Above{ vertex: 1, count: 1 } ),
        );
    }

    #[test]
    fn test_interval_violation() {
        // every up-set and down-set holds an even number of generators, but
        // the open interval between 0 and 4 holds only {3}
        let arrows = vec![ ( 0, 3 ), ( 0, 6 ), ( 1, 3 ), ( 1, 6 ), ( 2, 4 ), ( 2, 5 ), ( 3, 4 ), ( 3, 5 ) ];
        assert_eq!(
            violation( arrows ),
            Some( EulerViolation::Interval{ lower: 0, upper: 4, count: 1 } ),
        );
    }

    #[test]
    fn test_simplicial_variant() {
        // a square whose edges all run from {1,2} up to {3,4}
        let square = GeneratorBasis::from_maximal_simplices( &[ vec![ 1, 3 ], vec![ 2, 3 ], vec![ 2, 4 ], vec![ 1, 4 ] ] );
        assert_eq!( is_euler_simplicial( &square ), Ok( true ) );

        // labelled 1, 2, 3 the boundary of a triangle orders its vertices as a chain
        let triangle = GeneratorBasis::from_maximal_simplices( &[ vec![ 1, 2 ], vec![ 2, 3 ], vec![ 1, 3 ] ] );
        assert_eq!( is_euler_simplicial( &triangle ), Ok( false ) );

        let path = GeneratorBasis::from_maximal_simplices( &[ vec![ 1, 2 ], vec![ 2, 3 ] ] );
        assert_eq!( is_euler_simplicial( &path ), Ok( false ) );
    }
}
