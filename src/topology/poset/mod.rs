//! Finite posets given by their covering arrows.
//!
//! A [`Poset`] is built from a list of arrows `a -> b`, each meaning that `b`
//! covers `a`. The order is the reachability closure of the arrows. This
//! module answers the questions the rest of the crate asks of the order:
//! comparability, strict up- and down-sets, open intervals, and the maximal
//! chains that generate the order complex.
//!
//! # Example
//!
//! The proper part of the Boolean lattice on three atoms is a hexagon: three
//! atoms `1, 2, 4` below three coatoms `3, 5, 6` (vertices are bitmasks).
//!
//! ```
//! use posethom::topology::poset::{Poset, boolean_lattice_proper_part_arrows};
//!
//! let poset = Poset::from_arrows( boolean_lattice_proper_part_arrows( 3 ) ).unwrap();
//!
//! assert_eq!( poset.minimal(), vec![ 1, 2, 4 ] );
//! assert_eq!( poset.maximal(), vec![ 3, 5, 6 ] );
//! assert!( poset.greater( 1, 3 ) );
//! assert!( ! poset.greater( 1, 6 ) );
//! assert_eq!( poset.bigger_vertices( 1 ).into_vec(), vec![ 3, 5 ] );
//!
//! // one maximal chain per arrow
//! assert_eq!( poset.maximal_chains(), vec![
//!     vec![ 1, 3 ], vec![ 1, 5 ],
//!     vec![ 2, 3 ], vec![ 2, 6 ],
//!     vec![ 4, 5 ], vec![ 4, 6 ],
//! ] );
//! ```

pub mod euler;
pub mod parse;

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};
use crate::topology::simplicial::basis::GeneratorBasis;
use crate::utilities::sequences_and_ordinals::SortedVec;


/// A vertex of a poset.
pub type Vertex = usize;

/// A covering relation `a -> b`, read "`a` is covered by `b`".
pub type Arrow = ( Vertex, Vertex );



//  ===========================================================================
//  POSET
//  ===========================================================================


/// A finite poset, with the strict up- and down-set of every vertex precomputed.
#[derive(Clone, Debug)]
pub struct Poset {
    vertices:       SortedVec< Vertex >,
    arrows:         Vec< Arrow >,
    successors:     HashMap< Vertex, Vec< Vertex > >,
    predecessors:   HashMap< Vertex, Vec< Vertex > >,
    bigger:         HashMap< Vertex, SortedVec< Vertex > >,
    smaller:        HashMap< Vertex, SortedVec< Vertex > >,
}

impl Poset {

    /// The poset generated by `arrows`.
    ///
    /// Repeated arrows are kept once. Fails with [`Error::NotAPoset`] if an
    /// arrow is a loop or the arrows contain a directed cycle.
    pub fn from_arrows( arrows: Vec< Arrow > ) -> Result< Self > {
        Self::from_vertices_and_arrows( Vec::new(), arrows )
    }

    /// Like [`Poset::from_arrows`], but `vertices` may add elements that lie on
    /// no arrow.
    pub fn from_vertices_and_arrows( vertices: Vec< Vertex >, arrows: Vec< Arrow > ) -> Result< Self > {
        if let Some( &( a, _ ) ) = arrows.iter().find( |( a, b )| a == b ) {
            return Err( Error::NotAPoset( format!( "arrow {{{},{}}} is a loop", a, a ) ) )
        }
        let arrows: Vec< Arrow > = arrows.into_iter().unique().collect();
        let vertices = vertex_set( &arrows ).union( &SortedVec::from_unsorted( vertices ) );

        let mut successors: HashMap< Vertex, Vec< Vertex > > = HashMap::new();
        let mut predecessors: HashMap< Vertex, Vec< Vertex > > = HashMap::new();
        for &( a, b ) in arrows.iter() {
            successors.entry( a ).or_default().push( b );
            predecessors.entry( b ).or_default().push( a );
        }

        let mut bigger = HashMap::with_capacity( vertices.len() );
        let mut smaller = HashMap::with_capacity( vertices.len() );
        for &v in vertices.iter() {
            let up = reachable( v, &successors );
            if up.contains( &v ) {
                return Err( Error::NotAPoset( format!( "vertex {} lies on a directed cycle", v ) ) )
            }
            bigger.insert( v, up );
            smaller.insert( v, reachable( v, &predecessors ) );
        }
        debug!( "poset with {} vertices and {} arrows", vertices.len(), arrows.len() );

        Ok( Poset{ vertices, arrows, successors, predecessors, bigger, smaller } )
    }

    /// The poset read off a simplicial complex: its vertices are the
    /// 0-dimensional generators of `basis` and each 1-dimensional generator
    /// `{a,b}` is an arrow `a -> b`.
    pub fn from_skeleton( basis: &GeneratorBasis ) -> Result< Self > {
        let ( vertices, arrows ) = basis.skeleton();
        Self::from_vertices_and_arrows( vertices, arrows )
    }

    /// The vertices, ascending.
    pub fn vertices( &self ) -> &SortedVec< Vertex > { &self.vertices }

    /// The arrows, in input order without repeats.
    pub fn arrows( &self ) -> &[ Arrow ] { &self.arrows }

    /// Vertices covering `v`, in arrow order.
    pub fn successors( &self, v: Vertex ) -> &[ Vertex ] {
        self.successors.get( &v ).map( |s| s.as_slice() ).unwrap_or( &[] )
    }

    /// Vertices covered by `v`, in arrow order.
    pub fn predecessors( &self, v: Vertex ) -> &[ Vertex ] {
        self.predecessors.get( &v ).map( |s| s.as_slice() ).unwrap_or( &[] )
    }

    /// Vertices that are the target of no arrow, ascending.
    pub fn minimal( &self ) -> Vec< Vertex > {
        self.vertices.iter().cloned().filter( |v| self.predecessors( *v ).is_empty() ).collect()
    }

    /// Vertices that are the source of no arrow, ascending.
    pub fn maximal( &self ) -> Vec< Vertex > {
        self.vertices.iter().cloned().filter( |v| self.successors( *v ).is_empty() ).collect()
    }

    /// Every vertex strictly above `v`.
    pub fn bigger_vertices( &self, v: Vertex ) -> SortedVec< Vertex > {
        self.bigger.get( &v ).cloned().unwrap_or_default()
    }

    /// Every vertex strictly below `v`.
    pub fn smaller_vertices( &self, v: Vertex ) -> SortedVec< Vertex > {
        self.smaller.get( &v ).cloned().unwrap_or_default()
    }

    /// `true` if `a < b`.
    pub fn greater( &self, a: Vertex, b: Vertex ) -> bool {
        self.bigger.get( &a ).map_or( false, |up| up.contains( &b ) )
    }

    /// `true` if `a < b` or `b < a`.
    pub fn comparable( &self, a: Vertex, b: Vertex ) -> bool {
        self.greater( a, b ) || self.greater( b, a )
    }

    /// The open interval between `x` and `y`, in whichever direction they compare.
    ///
    /// Empty when `x` and `y` are equal or incomparable.
    pub fn between_vertices( &self, x: Vertex, y: Vertex ) -> SortedVec< Vertex > {
        let upward = self.bigger_vertices( x ).intersect( &self.smaller_vertices( y ) );
        let downward = self.smaller_vertices( x ).intersect( &self.bigger_vertices( y ) );
        upward.union( &downward )
    }

    /// Every maximal chain, as the sequence of vertices from a minimal to a maximal element.
    ///
    /// Chains starting at smaller minimal vertices come first; from each vertex
    /// the branches follow the order of the arrows.
    pub fn maximal_chains( &self ) -> Vec< Vec< Vertex > > {
        let mut chains = Vec::new();
        for start in self.minimal() {
            let mut stack = vec![ vec![ start ] ];
            while let Some( path ) = stack.pop() {
                let last = path[ path.len() - 1 ];
                let next = self.successors( last );
                if next.is_empty() {
                    chains.push( path );
                    continue
                }
                for &n in next.iter().rev() {
                    let mut extended = path.clone();
                    extended.push( n );
                    stack.push( extended );
                }
            }
        }
        debug!( "enumerated {} maximal chains", chains.len() );
        chains
    }
}

/// Everything reachable from `start` by one or more steps.
fn reachable( start: Vertex, neighbors: &HashMap< Vertex, Vec< Vertex > > ) -> SortedVec< Vertex > {
    let mut visited = HashSet::new();
    let mut stack: Vec< Vertex > = neighbors.get( &start ).cloned().unwrap_or_default();
    while let Some( v ) = stack.pop() {
        if ! visited.insert( v ) { continue }
        if let Some( next ) = neighbors.get( &v ) {
            stack.extend( next.iter().filter( |n| ! visited.contains( *n ) ) );
        }
    }
    SortedVec::from_unsorted( visited.into_iter().collect() )
}

/// The distinct endpoints of `arrows`, ascending.
pub fn vertex_set( arrows: &[ Arrow ] ) -> SortedVec< Vertex > {
    SortedVec::from_unsorted( arrows.iter().flat_map( |&( a, b )| [ a, b ] ).collect() )
}



//  ===========================================================================
//  CONSTRUCTORS
//  ===========================================================================


/// Arrows of the chain `0 < 1 < ... < n-1`.
pub fn chain_arrows( n: usize ) -> Vec< Arrow > {
    ( 1 .. n ).map( |i| ( i - 1, i ) ).collect()
}

/// Covering arrows among the nonempty proper subsets of an `n`-element set.
///
/// Subsets are encoded as bitmasks. The order complex is the barycentric
/// subdivision of the boundary of an `(n-1)`-simplex, a sphere of dimension
/// `n - 2`.
///
/// # Panics
///
/// Panics if `n >= usize::BITS`, since the masks would not fit in a `usize`.
pub fn boolean_lattice_proper_part_arrows( n: usize ) -> Vec< Arrow > {
    assert!( n < usize::BITS as usize, "{} atoms do not fit in a bitmask", n );
    let full: usize = ( 1 << n ) - 1;
    let mut arrows = Vec::new();
    for mask in 1 .. full {
        for bit in 0 .. n {
            let cover = mask | ( 1 << bit );
            if cover != mask && cover != full {
                arrows.push( ( mask, cover ) );
            }
        }
    }
    arrows
}
