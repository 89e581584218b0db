//! The ordered basis of generators of the order complex.
//!
//! Every nonempty subsequence of a maximal chain is a simplex of the order
//! complex. [`GeneratorBasis`] collects all of them, sorts them by number of
//! vertices and then lexicographically, removes repeats, and freezes the
//! result. The position of a simplex in this list is its identifier in every
//! chain and matrix built afterwards.
//!
//! # Example
//!
//! ```
//! use posethom::topology::simplicial::basis::GeneratorBasis;
//!
//! let basis = GeneratorBasis::from_maximal_chains( &[ vec![ 1, 2, 3 ] ] );
//! assert_eq!( basis.simplices(), &[
//!     vec![ 1 ], vec![ 2 ], vec![ 3 ],
//!     vec![ 1, 2 ], vec![ 1, 3 ], vec![ 2, 3 ],
//!     vec![ 1, 2, 3 ],
//! ] );
//! assert_eq!( basis.index_of( &[ 1, 3 ] ), Some( 4 ) );
//! assert_eq!( basis.block( 2 ), 3 .. 6 );
//! assert_eq!( basis.dimension(), 3 );
//! ```

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use itertools::Itertools;
use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::topology::poset::{Poset, Vertex};


/// A simplex, as the increasing sequence of its vertices.
pub type Simplex = Vec< Vertex >;

/// The frozen, ordered list of simplices generating the chain complex.
#[derive(Clone, Debug, Serialize)]
pub struct GeneratorBasis {
    simplices:  Vec< Simplex >,
    #[serde(skip)]
    index:      HashMap< Simplex, usize >,
}

impl GeneratorBasis {

    /// All faces of the given maximal chains.
    pub fn from_maximal_chains( chains: &[ Vec< Vertex > ] ) -> Self {
        let mut seen: HashSet< Simplex > = HashSet::new();
        for chain in chains {
            let mut worklist = vec![ chain.clone() ];
            while let Some( simplex ) = worklist.pop() {
                if simplex.is_empty() || seen.contains( &simplex ) { continue }
                if simplex.len() > 1 {
                    for i in 0 .. simplex.len() {
                        let mut face = simplex.clone();
                        face.remove( i );
                        worklist.push( face );
                    }
                }
                seen.insert( simplex );
            }
        }

        let simplices: Vec< Simplex > = seen.into_iter()
            .sorted_by( |a, b| a.len().cmp( &b.len() ).then_with( || a.cmp( b ) ) )
            .dedup()
            .collect();
        let index = simplices.iter().cloned().enumerate().map( |( i, s )| ( s, i ) ).collect();
        debug!( "generator basis of {} simplices from {} maximal chains", simplices.len(), chains.len() );
        GeneratorBasis{ simplices, index }
    }

    /// All faces of the maximal chains of `poset`.
    pub fn from_poset( poset: &Poset ) -> Self {
        Self::from_maximal_chains( &poset.maximal_chains() )
    }

    /// All faces of the given simplices, each read with its vertices in ascending order.
    pub fn from_maximal_simplices( simplices: &[ Vec< Vertex > ] ) -> Self {
        let sorted: Vec< Vec< Vertex > > = simplices.iter()
            .map( |s| s.iter().cloned().sorted().dedup().collect() )
            .collect();
        Self::from_maximal_chains( &sorted )
    }

    pub fn len( &self ) -> usize { self.simplices.len() }

    pub fn is_empty( &self ) -> bool { self.simplices.is_empty() }

    /// The generators, in basis order.
    pub fn simplices( &self ) -> &[ Simplex ] { &self.simplices }

    /// The generator with identifier `i`.
    pub fn simplex( &self, i: usize ) -> Result< &Simplex > {
        self.simplices.get( i ).ok_or( Error::IndexOutOfRange{ index: i, len: self.len() } )
    }

    /// The identifier of `simplex`.
    pub fn index_of( &self, simplex: &[ Vertex ] ) -> Option< usize > {
        self.index.get( simplex ).cloned()
    }

    /// The largest number of vertices in a generator, or 0 for an empty basis.
    pub fn dimension( &self ) -> usize {
        self.simplices.last().map_or( 0, |s| s.len() )
    }

    /// The identifiers of the generators with exactly `num_vertices` vertices.
    pub fn block( &self, num_vertices: usize ) -> Range< usize > {
        let start = self.simplices.partition_point( |s| s.len() < num_vertices );
        let end = self.simplices.partition_point( |s| s.len() <= num_vertices );
        start .. end
    }

    /// The homological dimension (number of vertices minus one) of each generator.
    pub fn dimensions( &self ) -> Vec< usize > {
        self.simplices.iter().map( |s| s.len() - 1 ).collect()
    }

    /// Number of generators in each homological dimension `0 .. dimension()`.
    pub fn counts_by_dimension( &self ) -> Vec< usize > {
        ( 1 ..= self.dimension() ).map( |k| self.block( k ).len() ).collect()
    }

    /// The generators of homological dimension 0 and 1, read as the vertices and
    /// arrows of a poset.
    pub fn skeleton( &self ) -> ( Vec< Vertex >, Vec< ( Vertex, Vertex ) > ) {
        let vertices = self.simplices[ self.block( 1 ) ].iter().map( |s| s[ 0 ] ).collect();
        let arrows = self.simplices[ self.block( 2 ) ].iter().map( |s| ( s[ 0 ], s[ 1 ] ) ).collect();
        ( vertices, arrows )
    }
}

impl PartialEq for GeneratorBasis {
    fn eq( &self, other: &Self ) -> bool { self.simplices == other.simplices }
}

impl Eq for GeneratorBasis {}

/// Write a simplex as `{v1,v2,...}`.
pub fn format_simplex( simplex: &[ Vertex ] ) -> String {
    format!( "{{{}}}", simplex.iter().join( "," ) )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::poset::boolean_lattice_proper_part_arrows;

    #[test]
    fn test_faces_are_deduplicated_across_chains() {
        let basis = GeneratorBasis::from_maximal_chains( &[ vec![ 0, 1, 3 ], vec![ 0, 2, 3 ] ] );
        assert_eq!( basis.len(), 4 + 5 + 2 );
        assert_eq!( basis.counts_by_dimension(), vec![ 4, 5, 2 ] );
        assert_eq!( basis.simplices()[ 4 .. 9 ].to_vec(), vec![
            vec![ 0, 1 ], vec![ 0, 2 ], vec![ 0, 3 ], vec![ 1, 3 ], vec![ 2, 3 ],
        ] );
    }

    #[test]
    fn test_order_is_length_then_lexicographic() {
        let basis = GeneratorBasis::from_maximal_chains( &[ vec![ 10, 2 ], vec![ 3 ] ] );
        // vertex sequences keep their chain order
        assert_eq!( basis.simplices(), &[ vec![ 2 ], vec![ 3 ], vec![ 10 ], vec![ 10, 2 ] ] );
    }

    #[test]
    fn test_lookup() {
        let basis = GeneratorBasis::from_maximal_chains( &[ vec![ 1, 2 ] ] );
        assert_eq!( basis.index_of( &[ 1, 2 ] ), Some( 2 ) );
        assert_eq!( basis.index_of( &[ 2, 1 ] ), None );
        assert_eq!( basis.simplex( 2 ), Ok( &vec![ 1, 2 ] ) );
        assert_eq!( basis.simplex( 3 ), Err( Error::IndexOutOfRange{ index: 3, len: 3 } ) );
        assert_eq!( basis.block( 3 ), 3 .. 3 );
        assert_eq!( basis.dimensions(), vec![ 0, 0, 1 ] );
    }

    #[test]
    fn test_empty_basis() {
        let basis = GeneratorBasis::from_maximal_chains( &[] );
        assert!( basis.is_empty() );
        assert_eq!( basis.dimension(), 0 );
        assert!( basis.counts_by_dimension().is_empty() );
    }

    #[test]
    fn test_from_poset_and_simplices() {
        let poset = Poset::from_arrows( boolean_lattice_proper_part_arrows( 3 ) ).unwrap();
        let basis = GeneratorBasis::from_poset( &poset );
        assert_eq!( basis.counts_by_dimension(), vec![ 6, 6 ] );

        let simplicial = GeneratorBasis::from_maximal_simplices( &[ vec![ 3, 1, 2 ], vec![ 2, 4 ] ] );
        assert_eq!( simplicial.counts_by_dimension(), vec![ 4, 4, 1 ] );
        assert_eq!( simplicial.index_of( &[ 1, 2, 3 ] ), Some( 8 ) );

        let ( vertices, arrows ) = simplicial.skeleton();
        assert_eq!( vertices, vec![ 1, 2, 3, 4 ] );
        assert_eq!( arrows, vec![ ( 1, 2 ), ( 1, 3 ), ( 2, 3 ), ( 2, 4 ) ] );
    }

    #[test]
    fn test_format_simplex() {
        assert_eq!( format_simplex( &[ 1, 3 ] ), "{1,3}" );
    }
}
