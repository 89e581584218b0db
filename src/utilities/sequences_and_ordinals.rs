//! Strictly ascending vectors.
//!
//! Vertex sets produced by the order engine are stored as [`SortedVec`]s, which
//! makes membership a binary search and lets intersection and union run as
//! linear merges.

use std::fmt::Debug;

use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;


/// A vector whose entries are sorted in strictly ascending order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SortedVec< T: Ord > {
    vec:    Vec< T >,
}

impl < T: Ord > SortedVec< T > {

    /// Wrap `vec`, or hand it back if it is not strictly ascending.
    pub fn new( vec: Vec< T > ) -> Result< Self, Vec< T > > {
        if vec.iter().tuple_windows().all( |(a, b)| a < b ) {
            Ok( SortedVec{ vec } )
        } else {
            Err( vec )
        }
    }

    /// Sort and deduplicate.
    pub fn from_unsorted( mut vec: Vec< T > ) -> Self {
        vec.sort();
        vec.dedup();
        SortedVec{ vec }
    }

    pub fn vec( &self ) -> &Vec< T > { &self.vec }

    pub fn into_vec( self ) -> Vec< T > { self.vec }

    pub fn len( &self ) -> usize { self.vec.len() }

    pub fn is_empty( &self ) -> bool { self.vec.is_empty() }

    pub fn iter( &self ) -> std::slice::Iter< '_, T > { self.vec.iter() }

    pub fn contains( &self, x: &T ) -> bool { self.vec.binary_search( x ).is_ok() }
}

impl < T: Ord + Clone > SortedVec< T > {

    /// Elements present in both sets.
    pub fn intersect( &self, other: &Self ) -> Self {
        let vec = self.vec.iter()
            .merge_join_by( other.vec.iter(), |a, b| a.cmp( b ) )
            .filter_map( |x| match x { EitherOrBoth::Both( a, _ ) => Some( a.clone() ), _ => None } )
            .collect();
        SortedVec{ vec }
    }

    /// Elements present in either set.
    pub fn union( &self, other: &Self ) -> Self {
        let vec = self.vec.iter()
            .merge_join_by( other.vec.iter(), |a, b| a.cmp( b ) )
            .map( |x| match x {
                EitherOrBoth::Both( a, _ ) | EitherOrBoth::Left( a ) | EitherOrBoth::Right( a ) => a.clone()
            } )
            .collect();
        SortedVec{ vec }
    }
}

impl < T: Ord > IntoIterator for SortedVec< T > {
    type Item = T;
    type IntoIter = std::vec::IntoIter< T >;
    fn into_iter( self ) -> Self::IntoIter { self.vec.into_iter() }
}

impl < 'a, T: Ord > IntoIterator for &'a SortedVec< T > {
    type Item = &'a T;
    type IntoIter = std::slice::Iter< 'a, T >;
    fn into_iter( self ) -> Self::IntoIter { self.vec.iter() }
}
