//! Homology of an order complex from its factored boundary matrix.
//!
//! [`FactoredBoundaryMatrix::factor`] column-reduces the boundary matrix `D`
//! while recording the base change `V`, so that `D * V = R` with `R` reduced
//! and `V` upper unitriangular. From this factorization:
//!
//! - a generator index `j` is *essential* when `R` has a zero column at `j`
//!   and `j` is not the lowest row of any column of `R`. Column `j` of `V` is
//!   then a cycle representing a basis element of homology;
//! - the Betti number in dimension `d` is the number of essential indices of
//!   dimension `d`;
//! - the nonzero columns of `R` together with the essential columns of `V`
//!   span the cycles and have pairwise distinct lowest rows, which makes
//!   decomposing a cycle a matter of repeatedly clearing its lowest entry.
//!
//! # Example
//!
//! ```
//! use posethom::algebra::rings::field_prime_order::Z2;
//! use posethom::topology::homology::FactoredBoundaryMatrix;
//! use posethom::topology::poset::{Poset, boolean_lattice_proper_part_arrows};
//! use posethom::topology::simplicial::basis::GeneratorBasis;
//!
//! // the hexagon is a circle
//! let poset = Poset::from_arrows( boolean_lattice_proper_part_arrows( 3 ) ).unwrap();
//! let basis = GeneratorBasis::from_poset( &poset );
//! let factored = FactoredBoundaryMatrix::< Z2 >::factor( &basis ).unwrap();
//!
//! assert_eq!( factored.betti_numbers(), vec![ 1, 1 ] );
//! assert_eq!( factored.indices_essential(), vec![ 0, 11 ] );
//! assert!( factored.verify().unwrap() );
//! ```

use derive_getters::Getters;
use log::{debug, info, warn};
use serde::Serialize;

use crate::algebra::chains::sparse::SparseChain;
use crate::algebra::matrices::bimajor::MatrixBimajor;
use crate::algebra::matrices::operations::{apply, apply_action, invert, multiply, reduce_to_echelon, EchelonPivots};
use crate::algebra::rings::FieldElement;
use crate::error::{Error, Result};
use crate::topology::simplicial::basis::GeneratorBasis;
use crate::topology::simplicial::boundary::boundary_matrix;



//  ===========================================================================
//  FACTORIZATION
//  ===========================================================================


/// The boundary matrix of a basis together with its column reduction.
#[derive(Clone, Debug, Getters)]
pub struct FactoredBoundaryMatrix< R > {
    boundary:       MatrixBimajor< R >,
    reduced:        MatrixBimajor< R >,
    base_change:    MatrixBimajor< R >,
    pivots:         EchelonPivots,
    /// Homological dimension of each generator.
    dimensions:     Vec< usize >,
    /// Number of homological dimensions, `0 .. num_dimensions`.
    num_dimensions: usize,
}

/// A basis element of homology.
#[derive(Clone, Debug, PartialEq, Eq, Getters, Serialize)]
#[serde(bound( serialize = "R: Serialize + Clone" ))]
pub struct HomologyGenerator< R > {
    /// Homological dimension.
    dimension:  usize,
    /// The essential index the generator is read from.
    index:      usize,
    /// 1-based position among the generators of the same dimension.
    ordinal:    usize,
    /// A cycle representing the class.
    chain:      SparseChain< R >,
}

impl < R: FieldElement > FactoredBoundaryMatrix< R > {

    /// Build and reduce the boundary matrix of `basis`.
    pub fn factor( basis: &GeneratorBasis ) -> Result< Self > {
        let boundary = boundary_matrix( basis )?;
        let mut reduced = boundary.clone();
        let mut base_change = MatrixBimajor::identity( boundary.ncols() )?;
        let pivots = reduce_to_echelon( &mut reduced, &mut base_change )?;
        debug!( "boundary matrix has rank {}", pivots.rank() );
        Ok( FactoredBoundaryMatrix{
            boundary,
            reduced,
            base_change,
            pivots,
            dimensions:     basis.dimensions(),
            num_dimensions: basis.dimension(),
        } )
    }

    /// `true` if index `j` carries a homology generator.
    pub fn is_essential( &self, j: usize ) -> bool {
        j < self.dimensions.len()
            && self.pivots.row_of_column()[ j ].is_none()
            && ! self.pivots.is_pivot_row( j )
    }

    /// The essential indices, ascending.
    pub fn indices_essential( &self ) -> Vec< usize > {
        ( 0 .. self.dimensions.len() ).filter( |&j| self.is_essential( j ) ).collect()
    }

    /// One Betti number per dimension `0 .. num_dimensions`.
    pub fn betti_numbers( &self ) -> Vec< usize > {
        let mut betti = vec![ 0; self.num_dimensions ];
        for j in self.indices_essential() {
            betti[ self.dimensions[ j ] ] += 1;
        }
        info!( "betti numbers {:?}", betti );
        betti
    }

    /// A representative cycle for every essential index, in index order.
    pub fn cycle_representatives( &self ) -> Result< Vec< HomologyGenerator< R > > > {
        let mut counts = vec![ 0; self.num_dimensions ];
        let mut generators = Vec::new();
        for index in self.indices_essential() {
            let dimension = self.dimensions[ index ];
            counts[ dimension ] += 1;
            generators.push( HomologyGenerator{
                dimension,
                index,
                ordinal:    counts[ dimension ],
                chain:      self.base_change.column( index )?.clone(),
            } );
        }
        Ok( generators )
    }

    /// `true` if `chain` has zero boundary.
    pub fn is_cycle( &self, chain: &SparseChain< R > ) -> Result< bool > {
        Ok( apply( &self.boundary, chain )?.is_empty() )
    }

    /// The homology class of `chain`, as coefficients indexed by essential index.
    ///
    /// Returns `None` if `chain` is not a cycle.
    pub fn decompose( &self, chain: &SparseChain< R > ) -> Result< Option< SparseChain< R > > > {
        let mut work = chain.clone();
        let mut coordinates = SparseChain::new();
        while let Some( ( low, a ) ) = work.last_entry() {
            let pivot_column = self.pivots.column_of_row().get( low ).copied().flatten();
            let ( column, scale ) = match pivot_column {
                Some( k ) => {
                    let b = self.reduced.get( low, k )?;
                    ( self.reduced.column( k )?, a * b.inverse().ok_or( Error::NotInvertible{ column: k } )? )
                }
                None if self.is_essential( low ) => {
                    let b = self.base_change.get( low, low )?;
                    let scale = a * b.inverse().ok_or( Error::NotInvertible{ column: low } )?;
                    coordinates.add_entry( low, scale );
                    ( self.base_change.column( low )?, scale )
                }
                None => return Ok( None ),
            };
            work.add_chain( column, -scale );
        }
        Ok( Some( coordinates ) )
    }

    /// The coordinates of `chain` in the basis formed by the columns of the base change.
    pub fn base_change_coordinates( &self, chain: &SparseChain< R > ) -> Result< SparseChain< R > > {
        let action = apply_action( &invert( &self.base_change )?, chain )?;
        Ok( action.column( 0 )?.clone() )
    }

    /// Check `boundary * base_change == reduced`, and that the base change is invertible.
    pub fn verify( &self ) -> Result< bool > {
        let product = multiply( &self.boundary, &self.base_change )?;
        if product != self.reduced {
            warn!( "boundary times base change differs from the reduced matrix" );
            return Ok( false )
        }
        let n = self.base_change.ncols();
        let identity = multiply( &self.base_change, &invert( &self.base_change )? )?;
        Ok( identity == MatrixBimajor::identity( n )? )
    }
}



//  ===========================================================================
//  WHITNEY CLASS
//  ===========================================================================


/// The homology class of a Whitney chain.
#[derive(Clone, Debug, PartialEq, Eq, Getters, Serialize)]
#[serde(bound( serialize = "R: Serialize + Clone" ))]
pub struct WhitneyClass< R > {
    /// `false` if the chain has nonzero boundary, in which case it has no class.
    is_cycle:       bool,
    /// `(dimension, ordinal)` of every homology generator with nonzero coefficient.
    generators:     Vec< (usize, usize) >,
    /// The chain written in the basis of base change columns.
    coordinates:    SparseChain< R >,
}

/// Decompose `chain` over the homology generators of `factored`.
pub fn detect_whitney_class< R: FieldElement >( factored: &FactoredBoundaryMatrix< R >, chain: &SparseChain< R > ) -> Result< WhitneyClass< R > > {
    let coordinates = factored.base_change_coordinates( chain )?;
    let decomposition = match factored.decompose( chain )? {
        Some( decomposition ) => decomposition,
        None => {
            warn!( "the whitney chain is not a cycle" );
            return Ok( WhitneyClass{ is_cycle: false, generators: Vec::new(), coordinates } )
        }
    };
    let generators = factored.cycle_representatives()?
        .into_iter()
        .filter( |g| decomposition.find_number( g.index ).is_some() )
        .map( |g| ( g.dimension, g.ordinal ) )
        .collect();
    Ok( WhitneyClass{ is_cycle: true, generators, coordinates } )
}
