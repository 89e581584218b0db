//! End-to-end computation on one input file.
//!
//! [`run_text`] parses a poset (or a list of maximal simplices), builds the
//! generator basis of its order complex, runs the Euler test, computes
//! homology over the two-element field, and, for Euler inputs, the class of
//! the total Whitney chain. Everything is collected in a [`Report`], which
//! prints as plain text and serializes to JSON.
//!
//! ```
//! use posethom::pipeline::{run_text, Config};
//!
//! let hexagon = "{1,3}\n{1,5}\n{2,3}\n{2,6}\n{4,5}\n{4,6}\n";
//! let report = run_text( hexagon, &Config::default() ).unwrap();
//!
//! assert!( *report.euler() );
//! assert_eq!( report.betti_numbers(), &vec![ 1, 1 ] );
//! assert_eq!( report.whitney().as_ref().unwrap().generators(), &vec![ ( 1, 1 ) ] );
//! ```

use std::fmt;
use std::path::Path;

use derive_getters::Getters;
use derive_new::new;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::algebra::chains::sparse::SparseChain;
use crate::algebra::rings::field_prime_order::Z2;
use crate::error::{Error, Result};
use crate::topology::homology::{detect_whitney_class, FactoredBoundaryMatrix};
use crate::topology::poset::euler::{find_euler_violation, EulerViolation};
use crate::topology::poset::parse::{parse_arrows, parse_maximal_simplices};
use crate::topology::poset::Poset;
use crate::topology::simplicial::basis::{format_simplex, GeneratorBasis, Simplex};
use crate::topology::simplicial::whitney::whitney_chain_total;
use crate::utilities::progress::progress_bar;



//  ===========================================================================
//  CONFIGURATION
//  ===========================================================================


/// How the input text describes the complex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFormat {
    /// One covering arrow `{a,b}` per line.
    #[default]
    Poset,
    /// One maximal simplex `{v1,...,vk}` per line.
    MaximalSimplices,
}

/// Options of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub format:         InputFormat,
    /// Compute the Whitney class when the input is Euler.
    pub whitney:        bool,
    /// Check the factorization of the boundary matrix.
    pub verify:         bool,
    /// Draw progress bars on stderr.
    pub show_progress:  bool,
}

impl Default for Config {
    fn default() -> Self {
        Config{ format: InputFormat::Poset, whitney: true, verify: false, show_progress: false }
    }
}



//  ===========================================================================
//  REPORT
//  ===========================================================================


/// A homology generator, written with the simplices of its representative.
#[derive(new, Getters, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratorReport {
    dimension:  usize,
    ordinal:    usize,
    simplices:  Vec< Simplex >,
}

impl GeneratorReport {
    /// The label `g<dimension>_<ordinal>`.
    pub fn label( &self ) -> String { format!( "g{}_{}", self.dimension, self.ordinal ) }
}

/// The total Whitney chain and its homology class.
#[derive(new, Getters, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WhitneyReport {
    is_cycle:   bool,
    simplices:  Vec< Simplex >,
    /// `(dimension, ordinal)` of each homology generator in the class.
    generators: Vec< (usize, usize) >,
}

/// Everything computed from one input.
#[derive(Getters, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    euler:                      bool,
    euler_violation:            Option< EulerViolation >,
    generators_per_dimension:   Vec< usize >,
    betti_numbers:              Vec< usize >,
    homology_generators:        Vec< GeneratorReport >,
    whitney:                    Option< WhitneyReport >,
    verified:                   Option< bool >,
}

fn simplices_of( basis: &GeneratorBasis, chain: &SparseChain< Z2 > ) -> Result< Vec< Simplex > > {
    chain.ids().map( |id| basis.simplex( id ).cloned() ).collect()
}

fn write_simplices( f: &mut fmt::Formatter<'_>, simplices: &[ Simplex ] ) -> fmt::Result {
    if simplices.is_empty() {
        return write!( f, "0" )
    }
    for ( i, simplex ) in simplices.iter().enumerate() {
        if i > 0 { write!( f, " + " )? }
        write!( f, "1*{}", format_simplex( simplex ) )?;
    }
    Ok( () )
}

impl fmt::Display for Report {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
        match &self.euler_violation {
            None => writeln!( f, "The poset is Euler!" )?,
            Some( violation ) => writeln!( f, "The poset is not Euler: {}.", violation )?,
        }
        writeln!( f )?;

        for ( k, count ) in self.generators_per_dimension.iter().enumerate() {
            writeln!( f, "C_{} has {} generators", k, count )?;
        }
        writeln!( f )?;

        for ( k, rank ) in self.betti_numbers.iter().enumerate() {
            match rank {
                0 => writeln!( f, "H_{} = 0", k )?,
                _ => writeln!( f, "H_{} = Z2^{}", k, rank )?,
            }
        }
        writeln!( f )?;

        if self.homology_generators.is_empty() {
            writeln!( f, "None" )?;
        }
        for generator in self.homology_generators.iter() {
            write!( f, "{} = ", generator.label() )?;
            write_simplices( f, &generator.simplices )?;
            writeln!( f )?;
        }

        if let Some( whitney ) = &self.whitney {
            writeln!( f )?;
            write!( f, "Whitney chain: " )?;
            write_simplices( f, &whitney.simplices )?;
            writeln!( f )?;
            if ! whitney.is_cycle {
                writeln!( f, "Whitney class: the Whitney chain is not a cycle" )?;
            } else if whitney.generators.is_empty() {
                writeln!( f, "Whitney class: 0" )?;
            } else {
                let labels: Vec< String > = whitney.generators.iter()
                    .map( |( k, n )| format!( "g{}_{}", k, n ) )
                    .collect();
                writeln!( f, "Whitney class: {}", labels.join( " + " ) )?;
            }
        }

        if let Some( verified ) = self.verified {
            writeln!( f )?;
            writeln!( f, "Factorization verified: {}", verified )?;
        }
        Ok( () )
    }
}



//  ===========================================================================
//  RUN
//  ===========================================================================


/// Parse `text` and build its poset and generator basis.
pub fn load( text: &str, format: InputFormat ) -> Result< ( Poset, GeneratorBasis ) > {
    match format {
        InputFormat::Poset => {
            let poset = Poset::from_arrows( parse_arrows( text )? )?;
            let basis = GeneratorBasis::from_poset( &poset );
            Ok( ( poset, basis ) )
        }
        InputFormat::MaximalSimplices => {
            let basis = GeneratorBasis::from_maximal_simplices( &parse_maximal_simplices( text )? );
            let poset = Poset::from_skeleton( &basis )?;
            Ok( ( poset, basis ) )
        }
    }
}

/// Run the whole computation on the contents of an input file.
pub fn run_text( text: &str, config: &Config ) -> Result< Report > {
    let ( poset, basis ) = load( text, config.format )?;
    info!( "{} vertices, {} generators", poset.vertices().len(), basis.len() );

    let bar = progress_bar( 0, "euler test", config.show_progress );
    let euler_violation = find_euler_violation( &poset, &basis, &bar );
    let euler = euler_violation.is_none();

    let factored = FactoredBoundaryMatrix::< Z2 >::factor( &basis )?;
    let betti_numbers = factored.betti_numbers();
    let homology_generators = factored.cycle_representatives()?
        .into_iter()
        .map( |g| Ok( GeneratorReport::new( *g.dimension(), *g.ordinal(), simplices_of( &basis, g.chain() )? ) ) )
        .collect::< Result< Vec< _ > > >()?;

    let whitney = if euler && config.whitney {
        let bar = progress_bar( basis.len(), "whitney chains", config.show_progress );
        let chain = whitney_chain_total( &poset, &basis, &bar );
        let class = detect_whitney_class( &factored, &chain )?;
        debug!( "whitney chain coordinates {}", class.coordinates() );
        Some( WhitneyReport::new( *class.is_cycle(), simplices_of( &basis, &chain )?, class.generators().clone() ) )
    } else {
        None
    };

    let verified = match config.verify {
        true => Some( factored.verify()? ),
        false => None,
    };

    Ok( Report{
        euler,
        euler_violation,
        generators_per_dimension: basis.counts_by_dimension(),
        betti_numbers,
        homology_generators,
        whitney,
        verified,
    } )
}

/// Read `path` and run [`run_text`] on it.
pub fn run_file( path: &Path, config: &Config ) -> Result< Report > {
    let text = std::fs::read_to_string( path )
        .map_err( |e| Error::Io{ path: path.display().to_string(), message: e.to_string() } )?;
    run_text( &text, config )
}
