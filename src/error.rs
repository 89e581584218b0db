//! Error type shared by every module of the crate.

use thiserror::Error;

/// Everything that can go wrong while parsing input or manipulating chains and matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A positional or identifier index fell outside the addressable range.
    #[error("index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange{ index: usize, len: usize },

    /// Storage for a chain or matrix could not be reserved.
    #[error("failed to allocate storage for {requested} entries")]
    AllocationFailure{ requested: usize },

    /// A line of text input did not match the expected grammar.
    #[error("line {line}: cannot parse `{content}`")]
    Parse{ line: usize, content: String },

    /// A zero coefficient was offered where only nonzero coefficients are allowed.
    #[error("zero coefficient supplied for identifier {id}")]
    ZeroCoefficient{ id: usize },

    /// A raw residue was not reduced modulo the field order.
    #[error("{value} is not a residue modulo {modulus}")]
    InvalidFieldValue{ value: u64, modulus: u32 },

    /// The arrows do not describe a partial order.
    #[error("not a poset: {0}")]
    NotAPoset( String ),

    /// Matrix shapes are incompatible for the requested operation.
    #[error("dimension mismatch: {left_rows}x{left_cols} against {right_rows}x{right_cols}")]
    DimensionMismatch{
        left_rows:  usize,
        left_cols:  usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// Gauss-Jordan elimination found no pivot for this column.
    #[error("matrix is singular: no pivot in column {column}")]
    NotInvertible{ column: usize },

    /// A simplex was looked up in a basis that does not contain it.
    #[error("simplex {0:?} is not a generator of the basis")]
    UnknownSimplex( Vec< usize > ),

    /// Reading an input file failed.
    #[error("cannot read {path}: {message}")]
    Io{ path: String, message: String },
}

/// Shorthand used across the crate.
pub type Result< T > = std::result::Result< T, Error >;

/// Reserve room for `additional` more entries, reporting failure instead of aborting.
pub(crate) fn try_reserve< T >( vec: &mut Vec< T >, additional: usize ) -> Result< () > {
    vec.try_reserve( additional )
        .map_err( |_| Error::AllocationFailure{ requested: vec.len().saturating_add( additional ) } )
}
