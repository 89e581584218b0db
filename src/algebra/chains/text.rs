//! Plain-text form of a sparse chain.
//!
//! A chain is written as `c1 * n1 + c2 * n2 + ...` with 1-based identifiers.
//! Unit coefficients are left implicit (`n`, or `- n` for minus one) and the
//! zero chain is written `0`.
//!
//! Reading accepts `+` or `,` between terms, a `-` separator negating the next
//! term, an optional enclosing pair of brackets, an implicit coefficient of
//! one when only a sign is given, and a trailing `;` comment. Reading is not
//! the exact inverse of writing: the text `0` names identifier zero, which
//! does not exist in 1-based form, so it is rejected rather than read back as
//! the zero chain.
//!
//! ```
//! use posethom::algebra::chains::sparse::SparseChain;
//! use posethom::algebra::rings::field_prime_order::PrimeOrderField;
//! use posethom::algebra::rings::FieldElement;
//!
//! type F5 = PrimeOrderField< 5 >;
//!
//! let chain: SparseChain< F5 > = "(2 * 1 - 3, 4)".parse().unwrap();
//! assert_eq!( chain.entries(), &[
//!     ( 0, F5::from_integer( 2 ) ),
//!     ( 2, F5::from_integer( -1 ) ),
//!     ( 3, F5::from_integer( 1 ) ),
//! ] );
//! assert_eq!( chain.to_string(), "2 * 1 - 3 + 4" );
//! ```

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::algebra::chains::sparse::SparseChain;
use crate::algebra::rings::FieldElement;
use crate::error::{Error, Result};


impl < R: FieldElement > fmt::Display for SparseChain< R > {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
        if self.is_empty() {
            return write!( f, "0" )
        }
        let one = R::one();
        for ( i, ( id, c ) ) in self.iter().enumerate() {
            let label = id + 1;
            match ( i, c ) {
                ( 0, c ) if c == one    =>  write!( f, "{}", label )?,
                ( 0, c ) if c == -one   =>  write!( f, "-{}", label )?,
                ( 0, c )                =>  write!( f, "{} * {}", c, label )?,
                ( _, c ) if c == one    =>  write!( f, " + {}", label )?,
                ( _, c ) if c == -one   =>  write!( f, " - {}", label )?,
                ( _, c )                =>  write!( f, " + {} * {}", c, label )?,
            }
        }
        Ok(())
    }
}

impl < R: FieldElement > FromStr for SparseChain< R > {
    type Err = Error;

    fn from_str( s: &str ) -> Result< Self > {
        parse_chain( s, 1 )
    }
}

/// Parse one chain, reporting failures against `line`.
pub fn parse_chain< R: FieldElement >( text: &str, line: usize ) -> Result< SparseChain< R > > {
    let fail = || Error::Parse{ line, content: text.trim().to_string() };

    // a `;` starts a comment running to the end of the text
    let body = text.split( ';' ).next().unwrap_or( "" );
    let mut rest = strip_brackets( body.trim() ).trim();
    let mut chain = SparseChain::new();
    let mut first = true;

    while ! rest.is_empty() {
        let mut sign: i64 = 1;
        if ! first {
            match rest.chars().next() {
                Some( '+' ) | Some( ',' )   =>  {}
                Some( '-' )                 =>  sign = -1,
                _                           =>  return Err( fail() ),
            }
            rest = rest[ 1 .. ].trim_start();
        }
        if let Some( r ) = rest.strip_prefix( '-' ) {
            sign = -sign;
            rest = r.trim_start();
        }

        let ( leading, r ) = split_number( rest ).ok_or_else( fail )?;
        rest = r.trim_start();
        let ( coefficient, label ) = match rest.strip_prefix( '*' ) {
            Some( r ) => {
                let ( label, r ) = split_number( r.trim_start() ).ok_or_else( fail )?;
                rest = r.trim_start();
                let coefficient = i64::try_from( leading ).ok()
                    .and_then( |c| c.checked_mul( sign ) )
                    .ok_or_else( fail )?;
                ( coefficient, label )
            }
            None => ( sign, leading ),
        };

        if label == 0 { return Err( fail() ) }
        let id = ( label - 1 ) as usize;
        let coefficient = R::from_integer( coefficient );
        if coefficient.is_zero() { return Err( Error::ZeroCoefficient{ id } ) }
        chain.add_entry( id, coefficient );
        first = false;
    }
    Ok( chain )
}

fn strip_brackets( s: &str ) -> &str {
    for ( open, close ) in [ ( '(', ')' ), ( '{', '}' ), ( '[', ']' ), ( '<', '>' ) ] {
        if let Some( inner ) = s.strip_prefix( open ).and_then( |x| x.strip_suffix( close ) ) {
            return inner
        }
    }
    s
}

/// Split a leading run of decimal digits off `s`.
fn split_number( s: &str ) -> Option< ( u64, &str ) > {
    let end = s.find( |c: char| ! c.is_ascii_digit() ).unwrap_or( s.len() );
    if end == 0 { return None }
    let value = s[ .. end ].parse().ok()?;
    Some( ( value, &s[ end .. ] ) )
}

impl < R: FieldElement > SparseChain< R > {

    /// Write the chain with identifiers replaced by names, e.g. `1*{1,3} + 1*{2,3}`.
    pub fn display_with< F >( &self, mut name: F ) -> String
        where F: FnMut( usize ) -> String
    {
        if self.is_empty() { return "0".to_string() }
        self.iter().map( |( id, c )| format!( "{}*{}", c, name( id ) ) ).join( " + " )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::rings::field_prime_order::{PrimeOrderField, Z2};

    type F5 = PrimeOrderField< 5 >;

    #[test]
    fn test_display() {
        let c: SparseChain< F5 > = vec![ ( 0, F5::from_integer( 1 ) ), ( 2, F5::from_integer( -1 ) ), ( 4, F5::from_integer( 3 ) ) ]
            .into_iter().collect();
        assert_eq!( c.to_string(), "1 - 3 + 3 * 5" );
        assert_eq!( SparseChain::< Z2 >::new().to_string(), "0" );

        let d: SparseChain< F5 > = vec![ ( 1, F5::from_integer( -1 ) ) ].into_iter().collect();
        assert_eq!( d.to_string(), "-2" );
    }

    #[test]
    fn test_round_trip_z2() {
        let c: SparseChain = vec![ ( 0, Z2::from_integer( 1 ) ), ( 2, Z2::from_integer( -1 ) ) ].into_iter().collect();
        let back: SparseChain = c.to_string().parse().unwrap();
        assert_eq!( back, c );
    }

    #[test]
    fn test_round_trip_f5() {
        let c: SparseChain< F5 > = vec![ ( 0, F5::from_integer( 1 ) ), ( 2, F5::from_integer( -1 ) ), ( 6, F5::from_integer( 2 ) ) ]
            .into_iter().collect();
        let back: SparseChain< F5 > = c.to_string().parse().unwrap();
        assert_eq!( back, c );
    }

    #[test]
    fn test_parse_separators_and_brackets() {
        let a: SparseChain = "{1*1, 1*4}".parse().unwrap();
        let b: SparseChain = "1 + 4".parse().unwrap();
        let c: SparseChain = "-1 - 4".parse().unwrap();
        assert_eq!( a, b );
        assert_eq!( a, c );
        assert_eq!( a.ids().collect::< Vec<_> >(), vec![ 0, 3 ] );
        assert!( "()".parse::< SparseChain >().unwrap().is_empty() );
        let d: SparseChain = "1 + 4 ; the ends of an edge".parse().unwrap();
        assert_eq!( d, b );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!( "2 * 3".parse::< SparseChain >(), Err( Error::ZeroCoefficient{ id: 2 } ) );
        assert_eq!( "0".parse::< SparseChain >(), Err( Error::Parse{ line: 1, content: "0".to_string() } ) );
        assert!( "1 3".parse::< SparseChain >().is_err() );
        assert!( "1 + * 3".parse::< SparseChain >().is_err() );
        assert_eq!( parse_chain::< Z2 >( "x", 7 ), Err( Error::Parse{ line: 7, content: "x".to_string() } ) );
    }

    #[test]
    fn test_coefficients_beyond_i64_are_rejected() {
        for text in [ "-9223372036854775808 * 1", "18446744073709551615 * 1", "1 + 9223372036854775808 * 2" ] {
            assert_eq!(
                text.parse::< SparseChain< F5 > >(),
                Err( Error::Parse{ line: 1, content: text.to_string() } ),
            );
        }
        // the largest representable coefficient still reduces into the field
        let c: SparseChain< F5 > = "-9223372036854775807 * 1".parse().unwrap();
        assert_eq!( c.entries(), &[ ( 0, F5::from_integer( -9223372036854775807 ) ) ] );
        assert!( "99999999999999999999 * 1".parse::< SparseChain< F5 > >().is_err() );
    }

    #[test]
    fn test_display_with_names() {
        let c: SparseChain = "1 + 3".parse().unwrap();
        let names = [ "{1}", "{2}", "{1,2}" ];
        assert_eq!( c.display_with( |i| names[ i ].to_string() ), "1*{1} + 1*{1,2}" );
    }
}
