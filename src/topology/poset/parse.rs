//! Line-oriented text input.
//!
//! Two formats are read, both one record per line:
//!
//! - a poset, one covering arrow `{a,b}` per line (`a` is covered by `b`);
//! - a simplicial complex, one maximal simplex `{v1,v2,...,vk}` per line.
//!
//! Blank lines and lines starting with `;` are ignored. Any other line that
//! does not match the format fails the whole input with [`Error::Parse`],
//! which carries the 1-based line number.
//!
//! ```
//! use posethom::topology::poset::parse::parse_arrows;
//! use posethom::error::Error;
//!
//! let text = "; a chain\n{1,2}\n\n{2, 3}\n";
//! assert_eq!( parse_arrows( text ).unwrap(), vec![ (1, 2), (2, 3) ] );
//!
//! let broken = "{1,2}\n{2,3,4}\n";
//! assert_eq!( parse_arrows( broken ), Err( Error::Parse{ line: 2, content: "{2,3,4}".to_string() } ) );
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::topology::poset::{Arrow, Vertex};


static ARROW: Lazy< Regex > = Lazy::new( ||
    Regex::new( r"^\{\s*(\d+)\s*,\s*(\d+)\s*\}$" ).expect( "arrow pattern compiles" )
);

static SIMPLEX: Lazy< Regex > = Lazy::new( ||
    Regex::new( r"^\{\s*\d+\s*(,\s*\d+\s*)*\}$" ).expect( "simplex pattern compiles" )
);

static NUMBER: Lazy< Regex > = Lazy::new( ||
    Regex::new( r"\d+" ).expect( "number pattern compiles" )
);


/// Non-comment, non-blank lines with their 1-based line numbers.
fn records( text: &str ) -> impl Iterator< Item = ( usize, &str ) > {
    text.lines()
        .enumerate()
        .map( |( i, line )| ( i + 1, line.trim() ) )
        .filter( |( _, line )| ! line.is_empty() && ! line.starts_with( ';' ) )
}

fn parse_vertex( digits: &str, line: usize, content: &str ) -> Result< Vertex > {
    digits.parse().map_err( |_| Error::Parse{ line, content: content.to_string() } )
}

/// Read a poset given as one arrow per line.
pub fn parse_arrows( text: &str ) -> Result< Vec< Arrow > > {
    let mut arrows = Vec::new();
    for ( line, content ) in records( text ) {
        let captures = ARROW.captures( content ).ok_or_else( || Error::Parse{ line, content: content.to_string() } )?;
        let a = parse_vertex( &captures[ 1 ], line, content )?;
        let b = parse_vertex( &captures[ 2 ], line, content )?;
        arrows.push( ( a, b ) );
    }
    Ok( arrows )
}

/// Read a simplicial complex given as one maximal simplex per line.
///
/// A simplex that repeats a vertex is rejected.
pub fn parse_maximal_simplices( text: &str ) -> Result< Vec< Vec< Vertex > > > {
    let mut simplices = Vec::new();
    for ( line, content ) in records( text ) {
        if ! SIMPLEX.is_match( content ) {
            return Err( Error::Parse{ line, content: content.to_string() } )
        }
        let simplex = NUMBER.find_iter( content )
            .map( |m| parse_vertex( m.as_str(), line, content ) )
            .collect::< Result< Vec< Vertex > > >()?;
        let mut distinct = simplex.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != simplex.len() {
            return Err( Error::Parse{ line, content: content.to_string() } )
        }
        simplices.push( simplex );
    }
    Ok( simplices )
}

/// Number of arrows in a poset file, or the first offending line.
pub fn count_arrows( text: &str ) -> Result< usize > {
    parse_arrows( text ).map( |arrows| arrows.len() )
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines() {
        let text = ";; header\n\n   {0,1}\n;{9,9}\n{1 , 2}\r\n";
        assert_eq!( parse_arrows( text ), Ok( vec![ ( 0, 1 ), ( 1, 2 ) ] ) );
        assert_eq!( count_arrows( text ), Ok( 2 ) );
        assert_eq!( parse_arrows( "" ), Ok( vec![] ) );
    }

    #[test]
    fn test_bad_arrow_lines() {
        for bad in [ "{1,2", "1,2", "{-1,2}", "{1,2} x", "{a,b}", "{1}" ] {
            let text = format!( "{{0,1}}\n; fine\n{}\n", bad );
            assert_eq!(
                parse_arrows( &text ),
                Err( Error::Parse{ line: 3, content: bad.to_string() } ),
                "input {:?}", bad,
            );
        }
    }

    #[test]
    fn test_oversized_vertex_is_a_parse_error() {
        let text = "{1,99999999999999999999999999}";
        assert!( matches!( parse_arrows( text ), Err( Error::Parse{ line: 1, .. } ) ) );
    }

    #[test]
    fn test_maximal_simplices() {
        let text = "; triangle and an edge\n{1,2,3}\n{3, 4}\n{5}\n";
        assert_eq!( parse_maximal_simplices( text ), Ok( vec![ vec![ 1, 2, 3 ], vec![ 3, 4 ], vec![ 5 ] ] ) );
        assert_eq!(
            parse_maximal_simplices( "{1,2}\n{}\n" ),
            Err( Error::Parse{ line: 2, content: "{}".to_string() } ),
        );
        assert_eq!(
            parse_maximal_simplices( "{1,2,1}" ),
            Err( Error::Parse{ line: 1, content: "{1,2,1}".to_string() } ),
        );
    }
}
