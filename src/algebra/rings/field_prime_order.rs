//! Finite fields of prime order.
//!
//! An element of `Z/pZ` is stored as its canonical residue in `0 .. p`.
//! Only `p = 2` is used by the rest of the crate, through the alias [`Z2`].
//!
//! # Example
//!
//! ```
//! use posethom::algebra::rings::field_prime_order::{PrimeOrderField, Z2};
//! use posethom::algebra::rings::FieldElement;
//!
//! let one = Z2::from_integer( 1 );
//! assert_eq!( one + one, Z2::from_integer( 0 ) );
//! assert_eq!( -one, one );
//!
//! // in Z/3Z, 2 is its own inverse
//! let two = PrimeOrderField::< 3 >::from_integer( -1 );
//! assert_eq!( two.residue(), 2 );
//! assert_eq!( two * two, PrimeOrderField::< 3 >::from_integer( 1 ) );
//! assert_eq!( two.delta(), 1 );
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

use num::{Integer, One, Zero};
use serde::{Deserialize, Serialize};

use crate::algebra::rings::FieldElement;
use crate::error::Error;

/// An element of the prime field `Z/PZ`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PrimeOrderField< const P: u32 > {
    residue:    u32,
}

/// The two-element field.
pub type Z2 = PrimeOrderField< 2 >;

impl < const P: u32 > PrimeOrderField< P > {

    /// Build an element from a value already reduced modulo `P`.
    ///
    /// Returns [`Error::InvalidFieldValue`] if `residue >= P`.
    pub fn from_residue( residue: u32 ) -> Result< Self, Error > {
        if residue < P {
            Ok( PrimeOrderField{ residue } )
        } else {
            Err( Error::InvalidFieldValue{ value: residue as u64, modulus: P } )
        }
    }

    /// The canonical representative in `0 .. P`.
    pub fn residue( &self ) -> u32 { self.residue }

    /// The order of the field.
    pub const fn modulus() -> u32 { P }

    /// `None` when dividing by zero.
    pub fn checked_div( self, rhs: Self ) -> Option< Self > {
        rhs.inverse().map( |inv| self * inv )
    }
}

impl < const P: u32 > FieldElement for PrimeOrderField< P > {

    fn from_integer( n: i64 ) -> Self {
        PrimeOrderField{ residue: n.rem_euclid( P as i64 ) as u32 }
    }

    fn delta( &self ) -> u32 {
        match self.residue {
            0 => 0,
            r => r.gcd( &P ),
        }
    }

    /// Computed as `self^(P-2)`, which is the inverse when `P` is prime.
    fn inverse( &self ) -> Option< Self > {
        if self.delta() != 1 { return None }
        Some( num::pow( *self, ( P - 2 ) as usize ) )
    }
}

//  ---------------------------------------------------------------------------
//  ARITHMETIC
//  ---------------------------------------------------------------------------

impl < const P: u32 > Add for PrimeOrderField< P > {
    type Output = Self;
    fn add( self, rhs: Self ) -> Self {
        PrimeOrderField{ residue: ( ( self.residue as u64 + rhs.residue as u64 ) % P as u64 ) as u32 }
    }
}

impl < const P: u32 > AddAssign for PrimeOrderField< P > {
    fn add_assign( &mut self, rhs: Self ) { *self = *self + rhs }
}

impl < const P: u32 > Neg for PrimeOrderField< P > {
    type Output = Self;
    fn neg( self ) -> Self {
        PrimeOrderField{ residue: ( P - self.residue ) % P }
    }
}

impl < const P: u32 > Sub for PrimeOrderField< P > {
    type Output = Self;
    fn sub( self, rhs: Self ) -> Self { self + ( -rhs ) }
}

impl < const P: u32 > Mul for PrimeOrderField< P > {
    type Output = Self;
    fn mul( self, rhs: Self ) -> Self {
        PrimeOrderField{ residue: ( ( self.residue as u64 * rhs.residue as u64 ) % P as u64 ) as u32 }
    }
}

impl < const P: u32 > MulAssign for PrimeOrderField< P > {
    fn mul_assign( &mut self, rhs: Self ) { *self = *self * rhs }
}

impl < const P: u32 > Div for PrimeOrderField< P > {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero, like integer division.
    fn div( self, rhs: Self ) -> Self {
        match self.checked_div( rhs ) {
            Some( quotient ) => quotient,
            None => panic!( "attempt to divide by a non-invertible element of Z/{}Z", P ),
        }
    }
}

impl < const P: u32 > Zero for PrimeOrderField< P > {
    fn zero() -> Self { PrimeOrderField{ residue: 0 } }
    fn is_zero( &self ) -> bool { self.residue == 0 }
}

impl < const P: u32 > One for PrimeOrderField< P > {
    fn one() -> Self { PrimeOrderField{ residue: 1 % P } }
}

//  ---------------------------------------------------------------------------
//  CONVERSIONS
//  ---------------------------------------------------------------------------

impl < const P: u32 > TryFrom< u32 > for PrimeOrderField< P > {
    type Error = Error;
    fn try_from( residue: u32 ) -> Result< Self, Error > { Self::from_residue( residue ) }
}

impl < const P: u32 > From< PrimeOrderField< P > > for u32 {
    fn from( x: PrimeOrderField< P > ) -> u32 { x.residue }
}

impl < const P: u32 > fmt::Display for PrimeOrderField< P > {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
        write!( f, "{}", self.residue )
    }
}
