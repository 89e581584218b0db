//! Coefficient rings.
//!
//! Every chain and matrix in this crate is generic over a [`FieldElement`], and
//! defaults to the two-element field [`Z2`](field_prime_order::Z2).

pub mod field_prime_order;

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num::{One, Zero};

/// The arithmetic a chain coefficient must support.
pub trait FieldElement:
    Copy
    + Debug
    + Display
    + Eq
    + Ord
    + Hash
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Reduce an arbitrary integer into the field.
    fn from_integer( n: i64 ) -> Self;

    /// `0` for zero, `1` for an invertible value, larger otherwise.
    fn delta( &self ) -> u32;

    /// Multiplicative inverse, if one exists.
    fn inverse( &self ) -> Option< Self >;

    fn is_invertible( &self ) -> bool { self.delta() == 1 }
}
