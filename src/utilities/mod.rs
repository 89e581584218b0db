//! General-purpose helpers.

pub mod progress;
pub mod sequences_and_ordinals;
