//! Public API traits and types for the nospec library
//!
//! This crate provides the public API surface for the nospec ecosystem: the
//! error type reported by speculation-control hooks, the vocabulary those
//! hooks speak, and the traits implemented at the seams (barrier, marker
//! field, control hooks).

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};
pub use types::*;

// Re-export all traits from the traits module
pub use traits::{SpecMagic, SpeculationBarrier, SpeculationControl};
