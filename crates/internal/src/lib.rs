//! Leaf primitives for the nospec library
//!
//! This crate holds the pieces every sanitizer is built from: the bounded set
//! of word types an operand may have, the hint that keeps the optimizer from
//! folding a mask away, and the mask generators themselves.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod arch;
pub mod constant_time;
pub mod hide;
pub mod word;

pub use constant_time::{
    array_index_mask_nospec, array_index_mask_nospec_bounded, neq_mask_nospec, Mask,
};
pub use hide::optimizer_hide_var;
pub use word::Word;
