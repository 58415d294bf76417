//! Sanitizers and speculation barrier for the nospec library
//!
//! This crate combines the mask generators from `nospec-internal` with
//! candidate values: array indices, slice accesses and tagged pointers. It
//! also provides the platform speculation barrier and the default
//! speculation-control hooks.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod security;

// Re-export core sanitizers
pub use security::{
    array_index_nospec, get_mut_nospec, get_nospec, magic_neq_nospec, magic_neq_nospec_mut,
    magic_neq_nospec_ptr, NospecSliceExt,
};

// Re-export barrier utilities
pub use security::barrier;
pub use security::{barrier_nospec, barrier_nospec_with, with_barrier_nospec, NoBarrier, PlatformBarrier};

// Re-export default hooks
pub use security::UnsupportedSpecCtrl;

// Mask generators, for callers that combine masks themselves
pub use nospec_internal::{array_index_mask_nospec, neq_mask_nospec, Mask};
