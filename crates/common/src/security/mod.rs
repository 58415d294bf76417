//! Speculation-hardening primitives
//!
//! This module provides the sanitizers built on the mask generators, the
//! speculation barrier, and the default control hooks.

pub mod barrier;
pub mod hooks;
pub mod sanitize;

// Re-export the sanitizers
pub use sanitize::{
    array_index_nospec, get_mut_nospec, get_nospec, magic_neq_nospec, magic_neq_nospec_mut,
    magic_neq_nospec_ptr, NospecSliceExt,
};

// Re-export barrier utilities
pub use barrier::{barrier_nospec, barrier_nospec_with, with_barrier_nospec, NoBarrier, PlatformBarrier};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use barrier::Lfence;

#[cfg(target_arch = "aarch64")]
pub use barrier::DsbIsb;

pub use hooks::UnsupportedSpecCtrl;
