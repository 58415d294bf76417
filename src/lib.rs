//! # nospec
//!
//! Branch-free primitives that harden bounds checks and tagged-pointer checks
//! against speculative-execution bypass (Spectre variant 1).
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! nospec = "0.3"
//! ```
//!
//! ```
//! use nospec::prelude::*;
//!
//! fn load(table: &[u64], index: usize) -> Option<u64> {
//!     if index < table.len() {
//!         let index = array_index_nospec(index, table.len());
//!         return Some(table[index]);
//!     }
//!     None
//! }
//!
//! assert_eq!(load(&[1, 2, 3], 1), Some(2));
//! assert_eq!(load(&[1, 2, 3], 3), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library integration
//! - `arch-mask` (default): `cmp`/borrow mask sequences on x86 and aarch64
//! - `arch-barrier` (default): `lfence` on x86, `dsb nsh; isb` on aarch64
//! - `serde`: serialization of the speculation-control types
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`nospec-params`]: word geometry, prctl and errno constants
//! - [`nospec-internal`]: `Word`, optimizer hint, mask generators
//! - [`nospec-api`]: errors, control vocabulary, seam traits
//! - [`nospec-common`]: sanitizers, barrier, default hooks

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use nospec_api as api;
pub use nospec_common as common;
pub use nospec_internal as internal;
pub use nospec_params as params;

pub use nospec_api::impl_spec_magic;

// Masks convert to and from `subtle::Choice`
pub use subtle;

/// Common imports for nospec users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{SpecMagic, SpeculationBarrier, SpeculationControl};

    // Re-export control vocabulary
    pub use crate::api::{SpecCtrlCommand, SpecCtrlSelector, SpecCtrlStatus};

    // Re-export mask generators
    pub use crate::internal::{array_index_mask_nospec, neq_mask_nospec, Mask, Word};

    // Re-export sanitizers and barrier
    pub use crate::common::{
        array_index_nospec, barrier_nospec, get_mut_nospec, get_nospec, magic_neq_nospec,
        magic_neq_nospec_mut, NospecSliceExt, UnsupportedSpecCtrl,
    };
}
