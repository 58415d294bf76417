//! Constant values shared by the nospec crates
//!
//! Everything here is a plain `const`; the crate has no dependencies and is
//! always `no_std`.

#![no_std]

pub mod errno;
pub mod prctl;
pub mod word;

pub use word::{BITS_PER_LONG, SIGN_SHIFT};
