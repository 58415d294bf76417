//! Operand types accepted by the mask generators and sanitizers
//!
//! Every primitive works on a single machine word. `Word` is implemented for
//! the unsigned integer types that can be zero-extended into a `usize` and
//! truncated back without losing information.
//!
//! The width requirement is checked at build time. `u128` never implements
//! the trait:
//!
//! ```compile_fail
//! use nospec_internal::array_index_mask_nospec;
//!
//! let _ = array_index_mask_nospec(7u128, 10u128);
//! ```
//!
//! and a type that implements it but is wider than `usize` on the current
//! target (`u64` on a 32-bit target) fails to monomorphize because of
//! [`Word::WIDTH_CHECK`].

use core::mem::size_of;

mod sealed {
    pub trait Sealed {}
}

/// An unsigned integer that fits in one machine word
pub trait Word: Copy + Eq + sealed::Sealed {
    /// Evaluates to `()` when `Self` fits in a `usize`, fails the build otherwise
    ///
    /// Primitives bind this with `let () = W::WIDTH_CHECK;` so that the
    /// assertion is evaluated for every instantiation.
    const WIDTH_CHECK: () = assert!(
        size_of::<Self>() <= size_of::<usize>(),
        "nospec operand is wider than a machine word"
    );

    /// Zero-extend into a machine word
    fn to_word(self) -> usize;

    /// Truncate a machine word back into `Self`
    fn from_word(word: usize) -> Self;
}

macro_rules! impl_word {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Word for $ty {
                #[inline(always)]
                fn to_word(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_word(word: usize) -> Self {
                    word as $ty
                }
            }
        )*
    };
}

// `u64` is accepted everywhere so generic code names the same bounds on every
// target; on 32-bit targets instantiating a primitive with it trips
// `WIDTH_CHECK`.
impl_word!(u8, u16, u32, u64, usize);
