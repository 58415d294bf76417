//! Branch-free mask generators
//!
//! Each generator turns one comparison into a [`Mask`]: every bit set when the
//! value may be used, every bit clear when it must collapse to zero. The
//! result is built from AND/OR/XOR/subtract and an arithmetic shift that
//! broadcasts the sign bit, so no step depends on a predicted branch.

use core::fmt;
use core::ops::{BitAnd, BitOr, Not};

use nospec_params::SIGN_SHIFT;
use subtle::{Choice, ConditionallySelectable};

use crate::arch;
use crate::hide::optimizer_hide_var;
use crate::word::Word;

/// An all-ones or all-zeros machine word
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Mask(usize);

impl Mask {
    /// Pass-through mask
    pub const ALL_ONES: Mask = Mask(!0);

    /// Collapse-to-zero mask
    pub const ZERO: Mask = Mask(0);

    /// Broadcast the sign bit of `word` into every bit
    ///
    /// The shift must be arithmetic: a logical shift would leave a single
    /// bit instead of a full-word mask.
    #[inline(always)]
    pub const fn from_sign_bit(word: usize) -> Self {
        Mask(((word as isize) >> SIGN_SHIFT) as usize)
    }

    /// Build a mask from the lowest bit of `bit`
    #[inline(always)]
    pub const fn from_low_bit(bit: usize) -> Self {
        Mask(0usize.wrapping_sub(bit & 1))
    }

    /// Raw mask bits
    #[inline(always)]
    pub const fn bits(self) -> usize {
        self.0
    }

    /// Keep `value` if the mask is all-ones, zero it otherwise
    #[inline(always)]
    pub fn apply<W: Word>(self, value: W) -> W {
        let () = W::WIDTH_CHECK;
        W::from_word(value.to_word() & self.0)
    }

    /// Pick `if_set` when the mask is all-ones, `if_clear` otherwise
    #[inline(always)]
    pub fn select<W: Word>(self, if_set: W, if_clear: W) -> W {
        let () = W::WIDTH_CHECK;
        W::from_word((if_set.to_word() & self.0) | (if_clear.to_word() & !self.0))
    }

    /// Whether the mask is all-ones
    ///
    /// This branches on the result. Use it for diagnostics and tests, not to
    /// gate a speculative access.
    #[inline]
    pub fn is_set(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({:#x})", self.0)
    }
}

impl Not for Mask {
    type Output = Mask;

    #[inline(always)]
    fn not(self) -> Mask {
        Mask(!self.0)
    }
}

impl BitAnd for Mask {
    type Output = Mask;

    #[inline(always)]
    fn bitand(self, rhs: Mask) -> Mask {
        Mask(self.0 & rhs.0)
    }
}

impl BitOr for Mask {
    type Output = Mask;

    #[inline(always)]
    fn bitor(self, rhs: Mask) -> Mask {
        Mask(self.0 | rhs.0)
    }
}

impl From<Mask> for Choice {
    #[inline]
    fn from(mask: Mask) -> Choice {
        Choice::from((mask.0 & 1) as u8)
    }
}

impl From<Choice> for Mask {
    #[inline]
    fn from(choice: Choice) -> Mask {
        Mask::from_low_bit(choice.unwrap_u8() as usize)
    }
}

impl ConditionallySelectable for Mask {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let m = Mask::from(choice).0;
        Mask((a.0 & !m) | (b.0 & m))
    }
}

/// Generate an all-ones mask when `index < size`, zero otherwise
///
/// Both operands are hidden from the optimizer first, so the mask survives
/// even inside a branch that already established `index < size`. With the
/// `arch-mask` feature, x86 and aarch64 use a `cmp`/borrow sequence; other
/// targets use [`generic_index_mask`].
#[inline(always)]
pub fn array_index_mask_nospec<I: Word, S: Word>(index: I, size: S) -> Mask {
    let () = I::WIDTH_CHECK;
    let () = S::WIDTH_CHECK;

    let index = optimizer_hide_var(index.to_word());
    let size = optimizer_hide_var(size.to_word());
    arch::index_mask(index, size)
}

/// Portable form of the index mask, valid over the full unsigned range
///
/// The sign bit of `(!i & s) | ((!i | s) & (i - s))` is the borrow out of
/// `i - s`, set exactly when `i < s`.
#[inline(always)]
pub fn generic_index_mask(index: usize, size: usize) -> Mask {
    let borrow = (!index & size) | ((!index | size) & index.wrapping_sub(size));
    Mask::from_sign_bit(borrow)
}

/// Index mask using `!(index | (size - 1 - index)) >> (bits - 1)`
///
/// Only correct when both operands are below `2^(bits - 1)`: an index or
/// size with the top bit set is reported out of bounds. Kept for callers
/// that want the shorter sequence and can guarantee the range.
#[inline(always)]
pub fn array_index_mask_nospec_bounded<I: Word, S: Word>(index: I, size: S) -> Mask {
    let () = I::WIDTH_CHECK;
    let () = S::WIDTH_CHECK;

    let index = optimizer_hide_var(index.to_word());
    let size = optimizer_hide_var(size.to_word());
    Mask::from_sign_bit(!(index | size.wrapping_sub(1).wrapping_sub(index)))
}

/// Generate an all-ones mask when `x == y`, zero otherwise
///
/// With `d = x ^ y`, the sign bit of `!d & (d - 1)` is set only for
/// `d == 0`.
#[inline(always)]
pub fn neq_mask_nospec<X: Word, Y: Word>(x: X, y: Y) -> Mask {
    let () = X::WIDTH_CHECK;
    let () = Y::WIDTH_CHECK;

    let x = optimizer_hide_var(x.to_word());
    let y = optimizer_hide_var(y.to_word());
    let d = x ^ y;
    Mask::from_sign_bit(!d & d.wrapping_sub(1))
}
