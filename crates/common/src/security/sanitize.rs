//! Index and tagged-pointer sanitizers
//!
//! These harden a check that has already been made; they never replace it.
//! A typical use:
//!
//! ```
//! use nospec_common::array_index_nospec;
//!
//! let table = [10u32, 20, 30, 40];
//! let index = 2usize;
//! if index < table.len() {
//!     let index = array_index_nospec(index, table.len());
//!     assert_eq!(table[index], 30);
//! }
//! ```

use nospec_api::SpecMagic;
use nospec_internal::{array_index_mask_nospec, neq_mask_nospec, Word};

/// Sanitize an array index after a bounds check
///
/// Returns `index` when `index < size` and `0` otherwise, without a
/// data-dependent branch. If the CPU speculates past the caller's bounds
/// check with an out-of-range index, the access that follows reads element
/// 0 instead of attacker-chosen memory.
#[inline(always)]
pub fn array_index_nospec<I: Word, S: Word>(index: I, size: S) -> I {
    array_index_mask_nospec(index, size).apply(index)
}

/// Bounds-checked, speculation-hardened slice access
///
/// Equivalent to `slice.get(index)`, except that the index used for the
/// access is sanitized against the length. For an empty slice the
/// speculative access still targets element 0, so callers should not keep
/// empty slices pointing at sensitive memory.
#[inline]
pub fn get_nospec<T>(slice: &[T], index: usize) -> Option<&T> {
    if index < slice.len() {
        let index = array_index_nospec(index, slice.len());
        // SAFETY: `index < slice.len()` was checked above, and the sanitized
        // index equals the original whenever that check holds.
        Some(unsafe { slice.get_unchecked(index) })
    } else {
        None
    }
}

/// Mutable variant of [`get_nospec`]
#[inline]
pub fn get_mut_nospec<T>(slice: &mut [T], index: usize) -> Option<&mut T> {
    if index < slice.len() {
        let index = array_index_nospec(index, slice.len());
        // SAFETY: see `get_nospec`.
        Some(unsafe { slice.get_unchecked_mut(index) })
    } else {
        None
    }
}

/// Slice extension for speculation-hardened access
pub trait NospecSliceExt<T> {
    /// See [`get_nospec`]
    fn get_nospec(&self, index: usize) -> Option<&T>;

    /// See [`get_mut_nospec`]
    fn get_mut_nospec(&mut self, index: usize) -> Option<&mut T>;
}

impl<T> NospecSliceExt<T> for [T] {
    #[inline]
    fn get_nospec(&self, index: usize) -> Option<&T> {
        get_nospec(self, index)
    }

    #[inline]
    fn get_mut_nospec(&mut self, index: usize) -> Option<&mut T> {
        get_mut_nospec(self, index)
    }
}

/// Sanitize a struct pointer by comparing its marker field with `magic`
///
/// Returns a pointer to `p` when `p.spec_magic() == magic`, null otherwise.
/// If the CPU speculates with a substituted pointer whose marker does not
/// match, the pointer used downstream is null and cannot be steered.
///
/// ```
/// use nospec_api::impl_spec_magic;
/// use nospec_common::magic_neq_nospec;
///
/// const TIMER_MAGIC: u32 = 0x7153_7153;
///
/// struct Timer {
///     spec_magic: u32,
///     deadline: u64,
/// }
/// impl_spec_magic!(Timer: u32);
///
/// let timer = Timer { spec_magic: TIMER_MAGIC, deadline: 30 };
/// let p = magic_neq_nospec(&timer, TIMER_MAGIC);
/// assert_eq!(p, &timer as *const Timer);
/// assert!(magic_neq_nospec(&timer, 0).is_null());
/// ```
#[inline(always)]
pub fn magic_neq_nospec<T: SpecMagic>(p: &T, magic: T::Magic) -> *const T {
    let mask = neq_mask_nospec(p.spec_magic(), magic);
    (p as *const T).map_addr(|addr| addr & mask.bits())
}

/// Mutable variant of [`magic_neq_nospec`]
#[inline(always)]
pub fn magic_neq_nospec_mut<T: SpecMagic>(p: &mut T, magic: T::Magic) -> *mut T {
    let mask = neq_mask_nospec(p.spec_magic(), magic);
    (p as *mut T).map_addr(|addr| addr & mask.bits())
}

/// Raw-pointer variant of [`magic_neq_nospec`]
///
/// # Safety
///
/// `p` must be non-null, aligned and valid for reads of `T`, and its marker
/// field must have been initialised.
#[inline(always)]
pub unsafe fn magic_neq_nospec_ptr<T: SpecMagic>(p: *const T, magic: T::Magic) -> *const T {
    // SAFETY: the caller guarantees `p` is valid for reads.
    let marker = unsafe { (*p).spec_magic() };
    let mask = neq_mask_nospec(marker, magic);
    p.map_addr(|addr| addr & mask.bits())
}
