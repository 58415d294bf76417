//! Architecture-specific index mask generators
//!
//! A platform may replace the portable mask with a short instruction
//! sequence that derives the mask from the carry flag of `index - size`.
//! Every override returns the same mask as
//! [`generic_index_mask`](crate::constant_time::generic_index_mask) for every
//! input.

use crate::constant_time::Mask;

#[cfg(all(feature = "arch-mask", any(target_arch = "x86", target_arch = "x86_64")))]
mod imp {
    use super::Mask;

    /// `cmp index, size` sets CF when `index < size`; `sbb m, m` turns CF
    /// into `0` or `!0`.
    #[inline(always)]
    pub fn index_mask(index: usize, size: usize) -> Mask {
        let mask: usize;
        // SAFETY: register-only arithmetic; flags are clobbered, which the
        // missing `preserves_flags` option declares.
        unsafe {
            core::arch::asm!(
                "cmp {index}, {size}",
                "sbb {mask}, {mask}",
                index = in(reg) index,
                size = in(reg) size,
                mask = lateout(reg) mask,
                options(pure, nomem, nostack)
            );
        }
        Mask::from_sign_bit(mask)
    }

    pub const NAME: &str = "x86-sbb";
}

#[cfg(all(feature = "arch-mask", target_arch = "aarch64"))]
mod imp {
    use super::Mask;

    /// `cmp` clears C when `index < size`; `sbc m, xzr, xzr` yields `C - 1`.
    /// `csdb` keeps later instructions from consuming a speculatively
    /// predicted value of `m`.
    #[inline(always)]
    pub fn index_mask(index: usize, size: usize) -> Mask {
        let mask: usize;
        // SAFETY: register-only arithmetic followed by a hint instruction.
        unsafe {
            core::arch::asm!(
                "cmp {index}, {size}",
                "sbc {mask}, xzr, xzr",
                "hint #20",
                index = in(reg) index,
                size = in(reg) size,
                mask = lateout(reg) mask,
                options(nomem, nostack)
            );
        }
        Mask::from_sign_bit(mask)
    }

    pub const NAME: &str = "aarch64-sbc-csdb";
}

#[cfg(not(all(
    feature = "arch-mask",
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
mod imp {
    use super::Mask;
    use crate::constant_time::generic_index_mask;

    #[inline(always)]
    pub fn index_mask(index: usize, size: usize) -> Mask {
        generic_index_mask(index, size)
    }

    pub const NAME: &str = "generic";
}

/// Name of the index mask implementation selected for this build
pub const INDEX_MASK_IMPL: &str = imp::NAME;

/// Index mask for already-hidden operands, using the selected implementation
#[inline(always)]
pub fn index_mask(index: usize, size: usize) -> Mask {
    imp::index_mask(index, size)
}
