//! Speculation barrier
//!
//! By default [`barrier_nospec`] emits nothing. A platform opts in by
//! implementing [`SpeculationBarrier`]; with the `arch-barrier` feature the
//! x86 and aarch64 implementations below become the [`PlatformBarrier`].
//!
//! The barrier is not a memory fence. It does not order stores between
//! threads; it keeps one instruction stream from executing past this point
//! on an unresolved branch prediction.

use nospec_api::SpeculationBarrier;

/// The do-nothing barrier, for platforms where no instruction is needed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBarrier;

impl SpeculationBarrier for NoBarrier {
    const NAME: &'static str = "none";
    const EMITS_INSTRUCTION: bool = false;

    #[inline(always)]
    fn barrier() {}
}

/// `lfence`: later instructions do not start until all earlier ones complete
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Lfence;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl SpeculationBarrier for Lfence {
    const NAME: &'static str = "lfence";
    const EMITS_INSTRUCTION: bool = true;

    #[inline(always)]
    fn barrier() {
        // SAFETY: `lfence` has no operands and no architectural side effects.
        unsafe {
            core::arch::asm!("lfence", options(nostack, preserves_flags));
        }
    }
}

/// `dsb nsh; isb`: drain outstanding instructions and refetch
#[cfg(target_arch = "aarch64")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DsbIsb;

#[cfg(target_arch = "aarch64")]
impl SpeculationBarrier for DsbIsb {
    const NAME: &'static str = "dsb-nsh-isb";
    const EMITS_INSTRUCTION: bool = true;

    #[inline(always)]
    fn barrier() {
        // SAFETY: barrier instructions with no operands.
        unsafe {
            core::arch::asm!("dsb nsh", "isb", options(nostack, preserves_flags));
        }
    }
}

/// Barrier selected for this build
#[cfg(all(feature = "arch-barrier", any(target_arch = "x86", target_arch = "x86_64")))]
pub type PlatformBarrier = Lfence;

/// Barrier selected for this build
#[cfg(all(feature = "arch-barrier", target_arch = "aarch64"))]
pub type PlatformBarrier = DsbIsb;

/// Barrier selected for this build
#[cfg(not(all(
    feature = "arch-barrier",
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
pub type PlatformBarrier = NoBarrier;

/// Stop speculation past this point, if the platform needs it
#[inline(always)]
pub fn barrier_nospec() {
    PlatformBarrier::barrier();
}

/// Emit the barrier of an explicitly chosen implementation
#[inline(always)]
pub fn barrier_nospec_with<B: SpeculationBarrier>() {
    B::barrier();
}

/// Run `f` after a speculation barrier
#[inline(always)]
pub fn with_barrier_nospec<T, F: FnOnce() -> T>(f: F) -> T {
    barrier_nospec();
    f()
}

/// Name of the barrier selected for this build
pub const fn platform_barrier_name() -> &'static str {
    PlatformBarrier::NAME
}
