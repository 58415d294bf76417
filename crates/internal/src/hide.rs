//! Optimizer-hiding hint
//!
//! A mask computed right after a bounds check is redundant as far as the
//! compiler's (non-speculative) model is concerned: inside `if index < size`
//! it can prove the mask is all-ones and drop it. The CPU does not share that
//! proof while it is speculating. Passing each operand through
//! [`optimizer_hide_var`] makes its value unknown at that point, so the mask
//! is always computed and emitted.

/// Return `value` unchanged, hiding it from value-range propagation
///
/// On targets with stable inline assembly the value is routed through an
/// empty `asm!` block that claims to read and rewrite the register. Elsewhere
/// `core::hint::black_box` is used, which is best-effort.
#[inline(always)]
pub fn optimizer_hide_var(value: usize) -> usize {
    hide(value)
}

#[cfg(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
))]
#[inline(always)]
fn hide(mut value: usize) -> usize {
    // SAFETY: the template is a comment; no instruction is emitted and no
    // memory, stack or flag is touched.
    unsafe {
        core::arch::asm!(
            "/* {0} */",
            inout(reg) value,
            options(pure, nomem, nostack, preserves_flags)
        );
    }
    value
}

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
)))]
#[inline(always)]
fn hide(value: usize) -> usize {
    core::hint::black_box(value)
}
