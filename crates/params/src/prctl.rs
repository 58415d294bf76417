//! Speculation-control prctl values
//!
//! These mirror the `PR_{GET,SET}_SPECULATION_CTRL` ABI so that raw values
//! coming from a syscall layer can be decoded without a translation table.

/// Speculative store bypass
pub const PR_SPEC_STORE_BYPASS: u64 = 0;

/// Indirect branch speculation
pub const PR_SPEC_INDIRECT_BRANCH: u64 = 1;

/// L1 data cache flush on context switch
pub const PR_SPEC_L1D_FLUSH: u64 = 2;

/// Number of defined selectors
pub const PR_SPEC_SELECTOR_COUNT: usize = 3;

/// The task is not affected by the vulnerability
pub const PR_SPEC_NOT_AFFECTED: u64 = 0;

/// The mitigation can be controlled per task
pub const PR_SPEC_PRCTL: u64 = 1 << 0;

/// Speculation is enabled (mitigation off)
pub const PR_SPEC_ENABLE: u64 = 1 << 1;

/// Speculation is disabled (mitigation on)
pub const PR_SPEC_DISABLE: u64 = 1 << 2;

/// Speculation is disabled and cannot be re-enabled
pub const PR_SPEC_FORCE_DISABLE: u64 = 1 << 3;

/// Speculation is disabled until the next exec
pub const PR_SPEC_DISABLE_NOEXEC: u64 = 1 << 4;

/// Every status bit a control hook may report
pub const PR_SPEC_STATUS_MASK: u64 = PR_SPEC_PRCTL
    | PR_SPEC_ENABLE
    | PR_SPEC_DISABLE
    | PR_SPEC_FORCE_DISABLE
    | PR_SPEC_DISABLE_NOEXEC;
