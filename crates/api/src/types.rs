//! Speculation-control vocabulary shared with collaborator hooks
//!
//! Raw values follow the `PR_SPEC_*` prctl ABI so a syscall layer can decode
//! its arguments with `TryFrom<u64>` and hand typed values to a
//! [`SpeculationControl`](crate::traits::SpeculationControl) implementation.

use core::fmt;
use core::ops::BitOr;

use nospec_params::prctl::{
    PR_SPEC_DISABLE, PR_SPEC_DISABLE_NOEXEC, PR_SPEC_ENABLE, PR_SPEC_FORCE_DISABLE,
    PR_SPEC_INDIRECT_BRANCH, PR_SPEC_L1D_FLUSH, PR_SPEC_NOT_AFFECTED, PR_SPEC_PRCTL,
    PR_SPEC_SELECTOR_COUNT, PR_SPEC_STATUS_MASK, PR_SPEC_STORE_BYPASS,
};

use crate::error::{Error, Result};

/// Which speculation control a hook call addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecCtrlSelector {
    /// Speculative store bypass
    StoreBypass,
    /// Indirect branch speculation
    IndirectBranch,
    /// L1 data cache flush on context switch
    L1dFlush,
}

impl SpecCtrlSelector {
    /// Every selector, in ABI order
    pub const ALL: [SpecCtrlSelector; PR_SPEC_SELECTOR_COUNT] = [
        SpecCtrlSelector::StoreBypass,
        SpecCtrlSelector::IndirectBranch,
        SpecCtrlSelector::L1dFlush,
    ];

    /// The raw `PR_SPEC_*` selector value
    pub const fn raw(self) -> u64 {
        match self {
            Self::StoreBypass => PR_SPEC_STORE_BYPASS,
            Self::IndirectBranch => PR_SPEC_INDIRECT_BRANCH,
            Self::L1dFlush => PR_SPEC_L1D_FLUSH,
        }
    }

    /// Short human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::StoreBypass => "store-bypass",
            Self::IndirectBranch => "indirect-branch",
            Self::L1dFlush => "l1d-flush",
        }
    }
}

impl TryFrom<u64> for SpecCtrlSelector {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        match raw {
            PR_SPEC_STORE_BYPASS => Ok(Self::StoreBypass),
            PR_SPEC_INDIRECT_BRANCH => Ok(Self::IndirectBranch),
            PR_SPEC_L1D_FLUSH => Ok(Self::L1dFlush),
            _ => Err(Error::Unsupported {
                context: "speculation control selector",
            }),
        }
    }
}

impl fmt::Display for SpecCtrlSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status bits reported by a get hook
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct SpecCtrlStatus(u64);

impl SpecCtrlStatus {
    /// The task is not affected
    pub const NOT_AFFECTED: Self = Self(PR_SPEC_NOT_AFFECTED);
    /// The mitigation can be controlled per task
    pub const PRCTL: Self = Self(PR_SPEC_PRCTL);
    /// Speculation enabled
    pub const ENABLE: Self = Self(PR_SPEC_ENABLE);
    /// Speculation disabled
    pub const DISABLE: Self = Self(PR_SPEC_DISABLE);
    /// Speculation disabled, not reversible
    pub const FORCE_DISABLE: Self = Self(PR_SPEC_FORCE_DISABLE);
    /// Speculation disabled until exec
    pub const DISABLE_NOEXEC: Self = Self(PR_SPEC_DISABLE_NOEXEC);

    /// Decode raw status bits, rejecting unknown bits
    pub fn from_bits(bits: u64) -> Result<Self> {
        if bits & !PR_SPEC_STATUS_MASK != 0 {
            return Err(Error::OutOfRange {
                context: "speculation control status",
                value: bits,
            });
        }
        Ok(Self(bits))
    }

    /// Raw status bits
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the status reports the task as not affected
    pub const fn is_not_affected(self) -> bool {
        self.0 == PR_SPEC_NOT_AFFECTED
    }

    /// Whether the task may change the setting through a set hook
    pub const fn is_controllable(self) -> bool {
        self.contains(Self::PRCTL)
    }
}

impl BitOr for SpecCtrlStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl TryFrom<u64> for SpecCtrlStatus {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        Self::from_bits(raw)
    }
}

impl From<SpecCtrlStatus> for u64 {
    fn from(status: SpecCtrlStatus) -> u64 {
        status.0
    }
}

impl fmt::Debug for SpecCtrlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_not_affected() {
            return f.write_str("SpecCtrlStatus(NOT_AFFECTED)");
        }
        let names = [
            (Self::PRCTL, "PRCTL"),
            (Self::ENABLE, "ENABLE"),
            (Self::DISABLE, "DISABLE"),
            (Self::FORCE_DISABLE, "FORCE_DISABLE"),
            (Self::DISABLE_NOEXEC, "DISABLE_NOEXEC"),
        ];
        f.write_str("SpecCtrlStatus(")?;
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str(")")
    }
}

/// A request accepted by a set hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecCtrlCommand {
    /// Allow speculation (turn the mitigation off)
    Enable,
    /// Disallow speculation (turn the mitigation on)
    Disable,
    /// Disallow speculation permanently for the task
    ForceDisable,
    /// Disallow speculation until the next exec
    DisableNoexec,
}

impl SpecCtrlCommand {
    /// The raw `PR_SPEC_*` value for this command
    pub const fn raw(self) -> u64 {
        match self {
            Self::Enable => PR_SPEC_ENABLE,
            Self::Disable => PR_SPEC_DISABLE,
            Self::ForceDisable => PR_SPEC_FORCE_DISABLE,
            Self::DisableNoexec => PR_SPEC_DISABLE_NOEXEC,
        }
    }

    /// Whether the command turns the mitigation on
    pub const fn disables_speculation(self) -> bool {
        !matches!(self, Self::Enable)
    }
}

impl TryFrom<u64> for SpecCtrlCommand {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        match raw {
            PR_SPEC_ENABLE => Ok(Self::Enable),
            PR_SPEC_DISABLE => Ok(Self::Disable),
            PR_SPEC_FORCE_DISABLE => Ok(Self::ForceDisable),
            PR_SPEC_DISABLE_NOEXEC => Ok(Self::DisableNoexec),
            value => Err(Error::OutOfRange {
                context: "speculation control command",
                value,
            }),
        }
    }
}

impl From<SpecCtrlCommand> for SpecCtrlStatus {
    fn from(cmd: SpecCtrlCommand) -> Self {
        SpecCtrlStatus(cmd.raw())
    }
}
