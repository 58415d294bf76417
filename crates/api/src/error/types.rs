//! Error type definitions for speculation-control hooks

use nospec_params::errno::{EINVAL, ENODEV, ENXIO, EPERM, ERANGE};

/// Primary error type for speculation-control operations
///
/// The sanitizers themselves never fail; these errors are produced by the
/// collaborator hooks and by decoding raw selector and command values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The selector or the whole control interface is not supported
    #[error("{context}: not supported")]
    Unsupported { context: &'static str },

    /// The request is malformed for this task
    #[error("{context}: invalid argument")]
    InvalidArgument { context: &'static str },

    /// A raw value does not name a known command or status
    #[error("{context}: value {value:#x} out of range")]
    OutOfRange { context: &'static str, value: u64 },

    /// The request would weaken a mitigation that was forced on
    #[error("{context}: permission denied")]
    PermissionDenied { context: &'static str },

    /// The mitigation exists but cannot be controlled per task
    #[error("{context}: control not available")]
    NotControllable { context: &'static str },
}

/// Result type for speculation-control operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Unsupported { .. } => Self::Unsupported { context },
            Self::InvalidArgument { .. } => Self::InvalidArgument { context },
            Self::OutOfRange { value, .. } => Self::OutOfRange { context, value },
            Self::PermissionDenied { .. } => Self::PermissionDenied { context },
            Self::NotControllable { .. } => Self::NotControllable { context },
        }
    }

    /// The context string attached to this error
    pub fn context(&self) -> &'static str {
        match *self {
            Self::Unsupported { context }
            | Self::InvalidArgument { context }
            | Self::OutOfRange { context, .. }
            | Self::PermissionDenied { context }
            | Self::NotControllable { context } => context,
        }
    }

    /// Negative errno value a syscall layer would return for this error
    pub fn errno(&self) -> i32 {
        match self {
            Self::Unsupported { .. } => -ENODEV,
            Self::InvalidArgument { .. } => -EINVAL,
            Self::OutOfRange { .. } => -ERANGE,
            Self::PermissionDenied { .. } => -EPERM,
            Self::NotControllable { .. } => -ENXIO,
        }
    }

    /// Map a negative errno back to an error
    ///
    /// Returns `None` for values that no hook produces. `OutOfRange` comes
    /// back with a value of 0 since the errno does not carry it.
    pub fn from_errno(errno: i32, context: &'static str) -> Option<Self> {
        match errno.checked_neg()? {
            ENODEV => Some(Self::Unsupported { context }),
            EINVAL => Some(Self::InvalidArgument { context }),
            ERANGE => Some(Self::OutOfRange { context, value: 0 }),
            EPERM => Some(Self::PermissionDenied { context }),
            ENXIO => Some(Self::NotControllable { context }),
            _ => None,
        }
    }
}
