//! Error handling for speculation-control hooks

pub mod traits;
pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export error traits
pub use traits::ResultExt;

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        use std::io::ErrorKind;

        let kind = match e {
            Error::Unsupported { .. } => ErrorKind::Unsupported,
            Error::InvalidArgument { .. } | Error::OutOfRange { .. } => ErrorKind::InvalidInput,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::NotControllable { .. } => ErrorKind::Other,
        };
        std::io::Error::new(kind, e)
    }
}
