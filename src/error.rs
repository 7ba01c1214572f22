// src/error.rs
//! Error types for buffer operations with conversion support

use std::fmt;

/// Errors that can occur during buffer operations.
///
/// Only operations that allocate can fail; out-of-range indices on reads
/// resolve to `None`, and out-of-range amounts on removal or windowing
/// operations clamp. Every failure leaves the buffer in its prior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator refused a request for the given number of bytes
    AllocationFailed {
        /// Size of the rejected request, in bytes
        bytes: usize,
    },
    /// The requested element count overflows the layout arithmetic
    CapacityOverflow,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { bytes } => {
                write!(f, "allocation of {} bytes failed", bytes)
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
        }
    }
}

impl std::error::Error for BufferError {}

/// Convert BufferError to std::io::Error
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;
        match err {
            BufferError::AllocationFailed { .. } => {
                std::io::Error::new(ErrorKind::OutOfMemory, err)
            }
            BufferError::CapacityOverflow => std::io::Error::new(ErrorKind::InvalidInput, err),
        }
    }
}

/// Result type alias for buffer operations
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`zvec::Result<T>`) or use the conversion traits.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}
