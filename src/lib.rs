// src/lib.rs
//! # Generic Growable Buffer with a Zero Sentinel
//!
//! A foundational container: one entity (the buffer), one lifecycle
//! (allocate, grow/shrink, release), generic over fixed-width element
//! types.
//!
//! Features:
//! - Owning [`Buffer`] / borrowing [`View`] split: the type system rules
//!   out freeing or growing memory the buffer does not own
//! - Zero-sentinel invariant: owning storage always keeps one zeroed
//!   element past the logical end, so sequences double as zero-terminated
//!   strings of arbitrary element width
//! - Doubling capacity growth with explicit, fallible allocation: a failed
//!   growth returns an error and leaves the buffer untouched
//! - Index-shifting operations (insert, erase, splice, shift/unshift,
//!   reverse) that preserve the sentinel under any element width
//! - Pluggable allocation strategy injected per buffer ([`BufAlloc`]),
//!   no process-wide mutable state
//!
//! The buffer has no internal synchronization; concurrent mutation must be
//! serialized by the caller, as with any `&mut` access.
//!
//! # Example
//!
//! ```
//! use zvec::{Buffer, View};
//! # use zvec::BufferError;
//!
//! let mut buf = Buffer::from_slice(&[1u32, 2, 3])?;
//! buf.unshift_by(2)?;                  // [0, 0, 1, 2, 3]
//! buf.erase_at(1, 2);                  // [0, 2, 3]
//! buf.reverse();                       // [3, 2, 0]
//! assert_eq!(buf.as_slice(), &[3, 2, 0]);
//!
//! // views alias memory without copying
//! let text = *b"abc\0";
//! let view = View::terminated(&text);
//! assert_eq!(view.as_slice(), b"abc");
//! # Ok::<(), BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alloc;
pub mod buffer;
pub mod cmp;
pub mod error;
pub mod view;

// Re-export main types
pub use alloc::{BufAlloc, Global};
pub use buffer::Buffer;
pub use error::{BufferError, Result, ResultExt};
pub use view::View;

// Element marker bound: T::default() is the zeroed representation.
pub use zeroize::DefaultIsZeroes;

/// Commonly used imports.
pub mod prelude {
    pub use crate::alloc::{BufAlloc, Global};
    pub use crate::buffer::Buffer;
    pub use crate::cmp::{ascending, compare, descending};
    pub use crate::error::{BufferError, Result, ResultExt};
    pub use crate::view::View;
    pub use zeroize::DefaultIsZeroes;
}
