//! # plainzip-core
//!
//! Core bit-level building blocks shared by the plainzip encoder and
//! container layers.
//!
//! - [`bitstream`]: streaming bit-level input (`BitReader`) used by the
//!   standard inflater.
//! - [`bitsink`]: append-only, seekable bit buffer used by the constrained
//!   encoder, which needs to inspect its own cursor position mid-block.
//! - [`ringbuffer`]: sliding window buffer for DEFLATE decompression.
//! - [`crc`]: CRC-32 (ISO 3309), as required by the ZIP local/central headers.
//! - [`error`]: shared error type for every layer of the stack.
//!
//! ## Example
//!
//! ```
//! use plainzip_core::bitstream::BitReader;
//! use plainzip_core::crc::Crc32;
//! use std::io::Cursor;
//!
//! let mut reader = BitReader::new(Cursor::new(vec![0b0000_0101u8]));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//!
//! assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitsink;
pub mod bitstream;
pub mod crc;
pub mod error;
pub mod ringbuffer;

// Re-exports for convenience
pub use bitsink::BitSink;
pub use bitstream::BitReader;
pub use crc::Crc32;
pub use error::{PlainZipError, Result};
pub use ringbuffer::{OutputRingBuffer, RingBuffer};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitsink::BitSink;
    pub use crate::bitstream::BitReader;
    pub use crate::crc::Crc32;
    pub use crate::error::{PlainZipError, Result};
    pub use crate::ringbuffer::{OutputRingBuffer, RingBuffer};
}
