//! # plainzip-deflate
//!
//! DEFLATE (RFC 1951) support for plainzip.
//!
//! This crate provides two things:
//!
//! - A standard decoder ([`inflate`]), supporting all three DEFLATE block
//!   types, used to verify that the constrained encoder's output round-trips.
//! - The constrained encoder ([`constrained`]), which synthesizes dynamic
//!   Huffman codebooks so that every byte of its output lies within a
//!   caller-supplied allowed alphabet.
//!
//! ## Example
//!
//! ```rust
//! use plainzip_deflate::{AllowedAlphabet, encode, inflate};
//!
//! let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
//! let original = b"Hello, World!";
//! let compressed = encode(original, &allowed).unwrap();
//!
//! for byte in &compressed {
//!     assert!(allowed.contains(*byte));
//! }
//!
//! let decompressed = inflate(&compressed).unwrap();
//! assert_eq!(&decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod constrained;
pub mod huffman;
pub mod inflate;
pub mod tables;

pub use constrained::{AllowedAlphabet, encode};
pub use huffman::HuffmanTree;
pub use inflate::{Inflater, inflate};

/// Re-exports for glob-importing the common API surface.
pub mod prelude {
    pub use crate::constrained::{AllowedAlphabet, encode};
    pub use crate::inflate::inflate;
}
