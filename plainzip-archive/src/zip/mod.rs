//! Single-entry ZIP/JAR containers around a constrained-DEFLATE stream.
//!
//! This module narrows the general-purpose ZIP format down to exactly the
//! layout one constrained-encoder entry needs (§6): one local file header,
//! one compressed stream, one central directory entry, and an
//! end-of-central-directory record — no Zip64, no encryption, no multi-disk
//! archives, a single fixed filename. [`writer`] builds that layout;
//! [`reader`] walks it back (used by the rewriter and by tests to confirm
//! the writer's output is a real ZIP); [`rewriter`] implements the padding
//! injector that splices caller-supplied bytes around the archive.

pub mod reader;
pub mod rewriter;
pub mod writer;

/// Local file header signature (`PK\x03\x04`).
pub const LOCAL_FILE_HEADER_SIG: u32 = 0x0403_4B50;
/// Optional data descriptor signature (`PK\x07\x08`).
pub const DATA_DESCRIPTOR_SIG: u32 = 0x0807_4B50;
/// Central directory file header signature (`PK\x01\x02`).
pub const CENTRAL_DIR_HEADER_SIG: u32 = 0x0201_4B50;
/// End-of-central-directory signature (`PK\x05\x06`).
pub const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4B50;

/// `version_needed` field written into every header this crate produces.
pub const VERSION_NEEDED: u16 = 0x000A;

pub use reader::{ZipEntryInfo, entry_compressed_bytes, find_end_of_central_directory, read_central_directory};
pub use writer::write_single_entry;
