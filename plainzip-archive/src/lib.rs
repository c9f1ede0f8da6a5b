//! # plainzip-archive
//!
//! The ZIP/JAR container layer around [`plainzip_deflate`]'s constrained
//! encoder: a single-entry archive writer (§4.7), the padding-search driver
//! that retries payload padding until every sidecar field is alphabet-clean
//! (§4.8), and the padding-injector rewriter that splices prefix/suffix
//! bytes around a finished archive (§4.9).
//!
//! These are the "external collaborators" of the spec — straightforward
//! binary envelopes around the one hard piece of engineering, which lives
//! in `plainzip_deflate::constrained`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod padding_search;
pub mod zip;

pub use padding_search::{DEFAULT_ATTEMPT_CEILING, find_allowed_padding};
pub use zip::reader::{ZipEntryInfo, entry_compressed_bytes, find_end_of_central_directory, read_central_directory};
pub use zip::rewriter::inject;
pub use zip::writer::{BuiltArchive, write_single_entry};
