//! Turns a CLI `--exclude` string into an [`AllowedAlphabet`].

use plainzip_deflate::constrained::AllowedAlphabet;

/// Build the printable-ASCII alphabet with `excluded`'s bytes removed.
///
/// `excluded` is taken byte-for-byte (not interpreted as escape sequences);
/// a caller wanting to exclude a literal backslash or quote passes it
/// through shell quoting the same way the default `&<'>"()` is.
pub fn from_excluded_str(excluded: &str) -> AllowedAlphabet {
    AllowedAlphabet::ascii_printable_excluding(excluded.as_bytes())
}
