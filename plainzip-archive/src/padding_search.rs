//! The padding-search driver (§4.8).
//!
//! The constrained encoder guarantees the *compressed stream* lands in the
//! allowed alphabet; it says nothing about the ZIP sidecar fields around it
//! (CRC-32, compressed/uncompressed length, central-directory offset), which
//! are a function of the uncompressed payload too. This driver retries the
//! whole encode with a growing amount of payload padding until all four
//! sidecar fields happen to land in the alphabet as well.

use plainzip_core::error::{PlainZipError, Result};
use plainzip_deflate::constrained::AllowedAlphabet;

use crate::zip::writer::{BuiltArchive, write_single_entry};

/// Upper bound on padding attempts before giving up (§5: "bounded by an
/// attempt ceiling").
pub const DEFAULT_ATTEMPT_CEILING: u64 = 10_000;

/// Try `filename`/`base_payload` padded by `pad(n)` for `n` from 1 upward,
/// stopping at the first archive whose CRC-32, compressed size,
/// uncompressed size, and central-directory-offset fields are all
/// alphabet-compliant.
///
/// `pad` receives the attempt count and returns the payload to try for that
/// attempt — e.g. `|n| [base_payload, &vec![pad_byte; n]].concat()`. It is
/// called with `n` starting at 1, matching §4.8 exactly ("tries increasing
/// `N` from 1 upward").
pub fn find_allowed_padding<F>(
    filename: &str,
    allowed: &AllowedAlphabet,
    attempt_ceiling: u64,
    mut pad: F,
) -> Result<BuiltArchive>
where
    F: FnMut(u64) -> Vec<u8>,
{
    for attempt in 1..=attempt_ceiling {
        let payload = pad(attempt);
        let archive = match write_single_entry(filename, &payload, allowed) {
            Ok(archive) => archive,
            Err(PlainZipError::UnencodableInput { .. }) => continue,
            Err(other) => return Err(other),
        };

        if sidecar_fields_allowed(&archive, allowed) {
            return Ok(archive);
        }
    }

    Err(PlainZipError::padding_search_exhausted(attempt_ceiling))
}

fn sidecar_fields_allowed(archive: &BuiltArchive, allowed: &AllowedAlphabet) -> bool {
    let fields = [
        archive.sidecar.crc32,
        archive.sidecar.compressed_size,
        archive.sidecar.uncompressed_size,
        archive.sidecar.central_directory_offset,
    ];
    fields.iter().all(|&offset| {
        archive.bytes[offset..offset + 4]
            .iter()
            .all(|&b| allowed.contains(b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_padding_length_for_a_small_payload() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let base = b"class Exploit {}";
        let archive = find_allowed_padding("Exploit.class", &allowed, DEFAULT_ATTEMPT_CEILING, |n| {
            let mut payload = base.to_vec();
            payload.extend(std::iter::repeat_n(b' ', n as usize));
            payload
        })
        .expect("a padding length within the ceiling should exist for a permissive alphabet");

        assert!(sidecar_fields_allowed(&archive, &allowed));
    }

    #[test]
    fn exhausts_when_ceiling_too_low_for_an_impossible_alphabet() {
        // A single-byte alphabet fails the AlphabetPreconditionViolated check
        // inside every encode attempt, which this driver does not retry past.
        let allowed = AllowedAlphabet::from_bytes([0x41]);
        let err = find_allowed_padding("x.bin", &allowed, 5, |n| vec![b'A'; n as usize])
            .unwrap_err();
        assert!(matches!(err, PlainZipError::AlphabetPreconditionViolated { .. }));
    }
}
