//! Builds the exact single-entry ZIP/JAR byte layout of spec §6.
//!
//! Every field this writer emits is fixed except the four the padding-search
//! driver (§4.8) cares about: CRC-32, compressed size, uncompressed size,
//! and the central-directory offset. `version_needed`, flags, method, and
//! mtime/mdate are always the same constant bytes the reference `wrap_jar`
//! uses — a deliberately minimal, deterministic header, not the general
//! timestamped one a full ZIP writer would produce.

use super::{CENTRAL_DIR_HEADER_SIG, END_OF_CENTRAL_DIR_SIG, LOCAL_FILE_HEADER_SIG, VERSION_NEEDED};
use plainzip_core::crc::Crc32;
use plainzip_core::error::Result;
use plainzip_deflate::constrained::AllowedAlphabet;

/// Byte offsets of the four sidecar fields the padding-search driver checks,
/// within the finished archive.
#[derive(Debug, Clone, Copy)]
pub struct SidecarOffsets {
    /// Offset of the 4-byte little-endian CRC-32 field.
    pub crc32: usize,
    /// Offset of the 4-byte little-endian compressed-size field.
    pub compressed_size: usize,
    /// Offset of the 4-byte little-endian uncompressed-size field.
    pub uncompressed_size: usize,
    /// Offset of the 4-byte little-endian central-directory-offset field.
    pub central_directory_offset: usize,
}

/// A fully assembled single-entry archive plus the offsets of its
/// alphabet-sensitive sidecar fields.
pub struct BuiltArchive {
    /// The complete archive bytes.
    pub bytes: Vec<u8>,
    /// Offsets of the four fields the padding-search driver must verify.
    pub sidecar: SidecarOffsets,
}

/// Constrained-DEFLATE-compress `payload` under `allowed` and wrap it as a
/// single-entry ZIP/JAR named `filename`.
///
/// Returns `Err` if the constrained encoder itself cannot express `payload`
/// under `allowed` (see [`plainzip_deflate::constrained::encode`]); does
/// *not* check that the container's own sidecar fields land in `allowed` —
/// that is the padding-search driver's job (§4.8), since it is the one that
/// knows how to vary the payload and retry.
pub fn write_single_entry(
    filename: &str,
    payload: &[u8],
    allowed: &AllowedAlphabet,
) -> Result<BuiltArchive> {
    let compressed = plainzip_deflate::constrained::encode(payload, allowed)?;
    let crc32 = Crc32::compute(payload);
    Ok(build(filename, payload.len() as u32, crc32, &compressed))
}

fn build(filename: &str, uncompressed_len: u32, crc32: u32, compressed: &[u8]) -> BuiltArchive {
    let name = filename.as_bytes();
    let mut bytes = Vec::with_capacity(30 + name.len() + compressed.len() + 46 + name.len() + 22);

    // Local file header.
    let local_header_offset = bytes.len() as u32;
    bytes.extend_from_slice(&LOCAL_FILE_HEADER_SIG.to_le_bytes());
    bytes.extend_from_slice(&VERSION_NEEDED.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes()); // general purpose flags
    bytes.extend_from_slice(&8u16.to_le_bytes()); // method: DEFLATE
    bytes.extend_from_slice(&0u16.to_le_bytes()); // mtime
    bytes.extend_from_slice(&0u16.to_le_bytes()); // mdate
    let crc32_offset = bytes.len();
    bytes.extend_from_slice(&crc32.to_le_bytes());
    let compressed_size_offset = bytes.len();
    bytes.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    let uncompressed_size_offset = bytes.len();
    bytes.extend_from_slice(&uncompressed_len.to_le_bytes());
    bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes()); // extra field length
    bytes.extend_from_slice(name);
    bytes.extend_from_slice(compressed);

    // Central directory entry.
    let central_dir_offset = bytes.len() as u32;
    bytes.extend_from_slice(&CENTRAL_DIR_HEADER_SIG.to_le_bytes());
    bytes.extend_from_slice(&VERSION_NEEDED.to_le_bytes()); // version made by
    bytes.extend_from_slice(&VERSION_NEEDED.to_le_bytes()); // version needed
    bytes.extend_from_slice(&0u16.to_le_bytes()); // flags
    bytes.extend_from_slice(&8u16.to_le_bytes()); // method
    bytes.extend_from_slice(&0u16.to_le_bytes()); // mtime
    bytes.extend_from_slice(&0u16.to_le_bytes()); // mdate
    bytes.extend_from_slice(&crc32.to_le_bytes());
    bytes.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&uncompressed_len.to_le_bytes());
    bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes()); // extra field length
    bytes.extend_from_slice(&0u16.to_le_bytes()); // comment length
    bytes.extend_from_slice(&0u16.to_le_bytes()); // disk number start
    bytes.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
    bytes.extend_from_slice(&0u32.to_le_bytes()); // external attributes
    bytes.extend_from_slice(&local_header_offset.to_le_bytes());
    bytes.extend_from_slice(name);

    let central_dir_size = bytes.len() as u32 - central_dir_offset;

    // End of central directory.
    bytes.extend_from_slice(&END_OF_CENTRAL_DIR_SIG.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes()); // disk number
    bytes.extend_from_slice(&0u16.to_le_bytes()); // disk with CD start
    bytes.extend_from_slice(&1u16.to_le_bytes()); // entries on this disk
    bytes.extend_from_slice(&1u16.to_le_bytes()); // total entries
    bytes.extend_from_slice(&central_dir_size.to_le_bytes());
    let central_dir_offset_field = bytes.len();
    bytes.extend_from_slice(&central_dir_offset.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes()); // comment length

    BuiltArchive {
        bytes,
        sidecar: SidecarOffsets {
            crc32: crc32_offset,
            compressed_size: compressed_size_offset,
            uncompressed_size: uncompressed_size_offset,
            central_directory_offset: central_dir_offset_field,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_archive_has_one_of_each_record() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let archive = write_single_entry("hello.txt", b"hello world", &allowed).unwrap();
        assert_eq!(
            u32::from_le_bytes(archive.bytes[0..4].try_into().unwrap()),
            LOCAL_FILE_HEADER_SIG
        );
        assert!(
            archive.bytes[..]
                .windows(4)
                .any(|w| w == CENTRAL_DIR_HEADER_SIG.to_le_bytes())
        );
        assert_eq!(
            &archive.bytes[archive.bytes.len() - 22..archive.bytes.len() - 18],
            &END_OF_CENTRAL_DIR_SIG.to_le_bytes()
        );
    }

    #[test]
    fn sidecar_offsets_point_at_the_right_fields() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let archive = write_single_entry("a.txt", b"payload", &allowed).unwrap();
        let crc_bytes = &archive.bytes[archive.sidecar.crc32..archive.sidecar.crc32 + 4];
        assert_eq!(
            u32::from_le_bytes(crc_bytes.try_into().unwrap()),
            Crc32::compute(b"payload")
        );
        let uncompressed_bytes = &archive.bytes
            [archive.sidecar.uncompressed_size..archive.sidecar.uncompressed_size + 4];
        assert_eq!(
            u32::from_le_bytes(uncompressed_bytes.try_into().unwrap()),
            7
        );
    }
}
