//! Minimal ZIP structural reader.
//!
//! Walks just enough of a ZIP's records to support the rewriter (§4.9), the
//! `verify` CLI diagnostic, and to let tests confirm the writer's output is
//! a real, parseable archive — not a general-purpose extraction API. Reads
//! the central directory and locates entry data relative to its local
//! header; decompression itself is `plainzip_deflate::inflate`'s job.

use plainzip_core::error::{PlainZipError, Result};

use super::{CENTRAL_DIR_HEADER_SIG, END_OF_CENTRAL_DIR_SIG};

/// One entry as described by its central directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntryInfo {
    /// Entry filename.
    pub filename: String,
    /// CRC-32 of the uncompressed entry data.
    pub crc32: u32,
    /// Compressed size in bytes.
    pub compressed_size: u32,
    /// Uncompressed size in bytes.
    pub uncompressed_size: u32,
    /// Byte offset of this entry's local file header within the archive.
    pub local_header_offset: u32,
}

/// Locate the end-of-central-directory record and return its offset.
///
/// Scans backward from the end of `data` for the EOCD signature, since the
/// archives this crate produces carry no comment (so the record is always
/// the last 22 bytes) but a rewritten archive may have had a comment
/// appended, shifting it earlier relative to any trailing `append` bytes.
pub fn find_end_of_central_directory(data: &[u8]) -> Result<usize> {
    if data.len() < 22 {
        return Err(PlainZipError::malformed_container(
            "archive shorter than a bare end-of-central-directory record",
        ));
    }
    let sig = END_OF_CENTRAL_DIR_SIG.to_le_bytes();
    for start in (0..=data.len() - 22).rev() {
        if data[start..start + 4] == sig {
            return Ok(start);
        }
    }
    Err(PlainZipError::malformed_container(
        "no end-of-central-directory record found",
    ))
}

/// Parse every central directory entry reachable from the EOCD record at
/// `eocd_offset`.
pub fn read_central_directory(data: &[u8], eocd_offset: usize) -> Result<Vec<ZipEntryInfo>> {
    let eocd = &data[eocd_offset..];
    if eocd.len() < 22 {
        return Err(PlainZipError::malformed_container(
            "truncated end-of-central-directory record",
        ));
    }
    let total_entries = u16::from_le_bytes([eocd[10], eocd[11]]) as usize;
    let central_dir_offset = u32::from_le_bytes([eocd[16], eocd[17], eocd[18], eocd[19]]) as usize;

    let mut entries = Vec::with_capacity(total_entries);
    let mut cursor = central_dir_offset;
    for _ in 0..total_entries {
        let record = data.get(cursor..).ok_or_else(|| {
            PlainZipError::malformed_container("central directory offset out of bounds")
        })?;
        if record.len() < 46 {
            return Err(PlainZipError::malformed_container(
                "truncated central directory entry",
            ));
        }
        let sig = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
        if sig != CENTRAL_DIR_HEADER_SIG {
            return Err(PlainZipError::malformed_container(format!(
                "unrecognized record signature {sig:#010x} in central directory"
            )));
        }
        let crc32 = u32::from_le_bytes([record[16], record[17], record[18], record[19]]);
        let compressed_size = u32::from_le_bytes([record[20], record[21], record[22], record[23]]);
        let uncompressed_size =
            u32::from_le_bytes([record[24], record[25], record[26], record[27]]);
        let filename_len = u16::from_le_bytes([record[28], record[29]]) as usize;
        let extra_len = u16::from_le_bytes([record[30], record[31]]) as usize;
        let comment_len = u16::from_le_bytes([record[32], record[33]]) as usize;
        let local_header_offset =
            u32::from_le_bytes([record[42], record[43], record[44], record[45]]);
        let filename = String::from_utf8_lossy(&record[46..46 + filename_len]).into_owned();

        entries.push(ZipEntryInfo {
            filename,
            crc32,
            compressed_size,
            uncompressed_size,
            local_header_offset,
        });

        cursor += 46 + filename_len + extra_len + comment_len;
    }

    Ok(entries)
}

/// Locate `entry`'s compressed stream within `data`, via its local file
/// header, per the fixed layout in §6 (30-byte header + filename + extra +
/// compressed bytes).
pub fn entry_compressed_bytes<'a>(data: &'a [u8], entry: &ZipEntryInfo) -> Result<&'a [u8]> {
    let header = data
        .get(entry.local_header_offset as usize..)
        .ok_or_else(|| PlainZipError::malformed_container("local header offset out of bounds"))?;
    if header.len() < 30 {
        return Err(PlainZipError::malformed_container(
            "truncated local file header",
        ));
    }
    let filename_len = u16::from_le_bytes([header[26], header[27]]) as usize;
    let extra_len = u16::from_le_bytes([header[28], header[29]]) as usize;
    let data_start = 30 + filename_len + extra_len;
    let data_end = data_start + entry.compressed_size as usize;
    header.get(data_start..data_end).ok_or_else(|| {
        PlainZipError::malformed_container("local file header's compressed region out of bounds")
    })
}

#[cfg(test)]
mod tests {
    use super::super::writer::write_single_entry;
    use super::*;
    use plainzip_deflate::constrained::AllowedAlphabet;

    #[test]
    fn round_trips_the_writer_output() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let archive = write_single_entry("greeting.txt", b"hello, archive", &allowed).unwrap();
        let eocd = find_end_of_central_directory(&archive.bytes).unwrap();
        let entries = read_central_directory(&archive.bytes, eocd).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "greeting.txt");
        assert_eq!(entries[0].uncompressed_size, 14);
        assert_eq!(entries[0].local_header_offset, 0);
    }
}
