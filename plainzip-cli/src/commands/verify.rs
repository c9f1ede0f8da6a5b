//! `plainzip verify`: the diagnostic of §6 — extract the single entry via
//! the standard inflater and report round-trip and alphabet status. Not
//! part of the core pack/inject pipeline; a tool for inspecting an archive
//! that was (or claims to have been) produced by `plainzip pack`.

use std::path::Path;

use plainzip_core::crc::Crc32;
use plainzip_core::error::{PlainZipError, Result};
use plainzip_deflate::inflate;

use crate::alphabet::from_excluded_str;

/// Read the ZIP at `input`, inflate its single entry, and report whether
/// the decompressed bytes match the recorded CRC-32/length and whether
/// every byte of the archive lies in the alphabet described by `exclude`.
pub fn cmd_verify(input: &Path, exclude: &str) -> Result<()> {
    let data = std::fs::read(input)?;
    let allowed = from_excluded_str(exclude);

    let eocd = plainzip_archive::find_end_of_central_directory(&data)?;
    let entries = plainzip_archive::read_central_directory(&data, eocd)?;
    let entry = entries
        .first()
        .ok_or_else(|| PlainZipError::malformed_container("archive has no entries"))?;

    let compressed = plainzip_archive::entry_compressed_bytes(&data, entry)?;
    let decompressed = inflate(compressed)?;

    let round_trips =
        decompressed.len() as u32 == entry.uncompressed_size && Crc32::compute(&decompressed) == entry.crc32;
    let alphabet_clean = data.iter().all(|&b| allowed.contains(b));

    println!("entry: {}", entry.filename);
    println!(
        "round-trip: {} (decompressed {} bytes, recorded {} bytes, CRC32 {:#010x} vs recorded {:#010x})",
        if round_trips { "OK" } else { "FAILED" },
        decompressed.len(),
        entry.uncompressed_size,
        Crc32::compute(&decompressed),
        entry.crc32
    );
    println!(
        "alphabet: {} (every byte of the archive checked against the given alphabet)",
        if alphabet_clean { "OK" } else { "FAILED" }
    );

    Ok(())
}
