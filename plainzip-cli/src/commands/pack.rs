//! `plainzip pack`: wraps §4.8's padding-search driver for files on disk.

use std::path::Path;

use plainzip_core::error::Result;

use crate::alphabet::from_excluded_str;

/// Padding byte appended to the payload by the search loop, one copy per
/// attempt. A space keeps the padded payload itself byte-valid text for
/// payloads that are already text, while having no effect on binary ones.
const PAD_BYTE: u8 = b' ';

/// Read `input`, pad and constrained-compress it until the resulting
/// archive's sidecar fields are alphabet-clean, and write it to `output`.
pub fn cmd_pack(
    input: &Path,
    output: &Path,
    entry_name: &str,
    exclude: &str,
    max_attempts: u64,
) -> Result<()> {
    let payload = std::fs::read(input)?;
    let allowed = from_excluded_str(exclude);

    let archive = plainzip_archive::find_allowed_padding(entry_name, &allowed, max_attempts, |n| {
        let mut padded = payload.clone();
        padded.extend(std::iter::repeat_n(PAD_BYTE, n as usize));
        padded
    })?;

    std::fs::write(output, &archive.bytes)?;
    println!(
        "wrote {} ({} bytes, every byte in the allowed alphabet)",
        output.display(),
        archive.bytes.len()
    );
    Ok(())
}
