//! The padding injector (§4.9): splices caller-supplied bytes around a ZIP
//! archive and patches every offset the splice invalidates.
//!
//! Walks the archive's records by signature — local file header
//! (`PK\x03\x04`), optional data descriptor (`PK\x07\x08`), central
//! directory entry (`PK\x01\x02`), end-of-central-directory (`PK\x05\x06`)
//! — recording where each offset-bearing field lives, then rewrites those
//! fields in place before prepending/appending the caller's bytes. An
//! unrecognized signature partway through the walk is a fatal
//! [`PlainZipError::MalformedContainer`], per §7 — this rewriter does not
//! attempt to parse formats it wasn't shown.

use plainzip_core::error::{PlainZipError, Result};

use super::{CENTRAL_DIR_HEADER_SIG, DATA_DESCRIPTOR_SIG, END_OF_CENTRAL_DIR_SIG, LOCAL_FILE_HEADER_SIG};

const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;

/// Prepend `prepend` and append `append` to the ZIP archive `data`,
/// correcting every local-header offset, the central-directory offset, and
/// the end-of-central-directory comment length so the archive still parses.
pub fn inject(data: &[u8], prepend: &[u8], append: &[u8]) -> Result<Vec<u8>> {
    let mut patched = data.to_vec();
    let mut local_header_offset_fields = Vec::new();
    let mut cd_offset_field = None;
    let mut comment_len_field = None;

    let mut pos = 0usize;
    loop {
        let sig = read_u32(&patched, pos)?;
        match sig {
            LOCAL_FILE_HEADER_SIG => {
                pos = skip_local_file_record(&patched, pos)?;
            }
            CENTRAL_DIR_HEADER_SIG => {
                local_header_offset_fields.push(pos + 42);
                pos = skip_central_directory_record(&patched, pos)?;
            }
            END_OF_CENTRAL_DIR_SIG => {
                cd_offset_field = Some(pos + 16);
                comment_len_field = Some(pos + 20);
                break;
            }
            other => {
                return Err(PlainZipError::malformed_container(format!(
                    "unrecognized record signature {other:#010x} at offset {pos}"
                )));
            }
        }
    }

    let prepend_len = prepend.len() as u32;
    for field in local_header_offset_fields {
        add_to_u32_field(&mut patched, field, prepend_len);
    }
    if let Some(field) = cd_offset_field {
        add_to_u32_field(&mut patched, field, prepend_len);
    }
    if let Some(field) = comment_len_field {
        add_to_u16_field(&mut patched, field, append.len() as u16);
    }

    let mut out = Vec::with_capacity(prepend.len() + patched.len() + append.len());
    out.extend_from_slice(prepend);
    out.extend_from_slice(&patched);
    out.extend_from_slice(append);
    Ok(out)
}

fn read_u32(data: &[u8], pos: usize) -> Result<u32> {
    let bytes = data.get(pos..pos + 4).ok_or_else(|| {
        PlainZipError::malformed_container(format!("truncated record at offset {pos}"))
    })?;
    Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
}

fn read_u16(data: &[u8], pos: usize) -> Result<u16> {
    let bytes = data.get(pos..pos + 2).ok_or_else(|| {
        PlainZipError::malformed_container(format!("truncated field at offset {pos}"))
    })?;
    Ok(u16::from_le_bytes(bytes.try_into().unwrap()))
}

fn add_to_u32_field(data: &mut [u8], pos: usize, delta: u32) {
    let value = u32::from_le_bytes(data[pos..pos + 4].try_into().unwrap());
    data[pos..pos + 4].copy_from_slice(&(value + delta).to_le_bytes());
}

fn add_to_u16_field(data: &mut [u8], pos: usize, delta: u16) {
    let value = u16::from_le_bytes(data[pos..pos + 2].try_into().unwrap());
    data[pos..pos + 2].copy_from_slice(&(value + delta).to_le_bytes());
}

/// Advance past one local file header, its compressed data, and its
/// optional trailing data descriptor.
fn skip_local_file_record(data: &[u8], pos: usize) -> Result<usize> {
    if data.len() < pos + 30 {
        return Err(PlainZipError::malformed_container(
            "truncated local file header",
        ));
    }
    let flags = read_u16(data, pos + 6)?;
    let compressed_size = read_u32(data, pos + 18)? as usize;
    let filename_len = read_u16(data, pos + 26)? as usize;
    let extra_len = read_u16(data, pos + 28)? as usize;

    let mut cursor = pos + 30 + filename_len + extra_len + compressed_size;

    if flags & FLAG_DATA_DESCRIPTOR != 0 {
        cursor += if read_u32(data, cursor)? == DATA_DESCRIPTOR_SIG {
            16
        } else {
            12
        };
    }

    Ok(cursor)
}

/// Advance past one central directory entry.
fn skip_central_directory_record(data: &[u8], pos: usize) -> Result<usize> {
    if data.len() < pos + 46 {
        return Err(PlainZipError::malformed_container(
            "truncated central directory entry",
        ));
    }
    let filename_len = read_u16(data, pos + 28)? as usize;
    let extra_len = read_u16(data, pos + 30)? as usize;
    let comment_len = read_u16(data, pos + 32)? as usize;
    Ok(pos + 46 + filename_len + extra_len + comment_len)
}

#[cfg(test)]
mod tests {
    use super::super::reader::{find_end_of_central_directory, read_central_directory};
    use super::super::writer::write_single_entry;
    use super::*;
    use plainzip_deflate::constrained::AllowedAlphabet;

    #[test]
    fn prepend_shifts_every_offset_and_stays_parseable() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let archive = write_single_entry("e.txt", b"entry body", &allowed).unwrap();
        let prepend = b"<html><!--";
        let append = b"--></html>";

        let injected = inject(&archive.bytes, prepend, append).unwrap();

        let eocd = find_end_of_central_directory(&injected).unwrap();
        let entries = read_central_directory(&injected, eocd).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].local_header_offset as usize, prepend.len());

        let local_header_start = entries[0].local_header_offset as usize;
        assert_eq!(
            &injected[local_header_start..local_header_start + 4],
            &LOCAL_FILE_HEADER_SIG.to_le_bytes()
        );
        assert_eq!(&injected[..prepend.len()], prepend);
        assert_eq!(&injected[injected.len() - append.len()..], append);
    }

    #[test]
    fn unrecognized_signature_is_fatal() {
        let mut bytes = vec![0xFFu8, 0xFF, 0xFF, 0xFF];
        bytes.extend_from_slice(&END_OF_CENTRAL_DIR_SIG.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 18]);
        let err = inject(&bytes, b"", b"").unwrap_err();
        assert!(matches!(err, PlainZipError::MalformedContainer { .. }));
    }
}
