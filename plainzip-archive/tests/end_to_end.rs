//! End-to-end archive scenarios (spec §8, scenario 6): build a single-entry
//! ZIP whose every byte is alphabet-clean, then confirm it parses back via
//! this crate's own reader and that the constrained stream inflates to the
//! original payload.

use plainzip_archive::{find_allowed_padding, inject};
use plainzip_archive::zip::reader::{find_end_of_central_directory, read_central_directory};
use plainzip_deflate::constrained::AllowedAlphabet;
use plainzip_deflate::inflate;

fn shell_html_safe_alphabet() -> AllowedAlphabet {
    AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()")
}

#[test]
fn class_file_payload_round_trips_through_a_padded_archive() {
    let allowed = shell_html_safe_alphabet();

    // A tiny stand-in for a compiled Java class file: arbitrary bytes,
    // not themselves constrained to the allowed alphabet.
    let mut class_bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34];
    class_bytes.extend_from_slice(b"Exploit");
    class_bytes.extend((0u8..64).collect::<Vec<u8>>());

    let archive = find_allowed_padding(
        "Exploit.class",
        &allowed,
        plainzip_archive::DEFAULT_ATTEMPT_CEILING,
        |n| {
            let mut payload = class_bytes.clone();
            payload.extend(std::iter::repeat_n(0u8, n as usize));
            payload
        },
    )
    .expect("padding search should find a working length for a permissive alphabet");

    for &byte in &archive.bytes {
        assert!(allowed.contains(byte), "byte {byte:#04x} outside alphabet");
    }

    let eocd = find_end_of_central_directory(&archive.bytes).unwrap();
    let entries = read_central_directory(&archive.bytes, eocd).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].filename, "Exploit.class");

    let local_header = &archive.bytes[entries[0].local_header_offset as usize..];
    let filename_len = u16::from_le_bytes([local_header[26], local_header[27]]) as usize;
    let extra_len = u16::from_le_bytes([local_header[28], local_header[29]]) as usize;
    let data_start = 30 + filename_len + extra_len;
    let compressed = &local_header[data_start..data_start + entries[0].compressed_size as usize];

    let decompressed = inflate(compressed).unwrap();
    assert_eq!(decompressed.len(), entries[0].uncompressed_size as usize);
    assert!(decompressed.starts_with(&[0xCA, 0xFE, 0xBA, 0xBE]));
}

#[test]
fn injected_prefix_and_suffix_keep_the_archive_parseable() {
    let allowed = shell_html_safe_alphabet();
    let archive = plainzip_archive::write_single_entry("note.txt", b"hello", &allowed).unwrap();

    let prepend = b"#!/bin/sh\nexit 0\n";
    let append = b"\nEOF\n";
    let injected = inject(&archive.bytes, prepend, append).unwrap();

    assert_eq!(&injected[..prepend.len()], prepend);
    assert_eq!(&injected[injected.len() - append.len()..], append);

    let eocd = find_end_of_central_directory(&injected).unwrap();
    let entries = read_central_directory(&injected, eocd).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].local_header_offset as usize, prepend.len());
}
