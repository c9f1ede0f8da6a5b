//! Error types for plainzip operations.
//!
//! This module provides a comprehensive error type that covers all possible
//! error conditions across the bitstream, DEFLATE, and ZIP container layers.

use std::io;
use thiserror::Error;

/// The main error type for plainzip operations.
#[derive(Debug, Error)]
pub enum PlainZipError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in a container header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Unsupported compression method.
    #[error("Unsupported compression method: {method}")]
    UnsupportedMethod {
        /// The compression method identifier.
        method: String,
    },

    /// CRC checksum mismatch.
    #[error("CRC mismatch: expected {expected:#x}, computed {computed:#x}")]
    CrcMismatch {
        /// Expected CRC value from archive.
        expected: u32,
        /// Computed CRC value from data.
        computed: u32,
    },

    /// Invalid Huffman code encountered during decompression.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Corrupted data in archive.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Unexpected end of file.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Invalid distance in a LZ77 back-reference.
    #[error("Invalid back-reference distance: {distance} exceeds history size {history_size}")]
    InvalidDistance {
        /// The invalid distance value.
        distance: usize,
        /// Current history buffer size.
        history_size: usize,
    },

    /// Entry not found in archive.
    #[error("Entry not found: {name}")]
    EntryNotFound {
        /// Name of the missing entry.
        name: String,
    },

    /// The allowed output alphabet is too restrictive to ever synthesize a
    /// valid Huffman codebook (violates a documented precondition of the
    /// constrained encoder, e.g. too few allowed byte values).
    #[error("Allowed alphabet precondition violated: {message}")]
    AlphabetPreconditionViolated {
        /// Description of which precondition failed.
        message: String,
    },

    /// No combination of chunking, padding, and type-1/type-2 codebooks
    /// could express the input within the allowed output alphabet.
    #[error("Input cannot be encoded within the allowed byte alphabet: {reason}")]
    UnencodableInput {
        /// Description of why encoding failed.
        reason: String,
    },

    /// A ZIP container (or the rewriter's record stream within one) does
    /// not have the shape this narrow single-entry reader/writer expects.
    #[error("Malformed ZIP container: {message}")]
    MalformedContainer {
        /// Description of the structural problem.
        message: String,
    },

    /// The padding-search driver exhausted its attempt budget without
    /// finding a padding length that makes every sidecar field allowed.
    #[error("Padding search exhausted after {attempts} attempts")]
    PaddingSearchExhausted {
        /// Number of padding lengths tried.
        attempts: u64,
    },
}

/// Result type alias for plainzip operations.
pub type Result<T> = std::result::Result<T, PlainZipError>;

impl PlainZipError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, history_size: usize) -> Self {
        Self::InvalidDistance {
            distance,
            history_size,
        }
    }

    /// Create an entry not found error.
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound { name: name.into() }
    }

    /// Create an alphabet precondition violation error.
    pub fn alphabet_precondition(message: impl Into<String>) -> Self {
        Self::AlphabetPreconditionViolated {
            message: message.into(),
        }
    }

    /// Create an unencodable input error.
    pub fn unencodable(reason: impl Into<String>) -> Self {
        Self::UnencodableInput {
            reason: reason.into(),
        }
    }

    /// Create a malformed container error.
    pub fn malformed_container(message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            message: message.into(),
        }
    }

    /// Create a padding search exhausted error.
    pub fn padding_search_exhausted(attempts: u64) -> Self {
        Self::PaddingSearchExhausted { attempts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlainZipError::invalid_magic(vec![0x50, 0x4B], vec![0x1F, 0x8B]);
        assert!(err.to_string().contains("Invalid magic"));

        let err = PlainZipError::crc_mismatch(0x12345678, 0xDEADBEEF);
        assert!(err.to_string().contains("CRC mismatch"));

        let err = PlainZipError::unsupported_method("lzma");
        assert!(err.to_string().contains("lzma"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PlainZipError = io_err.into();
        assert!(matches!(err, PlainZipError::Io(_)));
    }
}
