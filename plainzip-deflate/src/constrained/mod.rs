//! The constrained DEFLATE encoder.
//!
//! Synthesizes a dynamic-Huffman DEFLATE bitstream (RFC 1951) every byte of
//! which is drawn from a caller-supplied [`AllowedAlphabet`]. See the crate
//! root for the round-trip contract; this module is the implementation.
//!
//! Submodules, leaves first:
//! - [`alphabet`] — the allowed-byte-value table.
//! - [`huffman1`] / [`huffman2`] — the two codebook synthesizers (§4.2, §4.3).
//! - [`emitter`] — serializes a synthesized codebook into a DEFLATE block.
//! - [`padding`] — the fixed cursor-alignment block consumed between a
//!   type-2 block and its predecessor.
//! - [`planner`] — chunks the input and drives the above in sequence.

pub mod alphabet;
pub mod emitter;
pub mod huffman1;
pub mod huffman2;
pub mod padding;
pub mod planner;

pub use alphabet::AllowedAlphabet;

use plainzip_core::bitsink::BitSink;
use plainzip_core::error::{PlainZipError, Result};

/// Encode `payload` as a DEFLATE stream whose every byte lies in `allowed`.
///
/// Fails with [`PlainZipError::AlphabetPreconditionViolated`] if `allowed`
/// cannot even host the encoder's fixed structural constants (the padding
/// block's hard-coded header tables), and with
/// [`PlainZipError::UnencodableInput`] if the chunk planner cannot express
/// `payload` itself under `allowed` — which can happen even when the
/// precondition holds, e.g. an alphabet admitting too few 8-bit codewords
/// for some byte actually present in `payload`.
pub fn encode(payload: &[u8], allowed: &AllowedAlphabet) -> Result<Vec<u8>> {
    check_alphabet_precondition(allowed)?;

    planner::encode(payload, allowed).ok_or_else(|| {
        PlainZipError::unencodable(
            "no combination of chunking and type-1/type-2 codebooks expresses this payload \
             under the given allowed alphabet",
        )
    })
}

/// Verify the encoder's input-independent structural constants all land in
/// `allowed`. The padding block (§4.6) is the only piece of the encoder
/// with no data-dependent branching at all, so it stands in for "the fixed
/// header tables" as a whole: if `allowed` can't host it, it can't host the
/// type-1/type-2 header tables either, since all three are built from the
/// same family of fixed code-length assignments.
fn check_alphabet_precondition(allowed: &AllowedAlphabet) -> Result<()> {
    if allowed.is_empty() {
        return Err(PlainZipError::alphabet_precondition(
            "allowed alphabet is empty",
        ));
    }

    let mut sink = BitSink::new();
    padding::emit_padding_block(&mut sink);
    let padding_bytes = sink.to_bytes();
    if let Some(&bad) = padding_bytes.iter().find(|&&b| !allowed.contains(b)) {
        return Err(PlainZipError::alphabet_precondition(format!(
            "fixed header tables would emit byte {bad:#04x}, which is not in the allowed alphabet"
        )));
    }

    Ok(())
}
