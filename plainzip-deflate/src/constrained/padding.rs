//! The padding block: a fixed, parameter-free dynamic Huffman block whose
//! only purpose is to shift the bit cursor from `0 mod 8` to `6 mod 8`
//! before a type-2 block, which needs that starting alignment to interleave
//! its 8-bit codewords with the block boundary.
//!
//! Every field here is a hardcoded constant — there is no input-dependent
//! branching except the bit-alignment fast path inside `repeat`, which
//! itself only depends on the cursor position reached so far in *this*
//! block, not on caller data.

use plainzip_core::bitsink::BitSink;

/// Append one padding block to `sink`.
pub fn emit_padding_block(sink: &mut BitSink) {
    // Header: not last, dynamic Huffman, HLIT = 8, HDIST = 16, HCLEN = 9.
    sink.write_reversed(0, 1);
    sink.write_reversed(2, 2);
    sink.write_reversed(8, 5);
    sink.write_reversed(16, 5);
    sink.write_reversed(9, 4);

    // Code-length code table, in CODE_LENGTH_ORDER for symbols
    // 16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12.
    for len in [2u32, 5, 0, 4, 3, 0, 6, 4, 4, 4, 4, 6, 2] {
        sink.write_reversed(len, 3);
    }

    repeat(sink, "1010", 197);
    repeat(sink, "1100", 261 - 197);
    repeat(sink, "1010", 265 - 261);

    // Distance code table: 17 zero-length entries.
    repeat(sink, "1010", 17);

    // End of block.
    sink.write_bitstr("111011");
}

/// Run-length encode `n` repeats of the literal/length code-length code
/// `code` (already the CL-alphabet's own canonical bit string). When the
/// run is long enough and lands on a byte boundary, collapse up to 10
/// repeats into a pair of "repeat previous code length" (16) codes instead
/// of writing `code` verbatim `n` times.
fn repeat(sink: &mut BitSink, code: &str, mut n: u32) {
    let mut first = true;
    while n > 0 {
        if n > 6 && !first && sink.alignment() == 0 {
            let x = n.min(10);
            sink.write_bitstr("01"); // Huffman 16
            sink.write_reversed(x - 7, 2);
            sink.write_bitstr("01"); // Huffman 16
            sink.write_reversed(1, 2);
            n -= x;
        } else {
            sink.write_bitstr(code);
            n -= 1;
        }
        first = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_block_ends_at_cursor_six() {
        let mut sink = BitSink::new();
        emit_padding_block(&mut sink);
        assert_eq!(sink.alignment(), 6);
    }

    #[test]
    fn padding_block_is_idempotent_in_shape() {
        let mut a = BitSink::new();
        emit_padding_block(&mut a);
        let mut b = BitSink::new();
        emit_padding_block(&mut b);
        assert_eq!(a.to_bytes(), b.to_bytes());
    }
}
