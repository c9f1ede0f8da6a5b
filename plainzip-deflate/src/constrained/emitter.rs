//! Serializes a synthesized codebook (`HuffmanPlan1`/`HuffmanPlan2`) and its
//! chunk of literal bytes into a complete dynamic Huffman DEFLATE block.
//!
//! The code-length code table, its own code-length-code lengths, and the
//! bogus (all-zero-length, reused-from-literal-table) distance table are
//! all fixed constants — only the run-length encoding of the literal/length
//! code-length vector and the final data codewords depend on the chunk.

use super::huffman1::{self, HuffmanPlan1};
use super::huffman2::{self, HuffmanPlan2};
use plainzip_core::bitsink::BitSink;

/// Append one type-1 (byte-aligned codeword) block for `chunk` to `sink`.
///
/// `sink` must be byte-aligned (`cursor() % 8 == 0`) before this call.
pub fn emit_type1(sink: &mut BitSink, chunk: &[u8], plan: &HuffmanPlan1, is_last: bool) {
    sink.write_reversed(is_last as u32, 1);
    sink.write_reversed(2, 2);
    sink.write_reversed(plan.code_lengths.len() as u32 - 257, 5);
    sink.write_reversed(25, 5);
    sink.write_reversed(9, 4);

    for len in [2u32, 4, 3, 4, 4, 5, 4, 4, 4, 0, 3, 5, 4] {
        sink.write_reversed(len, 3);
    }

    let code_values = |value: u8| -> &'static str {
        match value {
            0 => "1000",
            6 => "1001",
            8 => "1010",
            other => unreachable!("type-1 code lengths are only ever 0, 6, or 8, got {other}"),
        }
    };
    for (value, count) in runs(&plan.code_lengths) {
        repeat_chunk_style(sink, code_values(value), count);
    }

    if sink.alignment() == 2 {
        sink.write_bitstr("011");
        sink.write_reversed(11, 7);
        sink.write_bitstr("00");
        sink.write_reversed(1, 2);
    } else {
        sink.write_bitstr("1000");
        sink.write_bitstr("011");
        sink.write_reversed(10, 7);
        sink.write_bitstr("00");
        sink.write_reversed(1, 2);
    }

    for &byte in chunk {
        let symbol = *plan
            .symbols
            .get(&byte)
            .expect("chunk bytes all have an assigned codeword");
        sink.write(symbol, 8);
    }
    sink.write(huffman1::END_OF_BLOCK_CODE, huffman1::END_OF_BLOCK_LEN);
}

/// Append one type-2 (6-bit-aligned codeword) block for `chunk` to `sink`.
///
/// `sink` must be at alignment 6 (`cursor() % 8 == 6`) before this call,
/// which a preceding padding block guarantees.
pub fn emit_type2(sink: &mut BitSink, chunk: &[u8], plan: &HuffmanPlan2, is_last: bool) {
    sink.write_reversed(is_last as u32, 1);
    sink.write_reversed(2, 2);
    sink.write_reversed(plan.code_lengths.len() as u32 - 257, 5);
    sink.write_reversed(5, 5);
    sink.write_reversed(13, 4);

    for len in [
        2u32, 5, 3, 4, 4, 5, 4, 4, 4, 0, 3, 5, 0, 5, 0, 4, 0,
    ] {
        sink.write_reversed(len, 3);
    }

    let code_values = |value: u8| -> &'static str {
        match value {
            0 => "1000",
            2 => "1001",
            6 => "1010",
            8 => "1011",
            other => unreachable!("type-2 code lengths are only ever 0, 2, 6, or 8, got {other}"),
        }
    };
    for (value, count) in runs(&plan.code_lengths) {
        repeat_chunk_style(sink, code_values(value), count);
    }

    if sink.alignment() == 2 {
        sink.write_bitstr("1000");
        sink.write_bitstr("1000");
        sink.write_bitstr("00");
        sink.write_reversed(1, 2);
    } else {
        sink.write_bitstr("1001");
        sink.write_bitstr("00");
        sink.write_reversed(0, 2);
        sink.write_bitstr("1000");
        sink.write_bitstr("1000");
    }

    for &byte in chunk {
        let symbol = *plan
            .symbols
            .get(&byte)
            .expect("chunk bytes all have an assigned codeword");
        sink.write(symbol, 8);
    }
    sink.write(huffman2::END_OF_BLOCK_CODE, huffman2::END_OF_BLOCK_LEN);
}

/// Group a slice into `(value, run length)` pairs over maximal runs of
/// equal adjacent values.
fn runs(values: &[u8]) -> Vec<(u8, u32)> {
    let mut out: Vec<(u8, u32)> = Vec::new();
    for &v in values {
        match out.last_mut() {
            Some((last_value, count)) if *last_value == v => *count += 1,
            _ => out.push((v, 1)),
        }
    }
    out
}

/// Run-length encode `n` repeats of the literal/length code-length code
/// `code` used by the code-length-code table itself. When the run is long
/// enough and the bit cursor lands at alignment 2, collapse runs of 6 into
/// a single "repeat previous code length 6x" (16, extra bits fixed at 3)
/// Huffman code instead of emitting `code` six times over.
fn repeat_chunk_style(sink: &mut BitSink, code: &str, mut n: u32) {
    let mut first = true;
    while n > 0 {
        if n > 6 && !first && sink.alignment() == 2 {
            let x = n / 6;
            for _ in 0..x {
                sink.write_bitstr("00"); // Huffman 16
                sink.write_reversed(3, 2); // repeat previous 6x
            }
            n -= x * 6;
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
    use crate::constrained::alphabet::AllowedAlphabet;

    #[test]
    fn runs_groups_adjacent_equal_values() {
        assert_eq!(
            runs(&[0, 0, 6, 6, 6, 8]),
            vec![(0, 2), (6, 3), (8, 1)]
        );
        assert_eq!(runs(&[]), Vec::<(u8, u32)>::new());
    }

    #[test]
    fn type1_block_ends_byte_aligned() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let plan = huffman1::generate(b"Hello, World!", &allowed).unwrap();
        let mut sink = BitSink::new();
        emit_type1(&mut sink, b"Hello, World!", &plan, true);
        assert_eq!(sink.alignment(), 0);
    }

    #[test]
    fn type1_block_emits_only_allowed_bytes_for_data_region() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let plan = huffman1::generate(b"mississippi", &allowed).unwrap();
        for &code in plan.symbols.values() {
            assert!(allowed.contains(huffman1::reverse_bits8(code as u8)));
        }
        let mut sink = BitSink::new();
        emit_type1(&mut sink, b"mississippi", &plan, false);
        assert_eq!(sink.alignment(), 0);
    }
}
