//! Type-1 Huffman codebook synthesis.
//!
//! Used for chunks where every literal byte is emitted as a raw, byte-
//! aligned 8-bit codeword. The block is only usable when the bit cursor
//! is `0 mod 8` at the start of the block's data payload — which the
//! emitter's header encoding (`emitter::emit_type1`) guarantees.
//!
//! Every codeword the emitter writes is a genuine canonical Huffman code,
//! transmitted MSB-first per RFC 1951 (`BitSink::write`). Packing an
//! 8-bit value MSB-first at a byte boundary produces the bit-reversal of
//! that value as the output byte, so a codeword only lands on an allowed
//! byte `y` if the codeword's *integer value* is `bit_reverse_8(y)`. The
//! candidate pool is therefore drawn from the bit-reversed alphabet, not
//! the alphabet itself — mirroring the reference encoder's
//! `int(binary(x, 8), 2)` trick, which performs the same reversal via
//! string round-tripping.

use super::alphabet::AllowedAlphabet;
use std::collections::BTreeMap;

/// Codewords below this value are reserved for control structure (the
/// code-length code and the early part of the literal/length table).
pub(crate) const FIRST_VALID_8BIT_CODE: u32 = 0b0001_1100;

/// Reverse the 8 bits of `value`.
pub(crate) fn reverse_bits8(value: u8) -> u8 {
    value.reverse_bits()
}

/// Fixed codeword assigned to the end-of-block symbol (256).
pub const END_OF_BLOCK_CODE: u32 = 0b0000_11;
/// Bit length of the end-of-block codeword.
pub const END_OF_BLOCK_LEN: u8 = 6;

/// A synthesized codebook for one type-1 chunk.
#[derive(Debug, Clone)]
pub struct HuffmanPlan1 {
    /// Code-length vector for literal/length symbols `0..len()`, 0 meaning unused.
    pub code_lengths: Vec<u8>,
    /// Assigned 8-bit codeword (MSB-first integer) for each distinct literal byte.
    pub symbols: BTreeMap<u8, u32>,
}

/// Attempt to synthesize a type-1 plan for `chunk` under `allowed`.
///
/// Returns `None` if no assignment of codewords to `chunk`'s distinct
/// bytes satisfies the canonical-Huffman monotone-gap constraint, or if
/// the resulting code-length vector fails the Kraft-sum closure check.
pub fn generate(chunk: &[u8], allowed: &AllowedAlphabet) -> Option<HuffmanPlan1> {
    let mut valid_codes: Vec<u32> = allowed
        .iter()
        .map(|b| u32::from(reverse_bits8(b)))
        .filter(|&c| c >= FIRST_VALID_8BIT_CODE)
        .collect();
    valid_codes.sort_unstable();

    let mut distinct_bytes: Vec<u8> = chunk.to_vec();
    distinct_bytes.sort_unstable();
    distinct_bytes.dedup();

    let symbol_seq: Vec<i32> = std::iter::once(-1)
        .chain(distinct_bytes.iter().map(|&b| i32::from(b)))
        .collect();

    let assigned = assign_codes(&symbol_seq, vec![FIRST_VALID_8BIT_CODE - 1], &valid_codes)?;
    let assigned_codes = &assigned[1..];

    let symbols: BTreeMap<u8, u32> = distinct_bytes
        .iter()
        .zip(assigned_codes.iter())
        .map(|(&b, &c)| (b, c))
        .collect();

    let code_lengths = build_code_lengths(&distinct_bytes, assigned_codes)?;

    Some(HuffmanPlan1 {
        code_lengths,
        symbols,
    })
}

/// Depth-first search assigning each symbol in `symbols[1..]` (`symbols[0]`
/// is a `-1` sentinel matching the first entry of `codes`) the largest
/// reachable codeword from `valid` that keeps canonical-Huffman's
/// monotone symbol-rank-to-code-value relationship intact.
fn assign_codes(symbols: &[i32], codes: Vec<u32>, valid: &[u32]) -> Option<Vec<u32>> {
    if symbols.len() == codes.len() {
        return Some(codes);
    }

    let prev_code = *codes.last().expect("codes always has a sentinel entry");
    let prev_symbol = symbols[codes.len() - 1];
    let symbol = symbols[codes.len()];

    let max_code = i64::from(prev_code) + (i64::from(symbol) - i64::from(prev_symbol));
    let reachable: Vec<u32> = valid
        .iter()
        .copied()
        .filter(|&c| i64::from(c) <= max_code)
        .collect();

    for &chosen in reachable.iter().rev() {
        let mut next_codes = codes.clone();
        next_codes.push(chosen);
        let next_valid: Vec<u32> = valid.iter().copied().filter(|&c| c > chosen).collect();
        if let Some(result) = assign_codes(symbols, next_codes, &next_valid) {
            return Some(result);
        }
    }

    None
}

fn build_code_lengths(distinct_bytes: &[u8], assigned_codes: &[u32]) -> Option<Vec<u8>> {
    let mut remaining_bytes: Vec<u8> = distinct_bytes.to_vec();
    let mut remaining_codes: Vec<u32> = assigned_codes.to_vec();

    let mut needed_6: i32 = 3;
    let mut needed_8: i32 = assigned_codes
        .first()
        .map(|&c| c as i32 - FIRST_VALID_8BIT_CODE as i32)
        .unwrap_or(0);

    let mut code_lengths: Vec<u8> = Vec::new();

    while code_lengths.len() < 257 || needed_6 != 0 || needed_8 != 0 {
        if !remaining_bytes.is_empty() && code_lengths.len() == remaining_bytes[0] as usize {
            debug_assert_eq!(needed_8, 0);
            code_lengths.push(8);
            let this_code = remaining_codes.remove(0);
            remaining_bytes.remove(0);
            needed_8 = if let Some(&next) = remaining_codes.first() {
                next as i32 - this_code as i32 - 1
            } else {
                228 - code_lengths.iter().filter(|&&l| l == 8).count() as i32
            };
        } else if code_lengths.len() == 256 {
            if needed_6 > 0 {
                return None;
            }
            code_lengths.push(6);
            needed_6 = 3;
        } else if needed_8 > 0 {
            code_lengths.push(8);
            needed_8 -= 1;
        } else if needed_6 > 0 {
            code_lengths.push(6);
            needed_6 -= 1;
        } else {
            code_lengths.push(0);
        }
    }

    let count_6 = code_lengths.iter().filter(|&&l| l == 6).count() as i64;
    let count_8 = code_lengths.iter().filter(|&&l| l == 8).count() as i64;
    debug_assert_eq!((64 - count_6) * 4 - count_8, 0);

    Some(code_lengths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_chunk_generates_a_plan() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let plan = generate(b"A", &allowed).expect("single-byte chunk must synthesize");
        assert_eq!(plan.symbols.len(), 1);
        assert!(plan.symbols.contains_key(&b'A'));
    }

    #[test]
    fn kraft_sum_holds() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let plan = generate(b"Hello, World!", &allowed).unwrap();
        let count_6 = plan.code_lengths.iter().filter(|&&l| l == 6).count() as i64;
        let count_8 = plan.code_lengths.iter().filter(|&&l| l == 8).count() as i64;
        assert_eq!((64 - count_6) * 4 - count_8, 0);
    }

    #[test]
    fn assigned_codewords_reverse_onto_the_allowed_alphabet() {
        let allowed = AllowedAlphabet::ascii_printable_excluding(b"&<'>\"()");
        let plan = generate(b"mississippi", &allowed).unwrap();
        for &code in plan.symbols.values() {
            assert!(allowed.contains(reverse_bits8(code as u8)));
        }
    }

    #[test]
    fn singleton_alphabet_fails_to_synthesize() {
        let allowed = AllowedAlphabet::from_bytes([0x41]);
        assert!(generate(b"A", &allowed).is_none());
    }
}
