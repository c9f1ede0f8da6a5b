//! Chunk planner.
//!
//! Splits the input into maximal chunks and decides, per chunk, whether to
//! synthesize a type-1 or type-2 codebook for it. The planner never inspects
//! the bitstream itself beyond its cursor — all the alphabet-specific
//! reasoning lives in `huffman1`/`huffman2`.

use super::alphabet::AllowedAlphabet;
use super::huffman1::{self, HuffmanPlan1};
use super::huffman2::{HuffmanPlan2, Type2Cache};
use super::{emitter, padding};
use plainzip_core::bitsink::BitSink;

/// Upper bound on the number of distinct bytes the initial expansion phase
/// will tolerate in a candidate chunk (synthesizer search is exponential in
/// this).
const MAX_DISTINCT_BYTES: usize = 51;

/// Bytes at or above this value can never appear in a type-2 candidate's
/// initial expansion window — type-2 codewords are drawn from a narrower
/// range than type-1's, so a byte this large would never be assignable.
const MAX_EXPANSION_BYTE: u8 = 216;

/// One planned block: a chunk of input bytes and the codebook chosen for it.
enum PlannedBlock<'a> {
    Type1 {
        chunk: &'a [u8],
        plan: HuffmanPlan1,
    },
    Type2 {
        chunk: &'a [u8],
        plan: HuffmanPlan2,
    },
}

/// Whether a planned block was type-1 or type-2, tracked across loop
/// iterations to decide when a padding block is owed (§4.4 step 4).
#[derive(PartialEq, Eq)]
enum BlockKind {
    Type1,
    Type2,
}

/// Walk `data` end to end, appending one dynamic Huffman block per planned
/// chunk, prepending a padding block whenever the *previous* block was
/// type-2 — including before the very first block, which is treated as if
/// preceded by one.
///
/// Returns `None` as soon as any suffix of `data` cannot be expressed as a
/// single chunk under `allowed` — including the trivial one-byte chunk,
/// which is the final fallback both `plan_chunk` and its caller attempt.
pub fn encode(data: &[u8], allowed: &AllowedAlphabet) -> Option<Vec<u8>> {
    let mut sink = BitSink::new();
    let mut cache = Type2Cache::new();
    let mut remaining = data;

    // A chunk with zero distinct bytes can never close the Kraft sum under
    // either synthesizer (the fixed trailer counts assume at least one real
    // 8-length literal to carry the rest of the code space), so an entirely
    // empty payload has no type-1/type-2 shaped block to emit.
    if remaining.is_empty() {
        return None;
    }

    // The reference treats the start of the stream as if the previous block
    // were type-2, so the first block is always preceded by a padding block.
    let mut previous_block_type = BlockKind::Type2;

    while !remaining.is_empty() {
        let block = plan_chunk(remaining, allowed, &mut cache)?;
        let (consumed, is_last) = match &block {
            PlannedBlock::Type1 { chunk, .. } => (chunk.len(), chunk.len() == remaining.len()),
            PlannedBlock::Type2 { chunk, .. } => (chunk.len(), chunk.len() == remaining.len()),
        };

        if previous_block_type == BlockKind::Type2 {
            padding::emit_padding_block(&mut sink);
        }

        match block {
            PlannedBlock::Type1 { chunk, plan } => {
                emitter::emit_type1(&mut sink, chunk, &plan, is_last);
                previous_block_type = BlockKind::Type1;
            }
            PlannedBlock::Type2 { chunk, plan } => {
                emitter::emit_type2(&mut sink, chunk, &plan, is_last);
                previous_block_type = BlockKind::Type2;
            }
        }

        remaining = &remaining[consumed..];
    }

    Some(sink.to_bytes())
}

/// Choose the next chunk out of `data` and the codebook for it, per §4.4:
///
/// 1. Expand a candidate cursor greedily while the distinct-byte and
///    byte-value ceilings that bound type-2 candidacy hold.
/// 2. Shrink it until the type-2 synthesizer accepts, or fall back to a
///    single-byte type-1 chunk if type-2 never does.
/// 3. If type-2 succeeded, try extending the chunk further under type-1,
///    which has looser candidacy constraints — a longer type-1 chunk always
///    beats a shorter type-2 one.
fn plan_chunk<'a>(
    data: &'a [u8],
    allowed: &AllowedAlphabet,
    cache: &mut Type2Cache,
) -> Option<PlannedBlock<'a>> {
    let mut cursor = 1usize;
    let mut seen = DistinctByteSet::new();
    seen.insert(data[0]);
    let mut under_limits = data[0] < MAX_EXPANSION_BYTE;

    while under_limits && seen.len() < MAX_DISTINCT_BYTES && cursor < data.len() {
        let next = data[cursor];
        seen.insert(next);
        under_limits = next < MAX_EXPANSION_BYTE;
        cursor += 1;
    }
    if cursor < data.len() && (!under_limits || seen.len() >= MAX_DISTINCT_BYTES) {
        cursor -= 1;
    }
    cursor = cursor.max(1);

    let mut type2_plan = None;
    while cursor > 0 {
        if let Some(plan) = cache.generate(&data[..cursor], allowed) {
            type2_plan = Some(plan);
            break;
        }
        cursor -= 1;
    }

    let Some(plan2) = type2_plan else {
        let plan1 = huffman1::generate(&data[..1], allowed)?;
        return Some(PlannedBlock::Type1 {
            chunk: &data[..1],
            plan: plan1,
        });
    };

    let mut best_len = cursor;
    let mut best_type1: Option<HuffmanPlan1> = None;
    let mut probe_len = cursor + 1;
    while probe_len <= data.len() {
        match huffman1::generate(&data[..probe_len], allowed) {
            Some(plan) => {
                best_len = probe_len;
                best_type1 = Some(plan);
                probe_len += 1;
            }
            None => break,
        }
    }

    if let Some(plan1) = best_type1 {
        Some(PlannedBlock::Type1 {
            chunk: &data[..best_len],
            plan: plan1,
        })
    } else {
        Some(PlannedBlock::Type2 {
            chunk: &data[..cursor],
            plan: plan2,
        })
    }
}

/// A minimal fixed-capacity set over `0..=255`, used by the planner's
/// expansion phase to count distinct bytes seen so far without the
/// allocation overhead of a `HashSet` for what is, at most, a 256-entry table.
struct DistinctByteSet {
    seen: [bool; 256],
    count: usize,
}

impl DistinctByteSet {
    fn new() -> Self {
        Self {
            seen: [false; 256],
            count: 0,
        }
    }

    fn insert(&mut self, byte: u8) {
        if !self.seen[byte as usize] {
            self.seen[byte as usize] = true;
            self.count += 1;
        }
    }

    fn len(&self) -> usize {
        self.count
    }
}
