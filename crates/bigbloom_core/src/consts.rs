// crates/bigbloom_core/src/consts.rs

/// Largest capacity a single page may have: the maximum size a
/// 32-bit-indexed bit vector can address (2^31 - 1 bits).
pub const PAGE_MAX_BITS: u64 = i32::MAX as u64;

/// Bits per packed storage word.
pub const WORD_BITS: u64 = 64;

const _: () = { assert!(PAGE_MAX_BITS == 2147483647); };
