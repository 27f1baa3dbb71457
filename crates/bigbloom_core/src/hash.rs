//! Salted-digest index derivation.
//!
//! One digest invocation rarely yields enough material for k bit positions,
//! so the input is re-digested under an incrementing one-byte salt until k
//! 64-bit values exist. Derivation is stateless: each invocation builds a
//! fresh digest instance, so concurrent callers need no coordination and the
//! output for a given input never varies.

use digest::Digest;
use md5::Md5;

/// Default digest family: 128-bit output, two index chunks per invocation.
pub type DefaultDigest = Md5;

/// Derive `k` raw 64-bit hash values for `data`.
///
/// Each invocation digests a one-byte salt followed by the input; the salt
/// starts at 0 and wraps modulo 256. Digest output is consumed as
/// consecutive 8-byte big-endian chunks, in order, until `k` values exist.
pub fn derive_indices<D: Digest>(data: &[u8], k: usize) -> Vec<u64> {
    assert!(<D as Digest>::output_size() >= 8, "digest output too short for 64-bit chunks");
    let mut out = Vec::with_capacity(k);
    let mut salt = 0u8;
    while out.len() < k {
        let digest = D::new().chain_update([salt]).chain_update(data).finalize();
        salt = salt.wrapping_add(1);
        for chunk in digest.chunks_exact(8) {
            if out.len() == k {
                break;
            }
            out.push(u64::from_be_bytes(chunk.try_into().unwrap()));
        }
    }
    out
}

/// Map a raw hash into `[0, m)`.
///
/// On unsigned values the remainder already is the floor-modulo, so every
/// input lands in range; there is no negative-remainder case to correct.
#[inline]
pub fn reduce(h: u64, m: u64) -> u64 {
    debug_assert!(m > 0);
    h % m
}
