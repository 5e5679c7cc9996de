// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! 32-bit MurmurHash2 over byte spans.
//!
//! This is the non-cryptographic mixing hash used by the guarded containers
//! to detect accidental corruption of their element regions and control
//! blocks. It is bit-for-bit the classic MurmurHash2 routine: recorded
//! digests are interoperable with any other faithful implementation.
//!
//! Not a MAC and not collision resistant; it detects accidents, not
//! adversaries.
//!
//! # Example
//!
//! ```rust
//! use rampart_hash::murmur2;
//!
//! // The empty span under seed zero digests to zero.
//! assert_eq!(murmur2(&[], 0), 0);
//!
//! // Deterministic for any span and seed.
//! assert_eq!(murmur2(b"abc", 7), murmur2(b"abc", 7));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
mod tests;

/// Multiplicative mixing constant from the MurmurHash2 reference.
pub const MIX: u32 = 0x5bd1_e995;

/// Rotation width applied to each mixed 4-byte word.
const SHIFT: u32 = 24;

/// Computes the 32-bit MurmurHash2 digest of `data` under `seed`.
///
/// Each 4-byte little-endian word is multiplied by [`MIX`], xored with
/// itself shifted right by 24, multiplied again, then folded into the
/// running state. The 1-3 trailing bytes are folded in highest offset
/// first, with one multiply after the final fold, followed by the
/// 13/multiply/15 xor-shift finalizer.
#[must_use]
pub fn murmur2(data: &[u8], seed: u32) -> u32 {
    let mut h = seed ^ data.len() as u32;

    let mut words = data.chunks_exact(4);
    for word in words.by_ref() {
        let mut k = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        k = k.wrapping_mul(MIX);
        k ^= k >> SHIFT;
        k = k.wrapping_mul(MIX);

        h = h.wrapping_mul(MIX);
        h ^= k;
    }

    let tail = words.remainder();
    if tail.len() >= 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if !tail.is_empty() {
        h ^= u32::from(tail[0]);
        h = h.wrapping_mul(MIX);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(MIX);
    h ^= h >> 15;

    h
}
