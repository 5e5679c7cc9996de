// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::murmur2;

// =============================================================================
// Empty span
// =============================================================================

#[test]
fn test_empty_span_seed_zero_is_zero() {
    // seed ^ len = 0, and the finalizer maps 0 to 0.
    assert_eq!(murmur2(&[], 0), 0);
}

#[test]
fn test_empty_span_nonzero_seed() {
    assert_ne!(murmur2(&[], 1), 0);
    assert_ne!(murmur2(&[], 1), murmur2(&[], 2));
}

// =============================================================================
// Reference vectors (cross-checked against an independent implementation)
// =============================================================================

#[test]
fn test_tail_only_vectors() {
    assert_eq!(murmur2(&[0u8], 0), 0xe94e_6ebd);
    assert_eq!(murmur2(b"a", 0), 0x9268_5f5e);
    assert_eq!(murmur2(b"ab", 0), 0x1aa1_4063);
    assert_eq!(murmur2(b"abc", 0), 0x1357_7c9b);
}

#[test]
fn test_word_aligned_vectors() {
    assert_eq!(murmur2(b"abcd", 0), 0x2687_3021);
    let bytes: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
    assert_eq!(murmur2(&bytes, 0), 0xcb7b_e4c0);
}

#[test]
fn test_mixed_length_vectors() {
    assert_eq!(murmur2(b"Hello, world!", 0), 0x403c_1e05);
    assert_eq!(murmur2(b"Hello, world!", 1234), 0xeeaa_5e2e);
}

// =============================================================================
// Determinism and sensitivity
// =============================================================================

#[test]
fn test_determinism() {
    let span: Vec<u8> = (0..=255).collect();

    assert_eq!(murmur2(&span, 0), murmur2(&span, 0));
    assert_eq!(murmur2(&span, 42), murmur2(&span, 42));
}

#[test]
fn test_single_bit_flip_changes_digest() {
    let mut span: Vec<u8> = (0..64).collect();
    let baseline = murmur2(&span, 0);

    span[17] ^= 1;

    assert_ne!(murmur2(&span, 0), baseline);
}

#[test]
fn test_length_extension_changes_digest() {
    // A trailing zero byte still changes the digest because the length
    // participates in the initial state.
    assert_ne!(murmur2(&[], 0), murmur2(&[0u8], 0));
    assert_ne!(murmur2(&[0u8], 0), murmur2(&[0u8, 0], 0));
}
