// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fixed values shared by the container, its dumps and its tests.

/// The element type stored in the guarded region.
///
/// One fixed numeric type, sized to match the canary cells so the whole
/// flanked allocation is a uniform run of 8-byte cells.
pub type Elem = i64;

/// Canary value written into the cells flanking the element region.
pub const DATA_CANARY: Elem = 0xBAD_BABE;

/// Canary value held by the guard words flanking the control block.
pub const STACK_CANARY: u64 = 0xBAD_BEDA;

/// Pattern written into every cell that does not hold a live element:
/// unused slots at construction, slots exposed by growth, slots vacated by
/// pop, and the whole allocation at teardown.
pub const POISON: Elem = 0xDED3_2BAD;

/// Capacity divisor for the shrink-on-read policy: popping with
/// `size <= capacity / SHRINK_DIVISOR` resizes to `capacity / SHRINK_DIVISOR`,
/// clamped at the start capacity.
pub const SHRINK_DIVISOR: usize = 4;

/// Seed for both the content and the control-block digest.
pub(crate) const DIGEST_SEED: u32 = 0;
