// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{GuardedStack, POISON};

// =============================================================================
// Growth: doubling, exactly once per full-container push
// =============================================================================

#[test]
fn test_growth_doubles() {
    let mut stack = GuardedStack::new(1).expect("Failed to create stack");
    let mut observed = vec![stack.capacity()];

    for value in 0..9 {
        stack.push(value).expect("Failed to push");
        if *observed.last().expect("observed is never empty") != stack.capacity() {
            observed.push(stack.capacity());
        }
    }

    // 1 → 2 → 4 → 8 → 16, one doubling per full push, never a skip.
    assert_eq!(observed, vec![1, 2, 4, 8, 16]);
}

#[test]
fn test_growth_poisons_exposed_slots() {
    let mut stack = GuardedStack::new(2).expect("Failed to create stack");
    stack.push(1).expect("Failed to push");
    stack.push(2).expect("Failed to push");
    stack.push(3).expect("Failed to push"); // grows to 4

    let size = stack.len();
    let capacity = stack.capacity();
    let cells = stack.raw_cells_mut();

    assert!(
        cells[1 + size..1 + capacity]
            .iter()
            .all(|cell| *cell == POISON)
    );
}

#[test]
fn test_growth_preserves_contents() {
    let mut stack = GuardedStack::new(2).expect("Failed to create stack");

    for value in 0..40 {
        stack.push(value).expect("Failed to push");
    }

    for expected in (0..40).rev() {
        assert_eq!(stack.pop().expect("Failed to pop"), expected);
    }
}

// =============================================================================
// Shrink: quarter divisor, clamped at the start capacity
// =============================================================================

#[test]
fn test_shrink_at_quarter_usage() {
    let mut stack = GuardedStack::new(4).expect("Failed to create stack");

    for value in 0..20 {
        stack.push(value).expect("Failed to push");
    }
    assert_eq!(stack.capacity(), 32);

    // Pops at sizes 20..9 leave the capacity alone; the pop that finds
    // size == 8 (a quarter of 32) shrinks to 8 first.
    for _ in 0..12 {
        stack.pop().expect("Failed to pop");
    }
    assert_eq!(stack.len(), 8);
    assert_eq!(stack.capacity(), 32);

    stack.pop().expect("Failed to pop");
    assert_eq!(stack.capacity(), 8);
}

#[test]
fn test_shrink_clamps_at_start_capacity() {
    let mut stack = GuardedStack::new(4).expect("Failed to create stack");

    for value in 0..20 {
        stack.push(value).expect("Failed to push");
    }

    let mut capacities = Vec::new();
    while !stack.is_empty() {
        stack.pop().expect("Failed to pop");
        capacities.push(stack.capacity());
    }

    // A quarter of 8 would be 2; the floor wins.
    assert!(capacities.iter().all(|cap| *cap >= 4));
    assert_eq!(stack.capacity(), 4);
}

#[test]
fn test_no_shrink_at_floor_capacity() {
    let mut stack = GuardedStack::new(4).expect("Failed to create stack");

    stack.push(1).expect("Failed to push");
    stack.pop().expect("Failed to pop");

    assert_eq!(stack.capacity(), 4);
}

#[test]
fn test_shrink_keeps_live_elements() {
    let mut stack = GuardedStack::new(2).expect("Failed to create stack");

    for value in 0..16 {
        stack.push(value).expect("Failed to push");
    }
    assert_eq!(stack.capacity(), 16);

    // Drain through the shrink points; LIFO order must survive every
    // reallocation.
    for expected in (0..16).rev() {
        assert_eq!(stack.pop().expect("Failed to pop"), expected);
    }
    assert_eq!(stack.capacity(), 2);
}
