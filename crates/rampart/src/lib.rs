// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Containers that catch memory corruption the moment it is used.</em></p>
//!
//! ---
//!
//! Rampart wraps a resizable stack in boundary canaries, a poison pattern
//! and MurmurHash2 digests, and re-verifies all of them on every operation.
//! An out-of-bounds write, a stale read or an overwritten control field
//! surfaces as a typed error with a full state snapshot, instead of
//! propagating silently.
//!
//! # Features
//!
//! - **Canaries everywhere** — fixed marker cells flank the element region,
//!   guard words flank the control block
//! - **Checked on every call** — push, pop, dump and teardown all start
//!   (and, for mutators, end) with the full validation pass
//! - **Poisoned when unused** — free slots, vacated slots and torn-down
//!   allocations hold one recognizable pattern
//! - **Diagnostics on failure** — a caller-located snapshot of every slot,
//!   digest and canary goes to an injected sink
//! - **No silent repair** — corruption is fatal to the instance, by contract
//!
//! # Quick Start
//!
//! ```rust
//! use rampart::stack::{GuardedStack, StackError};
//!
//! fn main() -> Result<(), StackError> {
//!     let mut stack = GuardedStack::new(4)?;
//!
//!     for value in [0, 2, 4, 6, 8] {
//!         stack.push(value)?;
//!     }
//!     assert_eq!(stack.capacity(), 8);
//!
//!     while !stack.is_empty() {
//!         let _ = stack.pop()?;
//!     }
//!
//!     stack.tear_down()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// 32-bit MurmurHash2 digest routine.
pub use rampart_hash as hash;

/// The guarded stack, its errors and its diagnostic sinks.
pub use rampart_stack as stack;
