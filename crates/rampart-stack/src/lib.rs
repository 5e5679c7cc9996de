// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! A stack that distrusts its own memory.
//!
//! [`GuardedStack`] keeps its elements in a single allocation flanked by
//! canary cells, guards its control block with canary words, and covers both
//! with MurmurHash2 digests. Every public operation re-verifies all of it
//! before touching anything; mutators verify again on the way out. The first
//! out-of-bounds write, stale read or field overwrite surfaces as a specific
//! [`StackError`] instead of propagating silently.
//!
//! Detected corruption is fatal to the instance: a full state snapshot is
//! rendered to the attached [`DiagnosticSink`] and the operation fails. There
//! is no repair path.
//!
//! Single-threaded by design. Wrap the whole container in an external lock if
//! it must be shared; push and pop both touch the size, the digests and,
//! across a resize, every element address.
//!
//! # Example
//!
//! ```rust
//! use rampart_stack::{GuardedStack, StackError};
//!
//! fn example() -> Result<(), StackError> {
//!     let mut stack = GuardedStack::new(4)?;
//!
//!     for value in [0, 2, 4, 6, 8] {
//!         stack.push(value)?;
//!     }
//!     // The fifth push doubled the capacity, exactly once.
//!     assert_eq!(stack.capacity(), 8);
//!
//!     assert_eq!(stack.pop()?, 8);
//!     while !stack.is_empty() {
//!         stack.pop()?;
//!     }
//!     // Shrink-on-read brought the capacity back to the floor.
//!     assert_eq!(stack.capacity(), 4);
//!
//!     stack.tear_down()?;
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod consts;
mod dump;
mod error;
mod sink;
mod stack;

pub use consts::{DATA_CANARY, Elem, POISON, SHRINK_DIVISOR, STACK_CANARY};
pub use dump::DumpSite;
pub use error::{GuardSide, StackError};
pub use sink::{DiagnosticSink, FileSink, MemorySink};
pub use stack::GuardedStack;
