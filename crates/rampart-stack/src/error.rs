// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for the guarded stack.

use thiserror::Error;

/// Which guard word of the control block failed its check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardSide {
    /// The guard word ahead of the control block fields.
    Head,
    /// The guard word behind the control block fields.
    Tail,
}

/// Everything a guarded stack operation can fail with.
///
/// The sentinel, digest and size variants are corruption signals: once one
/// is returned, the instance must not be used further. `AllocationFailure`
/// is the exception, leaving the container exactly as it was before the
/// attempt. `SinkUnavailable` concerns only the diagnostic side channel and
/// never stands in for a container error.
#[derive(Debug, Error)]
pub enum StackError {
    /// Construction was asked for a zero start capacity.
    #[error("start capacity must be greater than zero")]
    InvalidCapacity,

    /// The cell allocation is missing or does not match the capacity.
    #[error("container buffer is missing")]
    NullHandle,

    /// The live count exceeds the allocated slot count.
    #[error("size {size} exceeds capacity {capacity}")]
    SizeExceedsCapacity {
        /// Recorded live count.
        size: usize,
        /// Recorded slot count.
        capacity: usize,
    },

    /// The canary cell ahead of the element region was overwritten.
    #[error("leading data canary was changed")]
    LeadingSentinelCorrupted,

    /// The canary cell behind the element region was overwritten.
    #[error("trailing data canary was changed")]
    TrailingSentinelCorrupted,

    /// A guard word flanking the control block was overwritten.
    #[error("{side:?} control block guard was changed")]
    ControlBlockCorrupted {
        /// Which guard word failed.
        side: GuardSide,
    },

    /// The stored element digest no longer matches a recomputation.
    #[error("content digest mismatch: expected {expected:#010x}, actual {actual:#010x}")]
    ContentChecksumMismatch {
        /// Digest stored after the last verified mutation.
        expected: u32,
        /// Digest of the element region as found now.
        actual: u32,
    },

    /// The stored control-block digest no longer matches a recomputation.
    #[error("control block digest mismatch: expected {expected:#010x}, actual {actual:#010x}")]
    StructChecksumMismatch {
        /// Digest stored after the last verified mutation.
        expected: u32,
        /// Digest of the control block as found now.
        actual: u32,
    },

    /// The allocator refused a resize; the container is unchanged.
    #[error("allocation failed")]
    AllocationFailure,

    /// Pop was called with no live elements.
    #[error("pop from an empty container")]
    EmptyContainer,

    /// The instance was already torn down.
    #[error("container was already torn down")]
    AlreadyTornDown,

    /// The diagnostic sink could not be opened or written.
    #[error("diagnostic sink unavailable: {0}")]
    SinkUnavailable(#[from] std::io::Error),
}
