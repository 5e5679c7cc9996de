// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The guarded stack container.

use rampart_hash::murmur2;

use crate::consts::{DATA_CANARY, DIGEST_SEED, Elem, POISON, SHRINK_DIVISOR, STACK_CANARY};
use crate::dump::{self, DumpSite, Snapshot};
use crate::error::{GuardSide, StackError};
use crate::sink::DiagnosticSink;

/// A stack that revalidates itself on every operation.
///
/// The elements live in one allocation laid out as
/// `[canary][capacity cells][canary]`; the control block is flanked by guard
/// words and covered by its own digest, the element region by a second
/// digest. Every public operation verifies all of it on entry, and mutators
/// verify again on exit. A failed check renders a full snapshot to the
/// attached [`DiagnosticSink`] and returns the specific [`StackError`]; the
/// instance must be considered lost after any corruption-class error.
///
/// Capacity doubles when a push finds the container full and shrinks by
/// [`SHRINK_DIVISOR`] when a pop finds usage at or below a quarter of
/// capacity, never dropping under the start capacity. Cells that do not hold
/// a live element always hold [`POISON`].
pub struct GuardedStack {
    head_guard: u64,

    size: usize,
    capacity: usize,
    start_capacity: usize,

    // Layout: [lead canary][capacity element cells][trail canary].
    cells: Box<[Elem]>,

    content_hash: u32,
    struct_hash: u32,

    tail_guard: u64,

    sink: Option<Box<dyn DiagnosticSink>>,
    torn_down: bool,
}

impl GuardedStack {
    /// Creates a stack with `start_capacity` element slots and no sink.
    ///
    /// Fails with [`StackError::InvalidCapacity`] when `start_capacity` is
    /// zero and with [`StackError::AllocationFailure`] when the allocator
    /// refuses; nothing is left behind on either path.
    pub fn new(start_capacity: usize) -> Result<Self, StackError> {
        Self::build(start_capacity, None)
    }

    /// Creates a stack that records snapshots to `sink`.
    ///
    /// The sink was opened by the caller; file sinks truncate on open. It is
    /// dropped (closed) at teardown.
    pub fn with_sink(
        start_capacity: usize,
        sink: Box<dyn DiagnosticSink>,
    ) -> Result<Self, StackError> {
        Self::build(start_capacity, Some(sink))
    }

    fn build(
        start_capacity: usize,
        sink: Option<Box<dyn DiagnosticSink>>,
    ) -> Result<Self, StackError> {
        if start_capacity == 0 {
            return Err(StackError::InvalidCapacity);
        }

        let cells = flanked_allocation(start_capacity)?;

        let mut stack = Self {
            head_guard: STACK_CANARY,
            size: 0,
            capacity: start_capacity,
            start_capacity,
            cells,
            content_hash: 0,
            struct_hash: 0,
            tail_guard: STACK_CANARY,
            sink,
            torn_down: false,
        };
        stack.refresh_digests();
        stack.checked(DumpSite::new(file!(), "new", line!()))?;

        Ok(stack)
    }

    /// Number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` when no elements are live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of allocated element slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity floor established at construction.
    #[inline]
    #[must_use]
    pub fn start_capacity(&self) -> usize {
        self.start_capacity
    }

    /// Pushes `value`, growing the container first when it is full.
    ///
    /// Growth doubles the capacity, exactly once per full-container push. A
    /// growth failure propagates with the container unchanged.
    pub fn push(&mut self, value: Elem) -> Result<(), StackError> {
        self.checked(DumpSite::new(file!(), "push", line!()))?;

        if self.size == self.capacity {
            self.resize(self.capacity * 2)?;
        }

        self.cells[self.size + 1] = value;
        self.size += 1;
        self.refresh_digests();

        self.checked(DumpSite::new(file!(), "push", line!()))
    }

    /// Pops the top element, shrinking the container first when usage has
    /// fallen to a quarter of capacity or less.
    ///
    /// Fails with [`StackError::EmptyContainer`] when nothing is live. The
    /// vacated cell is overwritten with [`POISON`] before the value is
    /// returned.
    pub fn pop(&mut self) -> Result<Elem, StackError> {
        self.checked(DumpSite::new(file!(), "pop", line!()))?;

        if self.size == 0 {
            return Err(StackError::EmptyContainer);
        }

        if self.capacity > self.start_capacity && self.size <= self.capacity / SHRINK_DIVISOR {
            let target = (self.capacity / SHRINK_DIVISOR).max(self.start_capacity);
            self.resize(target)?;
        }

        self.size -= 1;
        let value = self.cells[self.size + 1];
        self.cells[self.size + 1] = POISON;
        self.refresh_digests();

        self.checked(DumpSite::new(file!(), "pop", line!()))?;
        Ok(value)
    }

    /// Runs the full validation pass without mutating anything.
    ///
    /// On failure a snapshot is recorded and the specific error returned.
    /// Calling twice without an intervening mutation yields the same result
    /// both times.
    pub fn validate(&mut self) -> Result<(), StackError> {
        self.checked(DumpSite::new(file!(), "validate", line!()))
    }

    /// Records a snapshot unconditionally, tagged with the caller's `site`.
    ///
    /// Fails with [`StackError::SinkUnavailable`] when no sink is attached
    /// or the sink write fails.
    pub fn dump(&mut self, site: DumpSite) -> Result<(), StackError> {
        let report = dump::render(&site, &self.snapshot());

        match self.sink.as_mut() {
            Some(sink) => sink.record(&report),
            None => Err(StackError::SinkUnavailable(std::io::Error::other(
                "no diagnostic sink attached",
            ))),
        }
    }

    /// Validates, poisons the entire allocation (canaries included),
    /// releases it, zeroes every field and drops the sink.
    ///
    /// A second call fails with [`StackError::AlreadyTornDown`] instead of
    /// touching freed state.
    pub fn tear_down(&mut self) -> Result<(), StackError> {
        let poisoned = self.tear_down_inner()?;
        drop(poisoned);
        Ok(())
    }

    fn tear_down_inner(&mut self) -> Result<Box<[Elem]>, StackError> {
        self.checked(DumpSite::new(file!(), "tear_down", line!()))?;

        let mut cells = std::mem::take(&mut self.cells);
        poison_cells(&mut cells);

        self.size = 0;
        self.capacity = 0;
        self.start_capacity = 0;
        self.content_hash = 0;
        self.struct_hash = 0;
        self.head_guard = 0;
        self.tail_guard = 0;
        self.sink = None;
        self.torn_down = true;

        Ok(cells)
    }

    /// Entry/exit gate: teardown latch first, then the ordered checks, with
    /// a snapshot to the sink on any failure.
    fn checked(&mut self, site: DumpSite) -> Result<(), StackError> {
        if self.torn_down {
            return Err(StackError::AlreadyTornDown);
        }

        if let Err(err) = self.inspect() {
            self.report(&site, &err);
            return Err(err);
        }

        Ok(())
    }

    /// The ordered integrity checks; the first failure wins.
    fn inspect(&self) -> Result<(), StackError> {
        if self.cells.len() != self.capacity + 2 {
            return Err(StackError::NullHandle);
        }
        if self.size > self.capacity {
            return Err(StackError::SizeExceedsCapacity {
                size: self.size,
                capacity: self.capacity,
            });
        }
        if self.cells[0] != DATA_CANARY {
            return Err(StackError::LeadingSentinelCorrupted);
        }
        if self.cells[self.capacity + 1] != DATA_CANARY {
            return Err(StackError::TrailingSentinelCorrupted);
        }
        if self.head_guard != STACK_CANARY {
            return Err(StackError::ControlBlockCorrupted {
                side: GuardSide::Head,
            });
        }
        if self.tail_guard != STACK_CANARY {
            return Err(StackError::ControlBlockCorrupted {
                side: GuardSide::Tail,
            });
        }

        let actual = self.content_digest();
        if actual != self.content_hash {
            return Err(StackError::ContentChecksumMismatch {
                expected: self.content_hash,
                actual,
            });
        }

        let actual = self.control_block_digest();
        if actual != self.struct_hash {
            return Err(StackError::StructChecksumMismatch {
                expected: self.struct_hash,
                actual,
            });
        }

        Ok(())
    }

    /// Best-effort corruption report: the reason line, then the snapshot.
    /// A sink failure here must not mask the container error.
    fn report(&mut self, site: &DumpSite, err: &StackError) {
        let mut report = format!("{err}\n");
        report.push_str(&dump::render(site, &self.snapshot()));

        if let Some(sink) = self.sink.as_mut() {
            let _ = sink.record(&report);
        }
    }

    /// Swaps in a fresh flanked allocation of `new_capacity` element cells.
    ///
    /// Canary and digest values refer to the old addresses and are rewritten
    /// for the new ones. On allocation failure the container is left exactly
    /// as it was.
    #[cold]
    #[inline(never)]
    fn resize(&mut self, new_capacity: usize) -> Result<(), StackError> {
        let mut next = flanked_allocation(new_capacity)?;
        next[1..=self.size].copy_from_slice(&self.cells[1..=self.size]);

        self.cells = next;
        self.capacity = new_capacity;
        self.refresh_digests();

        Ok(())
    }

    /// Digest over the little-endian bytes of the live elements.
    fn content_digest(&self) -> u32 {
        let mut bytes = Vec::with_capacity(self.size * size_of::<Elem>());
        for cell in &self.cells[1..1 + self.size] {
            bytes.extend_from_slice(&cell.to_le_bytes());
        }

        murmur2(&bytes, DIGEST_SEED)
    }

    /// Digest over a serialized snapshot of the control block, with the
    /// struct-hash field masked to zero. The live struct bytes are never
    /// hashed directly.
    fn control_block_digest(&self) -> u32 {
        let mut bytes = Vec::with_capacity(6 * size_of::<u64>() + 2 * size_of::<u32>());
        bytes.extend_from_slice(&self.head_guard.to_le_bytes());
        bytes.extend_from_slice(&(self.size as u64).to_le_bytes());
        bytes.extend_from_slice(&(self.capacity as u64).to_le_bytes());
        bytes.extend_from_slice(&(self.start_capacity as u64).to_le_bytes());
        bytes.extend_from_slice(&(self.cells.as_ptr() as usize as u64).to_le_bytes());
        bytes.extend_from_slice(&self.content_hash.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&self.tail_guard.to_le_bytes());

        murmur2(&bytes, DIGEST_SEED)
    }

    /// Content digest first: the control-block digest covers it.
    fn refresh_digests(&mut self) {
        self.content_hash = self.content_digest();
        self.struct_hash = self.control_block_digest();
    }

    fn snapshot(&self) -> Snapshot<'_> {
        let slots = if self.cells.len() >= 2 {
            &self.cells[1..self.cells.len() - 1]
        } else {
            &[]
        };

        Snapshot {
            identity: self.cells.as_ptr() as usize,
            size: self.size,
            capacity: self.capacity,
            content_hash: self.content_hash,
            struct_hash: self.struct_hash,
            lead_canary: self.cells.first().copied().unwrap_or(POISON),
            trail_canary: self.cells.last().copied().unwrap_or(POISON),
            head_guard: self.head_guard,
            tail_guard: self.tail_guard,
            slots,
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl GuardedStack {
    /// Raw view of the whole allocation, canaries included.
    pub fn raw_cells_mut(&mut self) -> &mut [Elem] {
        &mut self.cells
    }

    /// Flips a bit in the head guard word.
    pub fn corrupt_head_guard(&mut self) {
        self.head_guard ^= 1;
    }

    /// Flips a bit in the tail guard word.
    pub fn corrupt_tail_guard(&mut self) {
        self.tail_guard ^= 1;
    }

    /// Forces the recorded live count without touching anything else.
    pub fn force_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Overwrites the stored content digest.
    pub fn force_content_hash(&mut self, digest: u32) {
        self.content_hash = digest;
    }

    /// Overwrites the stored control-block digest.
    pub fn force_struct_hash(&mut self, digest: u32) {
        self.struct_hash = digest;
    }

    /// Stored content digest.
    pub fn content_hash(&self) -> u32 {
        self.content_hash
    }

    /// Stored control-block digest.
    pub fn struct_hash(&self) -> u32 {
        self.struct_hash
    }

    /// Teardown that hands back the poisoned allocation instead of freeing
    /// it, so tests can inspect every cell.
    pub fn tear_down_returning_allocation(&mut self) -> Result<Box<[Elem]>, StackError> {
        self.tear_down_inner()
    }
}

impl Drop for GuardedStack {
    fn drop(&mut self) {
        // Stacks dropped without an explicit teardown still poison their
        // allocation before it is released.
        if !self.torn_down {
            poison_cells(&mut self.cells);
        }
    }
}

impl core::fmt::Debug for GuardedStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuardedStack")
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .field("start_capacity", &self.start_capacity)
            .field("content_hash", &self.content_hash)
            .field("struct_hash", &self.struct_hash)
            .finish_non_exhaustive()
    }
}

/// Allocates `[canary][capacity poisoned cells][canary]`, fallibly.
fn flanked_allocation(capacity: usize) -> Result<Box<[Elem]>, StackError> {
    let total = capacity + 2;

    let mut cells = Vec::new();
    cells
        .try_reserve_exact(total)
        .map_err(|_| StackError::AllocationFailure)?;
    cells.resize(total, POISON);
    cells[0] = DATA_CANARY;
    cells[capacity + 1] = DATA_CANARY;

    Ok(cells.into_boxed_slice())
}

/// Overwrites every cell, canaries included, with the poison pattern.
pub(crate) fn poison_cells(cells: &mut [Elem]) {
    cells.fill(POISON);
}
