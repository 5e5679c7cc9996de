// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Snapshot rendering for the diagnostic sink.
//!
//! The layout mirrors the classic dump: caller site, container identity,
//! size and capacity, both digests, one line per slot with a `*` liveness
//! marker, then the canaries and guard words.

use std::fmt::Write;

use crate::consts::Elem;

/// Caller location attached to a dump.
///
/// Supplied by the caller, not computed; [`dump_site!`](crate::dump_site)
/// fills in the file and line.
#[derive(Debug, Clone, Copy)]
pub struct DumpSite {
    /// Source file of the caller.
    pub file: &'static str,
    /// Function name of the caller.
    pub function: &'static str,
    /// Line number of the caller.
    pub line: u32,
}

impl DumpSite {
    /// Builds a site record.
    #[must_use]
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }
}

/// Captures the current file and line as a [`DumpSite`]; the enclosing
/// function name is supplied by the caller.
///
/// ```rust
/// use rampart_stack::dump_site;
///
/// let site = dump_site!("main");
/// assert_eq!(site.function, "main");
/// ```
#[macro_export]
macro_rules! dump_site {
    ($function:expr) => {
        $crate::DumpSite::new(file!(), $function, line!())
    };
}

/// Field-by-field view of the container handed to the renderer.
pub(crate) struct Snapshot<'a> {
    pub identity: usize,
    pub size: usize,
    pub capacity: usize,
    pub content_hash: u32,
    pub struct_hash: u32,
    pub lead_canary: Elem,
    pub trail_canary: Elem,
    pub head_guard: u64,
    pub tail_guard: u64,
    /// The element region, canaries excluded.
    pub slots: &'a [Elem],
}

pub(crate) fn render(site: &DumpSite, snapshot: &Snapshot<'_>) -> String {
    let mut out = String::new();

    // Writing into a String is infallible.
    let _ = writeln!(
        out,
        "DUMP was called from {} file, {} function, {} line",
        site.file, site.function, site.line
    );
    let _ = writeln!(out, "stack [{:#x}]", snapshot.identity);
    let _ = writeln!(
        out,
        "Current size of stack is: {}\t\t\tcapacity is: {}",
        snapshot.size, snapshot.capacity
    );
    let _ = writeln!(out, "Content hash is: {}", snapshot.content_hash);
    let _ = writeln!(out, "Struct hash is: {}", snapshot.struct_hash);

    let _ = writeln!(out, "Elements of data are:");
    for (index, cell) in snapshot.slots.iter().enumerate() {
        if index < snapshot.size {
            let _ = writeln!(out, "*[{index}] = {cell}");
        } else {
            // Unused cells hold the poison pattern; print them unsigned.
            let _ = writeln!(out, " [{index}] = {}", *cell as u64);
        }
    }

    let _ = writeln!(out, "left  canary is: {}", snapshot.lead_canary);
    let _ = writeln!(out, "right canary is: {}", snapshot.trail_canary);
    let _ = writeln!(out, "head  guard is: {}", snapshot.head_guard);
    let _ = writeln!(out, "tail  guard is: {}", snapshot.tail_guard);
    out.push('\n');

    out
}
