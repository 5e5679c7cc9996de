// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Diagnostic sinks: where snapshots and corruption reports go.
//!
//! The sink is injected into the container at construction and dropped at
//! teardown. Writes are best-effort; a failed write while reporting
//! corruption is swallowed so it can never mask the container error.

use std::cell::RefCell;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use crate::error::StackError;

/// Destination for rendered state snapshots.
pub trait DiagnosticSink {
    /// Records one rendered snapshot.
    fn record(&mut self, report: &str) -> Result<(), StackError>;
}

/// File-backed sink. Opening truncates any prior contents.
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Opens (and truncates) the dump file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StackError> {
        let file = File::create(path)?;
        Ok(Self { file })
    }
}

impl DiagnosticSink for FileSink {
    fn record(&mut self, report: &str) -> Result<(), StackError> {
        self.file.write_all(report.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}

/// In-memory sink for tests and demos.
///
/// Clones share one underlying buffer, so a handle kept outside the
/// container can read back what the container recorded.
#[derive(Clone, Default)]
pub struct MemorySink {
    contents: Rc<RefCell<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&mut self, report: &str) -> Result<(), StackError> {
        self.contents.borrow_mut().push_str(report);
        Ok(())
    }
}
