// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Demo driver: push fifty even values, pop twenty-six, record the survivor
//! state to `dump.txt`.
//!
//! ```bash
//! cargo run --example guarded_stack -- 4
//! ```

use rampart::stack::{FileSink, GuardedStack, StackError, dump_site};

fn main() -> Result<(), StackError> {
    let start_capacity = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(4);

    let sink = FileSink::create("dump.txt")?;
    let mut stack = GuardedStack::with_sink(start_capacity, Box::new(sink))?;

    for value in 0..50 {
        stack.push(2 * value)?;
    }
    for _ in 0..26 {
        let _ = stack.pop()?;
    }

    stack.dump(dump_site!("main"))?;
    stack.tear_down()?;

    println!("survivor state recorded to dump.txt");
    Ok(())
}
