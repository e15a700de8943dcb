//! "Show this line to a human" capability.
//!
//! The server operator console and the client console both print lines; tests
//! and embedders record them instead.

use std::sync::{Mutex, PoisonError};

/// Display sink. Assumed never to fail.
pub trait DisplaySink: Send + Sync {
    fn display(&self, line: &str);
}

/// Prints each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn display(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps displayed lines in memory.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    lines: Mutex<Vec<String>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything displayed so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|l| l == line)
    }

    pub fn last(&self) -> Option<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl DisplaySink for MemoryDisplay {
    fn display(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
