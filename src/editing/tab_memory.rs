// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Remembered editor tab, shared by every session in the process.
//!
//! Starts at tab 0, is read when a session opens and written when it
//! closes. Sessions reach the process-wide instance through
//! `TabMemory::global()` unless given their own, which keeps tests
//! independent of each other.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Last selected tab index
#[derive(Debug)]
pub struct TabMemory {
    index: AtomicUsize,
}

static GLOBAL_TABS: TabMemory = TabMemory::new();

impl TabMemory {
    pub const fn new() -> Self {
        Self {
            index: AtomicUsize::new(0),
        }
    }

    /// The process-wide instance
    pub fn global() -> &'static TabMemory {
        &GLOBAL_TABS
    }

    pub fn last(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    pub fn remember(&self, tab: usize) {
        self.index.store(tab, Ordering::Relaxed);
    }

    /// Back to the first tab
    pub fn reset(&self) {
        self.remember(0);
    }
}

impl Default for TabMemory {
    fn default() -> Self {
        Self::new()
    }
}
