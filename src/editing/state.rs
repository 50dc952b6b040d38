// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Session lifecycle states

/// Where an edit session is in its lifecycle
///
/// `Clean` and `Dirty` alternate while the editor is open; `Closed` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No edits since open or the last commit
    Clean,

    /// At least one edit since open or the last commit (the edit may not
    /// have changed any value)
    Dirty,

    /// Closed with OK or cancel; every further call fails
    Closed,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// OK: edits kept. `notified` is true if the style differed from the
    /// last baseline and a redraw was requested.
    Confirmed { notified: bool },

    /// Cancel: the style was restored to the last baseline
    Cancelled,
}
