// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit sessions and the collaborators they drive

pub mod collaborators;
pub mod preview;
pub mod session;
pub mod state;
pub mod tab_memory;

pub use collaborators::{Collaborators, LogRedraw, RedrawListener, SessionOptions};
pub use preview::{
    InlinePreview, NoPreview, PreviewFrame, PreviewRenderer, PreviewRequest, PreviewWorker,
    Rasterizer,
};
pub use session::EditSession;
pub use state::{CloseOutcome, SessionState};
pub use tab_memory::TabMemory;
