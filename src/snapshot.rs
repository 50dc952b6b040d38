// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Serialized style snapshots, the dirtiness oracle for edit sessions.
//!
//! A snapshot is the JSON text of a versioned envelope around the whole
//! `StyleModel`. Struct fields serialize in declaration order and the model
//! holds no maps, so the same model always yields the same text. The same
//! envelope is used for style files on disk.
//!
//! Comparison is syntactic: two models that draw identically can still
//! produce different snapshots when a field of an inactive mode differs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};
use crate::model::StyleModel;
use crate::settings;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    style: &'a StyleModel,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    style: StyleModel,
}

/// Immutable serialized form of a style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleSnapshot(String);

impl StyleSnapshot {
    /// Serialize the full state of `model`.
    ///
    /// Non-finite numbers cannot survive a round trip, so they fail here
    /// rather than at restore time.
    pub fn capture(model: &StyleModel) -> Result<Self> {
        validate(model)?;
        let text = serde_json::to_string(&EnvelopeRef {
            version: settings::snapshot::VERSION,
            style: model,
        })
        .map_err(|e| StyleError::Serialization(e.to_string()))?;
        Ok(Self(text))
    }

    /// Like [`capture`](Self::capture), but indented for files.
    pub fn capture_pretty(model: &StyleModel) -> Result<Self> {
        validate(model)?;
        let text = serde_json::to_string_pretty(&EnvelopeRef {
            version: settings::snapshot::VERSION,
            style: model,
        })
        .map_err(|e| StyleError::Serialization(e.to_string()))?;
        Ok(Self(text))
    }

    /// Wrap text read from elsewhere (a file, the clipboard).
    ///
    /// Nothing is validated until the snapshot is decoded.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Decode into a fresh model without touching any existing one.
    pub fn decode(&self) -> Result<StyleModel> {
        let envelope: Envelope = serde_json::from_str(&self.0)
            .map_err(|e| StyleError::Deserialization(e.to_string()))?;
        if envelope.version != settings::snapshot::VERSION {
            return Err(StyleError::Deserialization(format!(
                "unsupported snapshot version {} (expected {})",
                envelope.version,
                settings::snapshot::VERSION
            )));
        }
        Ok(envelope.style)
    }

    /// Replace every field of `model` with the snapshot contents.
    ///
    /// The snapshot is decoded into a separate buffer first, so on error
    /// `model` is left exactly as it was.
    pub fn restore(&self, model: &mut StyleModel) -> Result<()> {
        let decoded = self.decode()?;
        *model = decoded;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn validate(model: &StyleModel) -> Result<()> {
    for (name, value) in model.float_fields() {
        if !value.is_finite() {
            return Err(StyleError::Serialization(format!(
                "{name} is not a finite number ({value})"
            )));
        }
    }
    Ok(())
}
