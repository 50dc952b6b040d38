// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for style snapshots and edit sessions.

use thiserror::Error;

/// Result alias used across the library.
pub type Result<T, E = StyleError> = std::result::Result<T, E>;

/// Errors raised while capturing, restoring or editing a style.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StyleError {
    /// The style could not be turned into a snapshot.
    #[error("failed to serialize style: {0}")]
    Serialization(String),

    /// A snapshot could not be decoded back into a style.
    #[error("failed to deserialize style snapshot: {0}")]
    Deserialization(String),

    /// Another session call was in progress when this one started.
    ///
    /// Fatal to the offending call only; the session stays usable.
    #[error("{operation} rejected: another session call is in progress")]
    ConcurrencyViolation {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The session has already been closed.
    #[error("style session is closed")]
    SessionClosed,

    /// The session was opened without an Apply action.
    #[error("apply is not available for this session")]
    ApplyUnavailable,

    /// The inbound adapter could not turn text into a field edit.
    #[error("invalid value {value:?} for field {field:?}")]
    InvalidField {
        /// Field name as given.
        field: String,
        /// Offending value.
        value: String,
    },

    /// The font catalog could not be read.
    #[error("font catalog unavailable: {0}")]
    FontCatalog(String),
}

impl StyleError {
    pub(crate) fn invalid_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
        }
    }
}
