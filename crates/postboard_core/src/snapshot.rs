//! JSON snapshot codec for the persistence collaborator.
//!
//! # Responsibility
//! - Serialize `BoardLayoutState` in its plain data-model shape.
//! - Reject decoded snapshots that break board invariants.
//!
//! # Invariants
//! - Encoded output contains no derived or cached fields.
//! - Top-level fields are `sections`, `items` and `canvas_size`.

use crate::model::board::{BoardLayoutState, BoardValidationError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot encode/decode errors.
#[derive(Debug)]
pub enum SnapshotError {
    /// JSON (de)serialization failure.
    Json(serde_json::Error),
    /// Decoded board violates a structural invariant.
    Invalid(BoardValidationError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "board snapshot json error: {err}"),
            Self::Invalid(err) => write!(f, "invalid board snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<BoardValidationError> for SnapshotError {
    fn from(value: BoardValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Encodes a board snapshot as JSON.
pub fn encode_board(state: &BoardLayoutState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

/// Decodes and validates a board snapshot.
///
/// # Errors
/// - `SnapshotError::Json` for malformed input.
/// - `SnapshotError::Invalid` when the board breaks section/item invariants.
pub fn decode_board(raw: &str) -> Result<BoardLayoutState, SnapshotError> {
    let state: BoardLayoutState = serde_json::from_str(raw)?;
    if let Err(err) = state.validate() {
        warn!(
            "event=snapshot_decode module=snapshot status=error error_code=invalid_snapshot error={}",
            err
        );
        return Err(err.into());
    }
    Ok(state)
}
