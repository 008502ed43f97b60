//! Section domain model.
//!
//! # Responsibility
//! - Define one rectangular region of the board partition.
//!
//! # Invariants
//! - Section ids on a board form the dense sequence `1..=N`.
//! - Sections are produced by the layout calculator, never ad hoc.

use crate::model::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Positive, dense section identifier (`1..=N`).
pub type SectionId = u32;

/// One region of the canvas partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    #[serde(flatten)]
    pub rect: Rect,
}

impl Section {
    /// Creates a section carrying the default `"Section {id}"` name.
    pub fn with_default_name(id: SectionId, rect: Rect) -> Self {
        Self {
            id,
            name: default_section_name(id),
            rect,
        }
    }
}

/// Name given to a freshly laid out section.
pub fn default_section_name(id: SectionId) -> String {
    format!("Section {id}")
}
