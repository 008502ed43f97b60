//! Board layout state and view overlays.
//!
//! # Responsibility
//! - Define the persisted `(sections, items, canvas_size)` snapshot.
//! - Define view-only overlays (focus/zoom, selection, viewport).
//! - Validate structural invariants of externally loaded snapshots.
//!
//! # Invariants
//! - `sections` holds 1..=4 entries with dense ids `1..=N` in order.
//! - Section rectangles match `compute_layout(N, W, H)`, so they tile the canvas.
//! - Every `item.section_id` names a section of `sections`.
//! - `FocusState::zoomed == true` implies `focused_section_id.is_some()`.

use crate::layout::sections::{compute_layout, MAX_SECTIONS};
use crate::model::geometry::{Rect, Size};
use crate::model::item::{Item, ItemId};
use crate::model::section::{Section, SectionId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Allowed drift, relative to the larger canvas side, between a stored
/// section rectangle and the computed layout.
const LAYOUT_TOLERANCE: f64 = 1e-9;

/// Pixel size of the drawable canvas.
pub type CanvasSize = Size;

/// Persisted board geometry: sections, items and the canvas they tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayoutState {
    pub sections: Vec<Section>,
    pub items: Vec<Item>,
    pub canvas_size: CanvasSize,
}

impl BoardLayoutState {
    /// Creates an empty single-section board covering the canvas.
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            sections: compute_layout(1, canvas_size.width, canvas_size.height),
            items: Vec::new(),
            canvas_size,
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items owned by `section_id`, in board order.
    pub fn items_in_section(&self, section_id: SectionId) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| item.section_id == section_id)
    }

    /// Checks the structural invariants of this snapshot.
    ///
    /// # Errors
    /// - Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        if !self.canvas_size.is_positive() {
            return Err(BoardValidationError::InvalidCanvasSize);
        }
        let count = self.sections.len();
        if count == 0 || count > MAX_SECTIONS {
            return Err(BoardValidationError::SectionCountOutOfRange(count));
        }
        for (index, section) in self.sections.iter().enumerate() {
            let expected = index as SectionId + 1;
            if section.id != expected {
                return Err(BoardValidationError::NonDenseSectionIds {
                    expected,
                    actual: section.id,
                });
            }
            if !section.rect.is_finite() || section.rect.width < 0.0 || section.rect.height < 0.0 {
                return Err(BoardValidationError::NonFiniteGeometry(format!(
                    "section {}",
                    section.id
                )));
            }
        }
        let expected_layout = compute_layout(count, self.canvas_size.width, self.canvas_size.height);
        let scale = self.canvas_size.width.max(self.canvas_size.height).max(1.0);
        for (section, expected) in self.sections.iter().zip(&expected_layout) {
            if !rect_matches(&section.rect, &expected.rect, scale * LAYOUT_TOLERANCE) {
                return Err(BoardValidationError::SectionGeometryMismatch(section.id));
            }
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(BoardValidationError::DuplicateItemId(item.id.clone()));
            }
            if self.section(item.section_id).is_none() {
                return Err(BoardValidationError::DanglingSectionRef {
                    item_id: item.id.clone(),
                    section_id: item.section_id,
                });
            }
            if !item.rect.is_finite() || item.rect.width < 0.0 || item.rect.height < 0.0 {
                return Err(BoardValidationError::NonFiniteGeometry(format!(
                    "item {}",
                    item.id
                )));
            }
        }
        Ok(())
    }
}

fn rect_matches(actual: &Rect, expected: &Rect, tolerance: f64) -> bool {
    [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.width, expected.width),
        (actual.height, expected.height),
    ]
    .iter()
    .all(|(a, b)| (a - b).abs() <= tolerance)
}

/// Structural invariant violations of a board snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardValidationError {
    /// Canvas width/height must be finite and positive.
    InvalidCanvasSize,
    /// Section count must be within `1..=4`.
    SectionCountOutOfRange(usize),
    /// Section ids must be `1..=N` in order.
    NonDenseSectionIds {
        expected: SectionId,
        actual: SectionId,
    },
    /// Section rectangle does not match the layout for the section count and canvas.
    SectionGeometryMismatch(SectionId),
    /// Item id appears more than once.
    DuplicateItemId(ItemId),
    /// Item references a section that does not exist.
    DanglingSectionRef {
        item_id: ItemId,
        section_id: SectionId,
    },
    /// Rectangle contains NaN/infinite or negative extents.
    NonFiniteGeometry(String),
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCanvasSize => write!(f, "canvas size must be finite and positive"),
            Self::SectionCountOutOfRange(count) => {
                write!(f, "section count {count} is outside 1..={MAX_SECTIONS}")
            }
            Self::NonDenseSectionIds { expected, actual } => {
                write!(f, "section ids must be dense: expected {expected}, got {actual}")
            }
            Self::SectionGeometryMismatch(id) => {
                write!(f, "section {id} does not tile the canvas")
            }
            Self::DuplicateItemId(id) => write!(f, "duplicate item id: {id}"),
            Self::DanglingSectionRef {
                item_id,
                section_id,
            } => write!(f, "item {item_id} references missing section {section_id}"),
            Self::NonFiniteGeometry(owner) => write!(f, "invalid geometry on {owner}"),
        }
    }
}

impl Error for BoardValidationError {}

/// Focus/zoom overlay. Not part of persisted geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusState {
    pub focused_section_id: Option<SectionId>,
    pub zoomed: bool,
}

impl FocusState {
    pub fn focused(section_id: SectionId) -> Self {
        Self {
            focused_section_id: Some(section_id),
            zoomed: false,
        }
    }
}

/// Selection and viewport overlay. Not part of persisted geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasView {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub selected_item_id: Option<ItemId>,
    pub selected_section_id: Option<SectionId>,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            selected_item_id: None,
            selected_section_id: None,
        }
    }
}

/// Items visible under `focus`: the focused section's items while zoomed,
/// otherwise all items.
pub fn visible_items<'a>(
    state: &'a BoardLayoutState,
    focus: &FocusState,
) -> impl Iterator<Item = &'a Item> {
    let only = match (focus.zoomed, focus.focused_section_id) {
        (true, Some(section_id)) => Some(section_id),
        _ => None,
    };
    state
        .items
        .iter()
        .filter(move |item| only.map_or(true, |section_id| item.section_id == section_id))
}
