//! Item ("post-it") domain model.
//!
//! # Responsibility
//! - Define the movable, resizable rectangle owned by one section.
//! - Carry content fields that ride along with geometry but never affect it.
//!
//! # Invariants
//! - `id` is unique on a board and never reused.
//! - `section_id` references exactly one section of the current layout.
//! - `color` is derived from `id` only and is independent of placement.

use crate::model::geometry::{Point, Rect};
use crate::model::section::SectionId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, unique item identifier.
pub type ItemId = String;

/// Text shown on a freshly created item.
pub const DEFAULT_ITEM_TEXT: &str = "Double-click to edit";
/// Font size of a freshly created item.
pub const DEFAULT_FONT_SIZE: u32 = 14;

const PALETTE: [&str; 6] = [
    "#FFE066", "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57",
];

/// Movable, resizable note rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub section_id: SectionId,
    #[serde(flatten)]
    pub rect: Rect,
    pub text: String,
    pub color: String,
    pub font_size: u32,
}

impl Item {
    /// Creates an item with a generated id.
    pub fn new(section_id: SectionId, rect: Rect) -> Self {
        Self::with_id(new_item_id(), section_id, rect)
    }

    /// Creates an item with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: impl Into<ItemId>, section_id: SectionId, rect: Rect) -> Self {
        let id = id.into();
        let color = palette_color(&id).to_string();
        Self {
            id,
            section_id,
            rect,
            text: DEFAULT_ITEM_TEXT.to_string(),
            color,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn position(&self) -> Point {
        self.rect.origin()
    }

    pub fn move_to(&mut self, position: Point) {
        self.rect = self.rect.with_origin(position);
    }
}

/// Generates a fresh opaque item id.
pub fn new_item_id() -> ItemId {
    Uuid::new_v4().simple().to_string()
}

/// Picks a palette color from the item id (FNV-1a over the id bytes).
pub fn palette_color(id: &str) -> &'static str {
    let hash = id.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |acc, byte| {
        (acc ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}
