//! Placement search inside a section.
//!
//! # Responsibility
//! - Derive the placement sub-rectangle (section minus margins).
//! - Clamp item origins into that sub-rectangle.
//! - Grid-scan for the first origin free of overlap with occupied rects.
//!
//! # Invariants
//! - Scan order is row-major (top-to-bottom, then left-to-right).
//! - The result depends only on inputs; no clock, no randomness.
//! - A full section yields a clamped, possibly overlapping origin.

use crate::config::LayoutConfig;
use crate::model::geometry::{overlaps, Point, Rect, Size};
use crate::model::section::Section;
use log::warn;

/// Section rectangle minus the configured margins.
///
/// The extent may be zero when the section is smaller than its margins.
pub fn placement_rect(section: &Section, config: &LayoutConfig) -> Rect {
    Rect::new(
        section.rect.x + config.side_margin,
        section.rect.y + config.top_margin,
        section.rect.width - 2.0 * config.side_margin,
        section.rect.height - config.top_margin - config.bottom_margin,
    )
}

/// Clamps an item origin so an item of `size` stays inside the placement area.
///
/// When the item is larger than the area, the top-left inset wins.
pub fn clamp_to_section(
    position: Point,
    size: Size,
    section: &Section,
    config: &LayoutConfig,
) -> Point {
    let area = placement_rect(section, config);
    let max_x = area.right() - size.width;
    let max_y = area.bottom() - size.height;
    Point::new(
        position.x.min(max_x).max(area.x),
        position.y.min(max_y).max(area.y),
    )
}

/// Placement search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Origin with no overlap against any occupied rectangle.
    Free(Point),
    /// Grid exhausted; origin is the clamped hint and may overlap.
    Exhausted(Point),
}

impl Placement {
    pub fn position(self) -> Point {
        match self {
            Self::Free(position) | Self::Exhausted(position) => position,
        }
    }

    pub fn is_free(self) -> bool {
        matches!(self, Self::Free(_))
    }
}

/// Finds the first overlap-free origin for `candidate` inside `section`.
///
/// `candidate` supplies the item size; its origin is only used as the
/// fallback hint when no free slot exists.
pub fn find_placement(
    candidate: &Rect,
    section: &Section,
    occupied: &[Rect],
    config: &LayoutConfig,
) -> Placement {
    let area = placement_rect(section, config);
    let max_x = area.right() - candidate.width;
    let max_y = area.bottom() - candidate.height;

    if config.grid_step > 0.0 {
        let mut row = 0_u32;
        loop {
            let y = area.y + f64::from(row) * config.grid_step;
            if y > max_y {
                break;
            }
            let mut column = 0_u32;
            loop {
                let x = area.x + f64::from(column) * config.grid_step;
                if x > max_x {
                    break;
                }
                let probe = Rect::new(x, y, candidate.width, candidate.height);
                if !occupied.iter().any(|rect| overlaps(&probe, rect)) {
                    return Placement::Free(Point::new(x, y));
                }
                column += 1;
            }
            row += 1;
        }
    }

    let fallback = clamp_to_section(candidate.origin(), candidate.size(), section, config);
    warn!(
        "event=placement_exhausted module=layout status=degraded section_id={} occupied={} x={} y={}",
        section.id,
        occupied.len(),
        fallback.x,
        fallback.y
    );
    Placement::Exhausted(fallback)
}
