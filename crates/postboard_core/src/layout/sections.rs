//! Section layout calculator.
//!
//! # Responsibility
//! - Partition a canvas into 1..=4 sections with fixed schemes.
//! - Resolve which section owns a point.
//! - Carry custom section names across recomputation.
//!
//! # Invariants
//! - Output sections tile the canvas with no gap and no overlap.
//! - Ids are `1..=count`, assigned left-to-right, top-to-bottom.
//! - The calculator is stateless and always emits default names.

use crate::model::geometry::{contains, Rect};
use crate::model::section::{Section, SectionId};

/// Largest supported section count.
pub const MAX_SECTIONS: usize = 4;

/// Computes the section partition for `count` sections.
///
/// Counts outside `1..=4` fall back to the single-section scheme.
pub fn compute_layout(count: usize, canvas_width: f64, canvas_height: f64) -> Vec<Section> {
    let rects = match count {
        2 => columns(2, canvas_width, canvas_height),
        3 => columns(3, canvas_width, canvas_height),
        4 => {
            let half_w = canvas_width / 2.0;
            let half_h = canvas_height / 2.0;
            vec![
                Rect::new(0.0, 0.0, half_w, half_h),
                Rect::new(half_w, 0.0, canvas_width - half_w, half_h),
                Rect::new(0.0, half_h, half_w, canvas_height - half_h),
                Rect::new(half_w, half_h, canvas_width - half_w, canvas_height - half_h),
            ]
        }
        _ => vec![Rect::new(0.0, 0.0, canvas_width, canvas_height)],
    };

    rects
        .into_iter()
        .enumerate()
        .map(|(index, rect)| Section::with_default_name(index as SectionId + 1, rect))
        .collect()
}

// The last column absorbs the rounding remainder so the union stays exact.
fn columns(count: usize, canvas_width: f64, canvas_height: f64) -> Vec<Rect> {
    let width = canvas_width / count as f64;
    (0..count)
        .map(|index| {
            let x = width * index as f64;
            let w = if index + 1 == count {
                canvas_width - x
            } else {
                width
            };
            Rect::new(x, 0.0, w, canvas_height)
        })
        .collect()
}

/// Returns the section whose half-open rectangle contains `(x, y)`.
pub fn section_for_position(sections: &[Section], x: f64, y: f64) -> Option<&Section> {
    sections
        .iter()
        .find(|section| contains(&section.rect, x, y))
}

/// Copies names from `previous` onto `fresh` wherever ids match.
pub fn carry_forward_names(fresh: Vec<Section>, previous: &[Section]) -> Vec<Section> {
    fresh
        .into_iter()
        .map(|mut section| {
            if let Some(existing) = previous.iter().find(|old| old.id == section.id) {
                section.name = existing.name.clone();
            }
            section
        })
        .collect()
}
