//! Proportional repositioning between section geometries.
//!
//! Moving an item from one section frame to another is a change of
//! coordinates: the origin is expressed as a fraction of the old
//! placement sub-rectangle, then mapped into the new one and clamped.
//!
//! # Invariants
//! - Fractions are always within `[0, 1]`.
//! - A non-positive placement extent yields fraction `0` on that axis.
//! - Identical old/new geometry returns the input position untouched.

use crate::config::LayoutConfig;
use crate::layout::placement::{clamp_to_section, placement_rect};
use crate::model::geometry::{Point, Rect};
use crate::model::section::Section;

/// Position expressed relative to a section's placement sub-rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFraction {
    pub fx: f64,
    pub fy: f64,
}

/// Expresses `rect`'s origin as a fraction of `section`'s placement area.
pub fn to_local_fraction(rect: &Rect, section: &Section, config: &LayoutConfig) -> LocalFraction {
    let area = placement_rect(section, config);
    LocalFraction {
        fx: guarded_fraction(rect.x - area.x, area.width),
        fy: guarded_fraction(rect.y - area.y, area.height),
    }
}

/// Maps a fraction back to an absolute origin inside `section`'s placement area.
pub fn from_local_fraction(
    fraction: LocalFraction,
    section: &Section,
    config: &LayoutConfig,
) -> Point {
    let area = placement_rect(section, config);
    Point::new(
        area.x + fraction.fx * area.width,
        area.y + fraction.fy * area.height,
    )
}

/// Maps `item`'s origin from `old_section` to `new_section`, keeping its
/// relative placement and clamping it inside the new placement area.
pub fn reposition(
    item: &Rect,
    old_section: &Section,
    new_section: &Section,
    config: &LayoutConfig,
) -> Point {
    if old_section.rect == new_section.rect {
        return item.origin();
    }
    let fraction = to_local_fraction(item, old_section, config);
    let mapped = from_local_fraction(fraction, new_section, config);
    clamp_to_section(mapped, item.size(), new_section, config)
}

fn guarded_fraction(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        (offset / extent).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
