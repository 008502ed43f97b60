//! Property checks for proportional repositioning.

use postboard_core::{reposition, LayoutConfig, Point, Rect, Section};
use proptest::prelude::*;

fn section_strategy() -> impl Strategy<Value = Section> {
    (
        0.0..2000.0_f64,
        0.0..2000.0_f64,
        500.0..2000.0_f64,
        500.0..2000.0_f64,
    )
        .prop_map(|(x, y, w, h)| Section::with_default_name(1, Rect::new(x, y, w, h)))
}

proptest! {
    #[test]
    fn same_section_is_identity(
        section in section_strategy(),
        dx in -100.0..3000.0_f64,
        dy in -100.0..3000.0_f64,
    ) {
        let config = LayoutConfig::default();
        let item = Rect::new(section.rect.x + dx, section.rect.y + dy, 200.0, 150.0);
        prop_assert_eq!(reposition(&item, &section, &section, &config), item.origin());
    }

    #[test]
    fn round_trip_restores_position(
        a in section_strategy(),
        b in section_strategy(),
        fx in 0.0..0.5_f64,
        fy in 0.0..0.5_f64,
    ) {
        let config = LayoutConfig::default();
        let start = Point::new(
            a.rect.x + config.side_margin + fx * (a.rect.width - 2.0 * config.side_margin),
            a.rect.y + config.top_margin
                + fy * (a.rect.height - config.top_margin - config.bottom_margin),
        );
        let item = Rect::from_parts(start, config.min_item_size());

        let there = reposition(&item, &a, &b, &config);
        let back = reposition(&item.with_origin(there), &b, &a, &config);
        prop_assert!((back.x - start.x).abs() < 1e-6);
        prop_assert!((back.y - start.y).abs() < 1e-6);
    }

    #[test]
    fn result_stays_inside_new_placement_area(
        a in section_strategy(),
        b in section_strategy(),
        dx in -1000.0..3000.0_f64,
        dy in -1000.0..3000.0_f64,
    ) {
        let config = LayoutConfig::default();
        let item = Rect::new(a.rect.x + dx, a.rect.y + dy, 200.0, 150.0);
        let moved = item.with_origin(reposition(&item, &a, &b, &config));
        prop_assert!(moved.x >= b.rect.x + config.side_margin - 1e-9);
        prop_assert!(moved.right() <= b.rect.right() - config.side_margin + 1e-9);
        prop_assert!(moved.y >= b.rect.y + config.top_margin - 1e-9);
        prop_assert!(moved.bottom() <= b.rect.bottom() - config.bottom_margin + 1e-9);
    }
}

#[test]
fn degenerate_source_section_does_not_divide_by_zero() {
    let config = LayoutConfig::default();
    let collapsed = Section::with_default_name(1, Rect::new(100.0, 100.0, 0.0, 0.0));
    let target = Section::with_default_name(1, Rect::new(0.0, 0.0, 1000.0, 800.0));
    let item = Rect::new(100.0, 100.0, 200.0, 150.0);
    let moved = reposition(&item, &collapsed, &target, &config);
    assert!(moved.x.is_finite() && moved.y.is_finite());
    assert_eq!(moved, Point::new(10.0, 40.0));
}
