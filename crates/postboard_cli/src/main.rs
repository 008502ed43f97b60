//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `postboard_core` linkage.
//! - Print the section layout for an optional `WIDTHxHEIGHT` canvas argument.

use postboard_core::{compute_layout, BoardSession, LayoutConfig, MAX_SECTIONS};

const DEFAULT_CANVAS: (f64, f64) = (1000.0, 800.0);

fn main() {
    println!("postboard_core ping={}", postboard_core::ping());
    println!("postboard_core version={}", postboard_core::core_version());

    let (width, height) = match std::env::args().nth(1) {
        Some(raw) => match parse_canvas(&raw) {
            Some(size) => size,
            None => {
                eprintln!("expected canvas as WIDTHxHEIGHT, got `{raw}`");
                std::process::exit(2);
            }
        },
        None => DEFAULT_CANVAS,
    };

    for count in 1..=MAX_SECTIONS {
        let sections = compute_layout(count, width, height);
        let rendered: Vec<String> = sections
            .iter()
            .map(|s| {
                format!(
                    "{}@({},{} {}x{})",
                    s.id, s.rect.x, s.rect.y, s.rect.width, s.rect.height
                )
            })
            .collect();
        println!("layout count={count} sections=[{}]", rendered.join(" "));
    }

    let mut session = BoardSession::new(
        postboard_core::CanvasSize::new(width, height),
        LayoutConfig::default(),
    );
    let outcome = session.create_item(width / 2.0, height / 2.0);
    if let Some(item) = outcome
        .created_item()
        .and_then(|id| session.state().item(id))
    {
        println!(
            "first item section={} at=({},{})",
            item.section_id, item.rect.x, item.rect.y
        );
    }
}

fn parse_canvas(raw: &str) -> Option<(f64, f64)> {
    let (w, h) = raw.split_once(['x', 'X'])?;
    let width: f64 = w.trim().parse().ok()?;
    let height: f64 = h.trim().parse().ok()?;
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        .then_some((width, height))
}
