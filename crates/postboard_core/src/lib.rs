//! Layout and placement engine for sectioned note boards.
//! This crate owns section geometry, item placement and board transitions.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod service;
pub mod snapshot;

pub use config::{ConfigError, LayoutConfig};
pub use layout::placement::{clamp_to_section, find_placement, placement_rect, Placement};
pub use layout::reposition::{from_local_fraction, reposition, to_local_fraction, LocalFraction};
pub use layout::sections::{
    carry_forward_names, compute_layout, section_for_position, MAX_SECTIONS,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{
    visible_items, BoardLayoutState, BoardValidationError, CanvasSize, CanvasView, FocusState,
};
pub use model::geometry::{contains, overlaps, Point, Rect, Size};
pub use model::item::{Item, ItemId};
pub use model::section::{Section, SectionId};
pub use service::board_session::{BoardCommand, BoardSession, TransitionOutcome};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::renumber::{remove_section, renumber, Renumbering, SectionRemoval};
pub use service::transitions::{Rejection, SectionDeletion};
pub use snapshot::{decode_board, encode_board, SnapshotError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
