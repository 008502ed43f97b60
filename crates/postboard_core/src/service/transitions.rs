//! Pure board transitions.
//!
//! # Responsibility
//! - Turn one structural or item request into a new board snapshot.
//! - Orchestrate layout, reposition and placement for each request.
//! - Derive focus updates for selection, zoom and section deletion.
//!
//! # Invariants
//! - Inputs are never mutated; every success returns a fresh value.
//! - A `Rejection` means the caller keeps its previous state unchanged.
//! - Section ids stay dense and every item references an existing section.

use crate::config::LayoutConfig;
use crate::layout::placement::{clamp_to_section, find_placement};
use crate::layout::reposition::reposition;
use crate::layout::sections::{
    carry_forward_names, compute_layout, section_for_position, MAX_SECTIONS,
};
use crate::model::board::{BoardLayoutState, CanvasSize, FocusState};
use crate::model::geometry::{Point, Rect, Size};
use crate::model::item::{Item, ItemId};
use crate::model::section::{Section, SectionId};
use crate::service::renumber::{remove_section, renumber};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Reason a transition left the state unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// No section has this id.
    UnknownSection(SectionId),
    /// No item has this id.
    UnknownItem(ItemId),
    /// Caller-provided item id is already used.
    DuplicateItemId(ItemId),
    /// Board already has the maximum number of sections.
    SectionLimitReached,
    /// The last remaining section cannot be deleted.
    LastSection,
    /// AddSection arrived inside the debounce window.
    Debounced { retry_after: Duration },
    /// Canvas width/height not finite and positive.
    InvalidCanvasSize { width: f64, height: f64 },
    /// Item width/height not finite.
    InvalidDimensions { width: f64, height: f64 },
    /// Coordinates not finite.
    InvalidPosition { x: f64, y: f64 },
    /// Zoom factor not finite.
    InvalidZoom(f64),
    /// Section name is blank after trim.
    BlankSectionName,
    /// Board has no section to place into.
    EmptyBoard,
}

impl Rejection {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownSection(_) | Self::UnknownItem(_) => "invalid_reference",
            Self::DuplicateItemId(_) => "duplicate_item_id",
            Self::SectionLimitReached => "section_limit_reached",
            Self::LastSection => "last_section",
            Self::Debounced { .. } => "debounced",
            Self::InvalidCanvasSize { .. }
            | Self::InvalidDimensions { .. }
            | Self::InvalidPosition { .. }
            | Self::InvalidZoom(_)
            | Self::BlankSectionName => "invalid_input",
            Self::EmptyBoard => "empty_board",
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSection(id) => write!(f, "section not found: {id}"),
            Self::UnknownItem(id) => write!(f, "item not found: {id}"),
            Self::DuplicateItemId(id) => write!(f, "item id already in use: {id}"),
            Self::SectionLimitReached => {
                write!(f, "board already has {MAX_SECTIONS} sections")
            }
            Self::LastSection => write!(f, "cannot delete the last section"),
            Self::Debounced { retry_after } => write!(
                f,
                "add section debounced; retry after {}ms",
                retry_after.as_millis()
            ),
            Self::InvalidCanvasSize { width, height } => {
                write!(f, "invalid canvas size {width}x{height}")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid item size {width}x{height}")
            }
            Self::InvalidPosition { x, y } => write!(f, "invalid position ({x}, {y})"),
            Self::InvalidZoom(zoom) => write!(f, "invalid zoom factor {zoom}"),
            Self::BlankSectionName => write!(f, "section name must not be blank"),
            Self::EmptyBoard => write!(f, "board has no sections"),
        }
    }
}

impl Error for Rejection {}

/// Result type for pure transitions.
pub type TransitionResult<T> = Result<T, Rejection>;

/// New snapshot after DeleteSection, with the old-to-new id mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDeletion {
    pub state: BoardLayoutState,
    pub deleted_id: SectionId,
    pub id_map: Vec<(SectionId, SectionId)>,
}

impl SectionDeletion {
    /// Renumbered id of a surviving section.
    pub fn new_id(&self, old_id: SectionId) -> Option<SectionId> {
        self.id_map
            .iter()
            .find(|(old, _)| *old == old_id)
            .map(|(_, new)| *new)
    }
}

/// Rejects growth once the board holds `MAX_SECTIONS` sections.
pub fn ensure_section_capacity(state: &BoardLayoutState) -> TransitionResult<()> {
    if state.section_count() >= MAX_SECTIONS {
        Err(Rejection::SectionLimitReached)
    } else {
        Ok(())
    }
}

/// Grows the board by one section and repositions every item.
pub fn add_section(
    state: &BoardLayoutState,
    config: &LayoutConfig,
) -> TransitionResult<BoardLayoutState> {
    ensure_section_capacity(state)?;
    let count = state.section_count();
    let sections = carry_forward_names(
        compute_layout(
            count + 1,
            state.canvas_size.width,
            state.canvas_size.height,
        ),
        &state.sections,
    );
    let items = reposition_items(&state.items, &state.sections, &sections, config);
    Ok(BoardLayoutState {
        sections,
        items,
        canvas_size: state.canvas_size,
    })
}

/// Removes one section and its items, renumbers survivors and re-lays out.
pub fn delete_section(
    state: &BoardLayoutState,
    section_id: SectionId,
    config: &LayoutConfig,
) -> TransitionResult<SectionDeletion> {
    if state.section(section_id).is_none() {
        return Err(Rejection::UnknownSection(section_id));
    }
    if state.section_count() <= 1 {
        return Err(Rejection::LastSection);
    }
    let removal = remove_section(&state.sections, &state.items, section_id)
        .ok_or(Rejection::UnknownSection(section_id))?;
    let renumbered = renumber(removal);

    // Names follow relative order; geometry comes from the fresh layout.
    let sections: Vec<Section> = compute_layout(
        renumbered.sections.len(),
        state.canvas_size.width,
        state.canvas_size.height,
    )
    .into_iter()
    .zip(renumbered.sections.iter())
    .map(|(mut fresh, survivor)| {
        fresh.name = survivor.name.clone();
        fresh
    })
    .collect();

    let items = reposition_items(&renumbered.items, &renumbered.sections, &sections, config);
    Ok(SectionDeletion {
        state: BoardLayoutState {
            sections,
            items,
            canvas_size: state.canvas_size,
        },
        deleted_id: section_id,
        id_map: renumbered.id_map,
    })
}

/// Re-lays out the current section count against a new canvas size.
pub fn resize_canvas(
    state: &BoardLayoutState,
    canvas_size: CanvasSize,
    config: &LayoutConfig,
) -> TransitionResult<BoardLayoutState> {
    if !canvas_size.is_positive() {
        return Err(Rejection::InvalidCanvasSize {
            width: canvas_size.width,
            height: canvas_size.height,
        });
    }
    let sections = carry_forward_names(
        compute_layout(
            state.section_count(),
            canvas_size.width,
            canvas_size.height,
        ),
        &state.sections,
    );
    let items = reposition_items(&state.items, &state.sections, &sections, config);
    Ok(BoardLayoutState {
        sections,
        items,
        canvas_size,
    })
}

/// Section that receives a new item requested at `hint`.
///
/// Focused section first, then the section containing the hint, then the
/// first section.
pub fn resolve_target_section<'a>(
    state: &'a BoardLayoutState,
    focus: &FocusState,
    hint: Point,
) -> Option<&'a Section> {
    focus
        .focused_section_id
        .and_then(|id| state.section(id))
        .or_else(|| section_for_position(&state.sections, hint.x, hint.y))
        .or_else(|| state.sections.first())
}

/// Adds a default-sized item near `hint`, at the first free slot of its section.
pub fn create_item(
    state: &BoardLayoutState,
    focus: &FocusState,
    hint: Point,
    item_id: ItemId,
    config: &LayoutConfig,
) -> TransitionResult<BoardLayoutState> {
    ensure_finite_point(hint)?;
    if state.item(&item_id).is_some() {
        return Err(Rejection::DuplicateItemId(item_id));
    }
    let target = resolve_target_section(state, focus, hint).ok_or(Rejection::EmptyBoard)?;
    let occupied = occupied_rects(state, target.id, None);
    let candidate = Rect::from_parts(hint, config.default_item_size());
    let placement = find_placement(&candidate, target, &occupied, config);

    let item = Item::with_id(item_id, target.id, candidate.with_origin(placement.position()));
    let mut next = state.clone();
    next.items.push(item);
    Ok(next)
}

/// Moves an item into another section at a free slot.
pub fn reassign_item(
    state: &BoardLayoutState,
    item_id: &str,
    section_id: SectionId,
    config: &LayoutConfig,
) -> TransitionResult<BoardLayoutState> {
    let target = state
        .section(section_id)
        .ok_or(Rejection::UnknownSection(section_id))?;
    let item = state
        .item(item_id)
        .ok_or_else(|| Rejection::UnknownItem(item_id.to_string()))?;
    let occupied = occupied_rects(state, section_id, Some(item_id));
    let position = find_placement(&item.rect, target, &occupied, config).position();

    update_item(state, item_id, |item| {
        item.section_id = section_id;
        item.move_to(position);
    })
}

/// Drops an item at `position`; the section under the point adopts it.
///
/// The origin is clamped into the adopting section's placement area.
pub fn move_item(
    state: &BoardLayoutState,
    item_id: &str,
    position: Point,
    config: &LayoutConfig,
) -> TransitionResult<BoardLayoutState> {
    ensure_finite_point(position)?;
    let item = state
        .item(item_id)
        .ok_or_else(|| Rejection::UnknownItem(item_id.to_string()))?;
    let target = section_for_position(&state.sections, position.x, position.y)
        .or_else(|| state.section(item.section_id))
        .ok_or(Rejection::UnknownSection(item.section_id))?;
    let section_id = target.id;
    let clamped = clamp_to_section(position, item.rect.size(), target, config);

    update_item(state, item_id, |item| {
        item.section_id = section_id;
        item.move_to(clamped);
    })
}

/// Resizes an item, enforcing the configured minimum size.
pub fn resize_item(
    state: &BoardLayoutState,
    item_id: &str,
    size: Size,
    config: &LayoutConfig,
) -> TransitionResult<BoardLayoutState> {
    if !(size.width.is_finite() && size.height.is_finite()) {
        return Err(Rejection::InvalidDimensions {
            width: size.width,
            height: size.height,
        });
    }
    let width = size.width.max(config.min_item_width);
    let height = size.height.max(config.min_item_height);
    update_item(state, item_id, |item| {
        item.rect = Rect::new(item.rect.x, item.rect.y, width, height);
    })
}

/// Replaces an item's text.
pub fn set_item_text(
    state: &BoardLayoutState,
    item_id: &str,
    text: impl Into<String>,
) -> TransitionResult<BoardLayoutState> {
    let text = text.into();
    update_item(state, item_id, |item| item.text = text)
}

/// Removes an item.
pub fn delete_item(state: &BoardLayoutState, item_id: &str) -> TransitionResult<BoardLayoutState> {
    if state.item(item_id).is_none() {
        return Err(Rejection::UnknownItem(item_id.to_string()));
    }
    let mut next = state.clone();
    next.items.retain(|item| item.id != item_id);
    Ok(next)
}

/// Renames a section; the name is trimmed and must not be blank.
pub fn rename_section(
    state: &BoardLayoutState,
    section_id: SectionId,
    name: &str,
) -> TransitionResult<BoardLayoutState> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Rejection::BlankSectionName);
    }
    let mut next = state.clone();
    let section = next
        .sections
        .iter_mut()
        .find(|section| section.id == section_id)
        .ok_or(Rejection::UnknownSection(section_id))?;
    section.name = trimmed.to_string();
    Ok(next)
}

/// Focus after selecting `item_id`: moves to the item's section if different.
pub fn focus_follows_selection(
    state: &BoardLayoutState,
    focus: FocusState,
    item_id: &str,
) -> TransitionResult<FocusState> {
    let item = state
        .item(item_id)
        .ok_or_else(|| Rejection::UnknownItem(item_id.to_string()))?;
    if focus.focused_section_id == Some(item.section_id) {
        return Ok(focus);
    }
    Ok(FocusState {
        focused_section_id: Some(item.section_id),
        zoomed: focus.zoomed,
    })
}

/// Focuses a section, or clears focus (and zoom) with `None`.
pub fn focus_section(
    state: &BoardLayoutState,
    focus: FocusState,
    section_id: Option<SectionId>,
) -> TransitionResult<FocusState> {
    match section_id {
        Some(id) => {
            state.section(id).ok_or(Rejection::UnknownSection(id))?;
            Ok(FocusState {
                focused_section_id: Some(id),
                zoomed: focus.zoomed,
            })
        }
        None => Ok(FocusState::default()),
    }
}

/// Focuses and zooms into one section.
pub fn zoom_to_section(
    state: &BoardLayoutState,
    section_id: SectionId,
) -> TransitionResult<FocusState> {
    state
        .section(section_id)
        .ok_or(Rejection::UnknownSection(section_id))?;
    Ok(FocusState {
        focused_section_id: Some(section_id),
        zoomed: true,
    })
}

/// Leaves the zoomed view and clears focus.
pub fn zoom_out() -> FocusState {
    FocusState::default()
}

/// Focus after DeleteSection: dropped if it pointed at the deleted section,
/// otherwise remapped to the renumbered id.
pub fn remap_focus_after_delete(focus: FocusState, deletion: &SectionDeletion) -> FocusState {
    let Some(focused) = focus.focused_section_id else {
        return focus;
    };
    if focused == deletion.deleted_id {
        return FocusState::default();
    }
    match deletion.new_id(focused) {
        Some(new_id) => FocusState {
            focused_section_id: Some(new_id),
            zoomed: focus.zoomed,
        },
        None => FocusState::default(),
    }
}

fn reposition_items(
    items: &[Item],
    old_sections: &[Section],
    new_sections: &[Section],
    config: &LayoutConfig,
) -> Vec<Item> {
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            let old = old_sections.iter().find(|s| s.id == item.section_id);
            let new = new_sections.iter().find(|s| s.id == item.section_id);
            if let (Some(old), Some(new)) = (old, new) {
                let position = reposition(&item.rect, old, new, config);
                item.move_to(position);
            }
            item
        })
        .collect()
}

fn occupied_rects(
    state: &BoardLayoutState,
    section_id: SectionId,
    exclude: Option<&str>,
) -> Vec<Rect> {
    state
        .items_in_section(section_id)
        .filter(|item| exclude != Some(item.id.as_str()))
        .map(|item| item.rect)
        .collect()
}

fn update_item(
    state: &BoardLayoutState,
    item_id: &str,
    apply: impl FnOnce(&mut Item),
) -> TransitionResult<BoardLayoutState> {
    let mut next = state.clone();
    let item = next
        .items
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or_else(|| Rejection::UnknownItem(item_id.to_string()))?;
    apply(item);
    Ok(next)
}

fn ensure_finite_point(point: Point) -> TransitionResult<()> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(Rejection::InvalidPosition {
            x: point.x,
            y: point.y,
        })
    }
}
