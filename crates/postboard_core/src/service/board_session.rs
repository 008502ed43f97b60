//! Board session state machine.
//!
//! # Responsibility
//! - Own the current board snapshot plus focus and view overlays.
//! - Dispatch decoded commands to pure transitions and swap in results.
//! - Debounce bursty AddSection requests with a session-owned timestamp.
//!
//! # Invariants
//! - State is replaced as a whole on success and untouched on rejection.
//! - `revision` increases by exactly one per applied command.
//! - Two AddSection commands are never both applied within the debounce window.

use crate::config::{ConfigError, LayoutConfig};
use crate::model::board::{
    visible_items, BoardLayoutState, BoardValidationError, CanvasSize, CanvasView, FocusState,
};
use crate::model::geometry::{Point, Size};
use crate::model::item::{new_item_id, Item, ItemId};
use crate::model::section::SectionId;
use crate::service::clock::{Clock, SystemClock};
use crate::service::transitions::{self, Rejection, TransitionResult};
use log::{debug, info};
use std::time::Instant;

/// Already-decoded request from the input layer.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    AddSection,
    DeleteSection(SectionId),
    ResizeCanvas { width: f64, height: f64 },
    RenameSection { section_id: SectionId, name: String },
    CreateItem { x: f64, y: f64 },
    ReassignItem { item_id: ItemId, section_id: SectionId },
    MoveItem { item_id: ItemId, x: f64, y: f64 },
    ResizeItem { item_id: ItemId, width: f64, height: f64 },
    SetItemText { item_id: ItemId, text: String },
    DeleteItem(ItemId),
    SelectItem(Option<ItemId>),
    SelectSection(Option<SectionId>),
    FocusSection(Option<SectionId>),
    ZoomToSection(SectionId),
    ZoomOut,
    SetZoom(f64),
    SetPan { x: f64, y: f64 },
}

impl BoardCommand {
    /// Stable name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSection => "add_section",
            Self::DeleteSection(_) => "delete_section",
            Self::ResizeCanvas { .. } => "resize_canvas",
            Self::RenameSection { .. } => "rename_section",
            Self::CreateItem { .. } => "create_item",
            Self::ReassignItem { .. } => "reassign_item",
            Self::MoveItem { .. } => "move_item",
            Self::ResizeItem { .. } => "resize_item",
            Self::SetItemText { .. } => "set_item_text",
            Self::DeleteItem(_) => "delete_item",
            Self::SelectItem(_) => "select_item",
            Self::SelectSection(_) => "select_section",
            Self::FocusSection(_) => "focus_section",
            Self::ZoomToSection(_) => "zoom_to_section",
            Self::ZoomOut => "zoom_out",
            Self::SetZoom(_) => "set_zoom",
            Self::SetPan { .. } => "set_pan",
        }
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// State replaced; `revision` is the new revision.
    Applied { revision: u64 },
    /// CreateItem applied; carries the generated item id.
    Created { revision: u64, item_id: ItemId },
    /// State unchanged.
    Rejected(Rejection),
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    pub fn created_item(&self) -> Option<&str> {
        match self {
            Self::Created { item_id, .. } => Some(item_id.as_str()),
            _ => None,
        }
    }
}

/// Everything a command may replace, swapped in one assignment.
#[derive(Debug, Clone)]
struct Snapshot {
    board: BoardLayoutState,
    focus: FocusState,
    view: CanvasView,
}

/// One editing session over a single board.
pub struct BoardSession<C: Clock = SystemClock> {
    current: Snapshot,
    config: LayoutConfig,
    clock: C,
    revision: u64,
    last_add_section_at: Option<Instant>,
}

impl BoardSession<SystemClock> {
    /// Creates a session over an empty single-section board.
    ///
    /// `config` is trusted as given; use [`Self::try_new`] for configs built
    /// by hand rather than through [`LayoutConfig::from_json_str`] or
    /// `LayoutConfig::default()`.
    pub fn new(canvas_size: CanvasSize, config: LayoutConfig) -> Self {
        Self::with_clock(BoardLayoutState::new(canvas_size), config, SystemClock)
    }

    /// Like [`Self::new`], but checks `config` first.
    ///
    /// # Errors
    /// - Returns the first invalid config field.
    pub fn try_new(canvas_size: CanvasSize, config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(canvas_size, config))
    }
}

impl<C: Clock> BoardSession<C> {
    /// Creates a session over `board` without validating it or `config`.
    ///
    /// Use [`Self::restore`] for snapshots loaded from outside the engine.
    pub fn with_clock(board: BoardLayoutState, config: LayoutConfig, clock: C) -> Self {
        Self {
            current: Snapshot {
                board,
                focus: FocusState::default(),
                view: CanvasView::default(),
            },
            config,
            clock,
            revision: 0,
            last_add_section_at: None,
        }
    }

    /// Creates a session over a loaded snapshot after checking its invariants.
    ///
    /// # Errors
    /// - Returns the first structural invariant the snapshot violates.
    pub fn restore(
        board: BoardLayoutState,
        config: LayoutConfig,
        clock: C,
    ) -> Result<Self, BoardValidationError> {
        board.validate()?;
        Ok(Self::with_clock(board, config, clock))
    }

    pub fn state(&self) -> &BoardLayoutState {
        &self.current.board
    }

    pub fn focus(&self) -> FocusState {
        self.current.focus
    }

    pub fn view(&self) -> &CanvasView {
        &self.current.view
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of commands applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Items shown under the current focus/zoom.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        visible_items(&self.current.board, &self.current.focus)
    }

    /// Applies one command. Rejected commands leave every field unchanged.
    pub fn apply(&mut self, command: BoardCommand) -> TransitionOutcome {
        let name = command.name();
        let now = self.clock.now();
        let is_add_section = matches!(command, BoardCommand::AddSection);

        let result = if is_add_section {
            self.check_debounce(now)
                .and_then(|()| self.next_snapshot(command))
        } else {
            self.next_snapshot(command)
        };

        match result {
            Ok((next, created)) => {
                self.current = next;
                self.revision += 1;
                if is_add_section {
                    self.last_add_section_at = Some(now);
                }
                debug!(
                    "event=transition module=session status=ok command={} revision={} sections={} items={}",
                    name,
                    self.revision,
                    self.current.board.section_count(),
                    self.current.board.items.len()
                );
                match created {
                    Some(item_id) => TransitionOutcome::Created {
                        revision: self.revision,
                        item_id,
                    },
                    None => TransitionOutcome::Applied {
                        revision: self.revision,
                    },
                }
            }
            Err(rejection) => {
                info!(
                    "event=transition module=session status=rejected command={} revision={} error_code={} error={}",
                    name,
                    self.revision,
                    rejection.code(),
                    rejection
                );
                TransitionOutcome::Rejected(rejection)
            }
        }
    }

    pub fn add_section(&mut self) -> TransitionOutcome {
        self.apply(BoardCommand::AddSection)
    }

    pub fn delete_section(&mut self, section_id: SectionId) -> TransitionOutcome {
        self.apply(BoardCommand::DeleteSection(section_id))
    }

    pub fn resize_canvas(&mut self, width: f64, height: f64) -> TransitionOutcome {
        self.apply(BoardCommand::ResizeCanvas { width, height })
    }

    pub fn create_item(&mut self, x: f64, y: f64) -> TransitionOutcome {
        self.apply(BoardCommand::CreateItem { x, y })
    }

    pub fn reassign_item(&mut self, item_id: &str, section_id: SectionId) -> TransitionOutcome {
        self.apply(BoardCommand::ReassignItem {
            item_id: item_id.to_string(),
            section_id,
        })
    }

    pub fn select_item(&mut self, item_id: Option<&str>) -> TransitionOutcome {
        self.apply(BoardCommand::SelectItem(item_id.map(str::to_string)))
    }

    pub fn zoom_to_section(&mut self, section_id: SectionId) -> TransitionOutcome {
        self.apply(BoardCommand::ZoomToSection(section_id))
    }

    pub fn zoom_out(&mut self) -> TransitionOutcome {
        self.apply(BoardCommand::ZoomOut)
    }

    fn check_debounce(&self, now: Instant) -> TransitionResult<()> {
        // Section limit is reported ahead of the debounce window.
        transitions::ensure_section_capacity(&self.current.board)?;
        let window = self.config.add_section_debounce();
        match self.last_add_section_at {
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                if elapsed < window {
                    Err(Rejection::Debounced {
                        retry_after: window - elapsed,
                    })
                } else {
                    Ok(())
                }
            }
            None => Ok(()),
        }
    }

    fn next_snapshot(&self, command: BoardCommand) -> TransitionResult<(Snapshot, Option<ItemId>)> {
        let config = &self.config;
        let board = &self.current.board;
        let mut next = self.current.clone();
        let mut created = None;

        match command {
            BoardCommand::AddSection => {
                next.board = transitions::add_section(board, config)?;
            }
            BoardCommand::DeleteSection(section_id) => {
                let deletion = transitions::delete_section(board, section_id, config)?;
                next.focus = transitions::remap_focus_after_delete(next.focus, &deletion);
                next.view.selected_section_id = None;
                next.board = deletion.state;
                if let Some(selected) = next.view.selected_item_id.as_deref() {
                    if next.board.item(selected).is_none() {
                        next.view.selected_item_id = None;
                    }
                }
            }
            BoardCommand::ResizeCanvas { width, height } => {
                next.board =
                    transitions::resize_canvas(board, CanvasSize::new(width, height), config)?;
            }
            BoardCommand::RenameSection { section_id, name } => {
                next.board = transitions::rename_section(board, section_id, &name)?;
            }
            BoardCommand::CreateItem { x, y } => {
                let item_id = new_item_id();
                next.board = transitions::create_item(
                    board,
                    &next.focus,
                    Point::new(x, y),
                    item_id.clone(),
                    config,
                )?;
                next.focus = transitions::focus_follows_selection(&next.board, next.focus, &item_id)?;
                next.view.selected_item_id = Some(item_id.clone());
                created = Some(item_id);
            }
            BoardCommand::ReassignItem {
                item_id,
                section_id,
            } => {
                next.board = transitions::reassign_item(board, &item_id, section_id, config)?;
                next.focus = self.focus_if_selected(&next, &item_id)?;
            }
            BoardCommand::MoveItem { item_id, x, y } => {
                next.board = transitions::move_item(board, &item_id, Point::new(x, y), config)?;
                next.focus = self.focus_if_selected(&next, &item_id)?;
            }
            BoardCommand::ResizeItem {
                item_id,
                width,
                height,
            } => {
                next.board =
                    transitions::resize_item(board, &item_id, Size::new(width, height), config)?;
            }
            BoardCommand::SetItemText { item_id, text } => {
                next.board = transitions::set_item_text(board, &item_id, text)?;
            }
            BoardCommand::DeleteItem(item_id) => {
                next.board = transitions::delete_item(board, &item_id)?;
                if next.view.selected_item_id.as_deref() == Some(item_id.as_str()) {
                    next.view.selected_item_id = None;
                }
            }
            BoardCommand::SelectItem(Some(item_id)) => {
                next.focus = transitions::focus_follows_selection(board, next.focus, &item_id)?;
                next.view.selected_item_id = Some(item_id);
            }
            BoardCommand::SelectItem(None) => {
                next.view.selected_item_id = None;
            }
            BoardCommand::SelectSection(section_id) => {
                if let Some(id) = section_id {
                    board.section(id).ok_or(Rejection::UnknownSection(id))?;
                }
                next.view.selected_section_id = section_id;
            }
            BoardCommand::FocusSection(section_id) => {
                next.focus = transitions::focus_section(board, next.focus, section_id)?;
            }
            BoardCommand::ZoomToSection(section_id) => {
                next.focus = transitions::zoom_to_section(board, section_id)?;
            }
            BoardCommand::ZoomOut => {
                next.focus = transitions::zoom_out();
            }
            BoardCommand::SetZoom(zoom) => {
                if !zoom.is_finite() {
                    return Err(Rejection::InvalidZoom(zoom));
                }
                next.view.zoom = zoom.clamp(config.min_zoom, config.max_zoom);
            }
            BoardCommand::SetPan { x, y } => {
                if !(x.is_finite() && y.is_finite()) {
                    return Err(Rejection::InvalidPosition { x, y });
                }
                next.view.pan_x = x;
                next.view.pan_y = y;
            }
        }

        Ok((next, created))
    }

    fn focus_if_selected(&self, next: &Snapshot, item_id: &str) -> TransitionResult<FocusState> {
        if next.view.selected_item_id.as_deref() == Some(item_id) {
            transitions::focus_follows_selection(&next.board, next.focus, item_id)
        } else {
            Ok(next.focus)
        }
    }
}
