use postboard_core::{
    compute_layout, BoardCommand, BoardLayoutState, BoardSession, BoardValidationError,
    CanvasSize, FocusState, Item, LayoutConfig, ManualClock, Point, Rect, Rejection,
    TransitionOutcome,
};
use std::time::Duration;

fn empty_session() -> BoardSession<ManualClock> {
    BoardSession::with_clock(
        BoardLayoutState::new(CanvasSize::new(1000.0, 800.0)),
        LayoutConfig::default(),
        ManualClock::new(),
    )
}

fn session_with(count: usize, items: Vec<Item>) -> BoardSession<ManualClock> {
    let mut board = BoardLayoutState::new(CanvasSize::new(1000.0, 800.0));
    board.sections = compute_layout(count, 1000.0, 800.0);
    board.items = items;
    BoardSession::restore(board, LayoutConfig::default(), ManualClock::new()).unwrap()
}

fn settle(session: &BoardSession<ManualClock>) {
    session.clock().advance(Duration::from_millis(500));
}

#[test]
fn add_section_stops_at_four() {
    let mut session = empty_session();
    for expected in 2..=4 {
        assert!(session.add_section().is_applied());
        assert_eq!(session.state().section_count(), expected);
        settle(&session);
    }

    let outcome = session.add_section();
    assert_eq!(outcome.rejection(), Some(&Rejection::SectionLimitReached));
    assert_eq!(session.state().section_count(), 4);
    assert_eq!(session.revision(), 3);
}

#[test]
fn burst_of_add_section_applies_once() {
    let mut session = empty_session();
    let outcomes: Vec<_> = (0..3).map(|_| session.add_section()).collect();
    assert!(outcomes[0].is_applied());
    assert!(matches!(
        outcomes[1].rejection(),
        Some(Rejection::Debounced { .. })
    ));
    assert!(matches!(
        outcomes[2].rejection(),
        Some(Rejection::Debounced { .. })
    ));
    assert_eq!(session.state().section_count(), 2);
}

#[test]
fn delete_on_single_section_board_is_noop() {
    let mut session = empty_session();
    let before = session.state().clone();
    let outcome = session.delete_section(1);
    assert_eq!(
        outcome,
        TransitionOutcome::Rejected(Rejection::LastSection)
    );
    assert_eq!(session.state(), &before);
}

#[test]
fn create_item_uses_first_free_grid_slot() {
    let mut session = empty_session();
    let outcome = session.create_item(500.0, 400.0);
    let item_id = outcome.created_item().unwrap();
    let item = session.state().item(item_id).unwrap();

    assert_eq!(item.section_id, 1);
    assert_eq!(item.rect, Rect::new(10.0, 40.0, 200.0, 150.0));
}

#[test]
fn created_items_do_not_overlap_each_other() {
    let mut session = empty_session();
    for _ in 0..8 {
        assert!(session.create_item(500.0, 400.0).is_applied());
    }
    let items = &session.state().items;
    for (index, a) in items.iter().enumerate() {
        for b in &items[index + 1..] {
            assert!(!postboard_core::overlaps(&a.rect, &b.rect), "{} vs {}", a.id, b.id);
        }
    }
}

#[test]
fn add_section_keeps_relative_position() {
    let mut session = empty_session();
    let item_id = session
        .create_item(0.0, 0.0)
        .created_item()
        .unwrap()
        .to_string();
    // horizontal midpoint of the 980px placement width
    let moved = session.apply(BoardCommand::MoveItem {
        item_id: item_id.clone(),
        x: 500.0,
        y: 400.0,
    });
    assert!(moved.is_applied());

    settle(&session);
    assert!(session.add_section().is_applied());

    let sections = &session.state().sections;
    assert_eq!(sections[0].rect, Rect::new(0.0, 0.0, 500.0, 800.0));
    assert_eq!(sections[1].rect, Rect::new(500.0, 0.0, 500.0, 800.0));

    let item = session.state().item(&item_id).unwrap();
    assert_eq!(item.section_id, 1);
    assert!((item.rect.x - 250.0).abs() < 1e-9);
    assert!((item.rect.y - 400.0).abs() < 1e-9);
}

#[test]
fn delete_middle_section_renumbers_and_drops_items() {
    let mut session = session_with(
        3,
        vec![
            Item::with_id("left", 1, Rect::new(10.0, 40.0, 100.0, 80.0)),
            Item::with_id("middle", 2, Rect::new(343.0, 40.0, 100.0, 80.0)),
            Item::with_id("right", 3, Rect::new(676.6, 40.0, 100.0, 80.0)),
        ],
    );
    assert!(session
        .apply(BoardCommand::RenameSection {
            section_id: 3,
            name: "Done".to_string(),
        })
        .is_applied());

    assert!(session.delete_section(2).is_applied());

    let state = session.state();
    let ids: Vec<_> = state.sections.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(state.sections[1].name, "Done");
    assert_eq!(state.sections[1].rect, Rect::new(500.0, 0.0, 500.0, 800.0));

    assert!(state.item("middle").is_none());
    let right = state.item("right").unwrap();
    assert_eq!(right.section_id, 2);
    assert!(right.rect.x >= 510.0 && right.rect.right() <= 990.0);
    assert!(state.validate().is_ok());
}

#[test]
fn delete_focused_section_clears_focus_and_zoom() {
    let mut session = session_with(2, Vec::new());
    assert!(session.zoom_to_section(2).is_applied());
    assert!(session.delete_section(2).is_applied());
    assert_eq!(session.focus(), FocusState::default());
}

#[test]
fn resize_canvas_preserves_ids_names_and_assignment() {
    let mut session = session_with(
        2,
        vec![Item::with_id("a", 2, Rect::new(510.0, 40.0, 200.0, 150.0))],
    );
    assert!(session
        .apply(BoardCommand::RenameSection {
            section_id: 2,
            name: "Later".to_string(),
        })
        .is_applied());

    assert!(session.resize_canvas(2000.0, 1000.0).is_applied());

    let state = session.state();
    assert_eq!(state.canvas_size, CanvasSize::new(2000.0, 1000.0));
    assert_eq!(state.sections[1].name, "Later");
    assert_eq!(state.sections[1].rect, Rect::new(1000.0, 0.0, 1000.0, 1000.0));
    let item = state.item("a").unwrap();
    assert_eq!(item.section_id, 2);
    assert_eq!(item.position(), Point::new(1010.0, 40.0));
}

#[test]
fn resize_canvas_rejects_non_positive_size() {
    let mut session = empty_session();
    let outcome = session.resize_canvas(0.0, 800.0);
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::InvalidCanvasSize { .. })
    ));
    assert_eq!(session.state().canvas_size, CanvasSize::new(1000.0, 800.0));
}

#[test]
fn reassign_item_avoids_other_items_but_not_itself() {
    let mut session = session_with(
        2,
        vec![
            Item::with_id("a", 1, Rect::new(10.0, 40.0, 200.0, 150.0)),
            Item::with_id("b", 2, Rect::new(510.0, 40.0, 200.0, 150.0)),
        ],
    );

    assert!(session.reassign_item("a", 1).is_applied());
    assert_eq!(session.state().item("a").unwrap().position(), Point::new(10.0, 40.0));

    assert!(session.reassign_item("a", 2).is_applied());
    let moved = session.state().item("a").unwrap();
    assert_eq!(moved.section_id, 2);
    assert_eq!(moved.position(), Point::new(710.0, 40.0));
}

#[test]
fn invalid_references_leave_state_unchanged() {
    let mut session = session_with(
        2,
        vec![Item::with_id("a", 1, Rect::new(10.0, 40.0, 200.0, 150.0))],
    );
    let before = session.state().clone();

    let outcomes = [
        session.reassign_item("a", 7),
        session.reassign_item("ghost", 1),
        session.delete_section(9),
        session.zoom_to_section(5),
        session.select_item(Some("ghost")),
        session.apply(BoardCommand::DeleteItem("ghost".to_string())),
    ];
    for outcome in &outcomes {
        assert_eq!(outcome.rejection().map(Rejection::code), Some("invalid_reference"));
    }
    assert_eq!(session.state(), &before);
    assert_eq!(session.revision(), 0);
    assert_eq!(session.focus(), FocusState::default());
}

#[test]
fn focus_follows_selection_but_not_deselection() {
    let mut session = session_with(
        3,
        vec![
            Item::with_id("a", 1, Rect::new(10.0, 40.0, 100.0, 80.0)),
            Item::with_id("c", 3, Rect::new(676.6, 40.0, 100.0, 80.0)),
        ],
    );

    assert!(session.select_item(Some("c")).is_applied());
    assert_eq!(session.focus().focused_section_id, Some(3));

    assert!(session.select_item(None).is_applied());
    assert_eq!(session.focus().focused_section_id, Some(3));
    assert_eq!(session.view().selected_item_id, None);

    assert!(session.select_item(Some("a")).is_applied());
    assert_eq!(session.focus().focused_section_id, Some(1));
}

#[test]
fn create_item_goes_to_focused_section() {
    let mut session = session_with(2, Vec::new());
    assert!(session
        .apply(BoardCommand::FocusSection(Some(2)))
        .is_applied());

    let item_id = session
        .create_item(100.0, 100.0)
        .created_item()
        .unwrap()
        .to_string();
    let item = session.state().item(&item_id).unwrap();
    assert_eq!(item.section_id, 2);
    assert_eq!(item.position(), Point::new(510.0, 40.0));
}

#[test]
fn zoom_is_view_only() {
    let mut session = session_with(
        2,
        vec![
            Item::with_id("a", 1, Rect::new(10.0, 40.0, 100.0, 80.0)),
            Item::with_id("b", 2, Rect::new(510.0, 40.0, 100.0, 80.0)),
        ],
    );
    let before = session.state().clone();

    assert!(session.zoom_to_section(2).is_applied());
    assert_eq!(
        session.focus(),
        FocusState {
            focused_section_id: Some(2),
            zoomed: true,
        }
    );
    let visible: Vec<_> = session.visible_items().map(|i| i.id.clone()).collect();
    assert_eq!(visible, vec!["b".to_string()]);

    assert!(session.zoom_out().is_applied());
    assert_eq!(session.focus(), FocusState::default());
    assert_eq!(session.visible_items().count(), 2);
    assert_eq!(session.state(), &before);
}

#[test]
fn delete_item_clears_selection() {
    let mut session = empty_session();
    let item_id = session
        .create_item(0.0, 0.0)
        .created_item()
        .unwrap()
        .to_string();
    assert_eq!(session.view().selected_item_id.as_deref(), Some(item_id.as_str()));

    assert!(session
        .apply(BoardCommand::DeleteItem(item_id.clone()))
        .is_applied());
    assert!(session.state().items.is_empty());
    assert_eq!(session.view().selected_item_id, None);
}

#[test]
fn item_edits_update_content_and_size() {
    let mut session = session_with(
        1,
        vec![Item::with_id("a", 1, Rect::new(10.0, 40.0, 200.0, 150.0))],
    );
    assert!(session
        .apply(BoardCommand::SetItemText {
            item_id: "a".to_string(),
            text: "ship it".to_string(),
        })
        .is_applied());
    assert!(session
        .apply(BoardCommand::ResizeItem {
            item_id: "a".to_string(),
            width: 50.0,
            height: 120.0,
        })
        .is_applied());

    let item = session.state().item("a").unwrap();
    assert_eq!(item.text, "ship it");
    assert_eq!(item.rect, Rect::new(10.0, 40.0, 100.0, 120.0));
    assert_eq!(session.revision(), 2);
}

#[test]
fn restore_rejects_inconsistent_board() {
    let mut board = BoardLayoutState::new(CanvasSize::new(1000.0, 800.0));
    board
        .items
        .push(Item::with_id("a", 2, Rect::new(10.0, 40.0, 100.0, 80.0)));
    let result = BoardSession::restore(board, LayoutConfig::default(), ManualClock::new());
    assert!(result.is_err());
}

#[test]
fn restore_rejects_sections_off_canvas() {
    let mut board = BoardLayoutState::new(CanvasSize::new(1000.0, 800.0));
    board.sections[0].rect = Rect::new(5000.0, -300.0, 10.0, 10.0);
    let result = BoardSession::restore(board, LayoutConfig::default(), ManualClock::new());
    assert!(matches!(
        result,
        Err(BoardValidationError::SectionGeometryMismatch(1))
    ));
}

#[test]
fn move_outside_every_section_keeps_owner() {
    let mut session = session_with(
        2,
        vec![Item::with_id("a", 2, Rect::new(510.0, 40.0, 200.0, 150.0))],
    );
    let outcome = session.apply(BoardCommand::MoveItem {
        item_id: "a".to_string(),
        x: 1500.0,
        y: 100.0,
    });
    assert!(outcome.is_applied());

    let item = session.state().item("a").unwrap();
    assert_eq!(item.section_id, 2);
    assert_eq!(item.rect, Rect::new(790.0, 100.0, 200.0, 150.0));
}

#[test]
fn resize_item_rejects_non_finite_size() {
    let mut session = session_with(
        1,
        vec![Item::with_id("a", 1, Rect::new(10.0, 40.0, 200.0, 150.0))],
    );
    let before = session.state().clone();

    for (width, height) in [(f64::NAN, 100.0), (120.0, f64::INFINITY)] {
        let outcome = session.apply(BoardCommand::ResizeItem {
            item_id: "a".to_string(),
            width,
            height,
        });
        assert!(matches!(
            outcome.rejection(),
            Some(Rejection::InvalidDimensions { .. })
        ));
    }
    assert_eq!(session.state(), &before);
    assert_eq!(session.revision(), 0);
}

#[test]
fn clearing_focus_also_leaves_zoom() {
    let mut session = session_with(2, Vec::new());
    assert!(session.zoom_to_section(2).is_applied());
    assert!(session.focus().zoomed);

    assert!(session.apply(BoardCommand::FocusSection(None)).is_applied());
    assert_eq!(session.focus(), FocusState::default());
}

#[test]
fn select_section_checks_the_id() {
    let mut session = session_with(2, Vec::new());

    let outcome = session.apply(BoardCommand::SelectSection(Some(9)));
    assert_eq!(outcome.rejection(), Some(&Rejection::UnknownSection(9)));
    assert_eq!(session.view().selected_section_id, None);
    assert_eq!(session.revision(), 0);

    assert!(session.apply(BoardCommand::SelectSection(Some(2))).is_applied());
    assert_eq!(session.view().selected_section_id, Some(2));
}

#[test]
fn set_pan_stores_finite_offsets_only() {
    let mut session = empty_session();
    assert!(session
        .apply(BoardCommand::SetPan { x: -120.0, y: 35.5 })
        .is_applied());
    assert_eq!((session.view().pan_x, session.view().pan_y), (-120.0, 35.5));

    let outcome = session.apply(BoardCommand::SetPan {
        x: f64::NAN,
        y: 0.0,
    });
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::InvalidPosition { .. })
    ));
    assert_eq!((session.view().pan_x, session.view().pan_y), (-120.0, 35.5));
}

#[test]
fn delete_section_clears_section_and_dropped_item_selection() {
    let mut session = session_with(
        3,
        vec![
            Item::with_id("a", 1, Rect::new(10.0, 40.0, 100.0, 80.0)),
            Item::with_id("b", 2, Rect::new(343.3, 40.0, 100.0, 80.0)),
        ],
    );
    assert!(session.select_item(Some("b")).is_applied());
    assert!(session.apply(BoardCommand::SelectSection(Some(1))).is_applied());

    assert!(session.delete_section(2).is_applied());
    assert_eq!(session.view().selected_item_id, None);
    assert_eq!(session.view().selected_section_id, None);
    assert!(session.state().item("b").is_none());
}

#[test]
fn delete_section_keeps_surviving_item_selected() {
    let mut session = session_with(
        3,
        vec![Item::with_id("c", 3, Rect::new(676.6, 40.0, 100.0, 80.0))],
    );
    assert!(session.select_item(Some("c")).is_applied());

    assert!(session.delete_section(1).is_applied());
    assert_eq!(session.view().selected_item_id.as_deref(), Some("c"));
    assert_eq!(session.focus().focused_section_id, Some(2));
}
