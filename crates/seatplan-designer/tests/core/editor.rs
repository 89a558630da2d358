use seatplan_core::Error;
use seatplan_designer::{
    CreateRequest, Editor, EditorAction, Key, Margins, Mode, Orientation, PointerEvent,
    SeatShape, TableSeating, TableType,
};
use seatplan_settings::Config;

fn panel(count: u32) -> CreateRequest {
    CreateRequest::Panel {
        count,
        table_type: TableType::Table,
        orientation: Orientation::Horizontal,
        margins: Margins::default(),
    }
}

#[test]
fn test_create_then_delete_restores_counts() {
    let mut editor = Editor::default();
    let before = editor.workspace().options().table.count;
    let id = editor.create((10.0, 10.0), panel(4)).unwrap()[0];
    assert_eq!(editor.workspace().options().table.count, before + 4);

    assert_eq!(editor.delete_entities(&[id]), 1);
    assert_eq!(editor.workspace().options().table.count, before);
    assert!(!editor.scene().contains(id));
    // Deleting again is a no-op.
    assert_eq!(editor.delete_entities(&[id]), 0);
}

#[test]
fn test_drag_moves_and_reverts_on_collision() {
    let mut editor = Editor::default();
    let a = editor.create((0.0, 0.0), panel(1)).unwrap()[0];
    let b = editor.create((200.0, 0.0), panel(1)).unwrap()[0];

    editor.pointer_down(PointerEvent::at(50.0, 30.0));
    assert!(editor.selection().is_selected(a));
    editor.pointer_move(PointerEvent::moved(70.0, 30.0, 20.0, 0.0));
    assert_eq!(editor.scene().get(a).unwrap().rect.x, 20.0);

    // A 200 px jump lands on b: the move is dropped.
    let action = editor.pointer_move(PointerEvent::moved(270.0, 30.0, 200.0, 0.0));
    assert_eq!(action, EditorAction::None);
    assert_eq!(editor.scene().get(a).unwrap().rect.x, 20.0);
    assert_eq!(editor.scene().get(b).unwrap().rect.x, 200.0);

    editor.pointer_up(PointerEvent::at(70.0, 30.0));
    assert!(editor.selection().is_selected(a));
    assert!(editor.selection().dragging().is_empty());
}

#[test]
fn test_edit_session_round_trip() {
    let mut editor = Editor::with_seating(Config::default(), TableSeating::with_rows(10));
    let id = editor.create((0.0, 0.0), panel(3)).unwrap()[0];
    editor.begin_edit(id).unwrap();
    assert!(matches!(editor.begin_edit(id), Err(Error::EditInProgress { .. })));

    // Pointer input is frozen while the form is open.
    assert_eq!(editor.pointer_down(PointerEvent::at(5.0, 5.0)), EditorAction::None);

    let err = editor.set_seating_start("zero").unwrap_err();
    assert!(err.is_input_error());
    let err = editor.set_seating_start("0").unwrap_err();
    assert!(err.is_input_error());

    editor.set_seating_start("4").unwrap();
    assert_eq!(editor.seating_preview().unwrap(), vec![vec!["T4", "T5", "T6"]]);
    assert_eq!(editor.suggest_name().unwrap(), "panelT4toT6");
    editor.set_name("panelT4toT6").unwrap();
    assert_eq!(editor.commit_edit().unwrap(), id);

    let entity = editor.scene().get(id).unwrap();
    assert_eq!(entity.name, "panelT4toT6");
    assert_eq!(editor.workspace().options().table.count, 3);
    assert!(matches!(editor.commit_edit(), Err(Error::NoEditSession)));
}

#[test]
fn test_keyboard_delete_confirms_selection() {
    let mut editor = Editor::default();
    let a = editor.create((0.0, 0.0), panel(1)).unwrap()[0];
    editor.pointer_down(PointerEvent::at(10.0, 10.0));
    editor.pointer_up(PointerEvent::at(10.0, 10.0));
    match editor.key_down(Key::Delete) {
        EditorAction::ConfirmDelete { ids } => {
            assert_eq!(ids, vec![a]);
            editor.delete_entities(&ids);
        }
        other => panic!("expected a delete confirmation, got {:?}", other),
    }
    assert!(editor.scene().is_empty());
    assert!(editor.selection().selected().is_empty());
}

#[test]
fn test_handy_seats_do_not_touch_register() {
    let mut editor = Editor::with_seating(Config::default(), TableSeating::with_rows(6));
    assert!(editor
        .create(
            (0.0, 0.0),
            CreateRequest::Seats {
                rows: 1,
                cols: 1,
                width: 50.0,
                height: 50.0,
                shape: SeatShape::Ellipse,
                start: 1,
                end: 1,
            },
        )
        .is_err());

    editor.switch_mode(Mode::Handy);
    let ids = editor
        .create(
            (0.0, 0.0),
            CreateRequest::Seats {
                rows: 2,
                cols: 3,
                width: 50.0,
                height: 50.0,
                shape: SeatShape::Ellipse,
                start: 1,
                end: 6,
            },
        )
        .unwrap();
    assert_eq!(ids.len(), 6);
    assert!(!editor.has_overlaps());
    assert_eq!(editor.workspace().options().allocated(), 0);
    assert!(editor.workspace().scene(Mode::Register).is_empty());
}

#[test]
fn test_config_file_drives_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::default();
    config.canvas.width = 300.0;
    config.canvas.height = 200.0;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    let mut editor = Editor::new(loaded);
    assert_eq!(editor.bounds().width, 300.0);

    let id = editor
        .create(
            (250.0, 100.0),
            CreateRequest::Lane {
                text: "LANE".into(),
                orientation: Orientation::Horizontal,
                width: 40.0,
                height: 20.0,
            },
        )
        .unwrap()[0];
    editor.pointer_down(PointerEvent::at(260.0, 110.0));
    editor.pointer_move(PointerEvent::moved(360.0, 110.0, 100.0, 0.0));
    let rect = editor.scene().get(id).unwrap().rect;
    assert_eq!(rect.right(), 300.0);
}

#[test]
fn test_handy_group_drag_scales_movement() {
    let mut editor = Editor::with_seating(Config::default(), TableSeating::with_rows(6));
    editor.switch_mode(Mode::Handy);
    let seat = |start: i64, end: i64, cols: u32| CreateRequest::Seats {
        rows: 1,
        cols,
        width: 50.0,
        height: 50.0,
        shape: SeatShape::Rectangle,
        start,
        end,
    };
    let grid = editor.create((0.0, 0.0), seat(1, 2, 2)).unwrap();
    let other = editor.create((200.0, 0.0), seat(3, 3, 1)).unwrap()[0];
    let x = |editor: &Editor, id| editor.scene().get(id).unwrap().rect.x;

    // Screen (92, 44) is layout (115, 55) at the default handy scale.
    editor.pointer_down(PointerEvent::at(92.0, 44.0));
    editor.pointer_move(PointerEvent::moved(0.0, 0.0, -92.0, -44.0));
    editor.pointer_up(PointerEvent::at(0.0, 0.0));
    assert_eq!(editor.selection().selected().len(), 2);
    assert!(!editor.selection().is_selected(other));

    editor.pointer_down(PointerEvent::at(20.0, 20.0));
    assert_eq!(editor.selection().dragging().len(), 2);
    let action = editor.pointer_move(PointerEvent::moved(28.0, 20.0, 8.0, 0.0));
    assert_eq!(action, EditorAction::Redraw);
    assert_eq!(x(&editor, grid[0]), 10.0);
    assert_eq!(x(&editor, grid[1]), 70.0);

    // 80 px is 100 layout units: the second seat would land on the third.
    let action = editor.pointer_move(PointerEvent::moved(108.0, 20.0, 80.0, 0.0));
    assert_eq!(action, EditorAction::None);
    assert_eq!(x(&editor, grid[0]), 10.0);
    assert_eq!(x(&editor, grid[1]), 70.0);
    assert_eq!(x(&editor, other), 200.0);

    editor.pointer_up(PointerEvent::at(28.0, 20.0));
    assert_eq!(editor.selection().selected().len(), 2);
}
