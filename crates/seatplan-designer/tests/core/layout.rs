use seatplan_designer::{
    CreateRequest, Editor, EntityKind, Group, Indent, Margins, Orientation, Panel, SeatRange,
    TableType,
};

#[test]
fn test_panel_size_is_deterministic() {
    let panel = Panel::new(4, TableType::Table, Orientation::Horizontal);
    let (w, h) = panel.size((100.0, 60.0));
    assert_eq!(w, 4.0 * 100.0 + 3.0 * 10.0 + 2.0 * 3.0);
    assert_eq!(w, 436.0);
    assert_eq!(h, 66.0);

    let vertical = Panel::new(4, TableType::Table, Orientation::Vertical);
    assert_eq!(vertical.size((100.0, 60.0)), (106.0, 4.0 * 60.0 + 30.0 + 6.0));
}

#[test]
fn test_group_height_floor() {
    // Three 60-high tables need 200, more than the default 100.
    let group = Group::new("Bar", TableType::Table, vec![3, 1], 100.0, Indent::Left);
    assert_eq!(group.min_height((100.0, 60.0)), 200.0);
    assert_eq!(group.height((100.0, 60.0)), 200.0 + Group::EXTRA_HEIGHT);

    let mut editor = Editor::default();
    let id = editor
        .create(
            (0.0, 0.0),
            CreateRequest::Group {
                title: "Bar".into(),
                table_type: TableType::Table,
                panel_counts: vec![3, 1],
            },
        )
        .unwrap()[0];
    let rect = editor.scene().get(id).unwrap().rect;
    assert_eq!(rect.h, 222.0);
    assert_eq!(rect.w, 2.0 * 100.0 + 2.0 * Group::MARGIN);
    assert_eq!(editor.workspace().options().table.count, 4);
}

#[test]
fn test_group_id_split() {
    let group = Group::new("Bar", TableType::Bar, vec![3, 2], 100.0, Indent::Right);
    assert_eq!(
        group.split_seating(SeatRange::new(1, 5)),
        vec![SeatRange::new(1, 3), SeatRange::new(4, 5)]
    );
    let panels: Vec<_> = group.panels().iter().map(|p| p.seating).collect();
    assert_eq!(panels, vec![SeatRange::new(1, 3), SeatRange::new(4, 5)]);
}

#[test]
fn test_zero_margin_panel() {
    let mut editor = Editor::default();
    let id = editor
        .create(
            (0.0, 0.0),
            CreateRequest::Panel {
                count: 2,
                table_type: TableType::Bar,
                orientation: Orientation::Horizontal,
                margins: Margins::zero(),
            },
        )
        .unwrap()[0];
    let entity = editor.scene().get(id).unwrap();
    assert!(matches!(entity.kind, EntityKind::Panel(_)));
    assert_eq!(entity.rect.w, 2.0 * 90.0 + 10.0);
    assert_eq!(entity.rect.h, 53.0);
}
