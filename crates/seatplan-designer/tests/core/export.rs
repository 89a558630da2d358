use seatplan_designer::export::{
    java_file_name, java_layout, seating_sql, seats_xml, UPSERT_SQL_FILE_NAME,
};
use seatplan_designer::{
    CreateRequest, Editor, Margins, Mode, Orientation, SeatShape, TableSeating, TableType,
};
use seatplan_settings::Config;

fn floor_plan() -> Editor {
    let mut editor = Editor::with_seating(Config::default(), TableSeating::with_rows(40));
    editor
        .create(
            (10.0, 10.0),
            CreateRequest::Panel {
                count: 4,
                table_type: TableType::Table,
                orientation: Orientation::Horizontal,
                margins: Margins::default(),
            },
        )
        .unwrap();
    editor
        .create(
            (10.0, 200.0),
            CreateRequest::Group {
                title: "Sushi bar".into(),
                table_type: TableType::Counter,
                panel_counts: vec![3, 2],
            },
        )
        .unwrap();
    editor
        .create((600.0, 10.0), CreateRequest::Togo { per_row: 5 })
        .unwrap();
    editor.switch_mode(Mode::Handy);
    editor
        .create(
            (0.0, 0.0),
            CreateRequest::Seats {
                rows: 1,
                cols: 2,
                width: 50.0,
                height: 50.0,
                shape: SeatShape::Rectangle,
                start: 1,
                end: 2,
            },
        )
        .unwrap();
    editor
}

#[test]
fn test_java_layout_for_floor_plan() {
    let editor = floor_plan();
    let ws = editor.workspace();
    let java = java_layout(
        "main",
        ws.scene(Mode::Register).entities(),
        ws.options(),
    );
    assert!(java.contains("TABLE_CNT = 4;"));
    assert!(java.contains("COUNTER_CNT = 5;"));
    assert!(java.contains("tables.subList(0, 4), SWT.HORIZONTAL"));
    assert!(java.contains("getTogoPanel(togoPanel, ENTRANCE_TABLE_NUM, 5,"));
    assert_eq!(java_file_name("main"), "TablePanelImplMAIN.java");
}

#[test]
fn test_xml_lists_only_handy_seats() {
    let editor = floor_plan();
    let ws = editor.workspace();
    let xml = seats_xml(ws.scene(Mode::Handy).entities(), ws.seating());
    assert_eq!(xml.matches("<tableGUIType").count(), 2);
    assert!(xml.contains("TABLE_ID=\"2\""));

    let register = seats_xml(ws.scene(Mode::Register).entities(), ws.seating());
    assert_eq!(register.matches("<tableGUIType").count(), 0);
}

#[test]
fn test_sql_covers_every_row() {
    let editor = floor_plan();
    let sql = seating_sql(editor.workspace().seating());
    assert_eq!(sql.matches("INSERT INTO table_seating").count(), 40);
    assert!(sql.starts_with("DELETE FROM table_seating;"));
    assert_eq!(UPSERT_SQL_FILE_NAME, "table_seating_conflict.sql");
}
