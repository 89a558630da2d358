use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};

use seatplan::designer::{Margins, SeatShape};
use seatplan::export::{
    java_file_name, java_layout, seating_sql, seating_upsert_sql, seats_xml, sql_file_name,
    xml_file_name, UPSERT_SQL_FILE_NAME,
};
use seatplan::{init_logging, Config, CreateRequest, Editor, Mode, Orientation, TableSeating, TableType};

/// Usage: `seatplan [CONFIG] [STORE]`
fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("seatplan {} (built {})", seatplan::VERSION, seatplan::BUILD_DATE);

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().map(PathBuf::from));
    let store = args.next().unwrap_or_else(|| "demo".to_string());

    let editor = demo_plan(config).context("building demo floor plan")?;
    let workspace = editor.workspace();
    let register = workspace.scene(Mode::Register).entities();
    let handy = workspace.scene(Mode::Handy).entities();

    println!("// {}", java_file_name(&store));
    println!("{}", java_layout(&store, register, workspace.options()));
    println!("<!-- {} -->", xml_file_name(&store));
    println!("{}", seats_xml(handy, workspace.seating()));
    println!("-- {}", sql_file_name(&store));
    println!("{}", seating_sql(workspace.seating()));
    println!("-- {}", UPSERT_SQL_FILE_NAME);
    println!("{}", seating_upsert_sql(workspace.seating()));

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Config {
    let path = match path.map(Ok).unwrap_or_else(Config::default_path) {
        Ok(path) => path,
        Err(e) => {
            warn!("No config location ({}), using defaults", e);
            return Config::default();
        }
    };
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Config::default();
    }
    match Config::load_from_file(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// A small floor plan: a row of tables, a sushi lane, a counter area and
/// the to-go block, plus a handheld map of four seats.
fn demo_plan(config: Config) -> seatplan::Result<Editor> {
    let mut seating = TableSeating::with_rows(24);
    seating.add_togo_block();
    let mut editor = Editor::with_seating(config, seating);

    editor.create(
        (20.0, 20.0),
        CreateRequest::Panel {
            count: 6,
            table_type: TableType::Table,
            orientation: Orientation::Horizontal,
            margins: Margins::default(),
        },
    )?;
    editor.create(
        (20.0, 120.0),
        CreateRequest::Lane {
            text: "SUSHI LANE".to_string(),
            orientation: Orientation::Horizontal,
            width: 500.0,
            height: 30.0,
        },
    )?;
    editor.create(
        (20.0, 180.0),
        CreateRequest::Group {
            title: "Sushi bar".to_string(),
            table_type: TableType::Counter,
            panel_counts: vec![4, 3],
        },
    )?;
    editor.create((600.0, 180.0), CreateRequest::Togo { per_row: 5 })?;

    editor.switch_mode(Mode::Handy);
    editor.create(
        (20.0, 20.0),
        CreateRequest::Seats {
            rows: 2,
            cols: 2,
            width: 50.0,
            height: 50.0,
            shape: SeatShape::Ellipse,
            start: 1,
            end: 4,
        },
    )?;
    editor.switch_mode(Mode::Register);

    Ok(editor)
}
