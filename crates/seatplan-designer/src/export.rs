//! Generated artifacts for the point-of-sale system.
//!
//! - Java: the register layout as SWT form statements, one per panel, lane,
//!   group and to-go block.
//! - XML: handheld seat geometry.
//! - SQL: the `table_seating` rows, as a full reseed or as upserts.
//!
//! Every function here is a pure formatter over the scene and lookups.

use crate::model::{Entity, EntityKind, Group, Lane, Panel, Togo};
use crate::options::{rgb, Options, TableType};
use crate::seating::{TableSeating, NOT_AVAILABLE};

/// One exported entity: the widget definition and its form attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaStatement {
    pub definition: String,
    pub attachment: String,
}

impl JavaStatement {
    fn render(&self) -> String {
        format!("\t\t{}\n\t\t{}\n", self.definition, self.attachment)
    }
}

fn orientation_constant(vertical: bool) -> &'static str {
    if vertical {
        "SWT.VERTICAL"
    } else {
        "SWT.HORIZONTAL"
    }
}

fn java_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn panel_statement(entity: &Entity, panel: &Panel, options: &Options) -> JavaStatement {
    let opts = options.get(panel.table_type);
    let m = &panel.margins;
    JavaStatement {
        definition: format!(
            "APPanel {name} = getTableRowPanel(parent, tables.subList({from}, {to}), {orient}, {w}, {h}, {mt}, {mb}, {ml}, {mr}, {tt}SectionBackground);",
            name = entity.name,
            from = panel.seating.start - 1,
            to = panel.seating.end,
            orient = orientation_constant(panel.is_vertical()),
            w = opts.width_constant,
            h = opts.height_constant,
            mt = m.top,
            mb = m.bottom,
            ml = m.left,
            mr = m.right,
            tt = panel.table_type,
        ),
        attachment: format!(
            "setFormData({}, new FormAttachment(0, {}), null, new FormAttachment(0, {}), null);",
            entity.name,
            entity.rect.top(),
            entity.rect.left()
        ),
    }
}

fn lane_statement(entity: &Entity, lane: &Lane) -> JavaStatement {
    let r = &entity.rect;
    JavaStatement {
        definition: format!(
            "APPanel {} = getLanePanel(parent, {}, \"{}\");",
            entity.name,
            lane.is_vertical(),
            java_string(&lane.text)
        ),
        attachment: format!(
            "setFormData({}, new FormAttachment(0, {}), new FormAttachment(0, {}), new FormAttachment(0, {}), new FormAttachment(0, {}));",
            entity.name,
            r.top(),
            r.bottom(),
            r.left(),
            r.right()
        ),
    }
}

fn group_statement(entity: &Entity, group: &Group, options: &Options) -> JavaStatement {
    let name = &entity.name;
    let opts = options.get(group.table_type);
    let tt = group.table_type;
    let dims = opts.dimensions();
    let h = entity.rect.bottom() - entity.rect.top();

    let mut definition = vec![
        format!("Group {name} = new Group(parent, SWT.SHADOW_OUT);"),
        format!("{name}.setText(\"{}\");", java_string(&group.title)),
        format!("FormLayout {name}Layout = new FormLayout();"),
        format!("{name}.setLayout({name}Layout);"),
        format!("{name}.setBackground({tt}SectionBackground);"),
        format!("FontData {name}FD = new FontData(\"Arial\", 12, SWT.BOLD);"),
        format!("{name}.setFont(swtMainFrame.getInstance().getResourceManager().getFont({name}FD));"),
    ];
    let mut attachment = vec![format!(
        "setFormData({name}, new FormAttachment(0, {}), null, new FormAttachment(0, {}), null);",
        entity.rect.top(),
        entity.rect.left()
    )];

    for (i, range) in group.split_seating(group.seating).into_iter().enumerate() {
        definition.push(format!(
            "APPanel {name}P{n} = getTableRowPanel({name}, tables.subList({from}, {to}), SWT.VERTICAL, {w}, {hc}, 0, 0, 0, 0, {tt}SectionBackground);",
            n = i + 1,
            from = range.start - 1,
            to = range.end,
            w = opts.width_constant,
            hc = opts.height_constant,
        ));
        let left = if i == 0 {
            "new FormAttachment(0, 0)".to_string()
        } else {
            format!("new FormAttachment({name}P{i}, 0, SWT.RIGHT)")
        };
        attachment.push(format!(
            "setFormData({name}P{n}, new FormAttachment(0, {top}), null, {left}, null);",
            n = i + 1,
            top = group.panel_offset(i, h, dims),
        ));
    }

    JavaStatement {
        definition: definition.join("\n\t\t"),
        attachment: attachment.join("\n\t\t"),
    }
}

fn togo_statement(entity: &Entity, togo: &Togo, options: &Options) -> JavaStatement {
    let opts = options.get(togo.table_type);
    JavaStatement {
        definition: format!(
            "APPanel togoPanel = new APPanel(parent, SWT.NORMAL);\n\t\ttogoPanel.setBackground(color);\n\t\tgetTogoPanel(togoPanel, ENTRANCE_TABLE_NUM, {}, {}, {});",
            togo.per_row, opts.width_constant, opts.height_constant
        ),
        attachment: format!(
            "setFormData(togoPanel, new FormAttachment(0, {}), null, new FormAttachment(0, {}), null);",
            entity.rect.top(),
            entity.rect.left()
        ),
    }
}

/// The statement for one register entity. Seats have none.
pub fn java_statement(entity: &Entity, options: &Options) -> Option<JavaStatement> {
    match &entity.kind {
        EntityKind::Panel(panel) => Some(panel_statement(entity, panel, options)),
        EntityKind::Lane(lane) => Some(lane_statement(entity, lane)),
        EntityKind::Group(group) => Some(group_statement(entity, group, options)),
        EntityKind::Togo(togo) => Some(togo_statement(entity, togo, options)),
        EntityKind::Seat(_) => None,
    }
}

/// The statements for a register scene, in scene order, separated by blank lines.
pub fn java_body(entities: &[Entity], options: &Options) -> String {
    entities
        .iter()
        .filter_map(|e| java_statement(e, options))
        .map(|s| s.render())
        .collect::<Vec<_>>()
        .join("\n")
}

const JAVA_TEMPLATE: &str = r#"package pos.table.gui.impl;

import java.util.Vector;

import org.eclipse.swt.SWT;
import org.eclipse.swt.graphics.Color;
import org.eclipse.swt.graphics.FontData;
import org.eclipse.swt.graphics.RGB;
import org.eclipse.swt.layout.FillLayout;
import org.eclipse.swt.layout.FormAttachment;
import org.eclipse.swt.layout.FormLayout;
import org.eclipse.swt.widgets.Composite;
import org.eclipse.swt.widgets.Group;

import pos.swtMainFrame;
import pos.main.gui.APPanel;
import pos.table.gui.DynamicTablePanelScroll;
import pos.table.gui.TableButtonLayout;
import pos.table.model.TableData;

public class TablePanelImpl[NAME] extends TableButtonLayout
{
	private final static int TABLE_CNT = [TABLE_COUNT];
	private final static int COUNTER_CNT = [COUNTER_COUNT];
	private final static int BAR_CNT = [BAR_COUNT];
	private final static int ENTRANCE_TABLE_NUM = TABLE_CNT + COUNTER_CNT + BAR_CNT;

	public final static int TABLE_BUTTON_WIDTH = [TABLE_WIDTH];
	public final static int TABLE_BUTTON_HEIGHT = [TABLE_HEIGHT];
	public final static int COUNTER_BUTTON_WIDTH = [COUNTER_WIDTH];
	public final static int COUNTER_BUTTON_HEIGHT = [COUNTER_HEIGHT];
	public final static int BAR_BUTTON_WIDTH = [BAR_WIDTH];
	public final static int BAR_BUTTON_HEIGHT = [BAR_HEIGHT];
	public final static int TOGO_BUTTON_WIDTH = [TOGO_WIDTH];
	public final static int TOGO_BUTTON_HEIGHT = [TOGO_HEIGHT];

	public TablePanelImpl[NAME](DynamicTablePanelScroll parent, Vector<TableData> tables)
	{
		super(parent, tables);
	}

	protected void initialize()
	{
		FillLayout layout = new FillLayout(SWT.HORIZONTAL);
		layout.spacing = 150;
		layout.marginHeight = 0;
		layout.marginWidth = 0;
		setLayout(layout);

		APPanel leftPanel = new APPanel(this, SWT.NORMAL);
		leftPanel.setBackground(color);
		getEntranceAreaPanel(leftPanel);

		layout();

		disableSelected();
	}

	private void getEntranceAreaPanel(Composite parent)
	{
		FormLayout playout = new FormLayout();
		playout.spacing = 0;
		playout.marginLeft = 0;
		playout.marginRight = 0;
		playout.marginBottom = 0;
		playout.marginTop = 0;
		parent.setLayout(playout);

		Color tableSectionBackground = swtMainFrame.getInstance().getResourceManager().getColor(new RGB([TABLE_COLOR]));
		Color counterSectionBackground = swtMainFrame.getInstance().getResourceManager().getColor(new RGB([COUNTER_COLOR]));
		Color barSectionBackground = swtMainFrame.getInstance().getResourceManager().getColor(new RGB([BAR_COLOR]));
		Color togoSectionBackground = swtMainFrame.getInstance().getResourceManager().getColor(new RGB([TOGO_COLOR]));

[BODY]
		this.pack();
	}
}
"#;

fn rgb_list(color: &str) -> String {
    let (r, g, b) = rgb(color).unwrap_or((255, 255, 255));
    format!("{}, {}, {}", r, g, b)
}

/// The complete Java class for store `store_code`.
pub fn java_layout(store_code: &str, entities: &[Entity], options: &Options) -> String {
    let mut text = JAVA_TEMPLATE
        .replace("[NAME]", &store_code.trim().to_uppercase())
        .replace("[BODY]", &java_body(entities, options));
    for table_type in TableType::ALL {
        let opts = options.get(table_type);
        let key = table_type.as_str().to_uppercase();
        text = text
            .replace(&format!("[{}_WIDTH]", key), &opts.width.to_string())
            .replace(&format!("[{}_HEIGHT]", key), &opts.height.to_string())
            .replace(&format!("[{}_COUNT]", key), &opts.count.to_string())
            .replace(&format!("[{}_COLOR]", key), &rgb_list(&opts.color));
    }
    text
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn seat_element(entity: &Entity, seating_id: i64, shape: u8, seating: &TableSeating) -> String {
    let mut name = seating.get(seating_id, false);
    if name == NOT_AVAILABLE {
        name = "TABLE".to_string();
    }
    let r = &entity.rect;
    format!(
        "      <tableGUIType TABLE_ID=\"{}\">\n    <name>{}</name>\n    <shape>{}</shape>\n    <minx>{}</minx>\n    <miny>{}</miny>\n    <maxx>{}</maxx>\n    <maxy>{}</maxy>\n </tableGUIType>",
        seating_id,
        xml_escape(&name),
        shape,
        r.left(),
        r.top(),
        r.right(),
        r.bottom()
    )
}

/// Handheld seat geometry. Non-seat entities are skipped.
pub fn seats_xml(entities: &[Entity], seating: &TableSeating) -> String {
    let seats: Vec<String> = entities
        .iter()
        .filter_map(|e| match &e.kind {
            EntityKind::Seat(seat) => {
                Some(seat_element(e, seat.seating_id, seat.shape_code(), seating))
            }
            _ => None,
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<tables>\n{}\n</tables>\n",
        seats.join("\n")
    )
}

fn sql_string(text: &str) -> String {
    text.replace('\'', "''")
}

fn insert_row(id: i64, name: &str, is_togo: bool) -> String {
    format!(
        "INSERT INTO table_seating VALUES ({}, NULL, '{}', 0, {})",
        id,
        sql_string(name),
        is_togo
    )
}

/// Replaces every `table_seating` row.
pub fn seating_sql(seating: &TableSeating) -> String {
    let mut sql = String::from("DELETE FROM table_seating;\n");
    for row in seating.rows() {
        sql.push_str(&insert_row(row.id, &row.name, row.is_togo));
        sql.push_str(";\n");
    }
    sql
}

/// Inserts or updates every `table_seating` row, leaving others alone.
pub fn seating_upsert_sql(seating: &TableSeating) -> String {
    let mut sql = String::new();
    for row in seating.rows() {
        sql.push_str(&insert_row(row.id, &row.name, row.is_togo));
        sql.push_str(&format!(
            " ON CONFLICT (table_id) DO UPDATE SET table_desc='{}', is_takeout={};\n",
            sql_string(&row.name),
            row.is_togo
        ));
    }
    sql
}

pub fn java_file_name(store_code: &str) -> String {
    format!("TablePanelImpl{}.java", store_code.trim().to_uppercase())
}

pub fn xml_file_name(store_code: &str) -> String {
    format!("tables_{}.xml", store_code.trim().to_lowercase())
}

pub fn sql_file_name(store_code: &str) -> String {
    format!("table_seating_{}.sql", store_code.trim().to_uppercase())
}

pub const UPSERT_SQL_FILE_NAME: &str = "table_seating_conflict.sql";
