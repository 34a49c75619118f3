use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ctk_model::PropertyDescriptor;
use ctk_transfer::{SkipReason, TransferReport};

/// Prints the per-property outcome of each transferred object to stderr,
/// leaving stdout for the transferred JSON.
pub fn print_transfer_summary(reports: &[TransferReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Object"),
        header_cell("Property"),
        header_cell("Outcome"),
    ]);
    apply_summary_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (index, report) in reports.iter().enumerate() {
        for name in &report.transferred {
            table.add_row(vec![
                Cell::new(index),
                Cell::new(name),
                Cell::new("transferred").fg(Color::Green),
            ]);
        }
        for skipped in &report.skipped {
            table.add_row(vec![
                Cell::new(index),
                Cell::new(&skipped.name),
                reason_cell(skipped.reason),
            ]);
        }
    }
    let transferred: usize = reports.iter().map(TransferReport::transferred_count).sum();
    let skipped: usize = reports.iter().map(TransferReport::skipped_count).sum();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} objects", reports.len())).add_attribute(Attribute::Bold),
        Cell::new(format!("{transferred} transferred, {skipped} skipped"))
            .add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    for index in [2, 3] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Center);
        }
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Table rows for property descriptors: name, type and access flags.
pub fn descriptor_rows(descriptors: &[PropertyDescriptor<'_>]) -> Vec<Vec<Cell>> {
    descriptors
        .iter()
        .map(|descriptor| {
            vec![
                Cell::new(descriptor.name).add_attribute(Attribute::Bold),
                Cell::new(descriptor.value_type),
                flag_cell(descriptor.readable),
                flag_cell(descriptor.writable),
            ]
        })
        .collect()
}

fn reason_cell(reason: SkipReason) -> Cell {
    let color = match reason {
        SkipReason::Excluded => Color::DarkGrey,
        SkipReason::MissingOnTarget => Color::Yellow,
        SkipReason::NotReadable | SkipReason::NotWritable | SkipReason::IncompatibleType => {
            Color::Red
        }
    };
    Cell::new(format!("skipped: {reason}")).fg(color)
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
