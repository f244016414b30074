//! Terminal rendering of classifications, range tables and panels.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labrange_core::{BandCounts, PanelReport, RangeClassifier};
use labrange_model::{Band, Classification, RawValue};
use labrange_standards::RangeTable;

/// Terminal color for a band, decoded from its `#rrggbb` display color.
pub fn band_color(band: Band) -> Color {
    let hex = band.color().hex().trim_start_matches('#');
    match hex::decode(hex).as_deref() {
        Ok([r, g, b]) => Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
        _ => Color::Reset,
    }
}

/// Display text for a resolved value.
pub fn format_value(value: &RawValue) -> String {
    match value {
        RawValue::Numeric(number) => format_numeric(*number),
        RawValue::Missing => "N/A".to_string(),
        RawValue::Unparseable(text) => text.clone(),
    }
}

/// Formats a number without trailing zeros.
pub fn format_numeric(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Signed percentage with one decimal, or `-`.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{pct:+.1}%"),
        None => "-".to_string(),
    }
}

pub fn classification_table(label: &str, value: &RawValue, classification: &Classification) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Label"),
        header_cell("Value"),
        header_cell("Biomarker"),
        header_cell("Band"),
        header_cell("Color"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(label),
        band_cell(format_value(value), classification.band),
        optional_cell(classification.biomarker.as_deref()),
        band_cell(classification.band, classification.band).add_attribute(Attribute::Bold),
        Cell::new(classification.color),
    ]);
    table
}

pub fn ranges_table(ranges: &RangeTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Name"),
        header_cell("Unit"),
        header_cell("Normal range"),
        header_cell("Low ≤"),
        header_cell("High ≥"),
    ]);
    apply_table_style(&mut table);
    for column in 3..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for range in ranges {
        let normal = range.normal_range();
        table.add_row(vec![
            Cell::new(range.key())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            optional_cell(range.name()),
            optional_cell(range.unit()),
            Cell::new(format!(
                "{} – {}",
                format_numeric(normal.min),
                format_numeric(normal.max)
            )),
            Cell::new(format_numeric(range.low_threshold())).fg(band_color(Band::Low)),
            Cell::new(format_numeric(range.high_threshold())).fg(band_color(Band::High)),
        ]);
    }
    table
}

/// Band names with a swatch in each band's color.
pub fn legend_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Band"), header_cell("Color")]);
    apply_table_style(&mut table);
    for (band, hex) in RangeClassifier::legend() {
        table.add_row(vec![
            Cell::new(band.label()),
            Cell::new(format!("■ {hex}")).fg(band_color(band)),
        ]);
    }
    table
}

/// Biomarker × draw-date grid with band-colored values.
pub fn panel_table(report: &PanelReport) -> Table {
    let mut header = vec![header_cell("Biomarker"), header_cell("Key")];
    header.extend(
        report
            .draws
            .iter()
            .map(|date| header_cell(&date.format("%Y-%m-%d").to_string())),
    );
    header.push(header_cell("Change"));

    let mut table = Table::new();
    table.set_header(header);
    apply_panel_table_style(&mut table);
    for column in 2..report.draws.len() + 3 {
        align_column(&mut table, column, CellAlignment::Right);
    }

    for series in &report.series {
        let mut row = vec![Cell::new(&series.label), optional_cell(series.biomarker.as_deref())];
        for date in &report.draws {
            row.push(match series.point_on(*date) {
                Some(point) => band_cell(format_value(&point.value), point.classification.band),
                None => dim_cell("-"),
            });
        }
        let change = series.latest().and_then(|point| point.change_pct);
        row.push(match change {
            Some(_) => Cell::new(format_change(change)),
            None => dim_cell("-"),
        });
        table.add_row(row);
    }
    table
}

/// Band counts over all draws and over the latest draw per biomarker.
pub fn counts_table(counts: &BandCounts, latest: &BandCounts) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Band"),
        header_cell("All draws"),
        header_cell("Latest"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for band in Band::ALL {
        table.add_row(vec![
            band_cell(band, band),
            count_cell(counts.get(band)),
            count_cell(latest.get(band)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(counts.total()).add_attribute(Attribute::Bold),
        Cell::new(latest.total()).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_panel_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn band_cell<T: ToString>(value: T, band: Band) -> Cell {
    Cell::new(value).fg(band_color(band))
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
