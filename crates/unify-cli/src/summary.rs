use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use unify_core::{DropReason, DroppedRow};
use unify_model::{HeaderToken, ReferenceDirectory, SpellingLocale};
use unify_standards::{DoctorReport, VerifySummary};

use crate::types::ValidateResult;

/// Dropped rows shown before the listing is cut short.
const MAX_DROPPED_ROWS_SHOWN: usize = 50;

pub fn print_validate_summary(result: &ValidateResult) {
    let report = &result.report;
    println!("Reference: {}", result.reference_dir.display());
    println!(
        "Country column: {}    Year column: {}",
        report.country_column, report.year_column
    );
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Dataset"),
        header_cell("Country column"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Dropped"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for file in &result.files {
        table.add_row(vec![
            dim_cell(file.index),
            Cell::new(&file.label)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            file.country_column
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(file.rows_in),
            Cell::new(file.rows_out),
            count_cell(file.dropped, Color::Red),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.rows_collated).add_attribute(Attribute::Bold),
        Cell::new(report.rows_resolved).add_attribute(Attribute::Bold),
        count_cell(report.dropped_count(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Unified: {}    Unchanged: {}    Dropped: {}",
        report.unified,
        report.unchanged,
        report.dropped_count()
    );

    print_dropped_table(result);
    if let Some(preview) = &result.preview {
        println!();
        println!("{preview}");
    }
    println!("Validation took {:.2} secs", report.elapsed.as_secs_f64());

    if result.exceeds_max_dropped() {
        eprintln!(
            "error: {} rows dropped, limit is {}",
            report.dropped_count(),
            result.max_dropped.unwrap_or_default()
        );
    }
}

fn print_dropped_table(result: &ValidateResult) {
    let dropped = &result.report.dropped;
    if dropped.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Row"),
        header_cell("Value"),
        header_cell("Reason"),
        header_cell("Did you mean"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for row in dropped.iter().take(MAX_DROPPED_ROWS_SHOWN) {
        let label = result
            .files
            .get(row.source_index)
            .map_or_else(|| row.source_index.to_string(), |file| file.label.clone());
        table.add_row(vec![
            Cell::new(label),
            Cell::new(row.row_index + 1),
            value_cell(row),
            reason_cell(row.reason),
            row.suggestion
                .as_ref()
                .map_or_else(|| dim_cell("-"), |s| Cell::new(&s.name).fg(Color::Green)),
        ]);
    }
    println!();
    println!("Dropped rows:");
    println!("{table}");
    if dropped.len() > MAX_DROPPED_ROWS_SHOWN {
        println!("... and {} more", dropped.len() - MAX_DROPPED_ROWS_SHOWN);
    }
}

pub fn print_tokens(tokens: &[HeaderToken], spelling: SpellingLocale) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Header"),
        header_cell(&format!("Translated ({spelling})")),
        header_cell("Tokens"),
        header_cell("Combos"),
        header_cell("Unit"),
        header_cell("Context"),
    ]);
    apply_table_style(&mut table);
    for token in tokens {
        table.add_row(vec![
            Cell::new(&token.raw_header),
            Cell::new(&token.translated),
            Cell::new(token.tokens.join(" | ")),
            list_cell(&token.combos),
            optional_cell(token.unit.as_deref()),
            optional_cell(token.context.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_doctor(summary: &VerifySummary, report: &DoctorReport) {
    println!("Reference: {}", summary.reference_dir.display());
    println!(
        "Pins: countries={} translations={}",
        report.pins.countries, report.pins.translations
    );

    let mut files = Table::new();
    files.set_header(vec![
        header_cell("File"),
        header_cell("Role"),
        header_cell("Kind"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut files);
    for file in &report.files {
        files.add_row(vec![
            Cell::new(&file.path),
            Cell::new(&file.role),
            Cell::new(&file.kind),
            dim_cell(&file.sha256[..12.min(file.sha256.len())]),
        ]);
    }
    println!("{files}");

    let counts = &report.counts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in [
        ("Countries", counts.countries),
        ("Historical", counts.historical),
        ("Aliases", counts.aliases),
        ("US -> GB spellings", counts.translations_us_gb),
        ("GB -> US spellings", counts.translations_gb_us),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("Conflicts"),
        count_cell(report.conflicts.len(), Color::Yellow),
    ]);
    println!("{table}");

    for conflict in &report.conflicts {
        println!(
            "warning: '{}' is claimed by {}",
            conflict.key,
            conflict.records.join(", ")
        );
    }
}

pub fn print_reference_list(directory: &ReferenceDirectory, historical: bool) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Alpha-2"),
        header_cell("Alpha-3"),
        header_cell("M49"),
        header_cell("Aliases"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);

    let records = directory
        .iter()
        .filter(|record| !historical || record.preceding.is_some());
    for record in records {
        let name = if record.preceding.is_some() {
            Cell::new(record.canonical_name()).fg(Color::DarkGrey)
        } else {
            Cell::new(&record.name)
        };
        table.add_row(vec![
            name,
            optional_cell(record.alpha2.as_deref()),
            optional_cell(record.alpha3.as_deref()),
            optional_cell(record.m49.as_deref()),
            list_cell(&record.aliases),
        ]);
    }
    println!("{table}");
}

fn value_cell(row: &DroppedRow) -> Cell {
    match &row.value {
        Some(value) => Cell::new(value).fg(Color::Red),
        None => dim_cell("(empty)"),
    }
}

fn reason_cell(reason: DropReason) -> Cell {
    match reason {
        DropReason::MissingValue => Cell::new("missing value").fg(Color::Yellow),
        DropReason::NoMatch => Cell::new("no match").fg(Color::Red),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn list_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join("; "))
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
