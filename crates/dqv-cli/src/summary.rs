use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dqv_core::DqvError;
use dqv_model::{Issue, Severity};

use crate::commands::RunOutcome;

pub fn print_report(outcome: &RunOutcome) {
    let report = &outcome.report;
    println!("Source: {}", outcome.source);
    println!("Checked at: {}", report.timestamp.to_rfc3339());
    if let Some(path) = &outcome.output {
        println!("Cleaned data: {}", path.display());
    }
    if let Some(path) = &outcome.report_path {
        println!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Removed"),
        header_cell("Columns"),
        header_cell("Checks"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(report.rows_processed),
        Cell::new(report.rows_cleaned).add_attribute(Attribute::Bold),
        count_cell(report.rows_removed(), Color::Yellow),
        Cell::new(outcome.columns),
        Cell::new(report.checks_performed.len()),
        count_cell(report.error_count(), Color::Red),
        count_cell(report.warning_count(), Color::Yellow),
    ]);
    println!("{table}");
    println!("Checks performed: {}", checks_line(&report.checks_performed));
    print_issue_table(&report.issues_found);
}

/// Print a fatal error with a hint when one is known.
pub fn print_run_error(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(hint) = error
        .downcast_ref::<DqvError>()
        .and_then(DqvError::suggestion)
    {
        eprintln!("hint: {hint}");
    }
}

fn print_issue_table(issues: &[Issue]) {
    if issues.is_empty() {
        println!("No issues found.");
        return;
    }
    let mut ordered: Vec<&Issue> = issues.iter().collect();
    // stable: discovery order within a severity
    ordered.sort_by_key(|issue| std::cmp::Reverse(severity_rank(issue.severity())));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Type"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in ordered {
        let severity = issue.severity();
        table.add_row(vec![
            severity_cell(severity),
            Cell::new(issue.kind().as_str()),
            issue
                .column()
                .map_or_else(|| dim_cell("-"), Cell::new),
            match issue.count() {
                Some(count) => Cell::new(count).fg(severity_color(severity)),
                None => dim_cell("-"),
            },
            Cell::new(issue.message()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn checks_line(checks: &[String]) -> String {
    if checks.is_empty() {
        "none".to_string()
    } else {
        checks.join(" -> ")
    }
}

pub fn apply_table_style(table: &mut Table) {
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

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 2,
        Severity::Warning => 1,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
