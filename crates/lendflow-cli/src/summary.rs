//! Result tables printed after a command.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lendflow_core::{JobReport, Prediction};

/// Per-job row counts with a total line.
pub fn job_table(reports: &[JobReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Table"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Time (ms)"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    for report in reports {
        total_in += report.rows_in;
        total_out += report.rows_out;
        table.add_row(vec![
            Cell::new(report.stage),
            Cell::new(&report.name).fg(Color::Cyan),
            Cell::new(report.rows_in),
            rows_out_cell(report),
            dim_cell(report.duration.as_millis()),
            Cell::new(report.output.display()),
        ]);
    }
    if reports.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(total_in).add_attribute(Attribute::Bold),
            Cell::new(total_out).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table
}

pub fn print_jobs(reports: &[JobReport]) {
    println!("{}", job_table(reports));
}

pub fn prediction_table(prediction: &Prediction) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Customer"),
        header_cell("Book"),
        header_cell("P(on time)"),
        header_cell("Prediction"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let verdict = if prediction.on_time {
        Cell::new("returned on time").fg(Color::Green)
    } else {
        Cell::new("returned late").fg(Color::Yellow)
    };
    table.add_row(vec![
        Cell::new(&prediction.customer_id),
        Cell::new(&prediction.book_id),
        Cell::new(format!("{:.4}", prediction.probability)),
        verdict,
    ]);
    table
}

pub fn print_prediction(prediction: &Prediction) {
    println!("Model: {}", prediction.model_path.display());
    println!("{}", prediction_table(prediction));
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn rows_out_cell(report: &JobReport) -> Cell {
    if report.rows_out == 0 {
        Cell::new(report.rows_out).fg(Color::Yellow)
    } else {
        Cell::new(report.rows_out)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
