use std::io::{self, Write};

use comp_forge::PropertyCatalog;
use comp_forge::batch::{BatchReport, RowFailure};
use comp_forge::io::Format;

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_FAILURE_ROWS: usize = 15;

pub fn print_dataset_info(rows: usize, columns: &[String], format: Format) {
    let mut out = io::stderr().lock();

    let rows = [
        ("Format", format.to_string()),
        ("Rows", rows.to_string()),
        ("Columns", columns.len().to_string()),
        ("Column names", columns.join(", ")),
    ];
    print_kv_table(&mut out, "Input Dataset", &rows);
}

pub fn print_batch_summary(report: &BatchReport, feature_count: usize) {
    let mut out = io::stderr().lock();

    let total = report.dataset.len();
    let skipped = report.failures.len();
    let rate = if total == 0 {
        100.0
    } else {
        100.0 * report.featurized() as f64 / total as f64
    };

    let rows = [
        ("Rows", total.to_string()),
        ("Featurized", format!("{} ({:.1}%)", report.featurized(), rate)),
        ("Skipped", skipped.to_string()),
        ("Feature columns", feature_count.to_string()),
        ("Output columns", report.dataset.columns().len().to_string()),
    ];
    print_kv_table(&mut out, "Batch Summary", &rows);
}

pub fn print_failures(failures: &[RowFailure]) {
    if failures.is_empty() {
        return;
    }

    let mut out = io::stderr().lock();

    let row_w = 6usize;
    let formula_w = 16usize;
    let sep_overhead = 8;
    let reason_w = SAFE_TABLE_WIDTH.saturating_sub(row_w + formula_w + sep_overhead);

    let rule = |l: &str, m: &str, r: &str| {
        format!(
            "{}{l}{}{m}{}{m}{}{r}",
            INDENT,
            "─".repeat(row_w + 2),
            "─".repeat(formula_w + 2),
            "─".repeat(reason_w + 2)
        )
    };

    let _ = writeln!(out, "{}┌─ Skipped Rows ─┐", INDENT);
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{}│ {:>row_w$} │ {:<formula_w$} │ {:<reason_w$} │",
        INDENT, "Row", "Formula", "Reason"
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for failure in failures.iter().take(MAX_FAILURE_ROWS) {
        let formula = failure.formula.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{}│ {:>row_w$} │ {:<formula_w$} │ {:<reason_w$} │",
            INDENT,
            failure.index,
            truncate(formula, formula_w),
            truncate(&failure.error.to_string(), reason_w)
        );
    }

    if failures.len() > MAX_FAILURE_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:>row_w$} │ {:<formula_w$} │ {:<reason_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more rows)", failures.len() - MAX_FAILURE_ROWS)
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

pub fn print_catalog_summary(out: &mut impl Write, catalog: &PropertyCatalog, source: &str) {
    let elements = catalog.elements();
    let span = match (elements.first(), elements.last()) {
        (Some(first), Some(last)) => format!(
            "{} (Z={}) .. {} (Z={})",
            first,
            first.atomic_number(),
            last,
            last.atomic_number()
        ),
        _ => "-".to_string(),
    };

    let rows = [
        ("Source", source.to_string()),
        ("Elements", catalog.len().to_string()),
        ("Range", span),
    ];
    print_kv_table(out, "Property Catalog", &rows);
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let rule = |l: &str, m: &str, r: &str| {
        format!(
            "{}{l}{}{m}{}{r}",
            INDENT,
            "─".repeat(key_w + 2),
            "─".repeat(val_w + 2)
        )
    };

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }
    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}
