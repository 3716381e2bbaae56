//! Text and CSV output of an analysis report

use crate::error::Result;
use crate::layout::distribute;
use crate::model::{category_blocks, AnalysisReport, CategoryBlock, CategoryRows};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

/// Plain-text decklist for copy/paste.
///
/// Each category name on its own line followed by "<quantity> <name>" lines,
/// with a blank line between categories.
pub fn decklist_text(decklist: &CategoryRows) -> String {
    let mut text = String::new();

    for (index, (category, rows)) in decklist.iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        text.push_str(category);
        text.push('\n');
        for row in rows {
            text.push_str(&row.line());
            text.push('\n');
        }
    }

    text
}

/// Which count a block heading shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingCount {
    /// Number of rows in the block
    Lines,
    /// Sum of card quantities in the block
    Cards,
}

fn write_columns(out: &mut String, columns: &[Vec<CategoryBlock>], heading: HeadingCount) {
    for (index, column) in columns.iter().enumerate() {
        if column.is_empty() {
            continue;
        }
        let _ = writeln!(out, "--- Column {} ---", index + 1);
        for block in column {
            let count = match heading {
                HeadingCount::Lines => block.line_count as u32,
                HeadingCount::Cards => block.card_total(),
            };
            let _ = writeln!(out, "{} ({})", block.category, count);
            for row in &block.rows {
                // halves round up
                let _ = writeln!(out, "  {:<40} {:>4}%", row.line(), row.percentage.round());
            }
        }
        out.push('\n');
    }
}

/// Human readable report: usage summary and auto decklist, each laid out in
/// balanced columns
pub fn render_text_report(report: &AnalysisReport, column_count: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Analysis Results: {} decklists from {} tournament(s)",
        report.total_decklists, report.pages_analyzed
    );
    if report.pages_failed > 0 {
        let _ = writeln!(out, "{} tournament page(s) could not be read", report.pages_failed);
    }
    out.push('\n');

    let usage = distribute(category_blocks(&report.by_category), column_count);
    write_columns(&mut out, &usage, HeadingCount::Lines);

    let _ = writeln!(out, "Automatic Decklist (cards >50%)");
    if report.auto_decklist.is_empty() {
        let _ = writeln!(out, "No card exceeds 50% presence in the analyzed decklists.");
        return out;
    }
    let _ = writeln!(out, "Total: {} cards", report.auto_decklist_size());
    out.push('\n');

    let deck = distribute(category_blocks(&report.auto_decklist), column_count);
    write_columns(&mut out, &deck, HeadingCount::Cards);

    out
}

pub const CSV_HEADERS: [&str; 8] = [
    "Category",
    "Card",
    "Display Name",
    "Quantity",
    "Count",
    "Percentage",
    "Tournaments",
    "Href",
];

/// One CSV row per (card, quantity) of the usage summary
pub fn write_csv<W: Write>(report: &AnalysisReport, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADERS)?;

    for (category, rows) in &report.by_category {
        for row in rows {
            let quantity = row.quantity.to_string();
            let count = row.count.to_string();
            let percentage = format!("{:.1}", row.percentage);
            let tournaments = report.tournaments_for(&row.card_name).to_string();

            csv.write_record([
                category.as_str(),
                row.card_name.as_str(),
                row.display_name.as_str(),
                quantity.as_str(),
                count.as_str(),
                percentage.as_str(),
                tournaments.as_str(),
                row.href.as_deref().unwrap_or(""),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

pub fn write_csv_file(report: &AnalysisReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(report, file)
}

pub fn write_json<W: Write>(report: &AnalysisReport, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
