//! Hiding matchup rows with too few matches to be meaningful

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

pub const MATCHES_COLUMN: &str = "Matches";
pub const DEFAULT_MIN_MATCHES: f64 = 20.0;

lazy_static! {
    static ref TABLE_BODY: Selector = Selector::parse("table tbody").unwrap();
    static ref ROW: Selector = Selector::parse("tr").unwrap();
    static ref CELL: Selector = Selector::parse("td, th").unwrap();
    static ref LEADING_NUMBER: Regex = Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRow {
    pub cells: Vec<String>,
    pub matches: Option<f64>,
}

/// One table with a "Matches" column after filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupTable {
    pub header: Vec<String>,
    pub rows: Vec<MatchupRow>,
    pub hidden: usize,
}

/// Leading number of a cell, "12 (40%)" -> 12
fn leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(text.trim())
        .and_then(|m| m.as_str().parse().ok())
}

fn cell_texts(row: &ElementRef) -> Vec<String> {
    row.select(&CELL)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

/// Keep rows whose match count is at least `min_matches`.
///
/// Only tables whose first row has a "Matches" header cell are considered.
/// Rows without a readable count are kept.
pub fn filter_matchups(markup: &str, min_matches: f64) -> Vec<MatchupTable> {
    let document = Html::parse_document(markup);
    let mut tables = Vec::new();

    for body in document.select(&TABLE_BODY) {
        let mut rows = body.select(&ROW);
        let Some(header_row) = rows.next() else {
            continue;
        };

        let header = cell_texts(&header_row);
        let Some(column) = header.iter().rposition(|h| h == MATCHES_COLUMN) else {
            continue;
        };

        let mut table = MatchupTable {
            header,
            rows: Vec::new(),
            hidden: 0,
        };

        for row in rows {
            let cells = cell_texts(&row);
            let matches = cells.get(column).and_then(|c| leading_number(c));

            match matches {
                Some(n) if n < min_matches => table.hidden += 1,
                _ => table.rows.push(MatchupRow { cells, matches }),
            }
        }

        log::debug!("Matchup table: {} shown, {} hidden", table.rows.len(), table.hidden);
        tables.push(table);
    }

    tables
}
