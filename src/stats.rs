//! Presence percentages and the inferred staple decklist

use crate::aggregate::AggregationStore;
use crate::model::{AnalysisReport, CardDisplayRow, CardRecord, CategoryRows};

/// A quantity must be played by more than this share of decklists
/// to make the auto decklist
pub const AUTO_DECKLIST_THRESHOLD: f64 = 50.0;

/// Share of decklists, in percent. Zero when there are no decklists.
pub fn presence_percentage(count: u32, total_decklists: u32) -> f64 {
    if total_decklists == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total_decklists as f64
    }
}

/// The quantity played by a strict majority of decklists, with its percentage.
///
/// When several quantities clear the threshold the highest percentage wins;
/// equal percentages keep the smaller quantity.
pub fn majority_quantity(record: &CardRecord, total_decklists: u32) -> Option<(u32, f64)> {
    let mut best: Option<(u32, f64)> = None;

    for (&quantity, &count) in &record.quantities {
        let percentage = presence_percentage(count, total_decklists);
        if percentage <= AUTO_DECKLIST_THRESHOLD {
            continue;
        }
        if best.map_or(true, |(_, best_pct)| percentage > best_pct) {
            best = Some((quantity, percentage));
        }
    }

    best
}

fn display_row(record: &CardRecord, quantity: u32, count: u32, total_decklists: u32) -> CardDisplayRow {
    CardDisplayRow {
        card_name: record.card_name.clone(),
        display_name: record.full_name.clone(),
        quantity,
        count,
        percentage: presence_percentage(count, total_decklists),
        href: record.href.clone(),
    }
}

/// One row per (card, quantity), grouped by category.
/// Cards are sorted by name, quantities from highest to lowest.
pub fn usage_by_category(store: &AggregationStore) -> CategoryRows {
    let mut rows = CategoryRows::new();

    // records iterate in name order
    for record in store.records.values() {
        let category_rows = rows.entry(record.category.clone()).or_default();
        for (&quantity, &count) in record.quantities.iter().rev() {
            category_rows.push(display_row(record, quantity, count, store.total_decklists));
        }
    }

    rows
}

/// Cards with a majority quantity, grouped by category and sorted by name
pub fn auto_decklist(store: &AggregationStore) -> CategoryRows {
    let mut rows = CategoryRows::new();

    for record in store.records.values() {
        if let Some((quantity, _)) = majority_quantity(record, store.total_decklists) {
            let count = record.quantities[&quantity];
            rows.entry(record.category.clone())
                .or_default()
                .push(display_row(record, quantity, count, store.total_decklists));
        }
    }

    for category_rows in rows.values_mut() {
        category_rows.sort_by(|a, b| {
            name_order_key(&a.card_name)
                .cmp(&name_order_key(&b.card_name))
                .then_with(|| a.card_name.cmp(&b.card_name))
        });
    }

    rows
}

/// Case-insensitive ordering key for card names
fn name_order_key(name: &str) -> String {
    name.to_lowercase()
}

/// Derive the full report from a finished run
pub fn summarize(store: &AggregationStore) -> AnalysisReport {
    let report = AnalysisReport {
        by_category: usage_by_category(store),
        auto_decklist: auto_decklist(store),
        total_decklists: store.total_decklists,
        tournament_counts: store.tournament_counts.clone(),
        pages_analyzed: 0,
        pages_failed: 0,
    };

    log::info!(
        "Summarized {} cards over {} decklists, auto decklist has {} cards",
        store.len(),
        store.total_decklists,
        report.auto_decklist_size()
    );
    report
}
