use serde::Serialize;
use std::collections::BTreeMap;

/// One displayable row: a card at one quantity with its presence percentage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDisplayRow {
    pub card_name: String,
    pub display_name: String,
    pub quantity: u32,
    /// Decklists containing the card at this quantity
    pub count: u32,
    pub percentage: f64,
    pub href: Option<String>,
}

impl CardDisplayRow {
    /// "<quantity> <display name>", the form used in exports
    pub fn line(&self) -> String {
        format!("{} {}", self.quantity, self.display_name)
    }
}

/// Rows grouped by category; categories and rows are kept sorted
pub type CategoryRows = BTreeMap<String, Vec<CardDisplayRow>>;

/// Result of one analysis run
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub by_category: CategoryRows,
    pub auto_decklist: CategoryRows,
    pub total_decklists: u32,
    /// Number of tournaments each card appeared in at least once
    pub tournament_counts: BTreeMap<String, u32>,
    pub pages_analyzed: usize,
    pub pages_failed: usize,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// Total cards in the inferred decklist
    pub fn auto_decklist_size(&self) -> u32 {
        self.auto_decklist
            .values()
            .flat_map(|rows| rows.iter())
            .map(|row| row.quantity)
            .sum()
    }

    pub fn tournaments_for(&self, card_name: &str) -> u32 {
        self.tournament_counts.get(card_name).copied().unwrap_or(0)
    }
}

/// A category of rows prepared for column layout.
/// `line_count` is the weight used when balancing columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBlock {
    pub category: String,
    pub line_count: usize,
    pub rows: Vec<CardDisplayRow>,
}

impl CategoryBlock {
    pub fn new(category: impl Into<String>, rows: Vec<CardDisplayRow>) -> Self {
        Self {
            category: category.into(),
            line_count: rows.len(),
            rows,
        }
    }

    /// Sum of quantities in the block
    pub fn card_total(&self) -> u32 {
        self.rows.iter().map(|row| row.quantity).sum()
    }
}

/// Build one block per category, in category order
pub fn category_blocks(rows: &CategoryRows) -> Vec<CategoryBlock> {
    rows.iter()
        .map(|(category, rows)| CategoryBlock::new(category.clone(), rows.clone()))
        .collect()
}
