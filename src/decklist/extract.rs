//! Decklist extraction from tournament page markup
//!
//! A page holds any number of `.decklist` containers. A categorized decklist
//! groups its links into `.cards` blocks, each with an optional `.heading`
//! such as "Trainer (32)". A flat decklist has no headings and every link
//! lands in the default category.

use super::entry::parse_entry;
use crate::model::{CardEntry, DEFAULT_CATEGORY};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;

lazy_static! {
    static ref DECKLIST: Selector = Selector::parse(".decklist").unwrap();
    static ref CARD_BLOCK: Selector = Selector::parse(".cards").unwrap();
    static ref HEADING: Selector = Selector::parse(".heading").unwrap();
    static ref CARD_LINK: Selector = Selector::parse("p a").unwrap();
    static ref HEADING_LABEL: Regex = Regex::new(r"^(.+?)\s*\([0-9]+\)$").unwrap();
}

/// Everything read from one page
#[derive(Debug, Clone, Default)]
pub struct PageExtract {
    pub entries: Vec<CardEntry>,
    /// Number of decklist containers on the page
    pub decklist_count: u32,
}

impl PageExtract {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.decklist_count == 0
    }

    /// Unique card names seen anywhere on the page
    pub fn card_names(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.card_name.clone()).collect()
    }
}

/// How card links are grouped inside one decklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Links grouped in `.cards` blocks under category headings
    Categorized,
    /// Links with no category headings
    Flat,
}

impl ExtractionStrategy {
    /// Pick a strategy by looking for category headings
    pub fn probe(decklist: &ElementRef) -> Self {
        if decklist.select(&HEADING).next().is_some() {
            ExtractionStrategy::Categorized
        } else {
            ExtractionStrategy::Flat
        }
    }

    fn entries(self, decklist: &ElementRef) -> Vec<CardEntry> {
        match self {
            ExtractionStrategy::Categorized => decklist
                .select(&CARD_BLOCK)
                .flat_map(|block| {
                    let category = block_category(&block);
                    log::debug!("Category detected: {}", category);
                    link_entries(&block, &category)
                })
                .collect(),
            ExtractionStrategy::Flat => link_entries(decklist, DEFAULT_CATEGORY),
        }
    }
}

/// Extract card entries from a tournament page
pub fn extract(markup: &str) -> PageExtract {
    let document = Html::parse_document(markup);
    extract_document(&document)
}

pub fn extract_document(document: &Html) -> PageExtract {
    let mut page = PageExtract::default();

    for (index, decklist) in document.select(&DECKLIST).enumerate() {
        let strategy = ExtractionStrategy::probe(&decklist);
        log::debug!("Processing decklist {} ({:?})", index + 1, strategy);

        page.entries.extend(strategy.entries(&decklist));
        page.decklist_count += 1;
    }

    log::info!(
        "Found {} decklists, {} card entries",
        page.decklist_count,
        page.entries.len()
    );
    page
}

/// Category label from a block heading, "Other" when absent or unmatched
fn block_category(block: &ElementRef) -> String {
    block
        .select(&HEADING)
        .next()
        .map(|h| h.text().collect::<String>())
        .and_then(|text| heading_label(text.trim()))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// "Trainer (32)" -> "Trainer"
pub fn heading_label(text: &str) -> Option<String> {
    HEADING_LABEL
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|label| !label.is_empty())
}

fn link_entries(scope: &ElementRef, category: &str) -> Vec<CardEntry> {
    let mut entries = Vec::new();

    for link in scope.select(&CARD_LINK) {
        let text = link.text().collect::<String>();
        let href = link.value().attr("href").map(|h| h.to_string());

        match parse_entry(&text) {
            Some(entry) => {
                log::debug!("Card found: {} x{} [{}]", entry.card_name, entry.quantity, category);
                entries.push(entry.with_category(category).with_href(href));
            }
            None => log::debug!("Skipping link text {:?}", text.trim()),
        }
    }

    entries
}
