use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Category used when a card block has no usable heading
pub const DEFAULT_CATEGORY: &str = "Other";

/// One card line read from a decklist, e.g. "4 Iono PAL 185"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    pub raw_text: String,
    pub quantity: u32,
    /// Canonical name with any set code/number suffix stripped
    pub card_name: String,
    /// Display form: the raw text minus the leading quantity
    pub full_name: String,
    pub category: String,
    pub href: Option<String>,
}

impl CardEntry {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_href(mut self, href: Option<String>) -> Self {
        self.href = href;
        self
    }
}

impl fmt::Display for CardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.full_name)
    }
}

/// Aggregated usage of one canonical card name across a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    pub card_name: String,
    pub category: String,
    pub full_name: String,
    pub href: Option<String>,
    /// quantity -> number of decklist occurrences at that quantity
    pub quantities: BTreeMap<u32, u32>,
}

impl CardRecord {
    /// Start a record from the first entry seen for a name.
    /// Category, display name and link are fixed from here on.
    pub fn first_seen(entry: &CardEntry) -> Self {
        Self {
            card_name: entry.card_name.clone(),
            category: entry.category.clone(),
            full_name: entry.full_name.clone(),
            href: entry.href.clone(),
            quantities: BTreeMap::new(),
        }
    }

    pub fn add_occurrences(&mut self, quantity: u32, count: u32) {
        *self.quantities.entry(quantity).or_insert(0) += count;
    }

    /// Total decklist occurrences across all quantities
    pub fn occurrences(&self) -> u32 {
        self.quantities.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, qty: u32, category: &str) -> CardEntry {
        CardEntry {
            raw_text: format!("{} {}", qty, name),
            quantity: qty,
            card_name: name.to_string(),
            full_name: name.to_string(),
            category: category.to_string(),
            href: None,
        }
    }

    #[test]
    fn test_first_seen_starts_empty() {
        let record = CardRecord::first_seen(&entry("Iono", 4, "Trainer"));
        assert_eq!(record.category, "Trainer");
        assert!(record.quantities.is_empty());
        assert_eq!(record.occurrences(), 0);
    }

    #[test]
    fn test_add_occurrences_accumulates() {
        let mut record = CardRecord::first_seen(&entry("Iono", 4, "Trainer"));
        record.add_occurrences(4, 1);
        record.add_occurrences(4, 2);
        record.add_occurrences(3, 1);
        assert_eq!(record.quantities.get(&4), Some(&3));
        assert_eq!(record.quantities.get(&3), Some(&1));
        assert_eq!(record.occurrences(), 4);
    }

    #[test]
    fn test_entry_display() {
        let e = entry("Dreepy (TWM-128)", 4, "Pokémon");
        assert_eq!(e.to_string(), "4 Dreepy (TWM-128)");
    }
}
