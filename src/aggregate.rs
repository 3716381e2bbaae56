//! Accumulating card usage across pages

use crate::decklist::PageExtract;
use crate::model::{CardEntry, CardRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Merge entries into a name-keyed table of records.
///
/// The first entry seen for a name fixes its category, display name and link;
/// quantity counts add up.
pub fn merge(target: &mut BTreeMap<String, CardRecord>, entries: &[CardEntry]) {
    for entry in entries {
        target
            .entry(entry.card_name.clone())
            .or_insert_with(|| CardRecord::first_seen(entry))
            .add_occurrences(entry.quantity, 1);
    }
}

/// State of one analysis run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationStore {
    pub records: BTreeMap<String, CardRecord>,
    /// card name -> number of tournaments it appeared in
    pub tournament_counts: BTreeMap<String, u32>,
    pub total_decklists: u32,
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, entries: &[CardEntry]) {
        merge(&mut self.records, entries);
    }

    /// Count each name once towards the number of tournaments containing it
    pub fn count_membership(&mut self, card_names: &BTreeSet<String>) -> &BTreeMap<String, u32> {
        for name in card_names {
            *self.tournament_counts.entry(name.clone()).or_insert(0) += 1;
        }
        &self.tournament_counts
    }

    /// Fold one page into the store
    pub fn add_page(&mut self, page: &PageExtract) {
        self.merge(&page.entries);
        self.count_membership(&page.card_names());
        self.total_decklists += page.decklist_count;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, card_name: &str) -> Option<&CardRecord> {
        self.records.get(card_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decklist::parse_entry;

    fn entries(lines: &[(&str, &str)]) -> Vec<CardEntry> {
        lines
            .iter()
            .map(|(text, category)| parse_entry(text).unwrap().with_category(*category))
            .collect()
    }

    fn quantities(store: &BTreeMap<String, CardRecord>) -> BTreeMap<String, BTreeMap<u32, u32>> {
        store
            .iter()
            .map(|(name, record)| (name.clone(), record.quantities.clone()))
            .collect()
    }

    #[test]
    fn test_merge_counts_quantities() {
        let mut target = BTreeMap::new();
        merge(
            &mut target,
            &entries(&[
                ("4 Iono PAL 185", "Trainer"),
                ("4 Iono TEF 201", "Trainer"),
                ("3 Iono PAL 185", "Trainer"),
            ]),
        );

        let iono = &target["Iono"];
        assert_eq!(iono.quantities.get(&4), Some(&2));
        assert_eq!(iono.quantities.get(&3), Some(&1));
    }

    #[test]
    fn test_first_writer_wins() {
        let mut target = BTreeMap::new();
        merge(&mut target, &entries(&[("4 Iono PAL 185", "Trainer")]));
        merge(&mut target, &entries(&[("2 Iono TEF 201", "Supporter")]));

        let iono = &target["Iono"];
        assert_eq!(iono.category, "Trainer");
        assert_eq!(iono.full_name, "Iono PAL 185");
        assert_eq!(iono.occurrences(), 2);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = entries(&[
            ("4 Iono PAL 185", "Trainer"),
            ("4 Dreepy (TWM-128)", "Pokémon"),
        ]);
        let b = entries(&[
            ("3 Iono TEF 201", "Trainer"),
            ("4 Dreepy (TWM-128)", "Pokémon"),
            ("1 Lost Vacuum (LOR-162)", "Trainer"),
        ]);

        let mut ab = BTreeMap::new();
        merge(&mut ab, &a);
        merge(&mut ab, &b);

        let mut ba = BTreeMap::new();
        merge(&mut ba, &b);
        merge(&mut ba, &a);

        assert_eq!(quantities(&ab), quantities(&ba));
    }

    #[test]
    fn test_merge_empty_batch_is_noop() {
        let mut store = AggregationStore::new();
        store.merge(&entries(&[("4 Iono PAL 185", "Trainer")]));
        let before = store.clone();

        store.merge(&[]);
        assert_eq!(store, before);
    }

    #[test]
    fn test_membership_counts_once_per_tournament() {
        let mut store = AggregationStore::new();
        let page = PageExtract {
            entries: entries(&[
                ("4 Iono PAL 185", "Trainer"),
                ("4 Iono PAL 185", "Trainer"),
                ("4 Iono TEF 201", "Trainer"),
            ]),
            decklist_count: 3,
        };

        store.add_page(&page);
        store.add_page(&page);

        assert_eq!(store.tournament_counts["Iono"], 2);
        assert_eq!(store.get("Iono").unwrap().quantities[&4], 6);
        assert_eq!(store.total_decklists, 6);
    }
}
