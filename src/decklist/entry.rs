//! Card line parsing
//!
//! A card line is a quantity followed by a name, optionally carrying the
//! printing it was taken from, either as a trailing "(SET-NUM)" or as a bare
//! "SET NUM" suffix:
//!
//! ```text
//! 4 Dreepy (TWM-128)
//! 4 Iono PAL 185
//! 2 Boss's Orders
//! ```
//!
//! Printings are stripped from the canonical name so that different prints of
//! one card aggregate together. The bare suffix rule is a heuristic: a card
//! whose real name ends in an uppercase word followed by a number is
//! shortened too.

use crate::model::{CardEntry, DEFAULT_CATEGORY};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ENTRY_LINE: Regex = Regex::new(r"^([0-9]+)\s+(.+?)(?:\s*\([^)]+\))?$").unwrap();
    static ref SET_SUFFIX: Regex = Regex::new(r"\s+[A-Z]{2,}\s+[0-9]+\s*$").unwrap();
    static ref LEADING_QUANTITY: Regex = Regex::new(r"^[0-9]+\s+").unwrap();
}

/// Parse one card line. Returns `None` when the line is not a card entry.
///
/// The returned entry is filed under the default category with no link;
/// callers tag it with the enclosing block's category.
pub fn parse_entry(raw: &str) -> Option<CardEntry> {
    let text = raw.trim();
    let caps = ENTRY_LINE.captures(text)?;

    let quantity: u32 = caps[1].parse().ok()?;
    if quantity == 0 {
        return None;
    }

    let card_name = canonical_name(caps[2].trim());
    let full_name = LEADING_QUANTITY.replace(text, "").into_owned();

    Some(CardEntry {
        raw_text: text.to_string(),
        quantity,
        card_name,
        full_name,
        category: DEFAULT_CATEGORY.to_string(),
        href: None,
    })
}

/// Strip a trailing "SET NUM" printing from a name
pub fn canonical_name(name: &str) -> String {
    SET_SUFFIX.replace(name, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesized_printing() {
        let entry = parse_entry("4 Dreepy (TWM-128)").unwrap();
        assert_eq!(entry.quantity, 4);
        assert_eq!(entry.card_name, "Dreepy");
        assert_eq!(entry.full_name, "Dreepy (TWM-128)");
        assert_eq!(entry.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_bare_set_suffix() {
        let entry = parse_entry("4 Iono PAL 185").unwrap();
        assert_eq!(entry.quantity, 4);
        assert_eq!(entry.card_name, "Iono");
        assert_eq!(entry.full_name, "Iono PAL 185");
    }

    #[test]
    fn test_printings_share_a_name() {
        let a = parse_entry("4 Iono PAL 185").unwrap();
        let b = parse_entry("2 Iono TEF 201").unwrap();
        assert_eq!(a.card_name, b.card_name);
        assert_ne!(a.full_name, b.full_name);
    }

    #[test]
    fn test_plain_name() {
        let entry = parse_entry("  2 Boss's Orders ").unwrap();
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.card_name, "Boss's Orders");
        assert_eq!(entry.full_name, "Boss's Orders");
        assert_eq!(entry.raw_text, "2 Boss's Orders");
    }

    #[test]
    fn test_multi_word_name_with_printing() {
        let entry = parse_entry("3 Dragapult ex TWM 130").unwrap();
        assert_eq!(entry.card_name, "Dragapult ex");
        assert_eq!(entry.full_name, "Dragapult ex TWM 130");
    }

    #[test]
    fn test_not_a_card_line() {
        assert!(parse_entry("not a card line").is_none());
        assert!(parse_entry("").is_none());
        assert!(parse_entry("4").is_none());
        assert!(parse_entry("4x Iono").is_none());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(parse_entry("0 Iono").is_none());
    }

    #[test]
    fn test_single_letter_suffix_kept() {
        // Only two or more uppercase letters count as a set code
        assert_eq!(canonical_name("Unown V 12"), "Unown V 12");
        assert_eq!(canonical_name("Unown VS 12"), "Unown");
    }
}
