//! Deck shares from a metagame overview table

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde::Serialize;

/// Decks below this share are folded into "Others"
pub const MIN_SHARE: f64 = 0.01;

pub const OTHERS: &str = "Others";

lazy_static! {
    static ref META_ROW: Selector = Selector::parse("table.meta tbody tr").unwrap();
    static ref DECK_CELL: Selector = Selector::parse("td:nth-child(3)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaShare {
    pub deck: String,
    /// Fraction of the field, 0.0 to 1.0
    pub share: f64,
}

/// Read deck shares from a page with a `table.meta`.
///
/// The first row is the header. Share comes from each row's `data-share`
/// attribute and the deck name from its third cell.
pub fn parse_meta_share(markup: &str) -> Vec<MetaShare> {
    let document = Html::parse_document(markup);

    let mut shares = Vec::new();
    let mut others = 0.0;

    for row in document.select(&META_ROW).skip(1) {
        let deck = row
            .select(&DECK_CELL)
            .next()
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .filter(|deck| !deck.is_empty());
        let share = row
            .value()
            .attr("data-share")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|s| !s.is_nan());

        let (Some(deck), Some(share)) = (deck, share) else {
            continue;
        };

        if share >= MIN_SHARE {
            shares.push(MetaShare { deck, share });
        } else {
            others += share;
        }
    }

    if others > 0.0 {
        shares.push(MetaShare {
            deck: OTHERS.to_string(),
            share: others,
        });
    }

    log::info!("Parsed {} meta share entries", shares.len());
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    const META_PAGE: &str = r#"
        <table class="meta">
          <tbody>
            <tr><th>#</th><th></th><th>Deck</th><th>Share</th></tr>
            <tr data-share="0.2"><td>1</td><td></td><td>Dragapult ex</td><td>20%</td></tr>
            <tr data-share="0.15"><td>2</td><td></td><td> Gardevoir ex </td><td>15%</td></tr>
            <tr data-share="0.004"><td>3</td><td></td><td>Rogue A</td><td>0.4%</td></tr>
            <tr data-share="0.005"><td>4</td><td></td><td>Rogue B</td><td>0.5%</td></tr>
            <tr data-share="oops"><td>5</td><td></td><td>Broken</td><td>?</td></tr>
            <tr data-share="0.1"><td>6</td><td></td><td></td><td>10%</td></tr>
          </tbody>
        </table>
    "#;

    #[test]
    fn test_parse_meta_share() {
        let shares = parse_meta_share(META_PAGE);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0], MetaShare { deck: "Dragapult ex".to_string(), share: 0.2 });
        assert_eq!(shares[1].deck, "Gardevoir ex");
        assert_eq!(shares[2].deck, OTHERS);
        assert!((shares[2].share - 0.009).abs() < 1e-9);
    }

    #[test]
    fn test_no_small_decks_no_others() {
        let html = r#"
            <table class="meta"><tbody>
              <tr><th>header</th></tr>
              <tr data-share="0.5"><td>1</td><td></td><td>Deck A</td></tr>
            </tbody></table>
        "#;
        let shares = parse_meta_share(html);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].deck, "Deck A");
    }

    #[test]
    fn test_page_without_meta_table() {
        assert!(parse_meta_share("<table><tr><td>x</td></tr></table>").is_empty());
    }
}
