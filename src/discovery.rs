//! Finding tournament decklist pages linked from a listing page

use crate::error::{AnalyzerError, Result};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://play.limitlesstcg.com";

const TOURNAMENT_PATH: &str = "/tournament/";

lazy_static! {
    static ref LINK: Selector = Selector::parse("a[href]").unwrap();
    static ref DECKLIST_ICON: Selector = Selector::parse("i.fa-list-alt").unwrap();
}

/// Absolute URLs of every tournament link carrying a decklist icon.
///
/// Links keep page order; a tournament linked twice is returned twice.
pub fn discover_tournament_links(markup: &str, base_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(base_url)
        .map_err(|e| AnalyzerError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    let document = Html::parse_document(markup);

    let mut links = Vec::new();
    for link in document.select(&LINK) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.starts_with(TOURNAMENT_PATH) || link.select(&DECKLIST_ICON).next().is_none() {
            continue;
        }

        let absolute = base
            .join(href)
            .map_err(|e| AnalyzerError::InvalidUrl(format!("{}: {}", href, e)))?;
        links.push(absolute.to_string());
    }

    log::info!("Tournament links found: {}", links.len());
    Ok(links)
}
