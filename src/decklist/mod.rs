//! Reading decklists out of tournament pages

pub mod entry;
pub mod extract;

pub use entry::{canonical_name, parse_entry};
pub use extract::{extract, extract_document, ExtractionStrategy, PageExtract};
