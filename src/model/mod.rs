pub mod card;
pub mod report;

pub use card::{CardEntry, CardRecord, DEFAULT_CATEGORY};
pub use report::{category_blocks, AnalysisReport, CardDisplayRow, CategoryBlock, CategoryRows};
