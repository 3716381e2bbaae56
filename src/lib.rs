pub mod aggregate;
pub mod analyzer;
pub mod availability;
pub mod decklist;
pub mod discovery;
pub mod error;
pub mod export;
pub mod fetch;
pub mod layout;
pub mod matchups;
pub mod meta;
pub mod model;
pub mod settings;
pub mod stats;
pub mod xlsx;

pub use error::{AnalyzerError, Result};
pub use model::*;
