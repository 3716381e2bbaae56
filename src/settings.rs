//! Feature toggles
//!
//! Settings are a flat JSON object of boolean flags, one per module:
//!
//! ```json
//! { "tournament_analyzer_enabled": true, "meta_share_enabled": false }
//! ```
//!
//! Anything absent is treated as enabled. The same file may carry the weekly
//! availability under `availability_config`.

use crate::availability::WeeklyAvailability;
use crate::error::{AnalyzerError, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Key -> boolean lookup
pub trait SettingsStore {
    fn get_bool(&self, key: &str) -> Option<bool>;
}

/// Toggleable modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    TournamentAnalyzer,
    MetaShare,
    MatchThreshold,
    AvailabilityHighlighter,
}

/// Key of the weekly availability object
pub const AVAILABILITY_KEY: &str = "availability_config";

impl Module {
    pub const ALL: [Module; 4] = [
        Module::TournamentAnalyzer,
        Module::MetaShare,
        Module::MatchThreshold,
        Module::AvailabilityHighlighter,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Module::TournamentAnalyzer => "tournament_analyzer_enabled",
            Module::MetaShare => "meta_share_enabled",
            Module::MatchThreshold => "match_threshold_enabled",
            Module::AvailabilityHighlighter => "availability_highlighter_enabled",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Module::TournamentAnalyzer => "Tournament analyzer",
            Module::MetaShare => "Meta share",
            Module::MatchThreshold => "Match threshold",
            Module::AvailabilityHighlighter => "Availability highlighter",
        };
        write!(f, "{}", name)
    }
}

/// Whether a module should run; modules default to enabled
pub fn is_enabled(store: &dyn SettingsStore, module: Module) -> bool {
    store.get_bool(module.key()).unwrap_or(true)
}

/// Settings read from a JSON file
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    values: HashMap<String, serde_json::Value>,
}

impl JsonSettings {
    /// Load settings, treating a missing file as empty
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            _ => Err(AnalyzerError::Settings(
                "settings must be a JSON object".to_string(),
            )),
        }
    }

    /// Weekly availability, 08:00 to 20:00 every day when not configured
    pub fn availability(&self) -> Result<WeeklyAvailability> {
        match self.values.get(AVAILABILITY_KEY) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(WeeklyAvailability::default()),
        }
    }
}

impl SettingsStore for JsonSettings {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(|v| v.as_bool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_absent_keys_are_enabled() {
        let settings = JsonSettings::default();
        for module in Module::ALL {
            assert!(is_enabled(&settings, module));
        }
    }

    #[test]
    fn test_explicit_flags() {
        let settings = JsonSettings::from_json(
            r#"{"tournament_analyzer_enabled": false, "meta_share_enabled": true}"#,
        )
        .unwrap();
        assert!(!is_enabled(&settings, Module::TournamentAnalyzer));
        assert!(is_enabled(&settings, Module::MetaShare));
        assert!(is_enabled(&settings, Module::MatchThreshold));
    }

    #[test]
    fn test_non_boolean_value_is_enabled() {
        let settings = JsonSettings::from_json(r#"{"meta_share_enabled": "no"}"#).unwrap();
        assert!(is_enabled(&settings, Module::MetaShare));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            JsonSettings::from_json("[true]"),
            Err(AnalyzerError::Settings(_))
        ));
        assert!(matches!(
            JsonSettings::from_json("{"),
            Err(AnalyzerError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"match_threshold_enabled": false}}"#).unwrap();

        let settings = JsonSettings::load(file.path()).unwrap();
        assert!(!is_enabled(&settings, Module::MatchThreshold));
    }

    #[test]
    fn test_availability_toggle() {
        let settings =
            JsonSettings::from_json(r#"{"availability_highlighter_enabled": false}"#).unwrap();
        assert!(!is_enabled(&settings, Module::AvailabilityHighlighter));
        assert!(is_enabled(&JsonSettings::default(), Module::AvailabilityHighlighter));
    }

    #[test]
    fn test_availability_defaults_when_absent() {
        let settings = JsonSettings::default();
        assert_eq!(settings.availability().unwrap(), WeeklyAvailability::default());
    }

    #[test]
    fn test_availability_from_settings() {
        let settings = JsonSettings::from_json(
            r#"{"availability_config": {"friday": [{"start": "18:00", "end": "23:00"}]}}"#,
        )
        .unwrap();
        let availability = settings.availability().unwrap();
        assert!(availability.is_available(chrono::Weekday::Fri, 18 * 60));
        assert!(!availability.is_available(chrono::Weekday::Mon, 12 * 60));

        let bad = JsonSettings::from_json(r#"{"availability_config": [1, 2]}"#).unwrap();
        assert!(matches!(bad.availability(), Err(AnalyzerError::Json(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = JsonSettings::load(&dir.path().join("settings.json")).unwrap();
        assert!(is_enabled(&settings, Module::TournamentAnalyzer));
    }
}
