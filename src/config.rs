//! Page-level configuration for every effect.
//!
//! All fields default, so a page can override any subset:
//!
//! ```json
//! { "waves": { "lines": 20, "walk": "chaotic" }, "log_level": "debug" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::GridTable;
use crate::images::LazyImageOptions;
use crate::scroll::ScrollOptions;
use crate::viewer::ViewerOptions;
use crate::wave::WaveSettings;

/// Id of the optional `<script type="application/json">` element the
/// browser entry point reads configuration from.
pub const CONFIG_ELEMENT_ID: &str = "site-fx-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub waves: WaveSettings,
    pub grid: GridTable,
    pub images: LazyImageOptions,
    pub scroll: ScrollOptions,
    pub viewer: ViewerOptions,
    /// `tracing` level filter: `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub log_level: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            waves: WaveSettings::default(),
            grid: GridTable::default(),
            images: LazyImageOptions::default(),
            scroll: ScrollOptions::default(),
            viewer: ViewerOptions::default(),
            log_level: "info".to_string(),
        }
    }
}

impl EffectsConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EffectsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.waves.validate()?;
        self.grid.validate()?;
        if !(0.0..=1.0).contains(&self.images.threshold) {
            return Err(ConfigError::Invalid {
                field: "images.threshold",
                reason: "must be within [0, 1]",
            });
        }
        if self.log_level.parse::<tracing::level_filters::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: "is not a tracing level",
            });
        }
        Ok(())
    }

    pub fn level_filter(&self) -> tracing::level_filters::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(tracing::level_filters::LevelFilter::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveWalk;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EffectsConfig::from_json("{}").unwrap(), EffectsConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            EffectsConfig::from_json(r#"{"waves":{"lines":12,"walk":"chaotic"}}"#).unwrap();
        assert_eq!(config.waves.lines, 12);
        assert_eq!(config.waves.walk, WaveWalk::Chaotic);
        assert_eq!(config.waves.amplitude_x, 120.0);
        assert_eq!(config.images, LazyImageOptions::default());
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            EffectsConfig::from_json(r#"{"waves":{"lines":0}}"#),
            Err(ConfigError::Invalid { field: "waves.lines", .. })
        ));
        assert!(matches!(
            EffectsConfig::from_json(r#"{"waves":{"lines":4294967295}}"#),
            Err(ConfigError::Invalid { field: "waves.lines", .. })
        ));
        assert!(matches!(
            EffectsConfig::from_json(r#"{"log_level":"loud"}"#),
            Err(ConfigError::Invalid { field: "log_level", .. })
        ));
        assert!(matches!(
            EffectsConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn grid_override_replaces_table() {
        let json = r#"{"grid":{"home":{"pattern":{"kind":"target_brackets","bracket_size":0.1},
            "intensity":0.3,"size":20.0,"color":{"r":1,"g":2,"b":3,"a":0.5}}}}"#;
        let config = EffectsConfig::from_json(json).unwrap();
        let home = config.grid.config_for(Some("services"));
        assert_eq!(home.size, 20.0);
    }
}
