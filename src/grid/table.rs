use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ConfigError;

/// Which edge a vertical patch hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Pattern kind plus its pattern-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridPattern {
    /// Full grid fading out with distance from the top-left corner.
    /// `fade_radius` is a fraction of the canvas diagonal.
    FadeTopLeft { fade_radius: f64 },
    /// Line fans clipped to the four corners. `corner_size` is a fraction
    /// of the shorter canvas side.
    DiagonalCorners { corner_size: f64 },
    /// Grid clipped to a full-height strip. `patch_width` is a fraction of
    /// the canvas width.
    VerticalPatch { patch_width: f64, side: Side },
    /// Full grid strengthening toward the bottom right, plus brackets
    /// around the call-to-action. `bracket_size` is a fraction of the
    /// call-to-action's shorter side.
    TargetBrackets { bracket_size: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub pattern: GridPattern,
    pub intensity: f64,
    /// Grid cell edge in CSS pixels.
    pub size: f64,
    pub color: Rgba,
}

const HOME: GridConfig = GridConfig {
    pattern: GridPattern::FadeTopLeft { fade_radius: 0.6 },
    intensity: 0.1,
    size: 40.0,
    color: Rgba::new(255, 203, 154, 0.08),
};

const CORNERS: GridConfig = GridConfig {
    pattern: GridPattern::DiagonalCorners { corner_size: 0.3 },
    intensity: 0.15,
    size: 35.0,
    color: Rgba::new(217, 176, 140, 0.12),
};

const SERVICES: GridConfig = GridConfig {
    pattern: GridPattern::VerticalPatch {
        patch_width: 0.4,
        side: Side::Right,
    },
    intensity: 0.12,
    size: 30.0,
    color: Rgba::new(255, 203, 154, 0.1),
};

const MANIFEST: GridConfig = GridConfig {
    pattern: GridPattern::TargetBrackets { bracket_size: 0.2 },
    intensity: 0.2,
    size: 25.0,
    color: Rgba::new(217, 176, 140, 0.15),
};

/// Section id -> grid configuration. Lookups for unknown ids use `home`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridTable {
    entries: BTreeMap<String, GridConfig>,
}

impl Default for GridTable {
    fn default() -> Self {
        let entries = [
            ("home", HOME),
            ("work", CORNERS),
            ("portfolio", CORNERS),
            ("services", SERVICES),
            ("manifest", MANIFEST),
        ]
        .into_iter()
        .map(|(id, config)| (id.to_string(), config))
        .collect();
        Self { entries }
    }
}

impl GridTable {
    pub fn config_for(&self, section: Option<&str>) -> &GridConfig {
        section
            .and_then(|id| self.entries.get(id))
            .or_else(|| self.entries.get("home"))
            .unwrap_or(&HOME)
    }

    pub fn insert(&mut self, section: impl Into<String>, config: GridConfig) {
        self.entries.insert(section.into(), config);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.values().any(|c| !(c.size > 0.0)) {
            return Err(ConfigError::Invalid {
                field: "grid.size",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}
