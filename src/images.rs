//! Deferred image placeholders.
//!
//! Placeholders carry their real URL in `data-src`. Once a placeholder
//! nears the viewport the image is fetched exactly once; a failed fetch is
//! replaced by a gradient chosen from the file name, so the same broken
//! asset always renders the same way.

use serde::{Deserialize, Serialize};

/// Attribute holding the deferred image URL.
pub const DEFERRED_SRC_ATTR: &str = "data-src";

/// Class added once a placeholder is settled, whether by image or fallback.
pub const LOADED_CLASS: &str = "loaded";

/// Gradient used when the file stem is not in [`FALLBACK_PALETTE`].
pub const DEFAULT_GRADIENT: &str = "linear-gradient(135deg, #2D3748 0%, #4A5568 100%)";

pub const FALLBACK_PALETTE: &[(&str, &str)] = &[
    ("work1", "linear-gradient(135deg, #2D3748 0%, #4A5568 100%)"),
    ("work2", "linear-gradient(135deg, #2D4A3C 0%, #3A6650 100%)"),
    ("work3", "linear-gradient(135deg, #4A3C2D 0%, #66503A 100%)"),
    ("portfolio1", "linear-gradient(135deg, #2D3748 0%, #4A5568 100%)"),
    ("portfolio2", "linear-gradient(135deg, #2D4A3C 0%, #3A6650 100%)"),
    ("portfolio3", "linear-gradient(135deg, #4A3C2D 0%, #66503A 100%)"),
];

const CHECKER: [&str; 4] = [
    "linear-gradient(45deg, rgba(200, 183, 138, 0.1) 25%, transparent 25%)",
    "linear-gradient(-45deg, rgba(200, 183, 138, 0.1) 25%, transparent 25%)",
    "linear-gradient(45deg, transparent 75%, rgba(200, 183, 138, 0.1) 75%)",
    "linear-gradient(-45deg, transparent 75%, rgba(200, 183, 138, 0.1) 75%)",
];
const CHECKER_SIZE: &str = "100% 100%, 20px 20px, 20px 20px, 20px 20px, 20px 20px";
const CHECKER_POSITION: &str = "0 0, 0 0, 0 10px, 10px -10px, -10px 0px";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyImageOptions {
    /// IntersectionObserver `rootMargin`.
    pub root_margin: String,
    /// Visible fraction that counts as intersecting.
    pub threshold: f64,
}

impl Default for LazyImageOptions {
    fn default() -> Self {
        Self {
            root_margin: "50px 0px".to_string(),
            threshold: 0.1,
        }
    }
}

/// Lifecycle of one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageState {
    #[default]
    Pending,
    Loaded,
    Fallback,
}

/// Result of the single fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

impl ImageState {
    /// Settle a pending placeholder. Returns `false` if it was already
    /// settled, in which case nothing changes.
    pub fn settle(&mut self, outcome: LoadOutcome) -> bool {
        if *self != ImageState::Pending {
            return false;
        }
        *self = match outcome {
            LoadOutcome::Loaded => ImageState::Loaded,
            LoadOutcome::Failed => ImageState::Fallback,
        };
        true
    }

    pub fn is_settled(self) -> bool {
        self != ImageState::Pending
    }
}

/// Inline style applied to a placeholder whose image failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackStyle {
    pub background: &'static str,
    pub background_image: String,
    pub background_size: &'static str,
    pub background_position: &'static str,
}

/// File name without directories or extension: `a/b/work1.jpg` -> `work1`.
pub fn file_stem(src: &str) -> &str {
    let name = src.rsplit('/').next().unwrap_or(src);
    name.split('.').next().unwrap_or(name)
}

pub fn fallback_gradient(src: &str) -> &'static str {
    let stem = file_stem(src);
    FALLBACK_PALETTE
        .iter()
        .find(|(key, _)| *key == stem)
        .map(|(_, gradient)| *gradient)
        .unwrap_or(DEFAULT_GRADIENT)
}

pub fn fallback_style(src: &str) -> FallbackStyle {
    let gradient = fallback_gradient(src);
    let mut layers = Vec::with_capacity(CHECKER.len() + 1);
    layers.push(gradient);
    layers.extend(CHECKER);
    FallbackStyle {
        background: gradient,
        background_image: layers.join(", "),
        background_size: CHECKER_SIZE,
        background_position: CHECKER_POSITION,
    }
}

/// `background-image` value for a successfully loaded source.
pub fn background_url(src: &str) -> String {
    format!("url('{src}')")
}

/// URL inside the first CSS `url(...)`, with optional quotes stripped.
pub fn css_url(value: &str) -> Option<&str> {
    let start = value.find("url(")? + 4;
    let rest = &value[start..];
    let end = rest.find(')')?;
    let inner = rest[..end].trim().trim_matches(|c| c == '"' || c == '\'');
    (!inner.is_empty()).then_some(inner)
}
