use thiserror::Error;

/// Rejected page configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Why an effect could not start or run a unit of work.
///
/// None of these reach the user; the entry point logs them and keeps the
/// remaining effects running.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("{0} unavailable")]
    Unsupported(&'static str),
    #[error("host exception: {0}")]
    Host(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EffectError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        EffectError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<EffectError> for wasm_bindgen::JsValue {
    fn from(err: EffectError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
