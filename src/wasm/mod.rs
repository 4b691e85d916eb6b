//! Browser entry point and DOM wiring.

use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::{EffectsConfig, CONFIG_ELEMENT_ID};
use crate::error::EffectError;

mod dom;
mod frame;
mod grid;
mod images;
mod log;
mod scroll;
mod three;
mod waves;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

/// Read the page's JSON config, if any. An invalid config is reported and
/// replaced by the defaults.
fn load_config(document: &Document) -> (EffectsConfig, Option<EffectError>) {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return (EffectsConfig::default(), None);
    };
    match EffectsConfig::from_json(&text) {
        Ok(config) => (config, None),
        Err(err) => (EffectsConfig::default(), Some(err.into())),
    }
}

fn report(effect: &'static str, result: Result<(), EffectError>) {
    if let Err(err) = result {
        tracing::warn!(effect, %err, "effect disabled");
    }
}

// Unit tests build their own DOM, so the page effects stay off there.
#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    let (config, rejected) = load_config(&document);
    log::init(config.level_filter());
    if let Some(err) = rejected {
        tracing::warn!(%err, "ignoring page config, using defaults");
    }

    // Each effect stands alone; one failing must not stop the rest.
    report("waves", waves::start(&window, &document, config.waves));
    report("grid", grid::start(&window, &document, config.grid));
    report("scroll", scroll::start(&window, &document, config.scroll));
    report("images", images::start(&document, &config.images));
    report("viewer", three::start(&window, &document, &config.viewer));
    Ok(())
}
