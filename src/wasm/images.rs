use std::cell::Cell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::error::EffectError;
use crate::images::{
    self, ImageState, LazyImageOptions, LoadOutcome, DEFERRED_SRC_ATTR, LOADED_CLASS,
};

use super::dom;

const INLINE_BACKGROUND_SELECTOR: &str =
    ".preview-frame, .project-image, .project-hero-image, .detail-image";

/// Fetch `src` once and hand the outcome to `settle`. The element is only
/// touched from inside `settle`.
fn fetch(src: &str, settle: impl FnOnce(LoadOutcome) + 'static) -> Result<(), EffectError> {
    let img = HtmlImageElement::new()?;
    // Both handlers share one slot so whichever fires first wins.
    let slot = Rc::new(Cell::new(Some(Box::new(settle) as Box<dyn FnOnce(LoadOutcome)>)));

    let on_load = {
        let slot = slot.clone();
        Closure::once_into_js(move || {
            if let Some(settle) = slot.take() {
                settle(LoadOutcome::Loaded);
            }
        })
    };
    let on_error = Closure::once_into_js(move || {
        if let Some(settle) = slot.take() {
            settle(LoadOutcome::Failed);
        }
    });
    img.set_onload(Some(on_load.unchecked_ref()));
    img.set_onerror(Some(on_error.unchecked_ref()));
    img.set_src(src);
    Ok(())
}

fn apply(element: &Element, src: &str, outcome: LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded => {
            dom::set_style(element, "background-image", &images::background_url(src));
        }
        LoadOutcome::Failed => {
            let style = images::fallback_style(src);
            dom::set_style(element, "background", style.background);
            dom::set_style(element, "background-image", &style.background_image);
            dom::set_style(element, "background-size", style.background_size);
            dom::set_style(element, "background-position", style.background_position);
            tracing::debug!(src, "image failed, fallback applied");
        }
    }
    dom::add_class(element, LOADED_CLASS);
}

/// Start loading a placeholder's deferred image.
fn load_placeholder(element: Element) {
    let Some(src) = element.get_attribute(DEFERRED_SRC_ATTR) else {
        return;
    };
    let state = Rc::new(Cell::new(ImageState::Pending));
    let target = element.clone();
    let url = src.clone();
    let started = fetch(&src, move |outcome| {
        let mut s = state.get();
        if s.settle(outcome) {
            state.set(s);
            apply(&target, &url, outcome);
        }
    });
    if let Err(err) = started {
        tracing::warn!(%err, %src, "image fetch not started");
        apply(&element, &src, LoadOutcome::Failed);
    }
}

pub fn start(document: &Document, options: &LazyImageOptions) -> Result<(), EffectError> {
    let placeholders = dom::query_all(document, &format!("[{DEFERRED_SRC_ATTR}]"));

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin);
    init.set_threshold(&JsValue::from_f64(options.threshold));

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                load_placeholder(target);
            }
        },
    );
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    for el in &placeholders {
        observer.observe(el);
    }

    refresh_inline_backgrounds(document);
    tracing::info!(placeholders = placeholders.len(), "lazy image loader started");
    Ok(())
}

/// Pre-fetch inline `background-image` URLs so the page can fade them in
/// once they are cached. Both outcomes mark the element loaded.
fn refresh_inline_backgrounds(document: &Document) {
    for el in dom::query_all(document, INLINE_BACKGROUND_SELECTOR) {
        let Some(inline) = el
            .get_attribute("style")
            .and_then(|style| images::css_url(&style).map(str::to_string))
        else {
            continue;
        };
        let target = el.clone();
        let url = inline.clone();
        let started = fetch(&inline, move |outcome| {
            if outcome == LoadOutcome::Failed {
                tracing::warn!(%url, "failed to load image");
            }
            dom::add_class(&target, LOADED_CLASS);
        });
        if started.is_err() {
            dom::add_class(&el, LOADED_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    use super::*;
    use crate::wasm::frame;

    fn placeholder(src: &str) -> HtmlElement {
        let document = dom::document().expect("document");
        let el = document
            .create_element("div")
            .expect("div")
            .dyn_into::<HtmlElement>()
            .expect("html element");
        el.set_attribute(DEFERRED_SRC_ATTR, src).expect("attr");
        document.body().expect("body").append_child(&el).expect("append");
        el
    }

    #[wasm_bindgen_test]
    fn failure_applies_palette_gradient_and_loaded() {
        let el = placeholder("assets/images/work2.jpg");
        apply(&el, "assets/images/work2.jpg", LoadOutcome::Failed);

        assert!(el.class_list().contains(LOADED_CLASS));
        let image = el.style().get_property_value("background-image").expect("style");
        // #2D4A3C as the browser serializes it.
        assert!(image.contains("rgb(45, 74, 60)"), "{image}");
        assert_eq!(image.matches("linear-gradient").count(), 5);
        el.remove();
    }

    #[wasm_bindgen_test]
    fn success_sets_the_image_url() {
        let el = placeholder("img/a.png");
        apply(&el, "img/a.png", LoadOutcome::Loaded);

        assert!(el.class_list().contains(LOADED_CLASS));
        let image = el.style().get_property_value("background-image").expect("style");
        assert!(image.contains("img/a.png"), "{image}");
        el.remove();
    }

    #[wasm_bindgen_test]
    async fn missing_work1_settles_on_its_fallback() {
        let src = "/no-such-dir/work1.jpg";
        let el = placeholder(src);
        load_placeholder(el.clone().unchecked_into());

        for _ in 0..100 {
            if el.class_list().contains(LOADED_CLASS) {
                break;
            }
            frame::sleep(20).await;
        }

        assert!(el.class_list().contains(LOADED_CLASS));
        let image = el.style().get_property_value("background-image").expect("style");
        // work1 maps to #2D3748.
        assert!(image.contains("rgb(45, 55, 72)"), "{image}");
        el.remove();
    }
}
