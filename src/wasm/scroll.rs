//! Section activation, nav indicator, staggered reveals, parallax and
//! hover/focus feedback.

use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::error::EffectError;
use crate::geom::{Point, Viewport};
use crate::interact::{
    self, FIELD_BLUR, FIELD_FOCUS, FOCUSED_CLASS, FORM_FIELD_SELECTOR, HOVER_RULES,
};
use crate::scroll::{self, ScrollOptions, SectionBounds, REVEAL_SELECTORS, SECTION_IDS};

use super::{dom, frame};

const ACTIVE_SECTION: &str = "active-section";
const INDICATOR_TRANSITION: &str = "transform 0.6s cubic-bezier(0.23, 1, 0.32, 1)";
const LAYER_SELECTOR: &str = ".section-background-layer, .hero-background-layer";
const TEXT_SELECTOR: &str = "h1, h2, h3, .section-title";

pub struct ScrollCoordinator {
    window: Window,
    document: Document,
    options: ScrollOptions,
    sections: Vec<Element>,
    reveal: Vec<Element>,
    portfolio: Vec<Element>,
    nav_links: Vec<Element>,
    indicator: Option<HtmlElement>,
}

impl ScrollCoordinator {
    fn new(window: Window, document: Document, options: ScrollOptions) -> Self {
        let indicator = document
            .get_element_by_id("navIndicator")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Self {
            sections: dom::query_all(&document, "section"),
            reveal: dom::query_all(&document, ".scroll-element"),
            portfolio: dom::query_all(&document, ".portfolio-visuals"),
            nav_links: dom::query_all(&document, ".nav-link"),
            indicator,
            window,
            document,
            options,
        }
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|el| {
                let top = el
                    .dyn_ref::<HtmlElement>()
                    .map(|h| h.offset_top() as f64)
                    .unwrap_or_default();
                SectionBounds::new(el.id(), top, el.client_height() as f64)
            })
            .collect()
    }

    /// One full pass: reveals, active section, nav indicator, layer opacity.
    /// Returns the index of the active section.
    pub fn update(&self) -> Option<usize> {
        let viewport = dom::viewport(&self.window);
        let scroll_y = dom::scroll_y(&self.window);

        for el in &self.reveal {
            let top = dom::client_rect(el).top();
            if scroll::in_view(top, viewport.height, self.options.reveal_dividend) {
                dom::add_class(el, "visible");
            }
        }
        for el in &self.portfolio {
            let top = dom::client_rect(el).top();
            if scroll::in_view(top, viewport.height, self.options.portfolio_dividend) {
                dom::add_class(el, "in-view");
            }
        }

        let bounds = self.section_bounds();
        let active = scroll::active_section(scroll_y, &bounds);
        for (i, el) in self.sections.iter().enumerate() {
            if Some(i) == active {
                dom::add_class(el, ACTIVE_SECTION);
            } else {
                dom::remove_class(el, ACTIVE_SECTION);
            }
        }
        self.update_nav(active.map(|i| bounds[i].id.as_str()).unwrap_or_default());

        let progress = scroll::scroll_progress(
            scroll_y,
            dom::scroll_height(&self.document),
            viewport.height,
        );
        let opacity = self.options.layer_opacity(progress).to_string();
        for layer in dom::query_all(&self.document, LAYER_SELECTOR) {
            dom::set_style(&layer, "opacity", &opacity);
        }
        active
    }

    /// Page load: a full pass, with `#home` active when nothing else is.
    fn on_load(&self) {
        if self.update().is_some() {
            return;
        }
        if let Some(home) = self.document.get_element_by_id("home") {
            dom::add_class(&home, ACTIVE_SECTION);
        }
    }

    fn update_nav(&self, current: &str) {
        for link in &self.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            let is_current = !current.is_empty() && scroll::href_target(&href) == Some(current);
            if !is_current {
                dom::remove_class(link, "active");
                continue;
            }
            dom::add_class(link, "active");

            let Some(indicator) = &self.indicator else {
                continue;
            };
            let Some(nav) = link.closest("nav").ok().flatten() else {
                continue;
            };
            let offset = scroll::indicator_offset(dom::client_rect(link), dom::client_rect(&nav));
            let style = indicator.style();
            let _ = style.set_property("transition", INDICATOR_TRANSITION);
            let _ = style.set_property("transform", &format!("translateY({offset}px)"));
        }
    }

    fn parallax(&self, pointer: Point, viewport: Viewport) {
        let item = scroll::parallax_offset(pointer, viewport, self.options.item_parallax);
        let item = format!("translate({}px, {}px)", item.x, item.y);
        for el in dom::query_all(&self.document, ".service-item, .work-item") {
            dom::set_style(&el, "transform", &item);
        }
        if let Some(overlay) = dom::query(&self.document, ".section-bg-overlay") {
            let o = scroll::parallax_offset(pointer, viewport, self.options.overlay_parallax);
            dom::set_style(&overlay, "transform", &format!("translate({}px, {}px)", o.x, o.y));
        }
    }
}

/// Tag reveal targets with `scroll-element` and their stagger class, and
/// give every `.scroll-element` its transition delay.
fn prepare_reveals(document: &Document) {
    for selector in REVEAL_SELECTORS {
        for (i, el) in dom::query_all(document, selector).iter().enumerate() {
            dom::add_class(el, "scroll-element");
            dom::add_class(el, &scroll::stagger_class(i));
        }
    }
    for (i, el) in dom::query_all(document, ".scroll-element").iter().enumerate() {
        dom::set_style(el, "transition-delay", &scroll::transition_delay(i));
    }
}

/// Make sure every section carries the decorative layers the stylesheet
/// animates.
fn prepare_layers(document: &Document) -> Result<(), EffectError> {
    for section in dom::query_all(document, "section") {
        if section.query_selector(".section-background-layer")?.is_none() {
            let layer = document.create_element("div")?;
            layer.set_class_name("section-background-layer");
            dom::set_style(&section, "position", "relative");
            section.append_child(&layer)?;
        }
    }
    for container in dom::query_all(document, ".glass-container") {
        dom::add_class(&container, "glass-layer");
    }
    for id in SECTION_IDS {
        let Some(section) = document.get_element_by_id(id) else {
            continue;
        };
        if section.query_selector(".grid-section-overlay")?.is_none() {
            let overlay = document.create_element("div")?;
            overlay.set_class_name("grid-section-overlay");
            dom::set_style(&section, "position", "relative");
            section.append_child(&overlay)?;
        }
    }
    Ok(())
}

fn wire_nav_clicks(window: &Window, document: &Document, offset: f64) -> Result<(), EffectError> {
    for link in dom::query_all(document, ".nav-link") {
        let window = window.clone();
        let document = document.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        dom::listen(&link, "click", move |e: web_sys::Event| {
            let Some(id) = scroll::href_target(&href) else {
                return;
            };
            let Some(target) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            e.prevent_default();
            let options = ScrollToOptions::new();
            options.set_top(target.offset_top() as f64 - offset);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}

fn set_styles(el: &Element, declarations: interact::Declarations) {
    for (property, value) in declarations {
        dom::set_style(el, property, value);
    }
}

/// Hover lifts on cards and buttons, and focus feedback on form fields.
fn wire_interactions(document: &Document) -> Result<(), EffectError> {
    for rule in HOVER_RULES {
        for el in dom::query_all(document, rule.selector) {
            let target = match rule.part {
                Some(part) => match el.query_selector(part)? {
                    Some(target) => target,
                    None => continue,
                },
                None => el.clone(),
            };
            let t = target.clone();
            dom::listen(&el, "mouseenter", move |_: web_sys::Event| set_styles(&t, rule.enter))?;
            dom::listen(&el, "mouseleave", move |_: web_sys::Event| {
                set_styles(&target, rule.leave)
            })?;
        }
    }

    for field in dom::query_all(document, FORM_FIELD_SELECTOR) {
        let Some(parent) = field.parent_element() else {
            continue;
        };
        let p = parent.clone();
        dom::listen(&field, "focus", move |_: web_sys::Event| {
            set_styles(&p, FIELD_FOCUS);
            dom::add_class(&p, FOCUSED_CLASS);
        })?;
        let f = field.clone();
        dom::listen(&field, "blur", move |_: web_sys::Event| {
            set_styles(&parent, FIELD_BLUR);
            let value = js_sys::Reflect::get(&f, &JsValue::from_str("value"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            if !interact::keeps_focus_class(&value) {
                dom::remove_class(&parent, FOCUSED_CLASS);
            }
        })?;
    }
    Ok(())
}

/// One-shot reveal classes driven by IntersectionObserver.
fn observe_text_and_steps(document: &Document, step_stagger_ms: i32) -> Result<(), EffectError> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    options.set_root_margin("0px 0px -50px 0px");

    let text = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    dom::add_class(&entry.target(), "text-visible");
                }
            }
        },
    );
    let observer =
        IntersectionObserver::new_with_options(text.as_ref().unchecked_ref(), &options)?;
    text.forget();
    for el in dom::query_all(document, TEXT_SELECTOR) {
        observer.observe(&el);
    }

    let steps = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                dom::add_class(&target, "animated");
                if !target.class_list().contains("process-steps") {
                    continue;
                }
                for (i, step) in dom::query_all_in(&target, ".step").into_iter().enumerate() {
                    let delay = step_stagger_ms.saturating_mul(i as i32);
                    if let Err(err) = frame::after(delay, move || dom::add_class(&step, "animated")) {
                        tracing::debug!(%err, "step reveal not scheduled");
                    }
                }
            }
        },
    );
    let observer =
        IntersectionObserver::new_with_options(steps.as_ref().unchecked_ref(), &options)?;
    steps.forget();
    for el in dom::query_all(document, ".scroll-element") {
        observer.observe(&el);
    }
    Ok(())
}

pub fn start(window: &Window, document: &Document, options: ScrollOptions) -> Result<(), EffectError> {
    prepare_reveals(document);
    prepare_layers(document)?;
    wire_nav_clicks(window, document, options.nav_scroll_offset)?;
    observe_text_and_steps(document, options.step_stagger_ms)?;
    wire_interactions(document)?;

    let coordinator = Rc::new(ScrollCoordinator::new(
        window.clone(),
        document.clone(),
        options,
    ));

    let c = coordinator.clone();
    dom::listen_passive(
        window,
        "scroll",
        frame::throttled::<web_sys::Event>(move || {
            c.update();
        }),
    )?;

    let c = coordinator.clone();
    let win = window.clone();
    dom::listen(window, "mousemove", move |e: web_sys::MouseEvent| {
        let pointer = Point::new(e.client_x() as f64, e.client_y() as f64);
        c.parallax(pointer, dom::viewport(&win));
    })?;

    let c = coordinator.clone();
    dom::listen(window, "load", move |_: web_sys::Event| c.on_load())?;

    // The module may start after `load` already fired.
    coordinator.on_load();
    tracing::info!(
        sections = coordinator.sections.len(),
        nav_links = coordinator.nav_links.len(),
        "scroll coordinator started"
    );
    Ok(())
}
