#![cfg(target_arch = "wasm32")]

use site_fx::color::Rgba;
use site_fx::geom::Viewport;
use site_fx::images;
use site_fx::prng::Prng;
use site_fx::wave::{WaveField, WaveSettings};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn div() -> web_sys::HtmlElement {
    document()
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap()
}

#[wasm_bindgen_test]
fn grid_stroke_color_is_valid_css() {
    let canvas = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    let ctx = canvas
        .get_context("2d")
        .unwrap()
        .expect("2d context")
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .unwrap();
    ctx.set_stroke_style_str(&Rgba::new(200, 183, 138, 0.4).to_css());
    let applied = ctx.stroke_style().as_string().unwrap();
    assert_eq!(applied, "rgba(200, 183, 138, 0.4)");
}

#[wasm_bindgen_test]
fn fallback_style_is_accepted_by_the_browser() {
    let el = div();
    let style = images::fallback_style("images/work2.jpg");
    let css = el.style();
    css.set_property("background-image", &style.background_image).unwrap();
    css.set_property("background-size", style.background_size).unwrap();
    css.set_property("background-position", style.background_position).unwrap();
    assert!(!css.get_property_value("background-image").unwrap().is_empty());
    assert!(!css.get_property_value("background-size").unwrap().is_empty());
    assert!(!css.get_property_value("background-position").unwrap().is_empty());
}

#[wasm_bindgen_test]
fn wave_path_attaches_to_svg() {
    let doc = document();
    let svg = doc
        .create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")
        .unwrap();
    let path = doc
        .create_element_ns(Some("http://www.w3.org/2000/svg"), "path")
        .unwrap();
    let field = WaveField::generate(
        &WaveSettings::default(),
        Viewport::new(640.0, 480.0),
        &mut Prng::from_host(),
    );
    let d = field.path_data(&field.paths[0]);
    path.set_attribute("d", &d).unwrap();
    svg.append_child(&path).unwrap();
    doc.body().unwrap().append_child(&svg).unwrap();
    assert_eq!(path.get_attribute("d").as_deref(), Some(d.as_str()));
    assert_eq!(svg.child_element_count(), 1);
    svg.remove();
}

#[wasm_bindgen_test]
fn host_seeded_prng_stays_in_range() {
    let mut rng = Prng::from_host();
    for _ in 0..1000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}
