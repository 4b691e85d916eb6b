#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use site_fx::geom::{Point, Rect, Viewport};
use site_fx::scroll::{self, ScrollOptions, SectionBounds};

/// Sections laid out top to bottom from the given heights.
fn stack(heights: &[f64]) -> Vec<SectionBounds> {
    let mut top = 0.0;
    heights
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let section = SectionBounds::new(format!("s{i}"), top, *h);
            top += h;
            section
        })
        .collect()
}

#[test]
fn nothing_active_above_the_first_section() {
    let sections = vec![SectionBounds::new("home", 900.0, 300.0)];
    assert_eq!(scroll::active_section(799.0, &sections), None);
    assert_eq!(scroll::active_section(800.0, &sections), Some(0));
}

#[test]
fn nav_indicator_sits_a_quarter_into_the_link() {
    let nav = Rect::new(0.0, 100.0, 200.0, 400.0);
    let link = Rect::new(0.0, 180.0, 200.0, 40.0);
    assert_eq!(scroll::indicator_offset(link, nav), 90.0);
}

#[test]
fn href_targets() {
    assert_eq!(scroll::href_target("#work"), Some("work"));
    assert_eq!(scroll::href_target("#"), None);
    assert_eq!(scroll::href_target("/about"), None);
}

#[test]
fn parallax_is_zero_at_the_center() {
    let view = Viewport::new(1000.0, 500.0);
    assert_eq!(scroll::parallax_offset(view.center(), view, 20.0), Point::new(0.0, 0.0));
    assert_eq!(
        scroll::parallax_offset(Point::new(1000.0, 0.0), view, 20.0),
        Point::new(10.0, -10.0)
    );
}

#[test]
fn layer_opacity_never_drops_below_floor() {
    let options = ScrollOptions::default();
    assert_eq!(options.layer_opacity(0.0), 0.6);
    assert!(options.layer_opacity(1.0) >= 0.4);
    assert_eq!(options.layer_opacity(5.0), 0.4);
}

proptest! {
    #[test]
    fn activation_is_monotonic_in_scroll(
        heights in prop::collection::vec(50.0f64..2000.0, 1..8),
        a in -500.0f64..20_000.0,
        b in -500.0f64..20_000.0,
    ) {
        let sections = stack(&heights);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = scroll::active_section(lo, &sections);
        let hi = scroll::active_section(hi, &sections);
        match (lo, hi) {
            (Some(lo), Some(hi)) => prop_assert!(lo <= hi),
            (Some(_), None) => prop_assert!(false, "section deactivated while scrolling down"),
            _ => {}
        }
    }

    #[test]
    fn progress_stays_in_unit_range(
        scroll_y in -1000.0f64..50_000.0,
        scroll_height in 0.0f64..40_000.0,
        viewport_height in 0.0f64..3000.0,
    ) {
        let p = scroll::scroll_progress(scroll_y, scroll_height, viewport_height);
        prop_assert!((0.0..=1.0).contains(&p));
    }
}
