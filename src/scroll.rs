//! Scroll-position rules shared by the navigation coordinator and the grid
//! renderer.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect, Viewport};

/// Stable section ids, in document order.
pub const SECTION_IDS: [&str; 5] = ["home", "work", "portfolio", "services", "manifest"];

/// Elements that receive the staggered reveal treatment.
pub const REVEAL_SELECTORS: [&str; 10] = [
    ".device-frame",
    ".hero-stats",
    ".stat",
    ".work-item",
    ".work-process",
    ".step",
    ".service-item",
    ".services-cta",
    ".manifest-form",
    ".principle",
];

/// Vertical extent of one section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Scroll offset from which this section counts as reached.
    pub fn activation_offset(&self) -> f64 {
        self.top - self.height / 3.0
    }
}

/// Index of the active section: the last one, in document order, whose
/// activation offset is at or above `scroll_y`.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<usize> {
    sections
        .iter()
        .rposition(|s| scroll_y >= s.activation_offset())
}

/// Fraction of the scrollable distance covered, in [0, 1].
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Whether an element whose bounding top is `top` has entered the
/// revealed portion of the viewport.
pub fn in_view(top: f64, viewport_height: f64, dividend: f64) -> bool {
    top <= viewport_height / dividend
}

/// Vertical offset of the nav indicator, relative to the nav container.
pub fn indicator_offset(link: Rect, nav: Rect) -> f64 {
    link.top() - nav.top() + link.height / 4.0
}

/// Section id targeted by a nav link `href` such as `#work`.
pub fn href_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn stagger_class(index: usize) -> String {
    format!("stagger-delay-{}", index % 4 + 1)
}

pub fn transition_delay(index: usize) -> String {
    format!("{:.1}s", (index % 4) as f64 * 0.1)
}

/// Pointer displacement for parallax layers, `(m - 0.5) * strength` per axis.
pub fn parallax_offset(pointer: Point, viewport: Viewport, strength: f64) -> Point {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Point::default();
    }
    Point::new(
        (pointer.x / viewport.width - 0.5) * strength,
        (pointer.y / viewport.height - 0.5) * strength,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    /// `.scroll-element` reveal: top <= viewport height / dividend.
    pub reveal_dividend: f64,
    /// `.portfolio-visuals` reveal dividend.
    pub portfolio_dividend: f64,
    pub layer_base_opacity: f64,
    /// Opacity removed at full scroll progress.
    pub layer_opacity_span: f64,
    pub layer_opacity_floor: f64,
    /// Gap kept above a section when a nav link scrolls to it.
    pub nav_scroll_offset: f64,
    pub item_parallax: f64,
    pub overlay_parallax: f64,
    /// Delay between `.step` reveals inside `.process-steps`, in ms.
    pub step_stagger_ms: i32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            reveal_dividend: 1.2,
            portfolio_dividend: 1.1,
            layer_base_opacity: 0.6,
            layer_opacity_span: 0.2,
            layer_opacity_floor: 0.4,
            nav_scroll_offset: 50.0,
            item_parallax: 0.5,
            overlay_parallax: 20.0,
            step_stagger_ms: 200,
        }
    }
}

impl ScrollOptions {
    /// Opacity for decorative background layers at `progress`.
    pub fn layer_opacity(&self, progress: f64) -> f64 {
        (self.layer_base_opacity - progress * self.layer_opacity_span).max(self.layer_opacity_floor)
    }
}
