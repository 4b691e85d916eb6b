//! Pointer and focus feedback driven by inline styles.

/// Inline declarations as `(property, value)` pairs.
pub type Declarations = &'static [(&'static str, &'static str)];

const LIFT_TRANSITION: &str = "all 0.4s cubic-bezier(0.23, 1, 0.32, 1)";

/// Styles swapped in on `mouseenter` and back out on `mouseleave`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverRule {
    /// Elements that receive the listeners.
    pub selector: &'static str,
    /// Descendant that gets styled; `None` styles the hovered element.
    pub part: Option<&'static str>,
    pub enter: Declarations,
    pub leave: Declarations,
}

pub const HOVER_RULES: [HoverRule; 5] = [
    HoverRule {
        selector: ".work-item",
        part: None,
        enter: &[
            ("transform", "translateY(-12px) scale(1.02)"),
            ("transition", LIFT_TRANSITION),
        ],
        leave: &[("transform", "translateY(0) scale(1)")],
    },
    HoverRule {
        selector: ".portfolio-visuals",
        part: Some(".hero-visual"),
        enter: &[("transform", "translateY(-8px)")],
        leave: &[("transform", "translateY(0)")],
    },
    HoverRule {
        selector: ".portfolio-visuals",
        part: Some(".secondary-visual"),
        enter: &[("transform", "translate(-10px, -10px) scale(1.05)")],
        leave: &[("transform", "translate(0, 0) scale(1)")],
    },
    HoverRule {
        selector: ".cta-button",
        part: None,
        enter: &[("background", "rgba(200, 183, 138, 0.1)")],
        leave: &[("background", "transparent")],
    },
    HoverRule {
        selector: ".portfolio-item",
        part: None,
        enter: &[("transform", "translateY(-10px)"), ("transition", LIFT_TRANSITION)],
        leave: &[("transform", "translateY(0)")],
    },
];

pub const FORM_FIELD_SELECTOR: &str = ".form-field";

/// Class the field's parent carries while focused or filled in.
pub const FOCUSED_CLASS: &str = "focused";

/// Applied to a form field's parent on focus.
pub const FIELD_FOCUS: Declarations = &[
    ("transform", "translateY(-4px)"),
    ("transition", "all 0.3s cubic-bezier(0.23, 1, 0.32, 1)"),
];

/// Applied to a form field's parent on blur.
pub const FIELD_BLUR: Declarations = &[("transform", "translateY(0)")];

/// Whether a field's parent keeps [`FOCUSED_CLASS`] after blur. Only an
/// empty value drops it; whitespace counts as input.
pub fn keeps_focus_class(value: &str) -> bool {
    !value.is_empty()
}
