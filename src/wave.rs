//! Layered wave backdrop.
//!
//! A generation pass turns [`WaveSettings`] and the current viewport into a
//! [`WaveField`]: one [`WavePath`] per horizontal band, each a walk of
//! control points that starts and ends off-screen so no seam shows at the
//! viewport edges. Fields are never patched; a resize builds a new one.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::color::{lch_ramp, Hsl, Rgb};
use crate::error::ConfigError;
use crate::geom::{Point, Viewport};
use crate::prng::Prng;

/// How control points advance across a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveWalk {
    /// Fixed step, alternating up/down displacement.
    Geometric,
    /// Random step and random signed displacement.
    Chaotic,
}

/// Whether bands are painted as filled shapes or outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveStyle {
    Fill,
    Stroke,
}

impl WaveStyle {
    /// Class applied to the `<svg>` root, styled by the page stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            WaveStyle::Fill => "path",
            WaveStyle::Stroke => "stroke",
        }
    }
}

/// Upper bound on `WaveSettings::lines`.
pub const MAX_LINES: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    pub amplitude_x: f64,
    pub amplitude_y: f64,
    pub lines: u32,
    pub hue_start: f64,
    pub saturation_start: f64,
    pub lightness_start: f64,
    pub hue_end: f64,
    pub saturation_end: f64,
    pub lightness_end: f64,
    /// Handles sit at `1 / smoothness` of each segment; `<= 0` draws straight segments.
    pub smoothness: f64,
    pub offset_x: f64,
    pub style: WaveStyle,
    pub walk: WaveWalk,
    pub opacity: f64,
    pub blend_mode: String,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            amplitude_x: 120.0,
            amplitude_y: 30.0,
            lines: 30,
            hue_start: 40.0,
            saturation_start: 35.0,
            lightness_start: 75.0,
            hue_end: 220.0,
            saturation_end: 25.0,
            lightness_end: 10.0,
            smoothness: 3.2,
            offset_x: 14.0,
            style: WaveStyle::Fill,
            walk: WaveWalk::Geometric,
            opacity: 0.88,
            blend_mode: "overlay".to_string(),
        }
    }
}

impl WaveSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines == 0 {
            return Err(ConfigError::Invalid {
                field: "waves.lines",
                reason: "must be at least 1",
            });
        }
        if self.lines > MAX_LINES {
            return Err(ConfigError::Invalid {
                field: "waves.lines",
                reason: "must be at most 1000",
            });
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid {
                field: "waves.opacity",
                reason: "must be within [0, 1]",
            });
        }
        if !self.amplitude_x.is_finite() || !self.amplitude_y.is_finite() {
            return Err(ConfigError::Invalid {
                field: "waves.amplitude",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    pub fn start_color(&self) -> Hsl {
        Hsl::new(self.hue_start, self.saturation_start, self.lightness_start)
    }

    pub fn end_color(&self) -> Hsl {
        Hsl::new(self.hue_end, self.saturation_end, self.lightness_end)
    }

    /// Horizontal margin added past both viewport edges.
    pub fn overflow(&self) -> f64 {
        (self.lines.min(MAX_LINES) as f64 * self.offset_x).abs()
    }
}

/// One horizontal band of the backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    pub baseline: f64,
    pub color: Rgb,
    pub offset: f64,
    pub points: Vec<Point>,
}

/// Output of one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    pub viewport: Viewport,
    pub overflow: f64,
    pub background: Rgb,
    pub style: WaveStyle,
    pub smoothness: f64,
    pub paths: Vec<WavePath>,
}

impl WaveField {
    pub fn generate(settings: &WaveSettings, viewport: Viewport, rng: &mut Prng) -> Self {
        let overflow = settings.overflow();
        let lines = settings.lines.clamp(1, MAX_LINES);
        let ramp = lch_ramp(
            settings.start_color().to_rgb(),
            settings.end_color().to_rgb(),
            lines as usize + 2,
        );

        let paths = (0..=lines)
            .map(|i| {
                let baseline = (viewport.height / lines as f64 * i as f64).trunc();
                let offset = settings.offset_x * i as f64;
                WavePath {
                    baseline,
                    color: ramp[i as usize + 1],
                    offset,
                    points: walk(settings, viewport, overflow, baseline, offset, rng),
                }
            })
            .collect();

        let background = match settings.style {
            WaveStyle::Fill => ramp[0],
            WaveStyle::Stroke => Rgb::BLACK,
        };

        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            bands = lines + 1,
            overflow,
            "wave field generated"
        );

        Self {
            viewport,
            overflow,
            background,
            style: settings.style,
            smoothness: settings.smoothness,
            paths,
        }
    }

    /// SVG `d` attribute for one band, closed along the bottom edge.
    pub fn path_data(&self, path: &WavePath) -> String {
        let Viewport { width, height } = self.viewport;
        let overflow = self.overflow;
        let points = &path.points;
        let mut d = format!("M {} {}", -overflow, height + overflow);
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            d.push_str(" Z");
            return d;
        };
        let _ = write!(d, " L {} {}", first.x, first.y);

        let inner = points.len().saturating_sub(1);
        for i in 1..inner {
            let (prev, cur) = (points[i - 1], points[i]);
            if self.smoothness > 0.0 {
                let diff = (cur.x - prev.x) / self.smoothness;
                let _ = write!(
                    d,
                    " C {} {}, {} {}, {} {}",
                    prev.x + diff,
                    prev.y,
                    cur.x - diff,
                    cur.y,
                    cur.x,
                    cur.y
                );
            } else {
                let _ = write!(d, " L {} {}", cur.x, cur.y);
            }
        }

        let _ = write!(d, " L {} {}", last.x, last.y);
        let _ = write!(d, " L {} {}", width + overflow, height + overflow);
        d.push_str(" Z");
        d
    }
}

fn walk(
    settings: &WaveSettings,
    viewport: Viewport,
    overflow: f64,
    baseline: f64,
    offset: f64,
    rng: &mut Prng,
) -> Vec<Point> {
    let mut x = -overflow + offset;
    let mut points = vec![Point::new(x, baseline)];
    let mut upside_down = false;

    while x < viewport.width {
        let (step, y) = match settings.walk {
            WaveWalk::Geometric => {
                upside_down = !upside_down;
                let sign = if upside_down { -1.0 } else { 1.0 };
                (settings.amplitude_x, settings.amplitude_y * sign + baseline)
            }
            WaveWalk::Chaotic => {
                let sign = rng.next_sign();
                let half_x = settings.amplitude_x / 2.0;
                let half_y = settings.amplitude_y / 2.0;
                let step = (rng.next_f64() * half_x + half_x).trunc();
                let rise = (rng.next_f64() * half_y + half_y).trunc();
                (step, rise * sign + baseline)
            }
        };
        // A zero or negative step would never reach the right edge.
        x += step.max(1.0);
        points.push(Point::new(x, y));
    }

    points.push(Point::new(viewport.width + overflow, baseline));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(settings: &WaveSettings, w: f64, h: f64) -> WaveField {
        WaveField::generate(settings, Viewport::new(w, h), &mut Prng::new(7))
    }

    #[test]
    fn geometric_walk_alternates_starting_upward() {
        let settings = WaveSettings::default();
        let f = field(&settings, 1000.0, 600.0);
        let band = &f.paths[3];
        assert_eq!(band.points[1].y, band.baseline - 30.0);
        assert_eq!(band.points[2].y, band.baseline + 30.0);
        assert_eq!(band.points[2].x - band.points[1].x, 120.0);
    }

    #[test]
    fn baselines_truncate_like_integer_rows() {
        let settings = WaveSettings {
            lines: 4,
            ..WaveSettings::default()
        };
        let f = field(&settings, 800.0, 90.0);
        assert_eq!(f.paths[1].baseline, 22.0);
        assert_eq!(f.paths[3].baseline, 67.0);
        assert_eq!(f.paths[4].baseline, 90.0);
    }

    #[test]
    fn zero_smoothness_draws_straight_segments() {
        let settings = WaveSettings {
            smoothness: 0.0,
            ..WaveSettings::default()
        };
        let f = field(&settings, 400.0, 300.0);
        let d = f.path_data(&f.paths[0]);
        assert!(!d.contains('C'));
        assert!(!d.contains("NaN") && !d.contains("inf"));
    }

    #[test]
    fn path_data_opens_and_closes_below_the_viewport() {
        let settings = WaveSettings::default();
        let f = field(&settings, 1000.0, 600.0);
        let d = f.path_data(&f.paths[0]);
        assert!(d.starts_with("M -420 1020 L -420 0 C"));
        assert!(d.ends_with("L 1420 0 L 1420 1020 Z"));
    }

    #[test]
    fn stroke_style_uses_black_background() {
        let settings = WaveSettings {
            style: WaveStyle::Stroke,
            ..WaveSettings::default()
        };
        assert_eq!(field(&settings, 300.0, 300.0).background, Rgb::BLACK);
    }

    #[test]
    fn zero_lines_rejected() {
        let settings = WaveSettings {
            lines: 0,
            ..WaveSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn line_count_is_bounded() {
        let at_limit = WaveSettings {
            lines: MAX_LINES,
            ..WaveSettings::default()
        };
        assert!(at_limit.validate().is_ok());
        let huge = WaveSettings {
            lines: u32::MAX,
            ..WaveSettings::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn unvalidated_huge_line_count_is_clamped() {
        let settings = WaveSettings {
            lines: u32::MAX,
            amplitude_x: 1.0e6,
            ..WaveSettings::default()
        };
        let f = field(&settings, 10.0, 10.0);
        assert_eq!(f.paths.len(), MAX_LINES as usize + 1);
    }
}
