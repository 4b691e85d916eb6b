//! Color types and the perceptual ramp used by the wave background.
//!
//! The ramp interpolates in CIE LCh(ab) under a D65 white point, so equal
//! steps along the ramp read as equal steps in lightness and hue.

use std::fmt;

use serde::{Deserialize, Serialize};

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Lowercase `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// RGB with a floating alpha, rendered as a CSS `rgba()` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue with a different alpha, clamped to [0, 1].
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    #[must_use]
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        if s == 0.0 {
            let v = channel(l);
            return Rgb::new(v, v, v);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgb::new(
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// D65 reference white and the CIE Lab piecewise constants.
const XN: f64 = 0.950_470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088_830;
const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

/// Cylindrical Lab. `h` is `None` for achromatic colors.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lch {
    l: f64,
    c: f64,
    h: Option<f64>,
}

fn srgb_to_linear(v: u8) -> f64 {
    let v = v as f64 / 255.0;
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f64) -> u8 {
    let v = if v <= 0.003_04 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    channel(v)
}

fn xyz_lab(t: f64) -> f64 {
    if t > T3 {
        t.cbrt()
    } else {
        t / T2 + T0
    }
}

fn lab_xyz(t: f64) -> f64 {
    if t > T1 {
        t * t * t
    } else {
        T2 * (t - T0)
    }
}

impl From<Rgb> for Lch {
    fn from(c: Rgb) -> Self {
        let (r, g, b) = (srgb_to_linear(c.r), srgb_to_linear(c.g), srgb_to_linear(c.b));
        let x = xyz_lab((0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b) / XN);
        let y = xyz_lab((0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b) / YN);
        let z = xyz_lab((0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b) / ZN);
        let l = 116.0 * y - 16.0;
        let a = 500.0 * (x - y);
        let bb = 200.0 * (y - z);
        let chroma = a.hypot(bb);
        let h = if (chroma * 10_000.0).round() == 0.0 {
            None
        } else {
            Some(bb.atan2(a).to_degrees().rem_euclid(360.0))
        };
        Lch { l, c: chroma, h }
    }
}

impl From<Lch> for Rgb {
    fn from(c: Lch) -> Self {
        let h = c.h.unwrap_or(0.0).to_radians();
        let a = h.cos() * c.c;
        let b = h.sin() * c.c;
        let fy = (c.l + 16.0) / 116.0;
        let fx = fy + a / 500.0;
        let fz = fy - b / 200.0;
        let x = XN * lab_xyz(fx);
        let y = YN * lab_xyz(fy);
        let z = ZN * lab_xyz(fz);
        Rgb::new(
            linear_to_srgb(3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z),
            linear_to_srgb(-0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z),
            linear_to_srgb(0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z),
        )
    }
}

fn mix_lch(from: Lch, to: Lch, t: f64) -> Lch {
    let h = match (from.h, to.h) {
        (Some(h0), Some(h1)) => {
            // Shortest way around the hue circle.
            let dh = if h1 > h0 && h1 - h0 > 180.0 {
                h1 - (h0 + 360.0)
            } else if h1 < h0 && h0 - h1 > 180.0 {
                h1 + 360.0 - h0
            } else {
                h1 - h0
            };
            Some((h0 + t * dh).rem_euclid(360.0))
        }
        (Some(h), None) | (None, Some(h)) => Some(h),
        (None, None) => None,
    };
    Lch {
        l: from.l + t * (to.l - from.l),
        c: from.c + t * (to.c - from.c),
        h,
    }
}

/// `count` evenly spaced colors from `start` to `end`, inclusive, in LCh.
#[must_use]
pub fn lch_ramp(start: Rgb, end: Rgb, count: usize) -> Vec<Rgb> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let (a, b) = (Lch::from(start), Lch::from(end));
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| Rgb::from(mix_lch(a, b, i as f64 / last)))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_displays_as_hex() {
        assert_eq!(Rgb::new(200, 183, 10).to_string(), "#c8b70a");
        assert_eq!(Rgb::BLACK.to_string(), "#000000");
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).to_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(Hsl::new(240.0, 100.0, 50.0).to_rgb(), Rgb::new(0, 0, 255));
        assert_eq!(Hsl::new(0.0, 0.0, 100.0).to_rgb(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn lab_round_trip_is_stable() {
        for c in [Rgb::new(200, 183, 138), Rgb::new(12, 40, 90), Rgb::new(128, 128, 128)] {
            let back = Rgb::from(Lch::from(c));
            assert!((back.r as i16 - c.r as i16).abs() <= 1, "{c} -> {back}");
            assert!((back.g as i16 - c.g as i16).abs() <= 1, "{c} -> {back}");
            assert!((back.b as i16 - c.b as i16).abs() <= 1, "{c} -> {back}");
        }
    }

    #[test]
    fn ramp_endpoints_match_inputs() {
        let start = Hsl::new(40.0, 35.0, 75.0).to_rgb();
        let end = Hsl::new(220.0, 25.0, 10.0).to_rgb();
        let ramp = lch_ramp(start, end, 32);
        assert_eq!(ramp.len(), 32);
        let first = ramp[0];
        let last = ramp[31];
        assert!((first.r as i16 - start.r as i16).abs() <= 1);
        assert!((last.b as i16 - end.b as i16).abs() <= 1);
    }

    #[test]
    fn ramp_darkens_monotonically_toward_dark_end() {
        let ramp = lch_ramp(Rgb::new(240, 230, 200), Rgb::new(10, 15, 30), 8);
        let lightness: Vec<f64> = ramp.iter().map(|c| Lch::from(*c).l).collect();
        for pair in lightness.windows(2) {
            assert!(pair[1] <= pair[0] + 0.5, "{lightness:?}");
        }
    }

    #[test]
    fn rgba_css_string() {
        assert_eq!(Rgba::new(200, 183, 138, 0.4).to_css(), "rgba(200, 183, 138, 0.4)");
        assert_eq!(Rgba::new(1, 2, 3, 0.5).with_alpha(2.0).a, 1.0);
    }
}
