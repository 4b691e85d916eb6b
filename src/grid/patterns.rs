use crate::color::Rgba;
use crate::geom::{Point, Rect, Viewport};

use super::surface::Surface;
use super::table::{GridConfig, Side};

/// Tone of faded grid strokes; only the alpha varies.
const LINE_TONE: Rgba = Rgba::new(200, 183, 138, 0.0);
const BRACKET_COLOR: Rgba = Rgba::new(200, 183, 138, 0.4);
const BRACKET_MAX_LENGTH: f64 = 60.0;
const BRACKET_MIN_LENGTH: f64 = 8.0;
/// Length of the constant-opacity runs the fading grids are cut into.
const FADE_SEGMENT: f64 = 8.0;

/// Evenly spaced positions `start, start + step, ..` up to `end` inclusive.
fn ticks(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && end >= start {
        ((end - start) / step).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| start + i as f64 * step)
}

pub(super) fn fade_top_left(
    surface: &mut impl Surface,
    area: Viewport,
    config: &GridConfig,
    fade_radius: f64,
) {
    let Viewport { width, height } = area;
    let (size, intensity) = (config.size, config.intensity);
    let max_distance = width.hypot(height) * fade_radius;
    if max_distance <= 0.0 {
        return;
    }
    let origin = Point::default();
    let opacity_at = |p: Point| (1.0 - p.distance_to(origin) / max_distance).max(0.0);

    surface.set_line_width(0.8);
    for x in ticks(0.0, width, size) {
        fade_run(surface, intensity, height, &opacity_at, |t| Point::new(x, t));
    }
    for y in ticks(0.0, height, size) {
        fade_run(surface, intensity, width, &opacity_at, |t| Point::new(t, y));
    }
}

// Distance from the origin only grows along a grid line, so the first fully
// transparent segment ends the line.
fn fade_run(
    surface: &mut impl Surface,
    intensity: f64,
    length: f64,
    opacity_at: &impl Fn(Point) -> f64,
    at: impl Fn(f64) -> Point,
) {
    let mut t = 0.0;
    while t < length {
        let next = (t + FADE_SEGMENT).min(length);
        let opacity = opacity_at(at((t + next) / 2.0));
        if opacity <= 0.0 {
            break;
        }
        surface.set_stroke(LINE_TONE.with_alpha(intensity * opacity));
        surface.line(at(t), at(next));
        t = next;
    }
}

pub(super) fn diagonal_corners(
    surface: &mut impl Surface,
    area: Viewport,
    config: &GridConfig,
    corner_size: f64,
) {
    let Viewport { width, height } = area;
    let extent = width.min(height) * corner_size;
    if extent <= 0.0 {
        return;
    }
    surface.set_stroke(config.color);
    surface.set_line_width(0.6);
    for (origin, dx, dy) in [
        (Point::new(0.0, 0.0), 1.0, 1.0),
        (Point::new(width, 0.0), -1.0, 1.0),
        (Point::new(0.0, height), 1.0, -1.0),
        (Point::new(width, height), -1.0, -1.0),
    ] {
        corner(surface, origin, dx, dy, extent, config.size);
    }
}

/// One square corner of side `extent`, growing from `origin` in the
/// direction given by the signs `dx`, `dy`.
fn corner(surface: &mut impl Surface, origin: Point, dx: f64, dy: f64, extent: f64, size: f64) {
    let clip = Rect::new(
        if dx > 0.0 { origin.x } else { origin.x - extent },
        if dy > 0.0 { origin.y } else { origin.y - extent },
        extent,
        extent,
    );
    surface.save();
    surface.clip_rect(clip);

    let far_x = origin.x + dx * extent;
    let far_y = origin.y + dy * extent;
    for offset in ticks(0.0, extent, size) {
        let x = origin.x + dx * offset;
        surface.line(Point::new(x, origin.y), Point::new(x, far_y));
        let y = origin.y + dy * offset;
        surface.line(Point::new(origin.x, y), Point::new(far_x, y));
        surface.line(Point::new(origin.x, y), Point::new(x, origin.y));
        surface.line(Point::new(far_x, y), Point::new(far_x - dx * offset, origin.y));
    }

    surface.restore();
}

pub(super) fn vertical_patch(
    surface: &mut impl Surface,
    area: Viewport,
    config: &GridConfig,
    patch_width: f64,
    side: Side,
) {
    let Viewport { width, height } = area;
    let patch_w = width * patch_width;
    if patch_w <= 0.0 || height <= 0.0 {
        return;
    }
    let patch_x = match side {
        Side::Right => width - patch_w,
        Side::Left => 0.0,
    };
    surface.save();
    surface.clip_rect(Rect::new(patch_x, 0.0, patch_w, height));

    surface.set_stroke(config.color);
    surface.set_line_width(0.5);
    for x in ticks(patch_x, patch_x + patch_w, config.size) {
        surface.line(Point::new(x, 0.0), Point::new(x, height));
    }

    let center = height / 2.0;
    for y in ticks(0.0, height, config.size) {
        let fade = (1.0 - (y - center).abs() / center).max(0.0);
        if fade <= 0.0 {
            continue;
        }
        surface.set_stroke(LINE_TONE.with_alpha(config.intensity * fade));
        surface.line(Point::new(patch_x, y), Point::new(patch_x + patch_w, y));
    }

    surface.restore();
}

pub(super) fn target_brackets(
    surface: &mut impl Surface,
    area: Viewport,
    config: &GridConfig,
    scroll_progress: f64,
    target: Option<(Rect, f64)>,
) {
    let Viewport { width, height } = area;
    let size = config.size;
    if width > 0.0 && height > 0.0 {
        let base = config.intensity * (0.3 + scroll_progress * 0.7);
        surface.set_line_width(0.8);
        for x in ticks(0.0, width, size) {
            surface.set_stroke(LINE_TONE.with_alpha(base * (0.5 + x / width * 0.5)));
            surface.line(Point::new(x, 0.0), Point::new(x, height));
        }
        for y in ticks(0.0, height, size) {
            surface.set_stroke(LINE_TONE.with_alpha(base * (0.3 + y / height * 0.7)));
            surface.line(Point::new(0.0, y), Point::new(width, y));
        }
    }

    if let Some((rect, bracket_size)) = target {
        brackets(surface, rect, bracket_size);
    }
}

fn brackets(surface: &mut impl Surface, rect: Rect, bracket_size: f64) {
    let length = (rect.width.min(rect.height) * bracket_size)
        .clamp(BRACKET_MIN_LENGTH, BRACKET_MAX_LENGTH);
    surface.set_stroke(BRACKET_COLOR);
    surface.set_line_width(2.0);
    // Each bracket: a vertical arm pointing away from the box, the corner,
    // and a horizontal arm running along the box edge.
    for (x, y, dir_x, dir_y) in [
        (rect.left(), rect.top(), 1.0, -1.0),
        (rect.right(), rect.top(), -1.0, -1.0),
        (rect.left(), rect.bottom(), 1.0, 1.0),
        (rect.right(), rect.bottom(), -1.0, 1.0),
    ] {
        surface.polyline(&[
            Point::new(x, y + dir_y * length),
            Point::new(x, y),
            Point::new(x + dir_x * length, y),
        ]);
    }
}
