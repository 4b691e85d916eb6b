#![cfg(not(target_arch = "wasm32"))]

use pretty_assertions::assert_eq;
use site_fx::color::Rgba;
use site_fx::geom::{Point, Rect, Viewport};
use site_fx::grid::{GridConfig, GridPattern, GridRenderer, GridTable, Side, Surface};
use site_fx::scroll::SectionBounds;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Save,
    Restore,
    Clip(Rect),
    Stroke(Rgba),
    Width(f64),
    Line(Point, Point),
    Polyline(Vec<Point>),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Recorder {
    fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Line(..))).count()
    }

    fn polylines(&self) -> Vec<&[Point]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Polyline(points) => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(Op::Clip(rect));
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.ops.push(Op::Stroke(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::Width(width));
    }

    fn line(&mut self, from: Point, to: Point) {
        self.ops.push(Op::Line(from, to));
    }

    fn polyline(&mut self, points: &[Point]) {
        self.ops.push(Op::Polyline(points.to_vec()));
    }
}

const VIEW: Viewport = Viewport::new(800.0, 600.0);

/// Five stacked 600px sections in the usual order.
fn page() -> Vec<SectionBounds> {
    ["home", "work", "portfolio", "services", "manifest"]
        .iter()
        .enumerate()
        .map(|(i, id)| SectionBounds::new(*id, i as f64 * 600.0, 600.0))
        .collect()
}

fn renderer_at(scroll_y: f64) -> GridRenderer {
    let mut renderer = GridRenderer::new(GridTable::default(), VIEW);
    renderer.on_scroll(scroll_y, &page(), 0.0);
    renderer
}

#[test]
fn pattern_follows_the_active_section() {
    let kinds: Vec<_> = [0.0, 600.0, 1200.0, 1800.0, 2400.0]
        .into_iter()
        .map(|y| renderer_at(y).active_config().pattern)
        .collect();
    assert!(matches!(kinds[0], GridPattern::FadeTopLeft { .. }));
    assert!(matches!(kinds[1], GridPattern::DiagonalCorners { .. }));
    assert!(matches!(kinds[2], GridPattern::DiagonalCorners { .. }));
    assert!(matches!(
        kinds[3],
        GridPattern::VerticalPatch {
            side: Side::Right,
            ..
        }
    ));
    assert!(matches!(kinds[4], GridPattern::TargetBrackets { .. }));
}

#[test]
fn unknown_or_missing_section_uses_home() {
    let home = *GridTable::default().config_for(Some("home"));

    let mut renderer = GridRenderer::new(GridTable::default(), VIEW);
    renderer.on_scroll(0.0, &[SectionBounds::new("about", 0.0, 600.0)], 0.0);
    assert_eq!(renderer.state().section.as_deref(), Some("about"));
    assert_eq!(*renderer.active_config(), home);

    renderer.on_scroll(0.0, &[], 0.0);
    assert_eq!(renderer.state().section, None);
    assert_eq!(*renderer.active_config(), home);
}

#[test]
fn section_switches_a_third_of_a_section_early() {
    assert_eq!(renderer_at(399.0).state().section.as_deref(), Some("home"));
    assert_eq!(renderer_at(400.0).state().section.as_deref(), Some("work"));
}

#[test]
fn brackets_skipped_without_call_to_action() {
    let mut renderer = renderer_at(2400.0);
    let mut surface = Recorder::default();
    renderer.render(&mut surface, VIEW, None);
    assert!(surface.lines() > 0);
    assert!(surface.polylines().is_empty());
}

#[test]
fn brackets_hug_the_call_to_action() {
    let mut renderer = renderer_at(2400.0);
    let mut surface = Recorder::default();
    let cta = Rect::new(100.0, 200.0, 300.0, 100.0);
    renderer.render(&mut surface, VIEW, Some(cta));

    let brackets = surface.polylines();
    assert_eq!(brackets.len(), 4);
    // 100px tall box at 0.2 gives 20px arms.
    assert_eq!(
        brackets[0],
        &[
            Point::new(100.0, 180.0),
            Point::new(100.0, 200.0),
            Point::new(120.0, 200.0)
        ][..]
    );
    assert_eq!(brackets[3][1], Point::new(400.0, 300.0));
    assert!(surface.ops.contains(&Op::Width(2.0)));
}

#[test]
fn bracket_arms_are_clamped() {
    let mut renderer = renderer_at(2400.0);
    let mut surface = Recorder::default();
    renderer.render(&mut surface, VIEW, Some(Rect::new(0.0, 0.0, 2000.0, 2000.0)));
    let first = surface.polylines()[0].to_vec();
    assert_eq!(first[1].x - first[0].x, 0.0);
    assert_eq!(first[1].y - first[0].y, 60.0);
}

#[test]
fn corners_are_clipped_and_balanced() {
    let mut renderer = renderer_at(600.0);
    let mut surface = Recorder::default();
    renderer.render(&mut surface, VIEW, None);

    let clips: Vec<Rect> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Clip(rect) => Some(*rect),
            _ => None,
        })
        .collect();
    // 0.3 of the 600px short side.
    assert_eq!(clips.len(), 4);
    assert_eq!(clips[0], Rect::new(0.0, 0.0, 180.0, 180.0));
    assert_eq!(clips[3], Rect::new(620.0, 420.0, 180.0, 180.0));

    let saves = surface.ops.iter().filter(|op| **op == Op::Save).count();
    let restores = surface.ops.iter().filter(|op| **op == Op::Restore).count();
    assert_eq!(saves, restores);
}

#[test]
fn vertical_patch_respects_side() {
    let mut table = GridTable::default();
    table.insert(
        "services",
        GridConfig {
            pattern: GridPattern::VerticalPatch {
                patch_width: 0.25,
                side: Side::Left,
            },
            intensity: 0.12,
            size: 50.0,
            color: Rgba::new(255, 203, 154, 0.1),
        },
    );
    let mut renderer = GridRenderer::new(table, VIEW);
    renderer.on_scroll(1800.0, &page(), 0.0);
    let mut surface = Recorder::default();
    renderer.render(&mut surface, VIEW, None);
    assert!(surface.ops.contains(&Op::Clip(Rect::new(0.0, 0.0, 200.0, 600.0))));
}

#[test]
fn fade_grid_dims_away_from_the_origin() {
    let mut renderer = renderer_at(0.0);
    let mut surface = Recorder::default();
    renderer.render(&mut surface, VIEW, None);

    let alphas: Vec<f64> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Stroke(color) => Some(color.a),
            _ => None,
        })
        .collect();
    assert!(!alphas.is_empty());
    assert!(alphas.iter().all(|a| *a > 0.0 && *a <= 0.1));
    // Nothing is drawn past the fade radius.
    let limit = 1000.0 * 0.6;
    assert!(surface.ops.iter().all(|op| match op {
        Op::Line(from, _) => from.distance_to(Point::default()) < limit,
        _ => true,
    }));
}

#[test]
fn render_eases_the_pointer() {
    let mut renderer = renderer_at(0.0);
    renderer.on_pointer_move(Point::new(800.0, 300.0));
    renderer.render(&mut Recorder::default(), VIEW, None);
    assert_eq!(renderer.state().pointer, Point::new(420.0, 300.0));
}
