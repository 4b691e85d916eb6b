use crate::color::Rgba;
use crate::geom::{Point, Rect};

/// The slice of a 2D drawing context the grid patterns need.
///
/// Coordinates are CSS pixels; implementations own any device-pixel
/// scaling.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    /// Intersect the clip region with `rect` until the next `restore`.
    fn clip_rect(&mut self, rect: Rect);
    fn set_stroke(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f64);
    fn line(&mut self, from: Point, to: Point);
    /// Stroke connected segments through `points` as one path.
    fn polyline(&mut self, points: &[Point]);
}
