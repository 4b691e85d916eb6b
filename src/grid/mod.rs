//! Per-section decorative grid.
//!
//! [`GridRenderer`] holds the mutable frame state (pointer, section,
//! scroll progress) and a [`GridTable`]; each call to
//! [`GridRenderer::render`] advances the pointer smoothing and redraws the
//! active section's pattern onto a [`Surface`].

mod patterns;
mod surface;
mod table;

pub use surface::Surface;
pub use table::{GridConfig, GridPattern, GridTable, Side};

use crate::geom::{Point, Rect, Viewport};
use crate::scroll::{active_section, SectionBounds};

/// Fraction of the remaining distance the displayed pointer covers per frame.
pub const POINTER_EASING: f64 = 0.05;

/// Mutable state carried between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    /// Latest observed pointer position.
    pub target: Point,
    /// Smoothed pointer position.
    pub pointer: Point,
    pub section: Option<String>,
    pub scroll_progress: f64,
}

impl GridState {
    pub fn new(viewport: Viewport) -> Self {
        let center = viewport.center();
        Self {
            target: center,
            pointer: center,
            section: None,
            scroll_progress: 0.0,
        }
    }

    pub fn ease_pointer(&mut self) {
        self.pointer.x += (self.target.x - self.pointer.x) * POINTER_EASING;
        self.pointer.y += (self.target.y - self.pointer.y) * POINTER_EASING;
    }
}

pub struct GridRenderer {
    table: GridTable,
    state: GridState,
}

impl GridRenderer {
    pub fn new(table: GridTable, viewport: Viewport) -> Self {
        Self {
            table,
            state: GridState::new(viewport),
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn on_pointer_move(&mut self, at: Point) {
        self.state.target = at;
    }

    /// Recompute the active section and scroll progress.
    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[SectionBounds], progress: f64) {
        self.state.section = active_section(scroll_y, sections).map(|i| sections[i].id.clone());
        self.state.scroll_progress = progress.clamp(0.0, 1.0);
    }

    pub fn active_config(&self) -> &GridConfig {
        self.table.config_for(self.state.section.as_deref())
    }

    /// Draw one frame. `cta` is the call-to-action box in viewport
    /// coordinates, if the page has one.
    pub fn render(&mut self, surface: &mut impl Surface, area: Viewport, cta: Option<Rect>) {
        self.state.ease_pointer();
        let config = *self.active_config();
        match config.pattern {
            GridPattern::FadeTopLeft { fade_radius } => {
                patterns::fade_top_left(surface, area, &config, fade_radius)
            }
            GridPattern::DiagonalCorners { corner_size } => {
                patterns::diagonal_corners(surface, area, &config, corner_size)
            }
            GridPattern::VerticalPatch { patch_width, side } => {
                patterns::vertical_patch(surface, area, &config, patch_width, side)
            }
            GridPattern::TargetBrackets { bracket_size } => patterns::target_brackets(
                surface,
                area,
                &config,
                self.state.scroll_progress,
                cta.map(|rect| (rect, bracket_size)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_eases_toward_target() {
        let mut state = GridState::new(Viewport::new(200.0, 200.0));
        state.target = Point::new(200.0, 100.0);
        state.ease_pointer();
        assert!((state.pointer.x - 105.0).abs() < 1e-9);
        assert_eq!(state.pointer.y, 100.0);
        for _ in 0..500 {
            state.ease_pointer();
        }
        assert!((state.pointer.x - 200.0).abs() < 1e-6);
    }
}
