use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::color::Rgba;
use crate::error::EffectError;
use crate::geom::{Point, Rect};
use crate::grid::{GridRenderer, GridTable, Surface};
use crate::scroll::{self, SectionBounds, SECTION_IDS};

use super::{dom, frame};

const CANVAS_ID: &str = "grid-canvas";
const CTA_SELECTOR: &str = ".services-cta, .manifest-form";

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Clear the backing store and set up CSS-pixel drawing at `dpr`, with
    /// the half-pixel offset that keeps 1px lines crisp. The transform is
    /// set, not multiplied, so it never compounds across resizes.
    fn begin_frame(&self, canvas: &HtmlCanvasElement, dpr: f64) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx
            .clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.5 * dpr, 0.5 * dpr);
        self.ctx.set_line_cap("square");
        self.ctx.set_line_join("miter");
    }
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(rect.x, rect.y, rect.width, rect.height);
        self.ctx.clip();
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn line(&mut self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn polyline(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
    }
}

/// Canvas, renderer and the DOM lookups one frame needs.
struct GridBackground {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    renderer: GridRenderer,
}

impl GridBackground {
    fn resize(&self) {
        let viewport = dom::viewport(&self.window);
        let dpr = self.window.device_pixel_ratio();
        self.canvas.set_width((viewport.width * dpr) as u32);
        self.canvas.set_height((viewport.height * dpr) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
    }

    fn on_scroll(&mut self) {
        let scroll_y = dom::scroll_y(&self.window);
        let sections = section_bounds(&self.document, scroll_y);
        let viewport = dom::viewport(&self.window);
        let progress =
            scroll::scroll_progress(scroll_y, dom::scroll_height(&self.document), viewport.height);
        self.renderer.on_scroll(scroll_y, &sections, progress);
    }

    fn draw(&mut self) {
        let viewport = dom::viewport(&self.window);
        let cta = dom::query(&self.document, CTA_SELECTOR).map(|el| dom::client_rect(&el));
        self.surface
            .begin_frame(&self.canvas, self.window.device_pixel_ratio());
        self.renderer.render(&mut self.surface, viewport, cta);
    }
}

/// Document-space bounds of the known sections that exist on the page.
pub fn section_bounds(document: &Document, scroll_y: f64) -> Vec<SectionBounds> {
    SECTION_IDS
        .iter()
        .filter_map(|id| {
            let el = document.get_element_by_id(id)?;
            let rect = dom::client_rect(&el);
            Some(SectionBounds::new(*id, rect.top() + scroll_y, rect.height))
        })
        .collect()
}

pub fn start(window: &Window, document: &Document, table: GridTable) -> Result<(), EffectError> {
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| EffectError::MissingElement(format!("#{CANVAS_ID}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EffectError::MissingElement(format!("#{CANVAS_ID} as <canvas>")))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(EffectError::Unsupported("canvas 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EffectError::Unsupported("canvas 2d context"))?;

    let background = Rc::new(RefCell::new(GridBackground {
        window: window.clone(),
        document: document.clone(),
        canvas,
        surface: CanvasSurface { ctx },
        renderer: GridRenderer::new(table, dom::viewport(window)),
    }));
    {
        let mut bg = background.borrow_mut();
        bg.resize();
        bg.on_scroll();
    }

    let bg = background.clone();
    dom::listen(
        window,
        "resize",
        frame::throttled::<web_sys::Event>(move || bg.borrow().resize()),
    )?;

    let bg = background.clone();
    dom::listen(window, "mousemove", move |e: web_sys::MouseEvent| {
        bg.borrow_mut()
            .renderer
            .on_pointer_move(Point::new(e.client_x() as f64, e.client_y() as f64));
    })?;

    let bg = background.clone();
    dom::listen_passive(
        window,
        "scroll",
        frame::throttled::<web_sys::Event>(move || bg.borrow_mut().on_scroll()),
    )?;

    frame::animation_loop(move || background.borrow_mut().draw())?;
    tracing::info!("section grid started");
    Ok(())
}
