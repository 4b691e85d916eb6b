use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element, Window};

use crate::error::EffectError;
use crate::prng::Prng;
use crate::wave::{WaveField, WaveSettings};

use super::{dom, frame};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const SVG_ID: &str = "svg";

/// Owns the `<svg>` backdrop and rebuilds it on resize.
pub struct WaveBackground {
    window: Window,
    document: Document,
    settings: WaveSettings,
    rng: Prng,
    svg: Option<Element>,
}

impl WaveBackground {
    pub fn new(window: Window, document: Document, settings: WaveSettings) -> Self {
        Self {
            window,
            document,
            settings,
            rng: Prng::from_host(),
            svg: None,
        }
    }

    /// Tear down the current `<svg>` and build a fresh one for the
    /// current viewport.
    pub fn regenerate(&mut self) -> Result<(), EffectError> {
        let viewport = dom::viewport(&self.window);
        let field = WaveField::generate(&self.settings, viewport, &mut self.rng);

        let stale = self
            .svg
            .take()
            .or_else(|| self.document.get_element_by_id(SVG_ID));
        if let Some(stale) = stale {
            stale.remove();
        }

        let svg = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        svg.set_attribute("id", SVG_ID)?;
        svg.set_attribute("class", field.style.css_class())?;
        // SVG roots are not HTMLElements, so the inline style goes in as an attribute.
        svg.set_attribute(
            "style",
            &format!(
                "background-color: {}; opacity: {}; mix-blend-mode: {}",
                field.background, self.settings.opacity, self.settings.blend_mode
            ),
        )?;

        for band in &field.paths {
            let path = self.document.create_element_ns(Some(SVG_NS), "path")?;
            let color = band.color.to_string();
            path.set_attribute("fill", &color)?;
            path.set_attribute("stroke", &color)?;
            path.set_attribute("d", &field.path_data(band))?;
            svg.append_child(&path)?;
        }

        let body = self.document.body().ok_or(EffectError::MissingElement("body".into()))?;
        body.append_child(&svg)?;
        self.svg = Some(svg);
        Ok(())
    }
}

pub fn start(window: &Window, document: &Document, settings: WaveSettings) -> Result<(), EffectError> {
    let background = Rc::new(RefCell::new(WaveBackground::new(
        window.clone(),
        document.clone(),
        settings,
    )));
    background.borrow_mut().regenerate()?;

    dom::listen(
        window,
        "resize",
        frame::throttled::<web_sys::Event>(move || {
            if let Err(err) = background.borrow_mut().regenerate() {
                tracing::warn!(%err, "wave background regeneration failed");
            }
        }),
    )?;
    tracing::info!("wave background started");
    Ok(())
}
