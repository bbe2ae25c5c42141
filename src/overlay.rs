use crate::constants::{HOVER_CLASS, IDLE_CLASS, MARKER_CLASS, MARKER_SIZE_PX};
use crate::core::constants::MARKER_CAPACITY;
use crate::core::cursor::CursorState;
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM side of the custom cursor: the cursor dot, its trail ring and a pool of
/// marker elements used by the idle and trail effects.
pub struct CursorOverlay {
    cursor: web::HtmlElement,
    trail: Option<web::HtmlElement>,
    markers: Vec<web::HtmlElement>,
    shown: usize,
}

impl CursorOverlay {
    pub fn new(document: &web::Document, cursor: web::HtmlElement, trail: Option<web::HtmlElement>) -> Self {
        let markers = create_marker_pool(document);
        if markers.len() < MARKER_CAPACITY {
            log::warn!("[cursor] only {} marker elements available", markers.len());
        }
        Self {
            cursor,
            trail,
            markers,
            shown: 0,
        }
    }

    pub fn paint(&mut self, state: &CursorState) {
        translate(&self.cursor, state.eased.x, state.eased.y);
        dom::toggle_class(&self.cursor, HOVER_CLASS, state.hover.is_some());
        dom::toggle_class(&self.cursor, IDLE_CLASS, state.is_idle());
        if let Some(trail) = &self.trail {
            translate(trail, state.trail.x, state.trail.y);
            dom::toggle_class(trail, HOVER_CLASS, state.hover.is_some());
        }

        let active = state.markers.iter().filter(|m| m.is_active());
        let mut used = 0;
        for (el, m) in self.markers.iter().zip(active) {
            let half = MARKER_SIZE_PX * 0.5;
            translate(el, m.pos.x - half, m.pos.y - half);
            dom::set_style(el, "opacity", &format!("{:.3}", m.opacity));
            used += 1;
        }
        // hide only what was visible last frame
        for el in self.markers.iter().take(self.shown).skip(used) {
            dom::set_style(el, "opacity", "0");
        }
        self.shown = used;
    }
}

#[inline]
fn translate(el: &web::HtmlElement, x: f32, y: f32) {
    dom::set_style(el, "transform", &format!("translate3d({x:.1}px, {y:.1}px, 0)"));
}

fn create_marker_pool(document: &web::Document) -> Vec<web::HtmlElement> {
    let Some(body) = document.body() else {
        return Vec::new();
    };
    (0..MARKER_CAPACITY)
        .filter_map(|_| {
            let el = document
                .create_element("div")
                .ok()?
                .dyn_into::<web::HtmlElement>()
                .ok()?;
            el.set_class_name(MARKER_CLASS);
            let size = format!("{MARKER_SIZE_PX}px");
            let style = el.style();
            _ = style.set_property("position", "fixed");
            _ = style.set_property("left", "0");
            _ = style.set_property("top", "0");
            _ = style.set_property("width", &size);
            _ = style.set_property("height", &size);
            _ = style.set_property("border-radius", "50%");
            _ = style.set_property("pointer-events", "none");
            _ = style.set_property("opacity", "0");
            body.append_child(&el).ok()?;
            Some(el)
        })
        .collect()
}
