use crate::core::cursor::MagnetTarget;
use crate::core::drive::WheelTracker;
use glam::Vec2;
use web_sys as web;

/// Latest input samples shared between event closures and the frame loop.
#[derive(Default, Clone, Copy)]
pub struct InputState {
    pub wheel: WheelTracker,
    pub viewport: Vec2,
    /// set by resize/scroll; the frame loop re-reads magnet rects
    pub layout_dirty: bool,
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_client_px(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn magnet_target(el: &web::Element) -> MagnetTarget {
    let r = el.get_bounding_client_rect();
    MagnetTarget::from_rect(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

/// Rectangles of the magnetic elements that currently intersect the
/// viewport.
pub fn visible_magnet_targets(elements: &[web::HtmlElement], viewport: Vec2) -> Vec<MagnetTarget> {
    elements
        .iter()
        .map(|el| magnet_target(el))
        .filter(|t| t.max.x >= 0.0 && t.max.y >= 0.0 && t.min.x <= viewport.x && t.min.y <= viewport.y)
        .collect()
}
