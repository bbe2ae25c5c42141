use super::listen_window;
use crate::core::cursor::CursorState;
use crate::core::drive::wheel_delta_px;
use crate::dom;
use crate::input::InputState;
use crate::scroll::ScrollController;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_scroll(scroll: Rc<RefCell<ScrollController>>, input: Rc<RefCell<InputState>>) {
    listen_window("scroll", move |_ev: web::Event| {
        scroll.borrow_mut().on_scroll(dom::now_ms());
        input.borrow_mut().layout_dirty = true;
    });
}

/// Raw wheel deltas still register when the page cannot scroll any further.
pub fn wire_wheel(input: Rc<RefCell<InputState>>) {
    listen_window("wheel", move |ev: web::WheelEvent| {
        let mut s = input.borrow_mut();
        let px = wheel_delta_px(ev.delta_y(), ev.delta_mode(), s.viewport.y as f64);
        s.wheel.push(px);
    });
}

pub fn wire_resize(
    canvas: web::HtmlCanvasElement,
    cursor: Rc<RefCell<CursorState>>,
    input: Rc<RefCell<InputState>>,
) {
    listen_window("resize", move |_ev: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
        let (w, h) = dom::viewport_size();
        let viewport = Vec2::new(w, h);
        cursor.borrow_mut().set_viewport(viewport);
        let mut s = input.borrow_mut();
        s.viewport = viewport;
        s.layout_dirty = true;
    });
}
