use super::listen_window;
use crate::core::constants::IDLE_CHECK_INTERVAL_MS;
use crate::core::cursor::CursorState;
use crate::dom;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointermove(cursor: Rc<RefCell<CursorState>>) {
    listen_window("pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_client_px(&ev);
        if pos.is_finite() {
            cursor.borrow_mut().on_pointer_move(pos, dom::now_ms());
        }
    });
}

/// Poll for idleness on a fixed interval. Returns the interval id so the
/// render loop can clear it on teardown.
pub fn wire_idle_check(cursor: Rc<RefCell<CursorState>>) -> Option<i32> {
    let closure = Closure::wrap(Box::new(move || {
        let mut c = cursor.borrow_mut();
        if c.check_idle(dom::now_ms()) {
            log::debug!("[cursor] idle ({:?})", c.mode);
        }
    }) as Box<dyn FnMut()>);
    let id = web::window().and_then(|w| {
        w.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            IDLE_CHECK_INTERVAL_MS,
        )
        .ok()
    });
    if id.is_none() {
        log::warn!("[cursor] could not start idle poll");
    }
    closure.forget();
    id
}
