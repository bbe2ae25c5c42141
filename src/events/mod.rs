//! DOM event wiring. Closures live for the page lifetime and are leaked with
//! `forget`, except the idle poll which the render loop can clear.

mod pointer;
mod scroll;

pub use pointer::{wire_idle_check, wire_pointermove};
pub use scroll::{wire_resize, wire_scroll, wire_wheel};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen_window<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
