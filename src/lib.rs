#![cfg(target_arch = "wasm32")]
use crate::core::cursor::CursorState;
use crate::core::icons::{self, FeatureIcon};
use crate::core::scene::SceneState;
use crate::core::SceneConfig;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;
mod scroll;

use constants::*;

thread_local! {
    static RENDER_LOOP: RefCell<Option<frame::RenderLoop>> = const { RefCell::new(None) };
}

/// Scene parameters, with `data-*` overrides from the canvas element.
fn read_config(canvas: &web::HtmlCanvasElement) -> SceneConfig {
    let mut config = SceneConfig::default();
    let rejected = config.apply_overrides(|key| canvas.get_attribute(&format!("data-{key}")));
    for key in rejected {
        log::warn!("[scene] ignoring invalid data-{key}");
    }
    config
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ethereal-void starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear down the render loop and the idle poll.
#[wasm_bindgen]
pub fn stop() {
    RENDER_LOOP.with(|slot| {
        match slot.borrow_mut().take() {
            Some(mut render_loop) if render_loop.is_running() => render_loop.stop(),
            _ => log::warn!("stop() called with no running scene"),
        }
    });
}

async fn init() -> anyhow::Result<()> {
    if RENDER_LOOP.with(|slot| slot.borrow().is_some()) {
        log::warn!("already running");
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let cursor_el = dom::query_html(&document, CURSOR_SELECTOR)
        .ok_or_else(|| anyhow::anyhow!("missing {CURSOR_SELECTOR}"))?;
    let trail_el = dom::query_html(&document, CURSOR_TRAIL_SELECTOR);
    if trail_el.is_none() {
        log::warn!("[cursor] no {CURSOR_TRAIL_SELECTOR}; trail disabled");
    }

    let config = read_config(&canvas);
    log::info!("[scene] {:?}", config);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    let (vw, vh) = dom::viewport_size();
    let viewport = Vec2::new(vw, vh);

    // ---------------- Cursor and scroll controllers ----------------
    let cursor = Rc::new(RefCell::new(CursorState::new(viewport, dom::now_ms())));
    let overlay = overlay::CursorOverlay::new(&document, cursor_el, trail_el);
    let scroll = Rc::new(RefCell::new(scroll::ScrollController::new(&document)));
    let progress = Rc::new(Cell::new(0.0_f32));
    {
        let progress = progress.clone();
        scroll.borrow_mut().subscribe(move |p| progress.set(p));
    }
    let input = Rc::new(RefCell::new(input::InputState {
        viewport,
        layout_dirty: true,
        ..Default::default()
    }));

    events::wire_pointermove(cursor.clone());
    let idle_interval = events::wire_idle_check(cursor.clone());
    events::wire_scroll(scroll.clone(), input.clone());
    events::wire_wheel(input.clone());
    events::wire_resize(canvas.clone(), cursor.clone(), input.clone());
    scroll.borrow_mut().on_scroll(dom::now_ms());

    let magnets = dom::query_all(&document, MAGNETIC_SELECTOR);
    log::info!("[cursor] {} magnetic targets", magnets.len());

    let icon_containers = dom::query_all(&document, ICON_SELECTOR);
    let icon_px = icons::icon_backing_px(window.device_pixel_ratio());
    let (icons, icon_canvases): (Vec<_>, Vec<_>) = icon_containers
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let kind = icons::icon_kind(el.dataset().get("icon").as_deref());
            let canvas = dom::append_canvas(&document, el, icons::ICON_CANVAS_PX, icon_px);
            (FeatureIcon::new(i, kind), canvas)
        })
        .unzip();
    log::info!("[icons] {} feature icons", icons.len());

    // ---------------- Scene: synchronous objects, then async loads ----------------
    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let mut scene = SceneState::new(config.clone(), aspect);
    for asset in loader::load_assets(&[config.model_request()]).await {
        scene.attach_model(asset);
    }

    let mut gpu = frame::init_gpu(&canvas).await;
    if let Some(g) = &mut gpu {
        g.upload_particles(&scene);
        for (icon, canvas) in icons.iter().zip(icon_canvases) {
            g.attach_icon(canvas, icon.kind);
        }
    }
    scene.start();

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        gpu,
        canvas,
        cursor,
        overlay,
        scroll,
        input,
        progress,
        magnets,
        magnet_rects: Vec::new(),
        magnets_read_ms: f64::NEG_INFINITY,
        icons,
        icon_containers,
        started: now,
        last_instant: now,
    }));
    let render_loop = frame::RenderLoop::start(frame_ctx, idle_interval);
    RENDER_LOOP.with(|slot| *slot.borrow_mut() = Some(render_loop));
    Ok(())
}
