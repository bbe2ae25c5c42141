use crate::constants::MAGNET_REFRESH_MS;
use crate::core::cursor::{CursorState, MagnetTarget};
use crate::core::icons::FeatureIcon;
use crate::core::scene::{FrameInput, SceneState};
use crate::dom;
use crate::input::{self, InputState};
use crate::overlay::CursorOverlay;
use crate::render;
use crate::scroll::ScrollController;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: SceneState,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,

    pub cursor: Rc<RefCell<CursorState>>,
    pub overlay: CursorOverlay,
    pub scroll: Rc<RefCell<ScrollController>>,
    pub input: Rc<RefCell<InputState>>,
    /// last progress published by the scroll controller
    pub progress: Rc<Cell<f32>>,

    pub magnets: Vec<web::HtmlElement>,
    pub magnet_rects: Vec<MagnetTarget>,
    pub magnets_read_ms: f64,

    pub icons: Vec<FeatureIcon>,
    pub icon_containers: Vec<web::HtmlElement>,

    pub started: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let now_ms = dom::now_ms();

        self.refresh_magnets(now_ms);

        // cursor first so the scene reads this frame's pointer
        let (pointer_px, pointer_ndc, cursor01) = {
            let mut c = self.cursor.borrow_mut();
            c.step(now_ms, dt_sec, &self.magnet_rects);
            self.overlay.paint(&c);
            (c.pointer, c.normalized(), c.position01())
        };

        let scroll = {
            let mut s = self.scroll.borrow_mut();
            s.tick(now_ms, dt_sec);
            s.signal()
        };

        let wheel_velocity = {
            let mut s = self.input.borrow_mut();
            let v = s.wheel.velocity;
            s.wheel.decay(dt_sec);
            v
        };

        let w = self.canvas.width();
        let h = self.canvas.height();
        let frame_input = FrameInput {
            dt_sec,
            time_sec: (now - self.started).as_secs_f32(),
            pointer_ndc,
            scroll_progress: self.progress.get(),
            scroll,
            wheel_velocity,
            aspect: w.max(1) as f32 / h.max(1) as f32,
        };
        self.scene.update(&frame_input);
        self.update_icons(frame_input.time_sec, dt_sec, pointer_px);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            match g.render(&self.scene, cursor01, &self.icons) {
                Ok(()) => {}
                // reconfigured on the next resize check; skip this frame
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[gpu] surface lost; skipping frame");
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    /// Icon containers are read every frame; there are only a handful and
    /// they move with scroll.
    fn update_icons(&mut self, time_sec: f32, dt_sec: f32, pointer_px: Vec2) {
        for (icon, container) in self.icons.iter_mut().zip(&self.icon_containers) {
            let hovered = input::magnet_target(container).contains(pointer_px);
            icon.update(time_sec, dt_sec, hovered);
        }
    }

    fn refresh_magnets(&mut self, now_ms: f64) {
        let dirty = std::mem::take(&mut self.input.borrow_mut().layout_dirty);
        if !dirty && now_ms - self.magnets_read_ms < MAGNET_REFRESH_MS {
            return;
        }
        let viewport = self.input.borrow().viewport;
        self.magnet_rects = input::visible_magnet_targets(&self.magnets, viewport);
        self.magnets_read_ms = now_ms;
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owner of the self-rescheduling animation-frame callback.
pub struct RenderLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
    idle_interval: Option<i32>,
}

impl RenderLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext<'static>>>, idle_interval: Option<i32>) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let pending_clone = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_clone.set(None);
            frame_ctx.borrow_mut().frame();
            if let Some(cb) = tick_clone.borrow().as_ref() {
                pending_clone.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = tick.borrow().as_ref() {
            pending.set(request_frame(cb));
        }
        log::info!("[scene] render loop started");
        Self {
            tick,
            pending,
            idle_interval,
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick.borrow().is_some()
    }

    /// Cancel the pending frame and release the callback (and with it the
    /// frame context).
    pub fn stop(&mut self) {
        if let Some(w) = web::window() {
            if let Some(id) = self.pending.take() {
                _ = w.cancel_animation_frame(id);
            }
            if let Some(id) = self.idle_interval.take() {
                w.clear_interval_with_handle(id);
            }
        }
        if self.tick.borrow_mut().take().is_some() {
            log::info!("[scene] render loop stopped");
        }
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window().and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
}
