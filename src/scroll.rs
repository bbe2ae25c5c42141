use crate::constants::*;
use crate::core::constants::REVEAL_OFFSET_PX;
use crate::core::drive::ScrollSignal;
use crate::core::scroll::{
    card_offset_px, card_progress, counter_value, is_in_viewport, ScrollObservers, ScrollState,
    SubscriptionId,
};
use crate::dom;
use web_sys as web;

struct Counter {
    el: web::HtmlElement,
    target: i64,
    started_ms: Option<f64>,
    done: bool,
}

/// DOM scroll controller: progress bar, one-way reveals, staggered cards,
/// stat counters and progress publishing.
pub struct ScrollController {
    pub state: ScrollState,
    observers: ScrollObservers,
    progress_fill: Option<web::HtmlElement>,
    pending_reveals: Vec<web::HtmlElement>,
    cards: Vec<web::HtmlElement>,
    counters: Vec<Counter>,
}

impl ScrollController {
    pub fn new(document: &web::Document) -> Self {
        let progress_fill = dom::query_html(document, PROGRESS_FILL_SELECTOR);
        if progress_fill.is_none() {
            log::warn!("[scroll] no {PROGRESS_FILL_SELECTOR}; progress bar disabled");
        }
        let counters: Vec<Counter> = dom::query_all(document, COUNTER_SELECTOR)
            .into_iter()
            .filter_map(|el| {
                let raw = el.dataset().get("count")?;
                match raw.trim().parse::<i64>() {
                    Ok(target) => Some(Counter {
                        el,
                        target,
                        started_ms: None,
                        done: false,
                    }),
                    Err(_) => {
                        log::warn!("[scroll] ignoring counter with data-count={raw:?}");
                        None
                    }
                }
            })
            .collect();
        let pending_reveals = dom::query_all(document, REVEAL_SELECTOR);
        let cards = dom::query_all(document, CARD_SELECTOR);
        log::info!(
            "[scroll] {} reveal targets, {} cards, {} counters",
            pending_reveals.len(),
            cards.len(),
            counters.len()
        );
        Self {
            state: ScrollState::default(),
            observers: ScrollObservers::default(),
            progress_fill,
            pending_reveals,
            cards,
            counters,
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(f32) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn signal(&self) -> ScrollSignal {
        ScrollSignal::from(&self.state)
    }

    /// Handle a page scroll event.
    pub fn on_scroll(&mut self, now_ms: f64) {
        let Some(window) = web::window() else {
            return;
        };
        let offset = window.scroll_y().unwrap_or(0.0) as f32;
        let (_, viewport_h) = dom::viewport_size();
        let document_h = window
            .document()
            .and_then(|d| d.document_element())
            .map(|el| el.scroll_height() as f32)
            .unwrap_or(viewport_h);

        self.state.update(offset, document_h, viewport_h);
        let progress = self.state.progress;

        if let Some(fill) = &self.progress_fill {
            dom::set_style(fill, "width", &format!("{:.2}%", progress * 100.0));
        }
        self.reveal(viewport_h, now_ms);
        self.layout_cards(viewport_h);
        self.observers.publish(progress);
    }

    /// Per-frame upkeep: velocity decay and running counters.
    pub fn tick(&mut self, now_ms: f64, dt_sec: f32) {
        self.state.decay(dt_sec);
        for c in self.counters.iter_mut().filter(|c| !c.done) {
            let Some(start) = c.started_ms else {
                continue;
            };
            let value = counter_value(c.target, now_ms - start);
            c.el.set_text_content(Some(&value.to_string()));
            if value == c.target {
                c.done = true;
                dom::toggle_class(&c.el, COUNTED_CLASS, true);
            }
        }
    }

    fn reveal(&mut self, viewport_h: f32, now_ms: f64) {
        let before = self.pending_reveals.len();
        self.pending_reveals.retain(|el| {
            let r = el.get_bounding_client_rect();
            if is_in_viewport(r.top() as f32, r.bottom() as f32, viewport_h, REVEAL_OFFSET_PX) {
                dom::toggle_class(el, VISIBLE_CLASS, true);
                false
            } else {
                true
            }
        });
        if before != self.pending_reveals.len() {
            log::debug!("[scroll] revealed {} elements", before - self.pending_reveals.len());
        }

        for c in self.counters.iter_mut().filter(|c| c.started_ms.is_none()) {
            let r = c.el.get_bounding_client_rect();
            if is_in_viewport(r.top() as f32, r.bottom() as f32, viewport_h, REVEAL_OFFSET_PX) {
                c.started_ms = Some(now_ms);
            }
        }
    }

    fn layout_cards(&self, viewport_h: f32) {
        for (i, card) in self.cards.iter().enumerate() {
            let top = card.get_bounding_client_rect().top() as f32;
            let p = card_progress(top, viewport_h, i);
            dom::set_style(card, "opacity", &format!("{p:.3}"));
            dom::set_style(
                card,
                "transform",
                &format!("translateY({:.1}px)", card_offset_px(p)),
            );
        }
    }
}
