// Scroll state, progress publishing and the reveal/counter helpers used by
// the DOM scroll controller.

use super::constants::*;
use super::easing::ease_out_quart;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    Down,
    Up,
}

impl ScrollDirection {
    pub fn sign(self) -> f32 {
        match self {
            ScrollDirection::Down => 1.0,
            ScrollDirection::Up => -1.0,
        }
    }
}

/// Progress in \[0, 1\] for a raw offset. Returns 0 when the document has no
/// room to scroll or any input is not finite.
#[inline]
pub fn scroll_progress(offset: f32, document_height: f32, viewport_height: f32) -> f32 {
    let room = document_height - viewport_height;
    if !(room > 0.0) || !offset.is_finite() {
        return 0.0;
    }
    (offset / room).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, Default)]
pub struct ScrollState {
    pub offset: f32,
    pub progress: f32,
    pub velocity: f32,
    pub direction: ScrollDirection,
    room: f32,
    primed: bool,
}

impl ScrollState {
    /// The first sample only seeds the offset; a page restored mid-document
    /// must not read as one huge scroll.
    pub fn update(&mut self, offset: f32, document_height: f32, viewport_height: f32) {
        let delta = if self.primed {
            offset - self.offset
        } else {
            0.0
        };
        if delta.is_finite() {
            self.velocity = delta / SCROLL_VELOCITY_DIVISOR;
            if delta > 0.0 {
                self.direction = ScrollDirection::Down;
            } else if delta < 0.0 {
                self.direction = ScrollDirection::Up;
            }
        }
        self.offset = offset;
        self.primed = true;
        self.room = (document_height - viewport_height).max(0.0);
        self.progress = scroll_progress(offset, document_height, viewport_height);
    }

    pub fn decay(&mut self, dt_sec: f32) {
        self.velocity *= (-SCROLL_VELOCITY_DECAY_PER_SEC * dt_sec.max(0.0)).exp();
    }

    pub fn at_top(&self) -> bool {
        self.offset <= 0.5
    }

    /// A page without scroll room is at both limits.
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.room - 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Progress subscribers, called in subscription order.
#[derive(Default)]
pub struct ScrollObservers {
    next_id: usize,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(f32)>)>,
}

impl ScrollObservers {
    pub fn subscribe(&mut self, callback: impl FnMut(f32) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, progress: f32) {
        for (_, cb) in self.subscribers.iter_mut() {
            cb(progress);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[inline]
pub fn is_in_viewport(top: f32, bottom: f32, viewport_height: f32, offset: f32) -> bool {
    top <= viewport_height - offset && bottom >= offset
}

/// Reveal progress of the `index`-th card whose top edge sits at `top`.
#[inline]
pub fn card_progress(top: f32, viewport_height: f32, index: usize) -> f32 {
    if viewport_height <= 0.0 {
        return 0.0;
    }
    let raw = (viewport_height - top) / viewport_height;
    (raw - index as f32 * CARD_STAGGER).clamp(0.0, 1.0)
}

#[inline]
pub fn card_offset_px(progress: f32) -> f32 {
    (1.0 - progress.clamp(0.0, 1.0)) * CARD_TRAVEL_PX
}

/// Value shown by a stat counter `elapsed_ms` after it started.
#[inline]
pub fn counter_value(target: i64, elapsed_ms: f64) -> i64 {
    if elapsed_ms >= COUNTER_DURATION_MS {
        return target;
    }
    let t = (elapsed_ms.max(0.0) / COUNTER_DURATION_MS) as f32;
    (target as f64 * ease_out_quart(t) as f64).floor() as i64
}
