// Host-side tests for scroll progress, observers and the reveal helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use crate::core::constants::*;
use crate::core::scroll::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn progress_is_clamped_and_finite() {
    assert_eq!(scroll_progress(0.0, 2000.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(500.0, 2000.0, 1000.0), 0.5);
    assert_eq!(scroll_progress(1000.0, 2000.0, 1000.0), 1.0);
    assert_eq!(scroll_progress(5000.0, 2000.0, 1000.0), 1.0);
    assert_eq!(scroll_progress(-50.0, 2000.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(f32::NAN, 2000.0, 1000.0), 0.0);
}

#[test]
fn page_without_room_reports_zero_progress() {
    assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
    assert_eq!(scroll_progress(100.0, 600.0, 800.0), 0.0);

    let mut s = ScrollState::default();
    s.update(0.0, 800.0, 800.0);
    assert_eq!(s.progress, 0.0);
    assert!(s.at_top());
    assert!(s.at_bottom());
}

#[test]
fn update_tracks_velocity_and_direction() {
    let mut s = ScrollState::default();
    s.update(0.0, 2000.0, 1000.0);
    s.update(100.0, 2000.0, 1000.0);
    assert_eq!(s.velocity, 100.0 / SCROLL_VELOCITY_DIVISOR);
    assert_eq!(s.direction, ScrollDirection::Down);
    assert!(!s.at_top() && !s.at_bottom());

    s.update(50.0, 2000.0, 1000.0);
    assert_eq!(s.velocity, -50.0 / SCROLL_VELOCITY_DIVISOR);
    assert_eq!(s.direction, ScrollDirection::Up);

    // no movement keeps the last direction
    s.update(50.0, 2000.0, 1000.0);
    assert_eq!(s.velocity, 0.0);
    assert_eq!(s.direction, ScrollDirection::Up);

    s.update(1000.0, 2000.0, 1000.0);
    assert!(s.at_bottom());
    assert_eq!(s.progress, 1.0);
}

#[test]
fn first_sample_seeds_the_offset_without_velocity() {
    // page restored deep into the document
    let mut s = ScrollState::default();
    s.update(3000.0, 8000.0, 1000.0);
    assert_eq!(s.velocity, 0.0);
    assert_eq!(s.direction, ScrollDirection::Down);
    assert_eq!(s.offset, 3000.0);
    assert!((s.progress - 3.0 / 7.0).abs() < 1e-6);

    // later samples measure from the seeded offset
    s.update(2990.0, 8000.0, 1000.0);
    assert_eq!(s.velocity, -10.0 / SCROLL_VELOCITY_DIVISOR);
    assert_eq!(s.direction, ScrollDirection::Up);
}

#[test]
fn velocity_decays_toward_zero() {
    let mut s = ScrollState::default();
    s.update(0.0, 4000.0, 1000.0);
    s.update(300.0, 4000.0, 1000.0);
    let start = s.velocity;
    let mut last = start;
    for _ in 0..120 {
        s.decay(1.0 / 60.0);
        assert!(s.velocity <= last && s.velocity >= 0.0);
        last = s.velocity;
    }
    assert!(last < start * 0.05);
}

#[test]
fn observers_receive_progress_until_unsubscribed() {
    let mut observers = ScrollObservers::default();
    let a = Rc::new(Cell::new(-1.0_f32));
    let b = Rc::new(Cell::new(-1.0_f32));

    let id_a = {
        let a = a.clone();
        observers.subscribe(move |p| a.set(p))
    };
    {
        let b = b.clone();
        observers.subscribe(move |p| b.set(p));
    }
    assert_eq!(observers.len(), 2);

    observers.publish(0.25);
    assert_eq!(a.get(), 0.25);
    assert_eq!(b.get(), 0.25);

    assert!(observers.unsubscribe(id_a));
    assert!(!observers.unsubscribe(id_a));
    observers.publish(0.75);
    assert_eq!(a.get(), 0.25);
    assert_eq!(b.get(), 0.75);
}

#[test]
fn observers_run_in_subscription_order() {
    let mut observers = ScrollObservers::default();
    let log = Rc::new(RefCell::new(Vec::new()));
    for tag in 0..3 {
        let log = log.clone();
        observers.subscribe(move |_| log.borrow_mut().push(tag));
    }
    observers.publish(0.5);
    assert_eq!(*log.borrow(), vec![0, 1, 2]);
}

#[test]
fn reveal_uses_the_offset_margin() {
    let vh = 800.0;
    // top edge just inside the shrunken viewport
    assert!(is_in_viewport(700.0, 900.0, vh, REVEAL_OFFSET_PX));
    // top edge below the margin
    assert!(!is_in_viewport(750.0, 950.0, vh, REVEAL_OFFSET_PX));
    // scrolled past: bottom above the margin
    assert!(!is_in_viewport(-300.0, 50.0, vh, REVEAL_OFFSET_PX));
    assert!(is_in_viewport(-300.0, 100.0, vh, REVEAL_OFFSET_PX));
}

#[test]
fn cards_stagger_by_index() {
    let vh = 1000.0;
    assert_eq!(card_progress(1000.0, vh, 0), 0.0);
    assert_eq!(card_progress(500.0, vh, 0), 0.5);
    assert!((card_progress(500.0, vh, 2) - 0.3).abs() < 1e-6);
    assert_eq!(card_progress(-500.0, vh, 1), 1.0);
    assert_eq!(card_progress(500.0, 0.0, 0), 0.0);

    assert_eq!(card_offset_px(0.0), CARD_TRAVEL_PX);
    assert_eq!(card_offset_px(1.0), 0.0);
    assert_eq!(card_offset_px(2.0), 0.0);
}

#[test]
fn counters_ease_to_their_target() {
    assert_eq!(counter_value(100, 0.0), 0);
    assert_eq!(counter_value(100, -5.0), 0);
    assert_eq!(counter_value(100, COUNTER_DURATION_MS / 2.0), 93);
    assert_eq!(counter_value(100, COUNTER_DURATION_MS), 100);
    assert_eq!(counter_value(100, COUNTER_DURATION_MS * 3.0), 100);

    let mut last = 0;
    for ms in (0..=2000).step_by(20) {
        let v = counter_value(2500, ms as f64);
        assert!(v >= last && v <= 2500);
        last = v;
    }
}
