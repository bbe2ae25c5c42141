// Host-side tests for the instance spin drive.
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
    pub mod drive {
        include!("../src/core/drive.rs");
    }
}

use crate::core::constants::*;
use crate::core::drive::*;
use crate::core::scroll::{ScrollDirection, ScrollState};

fn mid_page(velocity: f32, direction: ScrollDirection) -> ScrollSignal {
    ScrollSignal {
        velocity,
        direction,
        at_top: false,
        at_bottom: false,
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn idle_keeps_the_previous_sign() {
    let d = resolve_drive(ScrollSignal::default(), 0.0, -1.0);
    assert_eq!(d.source, DriveSource::Idle);
    assert_eq!(d.multiplier, 1.0);
    assert_eq!(d.sign, -1.0);

    let d = resolve_drive(ScrollSignal::default(), 0.0, 1.0);
    assert_eq!(d.sign, 1.0);
    assert_eq!(d.factor(), 1.0);
}

#[test]
fn page_scroll_drives_speed_and_direction() {
    let d = resolve_drive(mid_page(0.5, ScrollDirection::Up), 0.0, 1.0);
    assert_eq!(d.source, DriveSource::Scroll);
    assert!(approx(d.multiplier, 3.5));
    assert_eq!(d.sign, -1.0);

    let d = resolve_drive(mid_page(10.0, ScrollDirection::Down), 0.0, -1.0);
    assert_eq!(d.multiplier, DRIVE_MAX_MULTIPLIER);
    assert_eq!(d.sign, 1.0);
}

#[test]
fn page_scroll_wins_over_wheel_mid_page() {
    let d = resolve_drive(mid_page(0.2, ScrollDirection::Down), -0.8, 1.0);
    assert_eq!(d.source, DriveSource::Scroll);
    assert_eq!(d.sign, 1.0);
}

#[test]
fn wheel_drives_when_the_page_is_still() {
    let d = resolve_drive(mid_page(0.0, ScrollDirection::Down), -0.4, 1.0);
    assert_eq!(d.source, DriveSource::Wheel);
    assert!(approx(d.multiplier, 3.0));
    assert_eq!(d.sign, -1.0);
}

#[test]
fn wheel_at_a_limit_boosts_the_drive() {
    let bottom = ScrollSignal {
        at_bottom: true,
        ..Default::default()
    };
    let d = resolve_drive(bottom, 0.4, -1.0);
    assert_eq!(d.source, DriveSource::Overscroll);
    assert!(approx(d.multiplier, 1.0 + 0.4 * OVERSCROLL_BOOST * DRIVE_GAIN));
    assert!(d.multiplier > 1.0 + 0.4 * DRIVE_GAIN);
    assert_eq!(d.sign, 1.0);
    assert!(d.factor() > 1.0);
}

#[test]
fn overscroll_overrides_a_decaying_page_velocity() {
    let top = ScrollSignal {
        velocity: -0.3,
        direction: ScrollDirection::Up,
        at_top: true,
        at_bottom: false,
    };
    let d = resolve_drive(top, -0.2, 1.0);
    assert_eq!(d.source, DriveSource::Overscroll);
    assert_eq!(d.sign, -1.0);
}

#[test]
fn wheel_away_from_the_limit_is_plain_wheel() {
    let top = ScrollSignal {
        at_top: true,
        ..Default::default()
    };
    let d = resolve_drive(top, 0.2, -1.0);
    assert_eq!(d.source, DriveSource::Wheel);
    assert_eq!(d.sign, 1.0);
}

#[test]
fn tiny_wheel_noise_is_ignored() {
    let top = ScrollSignal {
        at_top: true,
        ..Default::default()
    };
    let d = resolve_drive(top, -DRIVE_ACTIVE_EPSILON * 0.5, 1.0);
    assert_eq!(d.source, DriveSource::Idle);
}

#[test]
fn signal_reflects_scroll_limits() {
    let mut s = ScrollState::default();
    s.update(0.0, 800.0, 800.0);
    let sig = ScrollSignal::from(&s);
    assert!(sig.at_top && sig.at_bottom);

    let mut s = ScrollState::default();
    s.update(200.0, 2000.0, 1000.0);
    let sig = ScrollSignal::from(&s);
    assert!(!sig.at_top && !sig.at_bottom);
    assert_eq!(sig.direction, ScrollDirection::Down);
}

#[test]
fn wheel_tracker_keeps_the_stronger_sample_and_decays() {
    let mut w = WheelTracker::default();
    w.push(100.0);
    assert_eq!(w.velocity, 1.0);
    w.push(20.0);
    assert_eq!(w.velocity, 1.0);
    w.push(-20.0);
    assert_eq!(w.velocity, -0.2);
    w.push(f32::NAN);
    assert_eq!(w.velocity, -0.2);

    for _ in 0..600 {
        w.decay(1.0 / 60.0);
    }
    assert_eq!(w.velocity, 0.0);
}

#[test]
fn wheel_deltas_convert_to_pixels() {
    assert_eq!(wheel_delta_px(3.0, 0, 900.0), 3.0);
    assert_eq!(wheel_delta_px(3.0, 1, 900.0), 48.0);
    assert_eq!(wheel_delta_px(-1.0, 2, 900.0), -900.0);
}
