// Host-side tests for the cursor controller state.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod cursor {
        include!("../src/core/cursor.rs");
    }
}

use crate::core::constants::*;
use crate::core::cursor::*;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

const VIEWPORT: Vec2 = Vec2::new(1000.0, 800.0);
const DT: f32 = 1.0 / 60.0;

fn idle_markers(c: &CursorState) -> Vec<Marker> {
    c.markers
        .iter()
        .copied()
        .filter(|m| matches!(m.role, MarkerRole::Idle { .. }))
        .collect()
}

fn trail_count(c: &CursorState) -> usize {
    c.markers
        .iter()
        .filter(|m| matches!(m.role, MarkerRole::Trail { .. }))
        .count()
}

#[test]
fn eased_cursor_closes_in_without_overshoot() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    let goal = Vec2::new(900.0, 100.0);
    c.on_pointer_move(goal, 0.0);

    let mut last = c.eased.distance(goal);
    for i in 1..=240 {
        c.step(i as f64 * 16.0, DT, &[]);
        let d = c.eased.distance(goal);
        assert!(d <= last + 1e-4, "distance grew at frame {i}: {last} -> {d}");
        assert!(c.eased.x <= goal.x + 1e-3);
        assert!(c.eased.y >= goal.y - 1e-3);
        last = d;
    }
    assert!(last < 1.0);
}

#[test]
fn easing_speed_does_not_depend_on_frame_rate() {
    let goal = Vec2::new(100.0, 700.0);
    let mut fast = CursorState::new(VIEWPORT, 0.0);
    let mut slow = CursorState::new(VIEWPORT, 0.0);
    fast.on_pointer_move(goal, 0.0);
    slow.on_pointer_move(goal, 0.0);

    for i in 0..120 {
        fast.step(i as f64 * 8.0, 1.0 / 120.0, &[]);
    }
    for i in 0..60 {
        slow.step(i as f64 * 16.0, 1.0 / 60.0, &[]);
    }
    assert!(fast.eased.distance(slow.eased) < 0.5);
}

#[test]
fn edge_zones_prefer_corners() {
    let t = EDGE_THRESHOLD_PX;
    let cases = [
        (Vec2::new(0.0, 0.0), EdgeZone::TopLeft),
        (Vec2::new(1000.0, 0.0), EdgeZone::TopRight),
        (Vec2::new(3.0, 797.0), EdgeZone::BottomLeft),
        (Vec2::new(1000.0, 800.0), EdgeZone::BottomRight),
        (Vec2::new(500.0, 0.0), EdgeZone::Top),
        (Vec2::new(500.0, 799.0), EdgeZone::Bottom),
        (Vec2::new(2.0, 400.0), EdgeZone::Left),
        (Vec2::new(998.0, 400.0), EdgeZone::Right),
        (Vec2::new(500.0, 400.0), EdgeZone::None),
        (Vec2::new(6.0, 6.0), EdgeZone::None),
    ];
    for (pos, want) in cases {
        assert_eq!(EdgeZone::classify(pos, VIEWPORT, t), want, "at {pos:?}");
    }
}

#[test]
fn edge_zones_cover_the_viewport_exactly_once() {
    // every sample maps to a single zone, and any point satisfying two edge
    // conditions is a corner
    for x in (0..=1000).step_by(50).chain([1, 4, 5, 6, 995, 996, 999]) {
        for y in (0..=800).step_by(50).chain([1, 4, 5, 6, 795, 796, 799]) {
            let p = Vec2::new(x as f32, y as f32);
            let zone = EdgeZone::classify(p, VIEWPORT, EDGE_THRESHOLD_PX);
            assert_eq!(EdgeZone::ALL.iter().filter(|z| **z == zone).count(), 1);

            let near_x = p.x <= EDGE_THRESHOLD_PX || p.x >= VIEWPORT.x - EDGE_THRESHOLD_PX;
            let near_y = p.y <= EDGE_THRESHOLD_PX || p.y >= VIEWPORT.y - EDGE_THRESHOLD_PX;
            assert_eq!(zone.is_corner(), near_x && near_y, "at {p:?}");
            assert_eq!(zone == EdgeZone::None, !near_x && !near_y, "at {p:?}");
        }
    }
}

#[test]
fn idle_is_entered_once_after_threshold() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    assert!(!c.check_idle(IDLE_THRESHOLD_MS - 1.0));
    assert!(!c.is_idle());

    assert!(c.check_idle(IDLE_THRESHOLD_MS));
    assert_eq!(c.mode, CursorMode::Orbiting);
    assert_eq!(idle_markers(&c).len(), IDLE_MARKER_COUNT);

    // later polls do not re-enter or re-populate
    assert!(!c.check_idle(IDLE_THRESHOLD_MS + 100.0));
    assert!(!c.check_idle(IDLE_THRESHOLD_MS * 5.0));
    assert_eq!(idle_markers(&c).len(), IDLE_MARKER_COUNT);
}

#[test]
fn movement_resets_the_idle_timer() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    c.on_pointer_move(Vec2::new(400.0, 300.0), 1500.0);
    assert!(!c.check_idle(2500.0));
    assert!(c.check_idle(3500.0));

    c.on_pointer_move(Vec2::new(410.0, 300.0), 4000.0);
    assert_eq!(c.mode, CursorMode::Active);
    assert!(!c.check_idle(5000.0));
    assert!(c.check_idle(6000.0));
}

#[test]
fn idle_at_an_edge_emits_instead_of_orbiting() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    c.on_pointer_move(Vec2::new(0.0, 0.0), 0.0);
    assert!(c.check_idle(IDLE_THRESHOLD_MS));
    assert_eq!(c.mode, CursorMode::Emitting(EdgeZone::TopLeft));
}

#[test]
fn orbit_markers_ring_the_cursor() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    assert!(c.check_idle(IDLE_THRESHOLD_MS));
    c.step(IDLE_THRESHOLD_MS + 16.0, DT, &[]);

    for m in idle_markers(&c) {
        let r = m.pos.distance(c.eased);
        assert!((r - ORBIT_RADIUS_PX).abs() < 1e-3, "radius {r}");
        assert_eq!(m.opacity, 1.0);
    }
}

#[test]
fn emission_stays_inside_the_inward_cone() {
    let edges = [
        (Vec2::new(500.0, 0.0), EdgeZone::Top),
        (Vec2::new(1000.0, 400.0), EdgeZone::Right),
        (Vec2::new(1000.0, 800.0), EdgeZone::BottomRight),
    ];
    for (pos, zone) in edges {
        let mut c = CursorState::new(VIEWPORT, 0.0);
        c.on_pointer_move(pos, 0.0);
        assert!(c.check_idle(IDLE_THRESHOLD_MS));

        let inward = zone.inward_angle().unwrap_or_default();
        for frame in 1..30 {
            c.step(IDLE_THRESHOLD_MS + frame as f64 * 16.0, DT, &[]);
            for m in idle_markers(&c) {
                let d = m.pos - c.eased;
                let off = (d.y.atan2(d.x) - inward + PI).rem_euclid(TAU) - PI;
                assert!(off.abs() <= zone.spread() / 2.0 + 1e-3, "{zone:?}: {off}");
                assert!(m.opacity >= EMIT_MIN_OPACITY - 1e-4 && m.opacity <= 1.0);
            }
        }
    }
}

#[test]
fn fast_motion_spawns_trail_and_retires_idle_markers() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    assert!(c.check_idle(IDLE_THRESHOLD_MS));

    let t = IDLE_THRESHOLD_MS + 100.0;
    c.on_pointer_move(Vec2::new(900.0, 400.0), t);
    c.step(t, DT, &[]);
    assert!(c.speed_px_s() > TRAIL_SPEED_THRESHOLD_PX_S);
    assert_eq!(trail_count(&c), 1);
    assert_eq!(idle_markers(&c).len(), IDLE_MARKER_COUNT - 1);

    // pointer at rest: the trail fades out and is dropped
    c.step(t + TRAIL_LIFETIME_MS + 1.0, DT, &[]);
    assert_eq!(trail_count(&c), 0);
    assert!(c.markers.len() <= MARKER_CAPACITY);
}

#[test]
fn slow_motion_after_idle_fades_out_the_idle_markers() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    assert!(c.check_idle(IDLE_THRESHOLD_MS));
    c.step(IDLE_THRESHOLD_MS + 16.0, DT, &[]);

    // one pixel per frame stays well under the trail speed threshold
    let start = IDLE_THRESHOLD_MS + 32.0;
    let mut pos = c.pointer;
    let mut t = start;
    let mut frame = 0;
    while t <= start + TRAIL_LIFETIME_MS + 100.0 {
        pos.x += 1.0;
        c.on_pointer_move(pos, t);
        c.step(t, DT, &[]);
        assert!(c.speed_px_s() < TRAIL_SPEED_THRESHOLD_PX_S);
        assert_eq!(trail_count(&c), 0);

        let idle = idle_markers(&c);
        if t - start >= TRAIL_LIFETIME_MS {
            assert!(idle.is_empty(), "idle markers left at {} ms", t - start);
        } else if t - start >= TRAIL_LIFETIME_MS / 2.0 {
            assert_eq!(idle.len(), IDLE_MARKER_COUNT);
            assert!(idle.iter().all(|m| m.opacity > 0.0 && m.opacity <= 0.5));
        }
        frame += 1;
        t = start + frame as f64 * 16.0;
    }
    assert!(c.markers.is_empty());
}

#[test]
fn marker_pool_is_bounded() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    let mut t = 0.0;
    for i in 0..200 {
        t += TRAIL_SPAWN_INTERVAL_MS;
        let x = if i % 2 == 0 { 100.0 } else { 900.0 };
        c.on_pointer_move(Vec2::new(x, 400.0), t);
        c.step(t, DT, &[]);
        assert!(c.markers.len() <= MARKER_CAPACITY);
    }
}

#[test]
fn magnet_strength_falls_off_with_distance() {
    assert_eq!(magnet_strength(0.0), MAGNET_PULL);
    assert_eq!(magnet_strength(MAGNET_MIN_DISTANCE_PX), MAGNET_PULL);
    assert_eq!(magnet_strength(MAGNET_RADIUS_PX), 0.0);
    assert_eq!(magnet_strength(f32::NAN), 0.0);

    let mut last = f32::INFINITY;
    for d in 0..=100 {
        let s = magnet_strength(d as f32);
        assert!(s <= last);
        assert!((0.0..=MAGNET_PULL).contains(&s));
        last = s;
    }
}

#[test]
fn nearest_magnet_pulls_the_follow_point() {
    let near = MagnetTarget::from_rect(90.0, 90.0, 20.0, 20.0); // center (100, 100)
    let far = MagnetTarget::from_rect(150.0, 150.0, 20.0, 20.0); // center (160, 160)
    let pointer = Vec2::new(130.0, 100.0);

    let p = magnetic_follow_point(pointer, &[far, near]);
    assert!(p.x > 100.0 && p.x < pointer.x, "{p:?}");
    assert!((p.y - 100.0).abs() < 1e-4, "pulled toward the far target: {p:?}");

    // out of range: untouched
    let lonely = Vec2::new(600.0, 600.0);
    assert_eq!(magnetic_follow_point(lonely, &[near, far]), lonely);
}

#[test]
fn hover_tracks_the_target_under_the_pointer() {
    let button = MagnetTarget::from_rect(100.0, 100.0, 80.0, 40.0);
    let mut c = CursorState::new(VIEWPORT, 0.0);
    c.on_pointer_move(Vec2::new(120.0, 110.0), 0.0);
    c.step(16.0, DT, &[button]);
    assert_eq!(c.hover, Some(0));

    c.on_pointer_move(Vec2::new(700.0, 110.0), 32.0);
    c.step(48.0, DT, &[button]);
    assert_eq!(c.hover, None);
}

#[test]
fn normalized_pointer_is_y_up() {
    let mut c = CursorState::new(VIEWPORT, 0.0);
    assert_eq!(c.normalized(), Vec2::ZERO);

    c.on_pointer_move(Vec2::new(0.0, 0.0), 0.0);
    assert_eq!(c.normalized(), Vec2::new(-1.0, 1.0));
    c.on_pointer_move(VIEWPORT, 0.0);
    assert_eq!(c.normalized(), Vec2::new(1.0, -1.0));

    let p = c.position01();
    assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
}

#[test]
fn degenerate_viewport_is_safe() {
    let c = CursorState::new(Vec2::ZERO, 0.0);
    assert_eq!(c.normalized(), Vec2::ZERO);
    assert_eq!(c.position01(), Vec2::splat(0.5));
}
