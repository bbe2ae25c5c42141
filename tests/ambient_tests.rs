// Host-side tests for the ambient decoration, camera projection and easing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod ambient {
        include!("../src/core/ambient.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
}

use crate::core::ambient::*;
use crate::core::camera::Camera;
use crate::core::constants::*;
use crate::core::easing::*;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn particles_fill_the_spread_box() {
    let mut rng = StdRng::seed_from_u64(1);
    let field = particle_field(500, &mut rng);
    assert_eq!(field.len(), 500);
    for p in &field {
        for axis in 0..3 {
            assert!(p.position[axis].abs() <= PARTICLE_SPREAD[axis] / 2.0);
            assert!((0.0..1.0).contains(&p.randomness[axis]));
        }
        assert!((0.0..1.0).contains(&p.scale));
    }
}

#[test]
fn lines_rise_and_wrap() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut lines = AmbientLines::new(40, &mut rng);
    for _ in 0..6000 {
        lines.advance(1.0 / 60.0);
        for l in &lines.lines {
            assert!(l.y >= -LINE_MAX_HEIGHT && l.y <= LINE_MAX_HEIGHT, "{}", l.y);
        }
    }
    assert!(lines.rotation > 0.0);

    assert_eq!(wrap_height(LINE_MAX_HEIGHT + 0.5), -LINE_MAX_HEIGHT + 0.5);
    assert_eq!(wrap_height(3.0), 3.0);
}

#[test]
fn line_segments_fade_from_the_head() {
    let mut rng = StdRng::seed_from_u64(3);
    let lines = AmbientLines::new(10, &mut rng);
    let segs = lines.segments();
    assert_eq!(segs.len(), 20);
    for pair in segs.chunks_exact(2) {
        assert_eq!(pair[0].1, 0.0);
        assert!(pair[1].1 > 0.0 && pair[1].1 <= 0.6);
        assert!(pair[1].0[1] > pair[0].0[1]);
    }
}

#[test]
fn camera_projects_the_target_to_the_center() {
    let cam = Camera::default();
    let p = cam.project(Vec3::ZERO).unwrap_or_else(|| panic!("origin is in front"));
    assert!(p.length() < 1e-5);

    let right = cam.project(Vec3::new(1.0, 0.0, 0.0)).unwrap_or_default();
    assert!(right.x > 0.0);
    let up = cam.project(Vec3::new(0.0, 1.0, 0.0)).unwrap_or_default();
    assert!(up.y > 0.0);

    assert_eq!(cam.project(Vec3::new(0.0, 0.0, 10.0)), None);
}

#[test]
fn frame_alpha_is_rate_at_sixty_hz() {
    assert!((frame_alpha(0.15, 1.0 / 60.0) - 0.15).abs() < 1e-5);
    assert_eq!(frame_alpha(0.15, 0.0), 0.0);
    assert_eq!(frame_alpha(1.5, 0.016), 1.0);
    let two = frame_alpha(0.1, 2.0 / 60.0);
    assert!((two - (1.0 - 0.9 * 0.9)).abs() < 1e-5);
}

#[test]
fn ease_out_quart_is_clamped() {
    assert_eq!(ease_out_quart(0.0), 0.0);
    assert_eq!(ease_out_quart(1.0), 1.0);
    assert_eq!(ease_out_quart(-1.0), 0.0);
    assert_eq!(ease_out_quart(2.0), 1.0);
    assert_eq!(approach_vec2(Vec2::ZERO, Vec2::ONE, 0.5), Vec2::splat(0.5));
}
