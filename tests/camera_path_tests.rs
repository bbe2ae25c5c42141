// Host-side tests for the scroll-driven camera path.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod camera_path {
        include!("../src/core/camera_path.rs");
    }
}

use crate::core::camera_path::*;
use crate::core::constants::CAMERA_PARALLAX;
use glam::{Vec2, Vec3};

fn two_point_path() -> CameraPath {
    CameraPath::new(vec![
        Viewpoint {
            name: "a",
            eye: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
        },
        Viewpoint {
            name: "b",
            eye: Vec3::new(2.0, -4.0, 7.0),
            look_at: Vec3::new(0.0, -2.0, 0.0),
        },
    ])
}

#[test]
fn halfway_between_two_anchors_is_the_midpoint() {
    let s = two_point_path().sample(0.5);
    assert_eq!(s.eye, Vec3::new(1.0, -2.0, 6.0));
    assert_eq!(s.look_at, Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn ends_of_the_path_hit_the_first_and_last_anchor() {
    let path = CameraPath::default();
    let first = path.anchors()[0];
    let last = path.anchors()[path.anchors().len() - 1];

    assert_eq!(path.sample(0.0).eye, first.eye);
    assert_eq!(path.sample(1.0).eye, last.eye);
    assert_eq!(path.sample(1.0).look_at, last.look_at);
    assert_eq!(path.sample(-3.0).eye, first.eye);
    assert_eq!(path.sample(7.0).eye, last.eye);
    assert_eq!(path.sample(f32::NAN).eye, first.eye);
}

#[test]
fn segments_split_progress_evenly() {
    let path = CameraPath::default();
    assert_eq!(path.segment(0.0), (0, 0.0));
    assert_eq!(path.segment(0.25), (1, 0.0));
    assert_eq!(path.segment(0.375), (1, 0.5));
    assert_eq!(path.segment(1.0), (3, 1.0));
}

#[test]
fn single_anchor_path_is_static() {
    let only = DEFAULT_VIEWPOINTS[2];
    let path = CameraPath::new(vec![only]);
    assert_eq!(path.segment(0.6), (0, 0.0));
    assert_eq!(path.sample(0.6).eye, only.eye);
}

#[test]
fn empty_path_falls_back_to_the_sections() {
    let path = CameraPath::new(Vec::new());
    assert_eq!(path.anchors().len(), DEFAULT_VIEWPOINTS.len());
    assert!(path.anchor("hero").is_some());
    assert!(path.anchor("contact").is_some());
    assert!(path.anchor("nowhere").is_none());
}

#[test]
fn pointer_parallax_moves_only_the_eye() {
    let path = CameraPath::default();
    let base = path.sample(0.0);
    let moved = path.camera_target(0.0, Vec2::new(1.0, -1.0));
    assert_eq!(moved.eye, base.eye + Vec3::new(CAMERA_PARALLAX, -CAMERA_PARALLAX, 0.0));
    assert_eq!(moved.look_at, base.look_at);
    assert!((moved.direction().length() - 1.0).abs() < 1e-5);
}
