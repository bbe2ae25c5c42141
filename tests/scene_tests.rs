// Host-side tests for the scene manager's lifecycle and frame update.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod ambient {
        include!("../src/core/ambient.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod camera_path {
        include!("../src/core/camera_path.rs");
    }
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod drive {
        include!("../src/core/drive.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod instances {
        include!("../src/core/instances.rs");
    }
    pub mod mesh {
        include!("../src/core/mesh.rs");
    }
    pub mod model {
        include!("../src/core/model.rs");
    }
    pub mod object {
        include!("../src/core/object.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use crate::core::camera_path::CameraPath;
use crate::core::config::SceneConfig;
use crate::core::constants::*;
use crate::core::drive::{DriveSource, ScrollSignal};
use crate::core::mesh::PlaceholderKind;
use crate::core::model::{resolve_asset, AssetRequest, LoadError};
use crate::core::object::ObjectSource;
use crate::core::scene::*;
use glam::{Vec2, Vec3};

const DT: f32 = 1.0 / 60.0;

fn scene() -> SceneState {
    SceneState::new(SceneConfig::default(), 16.0 / 9.0)
}

fn request(fallback: PlaceholderKind) -> AssetRequest {
    AssetRequest {
        name: MODEL.to_string(),
        path: "models/missing.glb".to_string(),
        fallback,
    }
}

fn frame(t: f32, progress: f32) -> FrameInput {
    FrameInput {
        dt_sec: DT,
        time_sec: t,
        scroll_progress: progress,
        aspect: 16.0 / 9.0,
        ..Default::default()
    }
}

fn run(scene: &mut SceneState, frames: usize, progress: f32) {
    let start = scene.time_sec;
    for i in 1..=frames {
        scene.update(&frame(start + i as f32 * DT, progress));
    }
}

#[test]
fn new_scene_has_procedural_objects_and_ambience() {
    let s = scene();
    let config = SceneConfig::default();
    assert_eq!(s.phase, ScenePhase::Initializing);
    assert!(s.registry.get(HERO).is_some());
    assert!(s.registry.get(EXPERIENCE).is_some());
    assert!(s.registry.get(MODEL).is_none());
    assert_eq!(s.particles.len(), config.particle_count);
    assert_eq!(s.lights, LIGHTS);
    assert_eq!(s.meshes().len(), 2);
}

#[test]
fn update_is_ignored_until_started() {
    let mut s = scene();
    s.update(&FrameInput {
        dt_sec: DT,
        time_sec: 4.0,
        pointer_ndc: Vec2::ONE,
        scroll_progress: 1.0,
        ..Default::default()
    });
    assert_eq!(s.time_sec, 0.0);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.pointer, Vec2::ZERO);

    s.start();
    run(&mut s, 1, 1.0);
    assert!(s.progress > 0.0);
}

#[test]
fn failed_load_registers_a_placeholder() {
    let mut s = scene();
    let failed = Err(LoadError::Status {
        path: "models/missing.glb".to_string(),
        status: 404,
    });
    s.attach_model(resolve_asset(&request(PlaceholderKind::Lion), failed));

    let model = s.registry.get(MODEL).unwrap_or_else(|| panic!("model missing"));
    assert_eq!(model.source, ObjectSource::Placeholder(PlaceholderKind::Lion));
    assert_eq!(s.instances.len(), SceneConfig::default().instance_count);
    assert!(s
        .instances
        .iter()
        .all(|i| i.object.mesh == model.mesh && i.object.source == model.source));
}

#[test]
fn later_loads_still_resolve_after_a_failure() {
    let mut s = scene();
    s.attach_model(resolve_asset(
        &request(PlaceholderKind::Cube),
        Err(LoadError::Empty),
    ));
    let good = PlaceholderKind::Sphere.build();
    s.attach_model(resolve_asset(&request(PlaceholderKind::Cube), Ok(good)));

    let model = s.registry.get(MODEL).unwrap_or_else(|| panic!("model missing"));
    assert_eq!(model.source, ObjectSource::Loaded);
    assert_eq!(s.registry.len(), 3);
    assert_eq!(s.meshes().len(), 4);
}

#[test]
fn running_without_a_model_is_fine() {
    let mut s = scene();
    s.start();
    run(&mut s, 120, 0.5);
    assert!(s.registry.get(MODEL).is_none());
    assert_eq!(s.draw_items().len(), 2);
    assert!(s.instances.is_empty());
}

#[test]
fn progress_is_eased_and_clamped() {
    let mut s = scene();
    s.start();

    run(&mut s, 1, 1.0);
    let first = s.progress;
    assert!(first > 0.0 && first < 0.2, "{first}");

    let mut last = first;
    for i in 0..600 {
        s.update(&frame(1.0 + i as f32 * DT, 3.0));
        assert!(s.progress >= last && s.progress <= 1.0);
        last = s.progress;
    }
    assert!(last > 0.99);

    s.update(&frame(20.0, f32::NAN));
    assert!(s.progress.is_finite());
    assert!((s.progress - last).abs() < 1e-6);
}

#[test]
fn long_frames_are_clamped() {
    let mut s = scene();
    s.start();
    s.update(&FrameInput {
        dt_sec: 30.0,
        time_sec: 30.0,
        scroll_progress: 1.0,
        ..Default::default()
    });
    assert!(s.progress < 0.6, "{}", s.progress);
}

#[test]
fn model_moves_against_the_virtual_camera() {
    let mut s = scene();
    s.attach_model(resolve_asset(
        &request(PlaceholderKind::Icosahedron),
        Err(LoadError::Empty),
    ));
    s.start();
    let home = CameraPath::default().sample(0.0);
    let reference = s
        .registry
        .get(MODEL)
        .map(|m| m.params.reference_position)
        .unwrap_or_else(|| panic!("model missing"));

    // fully scrolled: the virtual camera has travelled down to the contact shot
    run(&mut s, 2000, 1.0);
    let travel = s.view.eye - home.eye;
    assert!(travel.y < -9.9, "{travel:?}");

    let model = s.registry.get(MODEL).unwrap_or_else(|| panic!("model missing"));
    let want = reference - travel;
    assert!(model.transform.position.distance(want) < 0.05, "{:?}", model.transform.position);
    assert!(model.transform.position.y - reference.y > 9.9);
    assert!((model.transform.rotation.length() - 1.0).abs() < 1e-4);
}

#[test]
fn real_camera_only_gets_a_pointer_nudge() {
    let mut s = scene();
    s.start();
    for i in 0..600 {
        s.update(&FrameInput {
            pointer_ndc: Vec2::new(1.0, -1.0),
            ..frame(i as f32 * DT, 1.0)
        });
    }
    let home = Vec3::from(CAMERA_HOME);
    let max = CAMERA_PARALLAX * CAMERA_NUDGE;
    let off = s.camera.eye - home;
    assert!(off.x > 0.0 && off.x <= max + 1e-4, "{off:?}");
    assert!(off.y < 0.0 && off.y >= -max - 1e-4, "{off:?}");
    assert_eq!(off.z, 0.0);
    assert!(s.camera.target.length() < 1e-6);
}

#[test]
fn wheel_at_the_bottom_spins_instances_harder() {
    let mut s = scene();
    s.attach_model(resolve_asset(
        &request(PlaceholderKind::Cube),
        Err(LoadError::Empty),
    ));
    s.start();
    s.update(&FrameInput {
        scroll: ScrollSignal {
            at_bottom: true,
            ..Default::default()
        },
        wheel_velocity: 0.4,
        ..frame(DT, 1.0)
    });
    assert_eq!(s.drive.source, DriveSource::Overscroll);
    assert!(s.drive.multiplier > 1.0);
}

#[test]
fn draw_items_cover_everything_grouped_by_mesh() {
    let mut s = scene();
    s.attach_model(resolve_asset(
        &request(PlaceholderKind::Torus),
        Err(LoadError::Empty),
    ));
    s.start();
    run(&mut s, 10, 0.2);

    let items = s.draw_items();
    assert_eq!(items.len(), 3 + s.instances.len());
    assert!(items.windows(2).all(|w| w[0].mesh.0 <= w[1].mesh.0));
    assert!(items.iter().all(|d| d.mesh.0 < s.meshes().len()));
}

#[test]
fn registry_replaces_by_name() {
    let mut s = scene();
    let hero = s.registry.get(HERO).cloned().unwrap_or_else(|| panic!("hero missing"));
    let mut moved = hero.clone();
    moved.transform.position = Vec3::new(1.0, 2.0, 3.0);
    s.registry.insert(moved);
    assert_eq!(s.registry.len(), 2);
    assert_eq!(
        s.registry.get(HERO).map(|o| o.transform.position),
        Some(Vec3::new(1.0, 2.0, 3.0))
    );
}
