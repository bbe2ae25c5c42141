// Scene manager state and the per-frame update.
//
// `SceneState` owns every object in the scene (registry, floating instances,
// particles, lines, lights and camera) and the CPU copies of their meshes.
// The renderer reads it after `update` and never mutates it.

use super::ambient::{particle_field, AmbientLines, Particle};
use super::camera::Camera;
use super::camera_path::{CameraPath, CameraSample};
use super::config::SceneConfig;
use super::constants::*;
use super::drive::{resolve_drive, Drive, ScrollSignal};
use super::easing::{approach, approach_vec2, approach_vec3, frame_alpha};
use super::instances::{spawn_instances, FloatingInstance};
use super::mesh::{icosphere, MeshData, PlaceholderKind};
use super::model::ResolvedAsset;
use super::object::{Material, MeshId, ObjectSource, PointLight, SceneObject, Transform};
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

pub const MODEL: &str = "model";
pub const HERO: &str = "hero";
pub const EXPERIENCE: &str = "experience";

// Frames longer than this (e.g. after a background tab) are clamped.
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenePhase {
    Initializing,
    Running,
}

pub const LIGHTS: [PointLight; 2] = [
    PointLight {
        position: Vec3::new(5.0, 5.0, 5.0),
        color: [0.0, 0.83, 1.0],
        intensity: 3.0,
    },
    PointLight {
        position: Vec3::new(-5.0, -5.0, 5.0),
        color: [1.0, 0.0, 0.43],
        intensity: 3.0,
    },
];

/// Latest inputs sampled by the frame loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub dt_sec: f32,
    pub time_sec: f32,
    /// raw pointer, NDC with +Y up
    pub pointer_ndc: Vec2,
    /// latest reported scroll progress
    pub scroll_progress: f32,
    pub scroll: ScrollSignal,
    pub wheel_velocity: f32,
    pub aspect: f32,
}

/// Named scene objects; one per name.
#[derive(Clone, Debug, Default)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
    by_name: FnvHashMap<String, usize>,
}

impl SceneRegistry {
    /// Insert, replacing any object with the same name.
    pub fn insert(&mut self, object: SceneObject) {
        match self.by_name.get(&object.name) {
            Some(&i) => self.objects[i] = object,
            None => {
                self.by_name.insert(object.name.clone(), self.objects.len());
                self.objects.push(object);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.by_name.get(name).map(|&i| &self.objects[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.by_name.get(name).map(|&i| &mut self.objects[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// One mesh draw with its world matrix and material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshId,
    pub model: Mat4,
    pub material: Material,
}

pub struct SceneState {
    pub phase: ScenePhase,
    pub camera: Camera,
    pub path: CameraPath,
    /// eased virtual camera on the path
    pub view: CameraSample,
    pub registry: SceneRegistry,
    pub instances: Vec<FloatingInstance>,
    pub particles: Vec<Particle>,
    pub particle_rotation: f32,
    pub lines: AmbientLines,
    pub lights: [PointLight; 2],
    pub pointer: Vec2,
    pub progress: f32,
    pub drive: Drive,
    pub time_sec: f32,
    meshes: Vec<MeshData>,
    config: SceneConfig,
    rng: StdRng,
}

impl SceneState {
    /// Synchronous part of initialization: lights, particles, lines and the
    /// procedural hero/experience shapes.
    pub fn new(config: SceneConfig, aspect: f32) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let particles = particle_field(config.particle_count, &mut rng);
        let lines = AmbientLines::new(config.line_count, &mut rng);
        let path = CameraPath::default();
        let view = path.sample(0.0);
        let mut scene = Self {
            phase: ScenePhase::Initializing,
            camera: Camera {
                aspect,
                ..Default::default()
            },
            path,
            view,
            registry: SceneRegistry::default(),
            instances: Vec::new(),
            particles,
            particle_rotation: 0.0,
            lines,
            lights: LIGHTS,
            pointer: Vec2::ZERO,
            progress: 0.0,
            drive: Drive::default(),
            time_sec: 0.0,
            meshes: Vec::new(),
            config,
            rng,
        };

        let hero_mesh = scene.add_mesh(icosphere(HERO_RADIUS, HERO_DETAIL));
        scene.registry.insert(SceneObject::new(
            HERO,
            hero_mesh,
            ObjectSource::Procedural,
            Material {
                color: [0.545, 0.361, 0.965],
                emissive: [0.0, 0.25, 0.3],
                metalness: 0.9,
                roughness: 0.1,
            },
            Transform::default(),
        ));
        let knot_mesh = scene.add_mesh(PlaceholderKind::TorusKnot.build());
        scene.registry.insert(SceneObject::new(
            EXPERIENCE,
            knot_mesh,
            ObjectSource::Procedural,
            Material {
                color: [0.851, 0.275, 1.0],
                emissive: [0.0, 0.33, 0.4],
                metalness: 0.8,
                roughness: 0.2,
            },
            Transform::at(Vec3::from(EXPERIENCE_POSITION)),
        ));
        scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    /// Register the main model (loaded or placeholder) and its floating
    /// instances.
    pub fn attach_model(&mut self, asset: ResolvedAsset) {
        let mesh = self.add_mesh(asset.mesh);
        let transform = Transform {
            scale: Vec3::splat(self.config.model_scale),
            ..Default::default()
        };
        self.registry.insert(SceneObject::new(
            MODEL,
            mesh,
            asset.source,
            Material::REFLECTIVE_WHITE,
            transform,
        ));
        self.instances = spawn_instances(
            mesh,
            asset.source,
            self.config.instance_count,
            self.config.instance_radius,
            &mut self.rng,
        );
        log::info!(
            "[scene] {} attached ({:?}) with {} floating instances",
            asset.name,
            asset.source,
            self.instances.len()
        );
    }

    /// Initialization finished; frames start updating.
    pub fn start(&mut self) {
        if self.phase == ScenePhase::Initializing {
            self.phase = ScenePhase::Running;
            log::info!("[scene] running with {} objects", self.registry.len());
        }
    }

    pub fn update(&mut self, input: &FrameInput) {
        if self.phase != ScenePhase::Running {
            return;
        }
        let dt = input.dt_sec.clamp(0.0, MAX_FRAME_DT);
        self.time_sec = input.time_sec;
        let t = input.time_sec;
        if input.aspect.is_finite() && input.aspect > 0.0 {
            self.camera.aspect = input.aspect;
        }

        // decouple event-rate inputs from the frame rate
        self.pointer = approach_vec2(self.pointer, input.pointer_ndc, frame_alpha(POINTER_EASE, dt));
        let reported = if input.scroll_progress.is_finite() {
            input.scroll_progress.clamp(0.0, 1.0)
        } else {
            self.progress
        };
        self.progress = approach(self.progress, reported, frame_alpha(PROGRESS_EASE, dt));

        // virtual camera on the path; the real camera only gets a nudge
        let target = self.path.camera_target(self.progress, self.pointer);
        let cam_alpha = frame_alpha(CAMERA_EASE, dt);
        self.view = CameraSample {
            eye: approach_vec3(self.view.eye, target.eye, cam_alpha),
            look_at: approach_vec3(self.view.look_at, target.look_at, cam_alpha),
        };
        let nudge = Vec3::new(self.pointer.x, self.pointer.y, 0.0) * CAMERA_PARALLAX * CAMERA_NUDGE;
        self.camera.eye = approach_vec3(self.camera.eye, Vec3::from(CAMERA_HOME) + nudge, cam_alpha);
        self.camera.target = approach_vec3(self.camera.target, Vec3::ZERO, cam_alpha);

        // the model moves against the virtual camera
        self.update_model(dt);

        // floating instances
        self.drive = resolve_drive(input.scroll, input.wheel_velocity, self.drive.sign);
        let cursor = input.pointer_ndc;
        for inst in self.instances.iter_mut() {
            if let Some(ndc) = self.camera.project(inst.object.transform.position) {
                inst.try_flip(ndc, cursor);
            }
            inst.update(dt, t, &self.drive);
        }

        // ambient decoration and the procedural shapes
        self.particle_rotation = t * PARTICLE_SPIN;
        self.lines.advance(dt);
        let pointer = self.pointer;
        if let Some(hero) = self.registry.get_mut(HERO) {
            hero.transform.rotation = Quat::from_euler(
                EulerRot::XYZ,
                t * 0.2 + pointer.y * HERO_POINTER_TILT,
                t * 0.3 + pointer.x * HERO_POINTER_TILT,
                0.0,
            );
            hero.transform.position.y = (t * 0.5).sin() * HERO_FLOAT_AMPLITUDE;
        }
        let progress = self.progress;
        if let Some(knot) = self.registry.get_mut(EXPERIENCE) {
            knot.transform.rotation = Quat::from_euler(EulerRot::XYZ, t * 0.3, t * 0.2, 0.0);
            knot.transform.position.y =
                knot.params.reference_position.y + (progress * PI).sin() * EXPERIENCE_BOB;
        }
    }

    /// Model displacement for the current virtual camera: the camera's travel
    /// from its home pose, reversed. Descending the path lifts the model.
    pub fn model_offset(&self) -> Vec3 {
        -(self.view.eye - self.path.sample(0.0).eye)
    }

    fn update_model(&mut self, dt: f32) {
        let offset = self.model_offset();
        let dir = self.view.direction();
        let pointer = self.pointer;
        let Some(model) = self.registry.get_mut(MODEL) else {
            return;
        };
        let yaw = dir.x.atan2(-dir.z);
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        let target_rot = Quat::from_euler(
            EulerRot::YXZ,
            -yaw + pointer.x * MODEL_POINTER_TILT,
            pitch - pointer.y * MODEL_POINTER_TILT,
            0.0,
        );
        let a = frame_alpha(MODEL_EASE, dt);
        let home = model.params.reference_position;
        model.transform.position = approach_vec3(model.transform.position, home + offset, a);
        model.transform.rotation = model.transform.rotation.slerp(target_rot, a).normalize();
    }

    /// All mesh draws for this frame, grouped by mesh.
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let mut items: Vec<DrawItem> = self
            .registry
            .iter()
            .map(|o| DrawItem {
                mesh: o.mesh,
                model: o.transform.matrix(),
                material: o.material,
            })
            .chain(self.instances.iter().map(|i| DrawItem {
                mesh: i.object.mesh,
                model: i.object.transform.matrix(),
                material: i.object.material,
            }))
            .collect();
        items.sort_by_key(|d| d.mesh.0);
        items
    }
}
