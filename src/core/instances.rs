// Floating clones of the main model spread over a sphere shell.

use super::constants::*;
use super::drive::Drive;
use super::easing::{frame_decay, tau_alpha};
use super::object::{Material, MeshId, ObjectSource, SceneObject, Transform};
use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Azimuth of the `i`-th point on a Fibonacci sphere, in \[0, 2pi).
#[inline]
pub fn fibonacci_azimuth(i: usize) -> f32 {
    (i as f32 * GOLDEN_ANGLE).rem_euclid(TAU)
}

/// Unit direction of the `i`-th of `n` points on a Fibonacci sphere.
pub fn fibonacci_direction(i: usize, n: usize) -> Vec3 {
    let n = n.max(1) as f32;
    let y = 1.0 - 2.0 * (i as f32 + 0.5) / n;
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = fibonacci_azimuth(i);
    Vec3::new(theta.cos() * ring, y, theta.sin() * ring)
}

#[inline]
pub fn float_offset(time_sec: f32, phase: f32) -> f32 {
    (time_sec * INSTANCE_FLOAT_FREQ + phase).sin() * INSTANCE_FLOAT_AMPLITUDE
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flip {
    pub axis: Vec3,
    /// rad/s
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingInstance {
    pub object: SceneObject,
    pub current_speed: Vec3,
    pub flip: Option<Flip>,
}

/// Build `count` instances of `mesh` on a shell of `radius`.
pub fn spawn_instances<R: Rng + ?Sized>(
    mesh: MeshId,
    source: ObjectSource,
    count: usize,
    radius: f32,
    rng: &mut R,
) -> Vec<FloatingInstance> {
    (0..count)
        .map(|i| {
            let r = radius + rng.gen::<f32>() * INSTANCE_RADIUS_JITTER;
            let position = fibonacci_direction(i, count) * r;
            let scale = INSTANCE_SCALE_MIN + rng.gen::<f32>() * INSTANCE_SCALE_SPAN;
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.gen::<f32>() * TAU,
                rng.gen::<f32>() * TAU,
                rng.gen::<f32>() * TAU,
            );
            let transform = Transform {
                position,
                rotation,
                scale: Vec3::splat(scale),
            };
            let mut object = SceneObject::new(
                format!("instance-{i}"),
                mesh,
                source,
                Material::REFLECTIVE_WHITE,
                transform,
            );
            object.params.base_rotation_speed = Vec3::new(
                (rng.gen::<f32>() - 0.5) * INSTANCE_BASE_SPEED,
                (rng.gen::<f32>() - 0.5) * INSTANCE_BASE_SPEED,
                (rng.gen::<f32>() - 0.5) * INSTANCE_BASE_SPEED,
            );
            object.params.float_phase = rng.gen::<f32>() * TAU;
            FloatingInstance {
                current_speed: object.params.base_rotation_speed,
                object,
                flip: None,
            }
        })
        .collect()
}

impl FloatingInstance {
    pub fn target_speed(&self, drive: &Drive) -> Vec3 {
        self.object.params.base_rotation_speed * drive.factor()
    }

    pub fn update(&mut self, dt_sec: f32, time_sec: f32, drive: &Drive) {
        let target = self.target_speed(drive);
        self.current_speed += (target - self.current_speed) * tau_alpha(INSTANCE_SPEED_TAU_SEC, dt_sec);

        let spin = self.current_speed * dt_sec;
        let mut rotation =
            self.object.transform.rotation * Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, spin.z);

        if let Some(mut flip) = self.flip.take() {
            rotation = Quat::from_axis_angle(flip.axis, flip.speed * dt_sec) * rotation;
            flip.speed *= frame_decay(FLIP_DECAY_PER_FRAME, dt_sec);
            if flip.speed >= FLIP_STOP_SPEED {
                self.flip = Some(flip);
            }
        }
        self.object.transform.rotation = rotation.normalize();

        // always rebuilt from the reference so nothing accumulates
        let params = &self.object.params;
        self.object.transform.position =
            params.reference_position + Vec3::Y * float_offset(time_sec, params.float_phase);
    }

    /// Start a flip when the cursor comes close to the instance on screen.
    /// Both positions are NDC. Returns `true` if a flip started.
    pub fn try_flip(&mut self, screen_ndc: Vec2, cursor_ndc: Vec2) -> bool {
        if self.flip.is_some() {
            return false;
        }
        let toward = cursor_ndc - screen_ndc;
        if toward.length() >= FLIP_TRIGGER_DISTANCE {
            return false;
        }
        let dir = toward.normalize_or_zero();
        let axis = Vec3::new(-dir.y, dir.x, 0.0);
        let axis = if axis.length_squared() > 0.0 {
            axis.normalize()
        } else {
            Vec3::Y
        };
        self.flip = Some(Flip {
            axis,
            speed: FLIP_START_SPEED,
        });
        true
    }
}
