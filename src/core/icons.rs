// Feature-card icons: one small spinning shape per icon container, each
// drawn into its own canvas with a fixed close-up camera and two lights.

use super::camera::Camera;
use super::easing::{approach, frame_alpha};
use super::mesh::{cube, octahedron, torus, uv_sphere, MeshData, PlaceholderKind};
use super::object::{Material, PointLight};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// CSS size of an icon canvas.
pub const ICON_CANVAS_PX: u32 = 80;
pub const ICON_MAX_PIXEL_RATIO: f64 = 2.0;
pub const ICON_FOV_DEG: f32 = 50.0;
pub const ICON_EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const ICON_SPIN_X: f32 = 0.5;
pub const ICON_SPIN_Y: f32 = 0.3;
pub const ICON_HOVER_SCALE: f32 = 1.2;
pub const ICON_SCALE_EASE: f32 = 0.1; // per 60 Hz frame

pub const ICON_MATERIAL: Material = Material {
    color: [0.0, 0.831, 1.0],
    // violet glow at half strength
    emissive: [0.273, 0.180, 0.482],
    metalness: 0.8,
    roughness: 0.2,
};

pub const ICON_LIGHTS: [PointLight; 2] = [
    PointLight {
        position: Vec3::new(2.0, 2.0, 2.0),
        color: [1.0, 0.0, 0.431],
        intensity: 2.0,
    },
    PointLight {
        position: Vec3::new(-2.0, -2.0, 2.0),
        color: [0.0, 0.831, 1.0],
        intensity: 2.0,
    },
];

/// Shape named by a container's `data-icon`. Missing or unknown names get
/// the cube.
pub fn icon_kind(name: Option<&str>) -> PlaceholderKind {
    match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
        Some("sphere") => PlaceholderKind::Sphere,
        Some("torus") => PlaceholderKind::Torus,
        Some("octahedron") => PlaceholderKind::Octahedron,
        _ => PlaceholderKind::Cube,
    }
}

/// Icon-sized geometry; slightly larger than the placeholder builds so the
/// shape fills the 80px frame.
pub fn icon_mesh(kind: PlaceholderKind) -> MeshData {
    match kind {
        PlaceholderKind::Sphere => uv_sphere(0.6, 32, 32),
        PlaceholderKind::Torus => torus(0.5, 0.2, 16, 100),
        PlaceholderKind::Octahedron => octahedron(0.7),
        _ => cube(1.0),
    }
}

pub fn icon_camera() -> Camera {
    Camera {
        eye: ICON_EYE,
        target: Vec3::ZERO,
        up: Vec3::Y,
        aspect: 1.0,
        fovy_radians: ICON_FOV_DEG.to_radians(),
        znear: 0.1,
        zfar: 100.0,
    }
}

/// Backing-store size of an icon canvas for a device pixel ratio.
pub fn icon_backing_px(device_pixel_ratio: f64) -> u32 {
    let dpr = if device_pixel_ratio.is_finite() {
        device_pixel_ratio.clamp(1.0, ICON_MAX_PIXEL_RATIO)
    } else {
        1.0
    };
    (ICON_CANVAS_PX as f64 * dpr).round() as u32
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureIcon {
    pub index: usize,
    pub kind: PlaceholderKind,
    pub rotation: Quat,
    pub scale: f32,
    pub hovered: bool,
}

impl FeatureIcon {
    pub fn new(index: usize, kind: PlaceholderKind) -> Self {
        Self {
            index,
            kind,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            hovered: false,
        }
    }

    /// Spin on X and Y, phase-shifted by the icon's index, and ease the scale
    /// toward the hover size while the pointer is over the container.
    pub fn update(&mut self, time_sec: f32, dt_sec: f32, hovered: bool) {
        let phase = self.index as f32;
        self.rotation = Quat::from_euler(
            EulerRot::XYZ,
            time_sec * ICON_SPIN_X + phase,
            time_sec * ICON_SPIN_Y + phase,
            0.0,
        );
        let target = if hovered { ICON_HOVER_SCALE } else { 1.0 };
        self.scale = approach(self.scale, target, frame_alpha(ICON_SCALE_EASE, dt_sec));
        self.hovered = hovered;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, Vec3::ZERO)
    }
}
