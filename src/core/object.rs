use super::mesh::PlaceholderKind;
use glam::{Mat4, Quat, Vec3};

/// Index of a mesh in the renderer's mesh table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Fixed animation parameters attached to an object at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationParams {
    /// rad/s around each local axis
    pub base_rotation_speed: Vec3,
    pub float_phase: f32,
    pub reference_position: Vec3,
    pub reference_rotation: Quat,
}

impl AnimationParams {
    pub fn anchored(transform: &Transform) -> Self {
        Self {
            base_rotation_speed: Vec3::ZERO,
            float_phase: 0.0,
            reference_position: transform.position,
            reference_rotation: transform.rotation,
        }
    }
}

/// Where an object's geometry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectSource {
    Loaded,
    Placeholder(PlaceholderKind),
    Procedural,
}

/// Surface look of an object; the loaded model always gets `REFLECTIVE_WHITE`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    pub const REFLECTIVE_WHITE: Material = Material {
        color: [1.0, 1.0, 1.0],
        emissive: [0.0, 0.0, 0.0],
        metalness: 0.3,
        roughness: 0.2,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshId,
    pub source: ObjectSource,
    pub material: Material,
    pub transform: Transform,
    pub params: AnimationParams,
}

impl SceneObject {
    pub fn new(
        name: impl Into<String>,
        mesh: MeshId,
        source: ObjectSource,
        material: Material,
        transform: Transform,
    ) -> Self {
        Self {
            name: name.into(),
            mesh,
            source,
            material,
            params: AnimationParams::anchored(&transform),
            transform,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}
