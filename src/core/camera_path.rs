use super::constants::CAMERA_PARALLAX;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewpoint {
    pub name: &'static str,
    pub eye: Vec3,
    pub look_at: Vec3,
}

/// One anchor per page section, top to bottom.
pub const DEFAULT_VIEWPOINTS: [Viewpoint; 5] = [
    Viewpoint {
        name: "hero",
        eye: Vec3::new(0.0, 0.0, 5.0),
        look_at: Vec3::new(0.0, 0.0, 0.0),
    },
    Viewpoint {
        name: "features",
        eye: Vec3::new(-2.5, -1.5, 6.0),
        look_at: Vec3::new(0.0, -0.5, 0.0),
    },
    Viewpoint {
        name: "experience",
        eye: Vec3::new(2.0, -3.0, 4.5),
        look_at: Vec3::new(1.0, -2.0, -1.0),
    },
    Viewpoint {
        name: "gallery",
        eye: Vec3::new(0.0, -6.0, 7.0),
        look_at: Vec3::new(0.0, -5.0, 0.0),
    },
    Viewpoint {
        name: "contact",
        eye: Vec3::new(0.0, -10.0, 5.0),
        look_at: Vec3::new(0.0, -10.0, 0.0),
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSample {
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl CameraSample {
    pub fn direction(&self) -> Vec3 {
        (self.look_at - self.eye).normalize_or_zero()
    }
}

/// Piecewise-linear path through an ordered list of viewpoints, driven by
/// scroll progress.
#[derive(Clone, Debug)]
pub struct CameraPath {
    anchors: Vec<Viewpoint>,
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPOINTS.to_vec())
    }
}

impl CameraPath {
    /// An empty anchor list falls back to the default path.
    pub fn new(anchors: Vec<Viewpoint>) -> Self {
        if anchors.is_empty() {
            return Self::default();
        }
        Self { anchors }
    }

    pub fn anchors(&self) -> &[Viewpoint] {
        &self.anchors
    }

    pub fn anchor(&self, name: &str) -> Option<&Viewpoint> {
        self.anchors.iter().find(|v| v.name == name)
    }

    /// Section index and blend factor for `progress`.
    pub fn segment(&self, progress: f32) -> (usize, f32) {
        let sections = self.anchors.len().saturating_sub(1);
        if sections == 0 {
            return (0, 0.0);
        }
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let f = p * sections as f32;
        let i = (f.floor() as usize).min(sections - 1);
        (i, f - i as f32)
    }

    pub fn sample(&self, progress: f32) -> CameraSample {
        let (i, t) = self.segment(progress);
        let a = &self.anchors[i];
        let b = self.anchors.get(i + 1).unwrap_or(a);
        CameraSample {
            eye: a.eye.lerp(b.eye, t),
            look_at: a.look_at.lerp(b.look_at, t),
        }
    }

    /// Virtual camera target: path sample plus pointer parallax.
    pub fn camera_target(&self, progress: f32, pointer_ndc: Vec2) -> CameraSample {
        let s = self.sample(progress);
        let parallax = Vec3::new(pointer_ndc.x, pointer_ndc.y, 0.0) * CAMERA_PARALLAX;
        CameraSample {
            eye: s.eye + parallax,
            look_at: s.look_at,
        }
    }
}
