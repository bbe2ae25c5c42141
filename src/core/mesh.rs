// CPU-side triangle meshes and the procedural shapes used for placeholders,
// the hero sphere and the experience knot.

use fnv::FnvHashMap;
use glam::{Mat3, Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Non-indexed flat-shaded mesh from a shared vertex list and triangles.
    pub fn from_faces(vertices: &[Vec3], faces: &[[u32; 3]]) -> Self {
        let mut mesh = MeshData::default();
        for f in faces {
            let [a, b, c] = f.map(|i| vertices[i as usize]);
            let n = (b - a).cross(c - a).normalize_or_zero();
            for p in [a, b, c] {
                mesh.indices.push(mesh.positions.len() as u32);
                mesh.positions.push(p.to_array());
                mesh.normals.push(n.to_array());
            }
        }
        mesh
    }

    /// Append `other` transformed by `m`.
    pub fn merge(&mut self, other: &MeshData, m: Mat4) {
        let base = self.positions.len() as u32;
        let normal_m = Mat3::from_mat4(m).inverse().transpose();
        self.positions.extend(
            other
                .positions
                .iter()
                .map(|p| m.transform_point3(Vec3::from(*p)).to_array()),
        );
        self.normals.extend(
            other
                .normals
                .iter()
                .map(|n| (normal_m * Vec3::from(*n)).normalize_or_zero().to_array()),
        );
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Area-weighted vertex normals from the index buffer.
    pub fn compute_smooth_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
            if a >= acc.len() || b >= acc.len() || c >= acc.len() {
                continue;
            }
            let pa = Vec3::from(self.positions[a]);
            let n = (Vec3::from(self.positions[b]) - pa).cross(Vec3::from(self.positions[c]) - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.positions.iter().map(|p| Vec3::from(*p));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Recenter on the bounding-box center and scale to a bounding radius of 1.
    pub fn normalize_to_unit(&mut self) {
        let Some((lo, hi)) = self.bounds() else {
            return;
        };
        let center = (lo + hi) * 0.5;
        let radius = self
            .positions
            .iter()
            .map(|p| Vec3::from(*p).distance(center))
            .fold(0.0f32, f32::max);
        if !(radius > 0.0) {
            return;
        }
        let inv = 1.0 / radius;
        for p in self.positions.iter_mut() {
            *p = ((Vec3::from(*p) - center) * inv).to_array();
        }
    }
}

// ---------------- primitives ----------------

pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let faces = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let base = mesh.positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push(((n + u * su + v * sv) * h).to_array());
            mesh.normals.push(n.to_array());
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=rings {
        let v = iy as f32 / rings as f32;
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            let n = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.positions.push((n * radius).to_array());
            mesh.normals.push(n.to_array());
        }
    }
    let stride = segments + 1;
    for iy in 0..rings {
        for ix in 0..segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != rings - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.positions.push(p.to_array());
            mesh.normals.push((p - center).normalize_or_zero().to_array());
        }
    }
    grid_indices(&mut mesh, radial, tubular);
    mesh
}

pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let (p, q) = (p.max(1) as f32, q.max(1) as f32);
    let knot = |u: f32| {
        let q_over_p = q / p * u;
        let cs = q_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * q_over_p.sin() * 0.5,
        )
    };
    let mut mesh = MeshData::default();
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;
        let p1 = knot(u);
        let p2 = knot(u + 0.01);
        let t = p2 - p1;
        let mut n = p2 + p1;
        let b = t.cross(n).normalize_or_zero();
        n = b.cross(t).normalize_or_zero();
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            mesh.positions.push(pos.to_array());
            mesh.normals.push((pos - p1).normalize_or_zero().to_array());
        }
    }
    grid_indices(&mut mesh, tubular, radial);
    mesh
}

/// Quad-grid triangulation for `(rows + 1) x (cols + 1)` vertices laid out
/// row-major.
fn grid_indices(mesh: &mut MeshData, rows: u32, cols: u32) {
    let stride = cols + 1;
    for j in 1..=rows {
        for i in 1..=cols {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

const OCTAHEDRON_VERTS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];
const OCTAHEDRON_FACES: [[u32; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

pub fn octahedron(radius: f32) -> MeshData {
    let verts: Vec<Vec3> = OCTAHEDRON_VERTS
        .iter()
        .map(|v| Vec3::from(*v) * radius)
        .collect();
    MeshData::from_faces(&verts, &OCTAHEDRON_FACES)
}

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> Vec<Vec3> {
    let t = (1.0 + 5.0f32.sqrt()) * 0.5;
    [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|v| Vec3::from(*v).normalize())
    .collect()
}

/// Flat-shaded icosahedron.
pub fn icosahedron(radius: f32) -> MeshData {
    let verts: Vec<Vec3> = icosahedron_vertices().into_iter().map(|v| v * radius).collect();
    MeshData::from_faces(&verts, &ICOSAHEDRON_FACES)
}

/// Smooth icosphere with `detail` levels of 4-way subdivision.
pub fn icosphere(radius: f32, detail: u32) -> MeshData {
    let mut verts = icosahedron_vertices();
    let mut faces: Vec<[u32; 3]> = ICOSAHEDRON_FACES.to_vec();
    for _ in 0..detail {
        let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
        let mut midpoint = |a: u32, b: u32, verts: &mut Vec<Vec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let m = ((verts[a as usize] + verts[b as usize]) * 0.5).normalize();
                verts.push(m);
                (verts.len() - 1) as u32
            })
        };
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut verts);
            let bc = midpoint(b, c, &mut verts);
            let ca = midpoint(c, a, &mut verts);
            next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = next;
    }
    MeshData {
        positions: verts.iter().map(|v| (*v * radius).to_array()).collect(),
        normals: verts.iter().map(|v| v.to_array()).collect(),
        indices: faces.into_iter().flatten().collect(),
    }
}

/// Stylized lion: ellipsoid body, spherical head and a torus mane.
pub fn lion() -> MeshData {
    let mut mesh = MeshData::default();
    mesh.merge(
        &uv_sphere(1.0, 32, 16),
        Mat4::from_scale(Vec3::new(1.2, 0.8, 0.8)),
    );
    let head = Vec3::new(0.0, 0.5, 0.8);
    mesh.merge(&uv_sphere(0.6, 32, 16), Mat4::from_translation(head));
    mesh.merge(
        &torus(0.7, 0.2, 16, 32),
        Mat4::from_rotation_translation(Quat::from_rotation_x(FRAC_PI_2), head),
    );
    mesh
}

// ---------------- placeholder kinds ----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    Lion,
    Cube,
    Sphere,
    Torus,
    Octahedron,
    #[default]
    Icosahedron,
    TorusKnot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPlaceholder(pub String);

impl fmt::Display for UnknownPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown placeholder kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownPlaceholder {}

impl FromStr for PlaceholderKind {
    type Err = UnknownPlaceholder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lion" => Ok(PlaceholderKind::Lion),
            "cube" | "box" => Ok(PlaceholderKind::Cube),
            "sphere" => Ok(PlaceholderKind::Sphere),
            "torus" => Ok(PlaceholderKind::Torus),
            "octahedron" => Ok(PlaceholderKind::Octahedron),
            "icosahedron" => Ok(PlaceholderKind::Icosahedron),
            "torus-knot" | "torusknot" | "knot" => Ok(PlaceholderKind::TorusKnot),
            other => Err(UnknownPlaceholder(other.to_string())),
        }
    }
}

impl PlaceholderKind {
    /// Unknown names fall back to the icosahedron.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            PlaceholderKind::Lion => "lion",
            PlaceholderKind::Cube => "cube",
            PlaceholderKind::Sphere => "sphere",
            PlaceholderKind::Torus => "torus",
            PlaceholderKind::Octahedron => "octahedron",
            PlaceholderKind::Icosahedron => "icosahedron",
            PlaceholderKind::TorusKnot => "torus-knot",
        }
    }

    pub fn build(self) -> MeshData {
        match self {
            PlaceholderKind::Lion => lion(),
            PlaceholderKind::Cube => cube(1.0),
            PlaceholderKind::Sphere => uv_sphere(0.5, 32, 32),
            PlaceholderKind::Torus => torus(0.4, 0.15, 16, 100),
            PlaceholderKind::Octahedron => octahedron(0.5),
            PlaceholderKind::Icosahedron => icosahedron(0.5),
            PlaceholderKind::TorusKnot => torus_knot(1.0, 0.3, 100, 16, 2, 3),
        }
    }
}
