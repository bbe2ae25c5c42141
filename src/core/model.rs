// GLB parsing into a single flattened mesh, plus placeholder resolution for
// assets that fail to load.

use super::mesh::{MeshData, PlaceholderKind};
use super::object::ObjectSource;
use glam::Mat4;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch failed for {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("unexpected HTTP status {status} for {path}")]
    Status { path: String, status: u16 },
    #[error("could not parse model: {0}")]
    Parse(String),
    #[error("model contains no triangle geometry")]
    Empty,
}

impl From<gltf::Error> for LoadError {
    fn from(e: gltf::Error) -> Self {
        LoadError::Parse(e.to_string())
    }
}

/// Parse a binary glTF container. Every triangle primitive of every node in
/// the default scene is baked with its world transform into one mesh; source
/// materials are ignored. The result is normalized to a unit bounding radius.
pub fn parse_glb(bytes: &[u8]) -> Result<MeshData, LoadError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let blob = gltf.blob.as_deref();
    let document = &gltf.document;

    let mut mesh = MeshData::default();
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next());
    match scene {
        Some(scene) => {
            for node in scene.nodes() {
                collect_node(&node, Mat4::IDENTITY, blob, &mut mesh);
            }
        }
        None => {
            for m in document.meshes() {
                collect_mesh(&m, Mat4::IDENTITY, blob, &mut mesh);
            }
        }
    }

    if mesh.is_empty() {
        return Err(LoadError::Empty);
    }
    mesh.normalize_to_unit();
    Ok(mesh)
}

fn collect_node(node: &gltf::Node, parent: Mat4, blob: Option<&[u8]>, out: &mut MeshData) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(m) = node.mesh() {
        collect_mesh(&m, world, blob, out);
    }
    for child in node.children() {
        collect_node(&child, world, blob, out);
    }
}

fn collect_mesh(m: &gltf::Mesh, world: Mat4, blob: Option<&[u8]>, out: &mut MeshData) {
    for prim in m.primitives() {
        if prim.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = prim.reader(|buffer| match buffer.source() {
            gltf::buffer::Source::Bin => blob,
            gltf::buffer::Source::Uri(_) => None,
        });
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<[f32; 3]> = positions.collect();
        let indices: Vec<u32> = match reader.read_indices() {
            Some(ix) => ix.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        if indices.iter().any(|&i| i as usize >= positions.len()) {
            log::warn!("[loader] skipping primitive with out-of-range indices");
            continue;
        }
        let mut part = MeshData {
            normals: Vec::new(),
            positions,
            indices,
        };
        match reader.read_normals() {
            Some(n) => part.normals = n.collect(),
            None => part.compute_smooth_normals(),
        }
        if part.normals.len() != part.positions.len() {
            part.compute_smooth_normals();
        }
        out.merge(&part, world);
    }
}

/// An asset the scene wants, and what to show if it cannot be loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetRequest {
    pub name: String,
    pub path: String,
    pub fallback: PlaceholderKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedAsset {
    pub name: String,
    pub mesh: MeshData,
    pub source: ObjectSource,
}

/// Turn a load outcome into usable geometry; failures become placeholders.
pub fn resolve_asset(request: &AssetRequest, loaded: Result<MeshData, LoadError>) -> ResolvedAsset {
    match loaded {
        Ok(mesh) => {
            log::info!(
                "[loader] {} loaded from {} ({} tris)",
                request.name,
                request.path,
                mesh.triangle_count()
            );
            ResolvedAsset {
                name: request.name.clone(),
                mesh,
                source: ObjectSource::Loaded,
            }
        }
        Err(e) => {
            log::warn!(
                "[loader] {} failed ({}); using {} placeholder",
                request.name,
                e,
                request.fallback.name()
            );
            ResolvedAsset {
                name: request.name.clone(),
                mesh: request.fallback.build(),
                source: ObjectSource::Placeholder(request.fallback),
            }
        }
    }
}
