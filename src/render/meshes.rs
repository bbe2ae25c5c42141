use super::helpers::{self, DynamicBuffer};
use crate::core::mesh::MeshData;
use crate::core::object::Material;
use crate::core::scene::DrawItem;
use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshVertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color_metal: [f32; 4],
    pub(crate) emissive_rough: [f32; 4],
}

impl InstanceRaw {
    pub(crate) fn new(model: Mat4, m: &Material) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color_metal: [m.color[0], m.color[1], m.color[2], m.metalness],
            emissive_rough: [m.emissive[0], m.emissive[1], m.emissive[2], m.roughness],
        }
    }
}

impl From<&DrawItem> for InstanceRaw {
    fn from(d: &DrawItem) -> Self {
        Self::new(d.model, &d.material)
    }
}

pub(crate) struct GpuMesh {
    pub(crate) vertices: wgpu::Buffer,
    pub(crate) indices: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl GpuMesh {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, instances: std::ops::Range<u32>) {
        rpass.set_vertex_buffer(0, self.vertices.slice(..));
        rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, instances);
    }
}

pub(crate) struct MeshResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    meshes: Vec<Option<GpuMesh>>,
    instances: DynamicBuffer,
    // (mesh index, first instance, instance count)
    batches: Vec<(usize, u32, u32)>,
}

pub(crate) fn create_mesh_resources(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> MeshResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mesh_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::MESH_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("mesh_pl"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });
    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4
        ],
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("mesh_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_mesh"),
            buffers: &[vertex_layout, instance_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // double-sided; the fragment stage flips back-face normals
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: helpers::depth_state(true, wgpu::CompareFunction::Less),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_mesh"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    MeshResources {
        pipeline,
        meshes: Vec::new(),
        instances: DynamicBuffer::new(
            device,
            "mesh_instances",
            wgpu::BufferUsages::VERTEX,
            (std::mem::size_of::<InstanceRaw>() * 32) as u64,
        ),
        batches: Vec::new(),
    }
}

impl MeshResources {
    /// Upload meshes added to the scene since the last call. The scene's
    /// mesh table only grows.
    pub(crate) fn sync(&mut self, device: &wgpu::Device, meshes: &[MeshData]) {
        for mesh in meshes.iter().skip(self.meshes.len()) {
            self.meshes.push(upload_mesh(device, mesh));
        }
    }

    pub(crate) fn uploaded(&self) -> usize {
        self.meshes.len()
    }

    /// Write this frame's instance data. `items` arrive grouped by mesh.
    pub(crate) fn update(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[DrawItem]) {
        self.batches.clear();
        let raw: Vec<InstanceRaw> = items.iter().map(InstanceRaw::from).collect();
        for (i, item) in items.iter().enumerate() {
            match self.batches.last_mut() {
                Some((mesh, _, count)) if *mesh == item.mesh.0 => *count += 1,
                _ => self.batches.push((item.mesh.0, i as u32, 1)),
            }
        }
        self.instances.write(device, queue, bytemuck::cast_slice(&raw));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, globals: &wgpu::BindGroup) {
        if self.batches.is_empty() {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, globals, &[]);
        rpass.set_vertex_buffer(1, self.instances.buffer.slice(..));
        for &(mesh, first, count) in &self.batches {
            let Some(Some(gpu)) = self.meshes.get(mesh) else {
                continue;
            };
            gpu.draw(rpass, first..first + count);
        }
    }
}

pub(crate) fn upload_mesh(device: &wgpu::Device, mesh: &MeshData) -> Option<GpuMesh> {
    if mesh.is_empty() {
        log::warn!("[gpu] skipping empty mesh");
        return None;
    }
    let vertices: Vec<MeshVertex> = mesh
        .positions
        .iter()
        .zip(mesh.normals.iter())
        .map(|(&position, &normal)| MeshVertex { position, normal })
        .collect();
    Some(GpuMesh {
        vertices: helpers::create_static_buffer(
            device,
            "mesh_vertices",
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::VERTEX,
        ),
        indices: helpers::create_static_buffer(
            device,
            "mesh_indices",
            bytemuck::cast_slice(&mesh.indices),
            wgpu::BufferUsages::INDEX,
        ),
        index_count: mesh.indices.len() as u32,
    })
}
