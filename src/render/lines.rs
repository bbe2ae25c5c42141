use super::helpers::{self, DynamicBuffer};
use crate::core::ambient::AmbientLines;

pub(crate) struct LineResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    vertices: DynamicBuffer,
    count: u32,
}

pub(crate) fn create_line_resources(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> LineResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("lines_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::LINES_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("lines_pl"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });
    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x4],
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("lines_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_line"),
            buffers: &[vertex_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            ..Default::default()
        },
        depth_stencil: helpers::depth_state(false, wgpu::CompareFunction::LessEqual),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_line"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(helpers::ADDITIVE_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    LineResources {
        pipeline,
        vertices: DynamicBuffer::new(device, "line_vertices", wgpu::BufferUsages::VERTEX, 4096),
        count: 0,
    }
}

impl LineResources {
    pub(crate) fn update(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, lines: &AmbientLines) {
        let packed: Vec<[f32; 4]> = lines
            .segments()
            .into_iter()
            .map(|(p, a)| [p[0], p[1], p[2], a])
            .collect();
        self.vertices.write(device, queue, bytemuck::cast_slice(&packed));
        self.count = packed.len() as u32;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, globals: &wgpu::BindGroup) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, globals, &[]);
        rpass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
        rpass.draw(0..self.count, 0..1);
    }
}
