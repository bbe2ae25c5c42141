use super::helpers;
use crate::core::ambient::Particle;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleRaw {
    pub(crate) pos_scale: [f32; 4],
    pub(crate) randomness: [f32; 4],
}

impl From<&Particle> for ParticleRaw {
    fn from(p: &Particle) -> Self {
        Self {
            pos_scale: [p.position[0], p.position[1], p.position[2], p.scale],
            randomness: [p.randomness[0], p.randomness[1], p.randomness[2], 0.0],
        }
    }
}

pub(crate) struct ParticleResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) instances: Option<wgpu::Buffer>,
    pub(crate) count: u32,
}

pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> ParticleResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::PARTICLES_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particles_pl"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleRaw>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4],
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("particles_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_particle"),
            buffers: &[instance_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: helpers::depth_state(false, wgpu::CompareFunction::LessEqual),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_particle"),
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
    ParticleResources {
        pipeline,
        instances: None,
        count: 0,
    }
}

impl ParticleResources {
    /// The field is static on the GPU; only the group rotation changes.
    pub(crate) fn upload(&mut self, device: &wgpu::Device, particles: &[Particle]) {
        if particles.is_empty() {
            self.instances = None;
            self.count = 0;
            return;
        }
        let raw: Vec<ParticleRaw> = particles.iter().map(ParticleRaw::from).collect();
        self.instances = Some(helpers::create_static_buffer(
            device,
            "particle_instances",
            bytemuck::cast_slice(&raw),
            wgpu::BufferUsages::VERTEX,
        ));
        self.count = raw.len() as u32;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, globals: &wgpu::BindGroup) {
        let Some(instances) = &self.instances else {
            return;
        };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, globals, &[]);
        rpass.set_vertex_buffer(0, instances.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
