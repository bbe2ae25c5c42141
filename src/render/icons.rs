use super::meshes::{upload_mesh, GpuMesh, InstanceRaw};
use super::targets::RenderTargets;
use super::{create_globals, Globals};
use crate::constants::ICON_CLEAR_COLOR;
use crate::core::icons::{icon_camera, icon_mesh, FeatureIcon, ICON_LIGHTS, ICON_MATERIAL};
use crate::core::mesh::PlaceholderKind;
use web_sys as web;

/// Everything needed to draw one icon canvas: its own surface, depth buffer,
/// uniforms and a single instance slot.
pub(crate) struct IconTarget {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    instance: wgpu::Buffer,
    mesh: Option<GpuMesh>,
}

impl IconTarget {
    pub(crate) fn new(
        gpu: IconDevice<'_>,
        canvas: web::HtmlCanvasElement,
        kind: PlaceholderKind,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);
        let surface = gpu
            .instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let caps = surface.get_capabilities(gpu.adapter);
        // the mesh pipeline is built for the main surface format
        if !caps.formats.contains(&gpu.format) {
            anyhow::bail!("icon surface does not support {:?}", gpu.format);
        }
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: gpu.format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device, &config);

        let (globals_buffer, globals_bind_group) = create_globals(gpu.device, gpu.globals_layout, "icon");
        let instance = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("icon_instance"),
            size: std::mem::size_of::<InstanceRaw>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Ok(Self {
            targets: RenderTargets::new(gpu.device, width, height),
            mesh: upload_mesh(gpu.device, &icon_mesh(kind)),
            surface,
            config,
            globals_buffer,
            globals_bind_group,
            instance,
        })
    }

    /// Encode this icon's pass. The returned frame is presented after the
    /// encoder is submitted.
    fn encode(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: &wgpu::RenderPipeline,
        icon: &FeatureIcon,
        time_sec: f32,
    ) -> Option<wgpu::SurfaceTexture> {
        let mesh = self.mesh.as_ref()?;
        let globals = Globals::for_camera(
            &icon_camera(),
            time_sec,
            self.config.width,
            self.config.height,
            &ICON_LIGHTS,
        );
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        let raw = InstanceRaw::new(icon.model_matrix(), &ICON_MATERIAL);
        queue.write_buffer(&self.instance, 0, bytemuck::bytes_of(&raw));

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("[icons] icon {} skipped: {:?}", icon.index, e);
                return None;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("icon_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ICON_CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance.slice(..));
            mesh.draw(&mut rpass, 0..1);
        }
        Some(frame)
    }
}

/// Shared GPU handles an icon target is built from.
#[derive(Clone, Copy)]
pub(crate) struct IconDevice<'a> {
    pub(crate) instance: &'a wgpu::Instance,
    pub(crate) adapter: &'a wgpu::Adapter,
    pub(crate) device: &'a wgpu::Device,
    pub(crate) globals_layout: &'a wgpu::BindGroupLayout,
    pub(crate) format: wgpu::TextureFormat,
}

/// Icon targets in page order. `None` holds the place of an icon whose
/// canvas could not be set up, so indices stay aligned with the icons.
#[derive(Default)]
pub(crate) struct IconResources {
    targets: Vec<Option<IconTarget>>,
}

impl IconResources {
    pub(crate) fn push(&mut self, target: Option<IconTarget>) {
        self.targets.push(target);
    }

    pub(crate) fn len(&self) -> usize {
        self.targets.len()
    }

    pub(crate) fn encode(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: &wgpu::RenderPipeline,
        icons: &[FeatureIcon],
        time_sec: f32,
    ) -> Vec<wgpu::SurfaceTexture> {
        self.targets
            .iter()
            .zip(icons)
            .filter_map(|(target, icon)| {
                target
                    .as_ref()?
                    .encode(queue, encoder, pipeline, icon, time_sec)
            })
            .collect()
    }
}
