use crate::core::camera::Camera;
use crate::core::icons::FeatureIcon;
use crate::core::mesh::PlaceholderKind;
use crate::core::object::PointLight;
use crate::core::scene::SceneState;
use glam::Vec2;
use web_sys as web;

mod background;
mod helpers;
mod icons;
mod lines;
mod meshes;
mod particles;
mod targets;
use targets::RenderTargets;

use background::{create_background_resources, BackgroundResources};
use icons::{IconDevice, IconResources, IconTarget};
use lines::{create_line_resources, LineResources};
use meshes::{create_mesh_resources, MeshResources};
use particles::{create_particle_resources, ParticleResources};

// ===================== WebGPU state =====================

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    eye_time: [f32; 4],
    // xy: surface px, z: particle rotation, w: line rotation
    resolution: [f32; 4],
    // xy: eased pointer NDC, zw: cursor position in [0,1]
    pointer: [f32; 4],
    light_pos: [[f32; 4]; 2],
    light_color: [[f32; 4]; 2],
}

impl Globals {
    fn from_scene(scene: &SceneState, width: u32, height: u32, cursor01: Vec2) -> Self {
        let mut g = Self::for_camera(&scene.camera, scene.time_sec, width, height, &scene.lights);
        g.resolution[2] = scene.particle_rotation;
        g.resolution[3] = scene.lines.rotation;
        g.pointer = [scene.pointer.x, scene.pointer.y, cursor01.x, cursor01.y];
        g
    }

    /// Camera, clock and lights only; pointer and ambient rotations zeroed.
    fn for_camera(camera: &Camera, time_sec: f32, width: u32, height: u32, lights: &[PointLight; 2]) -> Self {
        let eye = camera.eye;
        let pos = |l: &PointLight| [l.position.x, l.position.y, l.position.z, l.intensity];
        let color = |l: &PointLight| [l.color[0], l.color[1], l.color[2], 1.0];
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye_time: [eye.x, eye.y, eye.z, time_sec],
            resolution: [width as f32, height as f32, 0.0, 0.0],
            pointer: [0.0; 4],
            light_pos: [pos(&lights[0]), pos(&lights[1])],
            light_color: [color(&lights[0]), color(&lights[1])],
        }
    }
}

fn create_globals(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label}_globals")),
        size: std::mem::size_of::<Globals>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label}_globals_bg")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (buffer, bind_group)
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    globals_layout: wgpu::BindGroupLayout,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    background: BackgroundResources,
    particles: ParticleResources,
    meshes: MeshResources,
    lines: LineResources,
    icons: IconResources,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let (globals_buffer, globals_bind_group) = create_globals(&device, &globals_layout, "scene");

        let background = create_background_resources(&device, &globals_layout, format);
        let particles = create_particle_resources(&device, &globals_layout, format);
        let meshes = create_mesh_resources(&device, &globals_layout, format);
        let lines = create_line_resources(&device, &globals_layout, format);

        Ok(Self {
            targets: RenderTargets::new(&device, width, height),
            surface,
            instance,
            adapter,
            device,
            queue,
            config,
            globals_layout,
            globals_buffer,
            globals_bind_group,
            background,
            particles,
            meshes,
            lines,
            icons: IconResources::default(),
            width,
            height,
            clear_color: crate::constants::CLEAR_COLOR,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
        }
    }

    /// Upload the static particle field. Called once after the scene is built.
    pub fn upload_particles(&mut self, scene: &SceneState) {
        self.particles.upload(&self.device, &scene.particles);
    }

    /// Set up the surface for one feature icon canvas. Icons are attached in
    /// page order; a canvas that fails keeps its slot and is never drawn.
    pub fn attach_icon(&mut self, canvas: Option<web::HtmlCanvasElement>, kind: PlaceholderKind) {
        let gpu = IconDevice {
            instance: &self.instance,
            adapter: &self.adapter,
            device: &self.device,
            globals_layout: &self.globals_layout,
            format: self.config.format,
        };
        let index = self.icons.len();
        let target = canvas.and_then(|c| match IconTarget::new(gpu, c, kind) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("[icons] icon {index} disabled: {e:#}");
                None
            }
        });
        self.icons.push(target);
    }

    pub fn render(
        &mut self,
        scene: &SceneState,
        cursor01: Vec2,
        icons: &[FeatureIcon],
    ) -> Result<(), wgpu::SurfaceError> {
        let before = self.meshes.uploaded();
        self.meshes.sync(&self.device, scene.meshes());
        if self.meshes.uploaded() != before {
            log::info!("[gpu] {} meshes resident", self.meshes.uploaded());
        }
        self.meshes
            .update(&self.device, &self.queue, &scene.draw_items());
        self.lines.update(&self.device, &self.queue, &scene.lines);
        let globals = Globals::from_scene(scene, self.width, self.height, cursor01);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
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
            // backdrop, opaque meshes, then additive layers that read depth
            rpass.set_pipeline(&self.background.pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.draw(0..3, 0..1);
            self.meshes.draw(&mut rpass, &self.globals_bind_group);
            self.particles.draw(&mut rpass, &self.globals_bind_group);
            self.lines.draw(&mut rpass, &self.globals_bind_group);
        }
        let icon_frames = self.icons.encode(
            &self.queue,
            &mut encoder,
            &self.meshes.pipeline,
            icons,
            scene.time_sec,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        for f in icon_frames {
            f.present();
        }
        Ok(())
    }
}
