use crate::constants::CLEAR_RGB;
use festa_core::{Camera, Scene, SpriteTexture, ACTIVE_BURST_CAP, BURST_PARTICLES};
use wgpu::util::DeviceExt;
use web_sys as web;

mod bars;
mod helpers;
mod points;
mod targets;
use bars::BarInstanceRaw;
use helpers::InstanceBuffer;
use points::PointInstance;
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    params: [f32; 4],
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    sprite_bg: wgpu::BindGroup,

    points_pipeline: wgpu::RenderPipeline,
    bars_pipeline: wgpu::RenderPipeline,
    cube: wgpu::Buffer,
    cube_vertices: u32,
    point_instances: InstanceBuffer,
    bar_instances: InstanceBuffer,
    // CPU staging, reused every frame
    point_staging: Vec<PointInstance>,
    bar_staging: Vec<BarInstanceRaw>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
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
        let depth = DepthTarget::new(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(festa_core::SCENE_WGSL.into()),
        });

        // group 0: per-frame globals
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // group 1: sprite texture for point effects
        let sprite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sprite_view = upload_sprite(&device, &queue, &scene.sprite);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let sprite_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite_bg"),
            layout: &sprite_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&sprite_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&linear_sampler),
                },
            ],
        });

        let points_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_layout"),
            bind_group_layouts: &[&globals_bgl, &sprite_bgl],
            push_constant_ranges: &[],
        });
        let bars_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bars_layout"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let points_pipeline = helpers::make_scene_pipeline(
            &device,
            "points_pipeline",
            &points_layout,
            &shader,
            "vs_points",
            "fs_points",
            &[points::layout()],
            format,
            Some(helpers::ADDITIVE),
            false,
        );
        let bars_pipeline = helpers::make_scene_pipeline(
            &device,
            "bars_pipeline",
            &bars_layout,
            &shader,
            "vs_bars",
            "fs_bars",
            &bars::layouts(),
            format,
            None,
            true,
        );

        let cube_data = bars::unit_cube();
        let cube = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertices"),
            contents: bytemuck::cast_slice(&cube_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let point_capacity = scene.dust.len() + ACTIVE_BURST_CAP * BURST_PARTICLES;
        let bar_capacity = scene.ring.bars().len() + scene.frame.bars().len();
        let point_instances = InstanceBuffer::new(
            &device,
            "point_instances",
            std::mem::size_of::<PointInstance>(),
            point_capacity,
        );
        let bar_instances = InstanceBuffer::new(
            &device,
            "bar_instances",
            std::mem::size_of::<BarInstanceRaw>(),
            bar_capacity,
        );
        log::info!(
            "[render] {}x{} {:?} points={} bars={}",
            width,
            height,
            format,
            point_capacity,
            bar_capacity
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            globals_buffer,
            globals_bg,
            sprite_bg,
            points_pipeline,
            bars_pipeline,
            cube,
            cube_vertices: cube_data.len() as u32,
            point_instances,
            bar_instances,
            point_staging: Vec::with_capacity(point_capacity),
            bar_staging: Vec::with_capacity(bar_capacity),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0],
                g: CLEAR_RGB[1],
                b: CLEAR_RGB[2],
                a: 1.0,
            },
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
            self.depth.recreate(&self.device, width, height);
        }
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        elapsed: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let view_inv = camera.view_matrix().inverse();
        let globals = Globals {
            view_proj: camera.view_projection().to_cols_array_2d(),
            cam_right: view_inv.x_axis.truncate().extend(0.0).to_array(),
            cam_up: view_inv.y_axis.truncate().extend(0.0).to_array(),
            params: [elapsed, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        self.point_staging.clear();
        points::push_dust(&mut self.point_staging, &scene.dust);
        points::push_bursts(&mut self.point_staging, &scene.fireworks);
        self.point_instances.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.point_staging),
        );

        self.bar_staging.clear();
        bars::push_ring(&mut self.bar_staging, &scene.ring);
        bars::push_frame(&mut self.bar_staging, &scene.frame);
        self.bar_instances.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.bar_staging),
        );

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
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Opaque bars first so sprites depth-test against them.
            if !self.bar_staging.is_empty() {
                rpass.set_pipeline(&self.bars_pipeline);
                rpass.set_bind_group(0, &self.globals_bg, &[]);
                rpass.set_vertex_buffer(0, self.cube.slice(..));
                rpass.set_vertex_buffer(1, self.bar_instances.buffer.slice(..));
                rpass.draw(0..self.cube_vertices, 0..self.bar_staging.len() as u32);
            }
            if !self.point_staging.is_empty() {
                rpass.set_pipeline(&self.points_pipeline);
                rpass.set_bind_group(0, &self.globals_bg, &[]);
                rpass.set_bind_group(1, &self.sprite_bg, &[]);
                rpass.set_vertex_buffer(0, self.point_instances.buffer.slice(..));
                rpass.draw(0..6, 0..self.point_staging.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Re-acquire the swapchain after it was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

fn upload_sprite(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    sprite: &SpriteTexture,
) -> wgpu::TextureView {
    let (tex, view) = helpers::create_texture(
        device,
        "sprite_tex",
        sprite.size,
        sprite.size,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &sprite.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * sprite.size),
            rows_per_image: Some(sprite.size),
        },
        wgpu::Extent3d {
            width: sprite.size,
            height: sprite.size,
            depth_or_array_layers: 1,
        },
    );
    view
}
