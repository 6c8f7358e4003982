use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::geometry::TriangleMesh;
use crate::renderer::context::{
    RasterState, RenderContext, RenderError, ShaderVariant, UniformValue, check_uniform,
};

const INITIAL_DRAW_CAPACITY: usize = 16;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// One uniform block per draw. Field order matches `Uniforms` in
/// `shaders.wgsl`; each vec3 is padded out to 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub p: [[f32; 4]; 4],
    pub v: [[f32; 4]; 4],
    pub m: [[f32; 4]; 4],
    pub pvmr_matrix: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub material_shininess: f32,
    pub material_ambient: [f32; 3],
    pub _pad0: f32,
    pub material_diffuse: [f32; 3],
    pub _pad1: f32,
    pub color: [f32; 3],
    pub _pad2: f32,
}

impl Default for DrawUniforms {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

impl DrawUniforms {
    /// Stores an already type-checked value under its uniform name.
    fn set(&mut self, name: &str, value: UniformValue) {
        match (name, value) {
            ("P", UniformValue::Mat4(m)) => self.p = m.to_cols_array_2d(),
            ("V", UniformValue::Mat4(m)) => self.v = m.to_cols_array_2d(),
            ("M", UniformValue::Mat4(m)) => self.m = m.to_cols_array_2d(),
            ("pvmr_matrix", UniformValue::Mat4(m)) => self.pvmr_matrix = m.to_cols_array_2d(),
            ("camera_position", UniformValue::Vec3(v)) => self.camera_position = v.to_array(),
            ("material_ambient", UniformValue::Vec3(v)) => self.material_ambient = v.to_array(),
            ("material_diffuse", UniformValue::Vec3(v)) => self.material_diffuse = v.to_array(),
            ("color", UniformValue::Vec3(v)) => self.color = v.to_array(),
            ("material_shininess", UniformValue::Float(f)) => self.material_shininess = f,
            _ => log::warn!("uniform `{name}` has no slot in the uniform block"),
        }
    }
}

pub struct GpuMesh {
    pub position_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

struct PendingDraw {
    mesh: Rc<GpuMesh>,
    pipeline: (ShaderVariant, RasterState),
    uniforms: DrawUniforms,
}

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,

    pipelines: HashMap<(ShaderVariant, RasterState), wgpu::RenderPipeline>,

    uniform_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_stride: u64,
    uniform_capacity: usize,

    depth_texture: wgpu::TextureView,

    clear_color: wgpu::Color,
    raster: RasterState,
    shader: ShaderVariant,
    current: DrawUniforms,
    pending: Vec<PendingDraw>,
}

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

fn align_to(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

impl GpuState {
    pub async fn new(window: Arc<winit::window::Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .context("failed to open graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Demo Shaders"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        let block_size = std::mem::size_of::<DrawUniforms>() as u64;
        let uniform_stride = align_to(
            block_size,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(block_size),
                },
                count: None,
            }],
        });

        let (uniform_buffer, uniform_bind_group) =
            Self::create_uniform_storage(&device, &uniform_layout, uniform_stride, INITIAL_DRAW_CAPACITY);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Demo Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let mut pipelines = HashMap::new();
        for variant in ShaderVariant::ALL {
            for raster in [
                RasterState::DEPTH_ONLY,
                RasterState::DEPTH_AND_CULL,
                RasterState {
                    depth_test: false,
                    cull_face: false,
                },
                RasterState {
                    depth_test: false,
                    cull_face: true,
                },
            ] {
                let pipeline = Self::create_pipeline(
                    &device,
                    &pipeline_layout,
                    &shader,
                    config.format,
                    variant,
                    raster,
                );
                pipelines.insert((variant, raster), pipeline);
            }
        }

        let depth_texture = Self::create_depth_texture(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            pipelines,
            uniform_layout,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            uniform_capacity: INITIAL_DRAW_CAPACITY,
            depth_texture,
            clear_color: wgpu::Color::BLACK,
            raster: RasterState::DEPTH_ONLY,
            shader: ShaderVariant::Phong,
            current: DrawUniforms::default(),
            pending: Vec::new(),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        variant: ShaderVariant,
        raster: RasterState,
    ) -> wgpu::RenderPipeline {
        let (label, vs, fs) = match variant {
            ShaderVariant::Flat => ("Flat Pipeline", "vs_flat", "fs_flat"),
            ShaderVariant::Phong => ("Phong Pipeline", "vs_phong", "fs_phong"),
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vs),
                buffers: &[position_layout(), normal_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fs),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: raster.cull_face.then_some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: raster.depth_test,
                depth_compare: if raster.depth_test {
                    wgpu::CompareFunction::Less
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_uniform_storage(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniform Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Uniform Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64),
                }),
            }],
        });

        (buffer, bind_group)
    }

    fn ensure_uniform_capacity(&mut self, draws: usize) {
        if draws <= self.uniform_capacity {
            return;
        }
        let capacity = draws.next_power_of_two();
        log::debug!("growing uniform buffer to {capacity} draws");

        let (buffer, bind_group) = Self::create_uniform_storage(
            &self.device,
            &self.uniform_layout,
            self.uniform_stride,
            capacity,
        );
        self.uniform_buffer = buffer;
        self.uniform_bind_group = bind_group;
        self.uniform_capacity = capacity;
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
        }
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.config.present_mode = if enabled {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self.surface.configure(&self.device, &self.config);
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    /// Encodes every draw queued since the last call into one render pass.
    pub fn render_scene(&mut self, view: &wgpu::TextureView, encoder: &mut wgpu::CommandEncoder) {
        let pending = std::mem::take(&mut self.pending);
        self.ensure_uniform_capacity(pending.len());

        if !pending.is_empty() {
            let stride = self.uniform_stride as usize;
            let mut staging = vec![0u8; stride * pending.len()];
            for (i, draw) in pending.iter().enumerate() {
                let bytes = bytemuck::bytes_of(&draw.uniforms);
                staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
            }
            self.queue.write_buffer(&self.uniform_buffer, 0, &staging);
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        for (i, draw) in pending.iter().enumerate() {
            let Some(pipeline) = self.pipelines.get(&draw.pipeline) else {
                continue;
            };
            let offset = (i as u64 * self.uniform_stride) as u32;

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
            render_pass.set_vertex_buffer(0, draw.mesh.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, draw.mesh.normal_buffer.slice(..));
            render_pass.set_index_buffer(draw.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..draw.mesh.index_count, 0, 0..1);
        }
    }
}

impl RenderContext for GpuState {
    type Mesh = Rc<GpuMesh>;

    fn upload_mesh(&mut self, label: &str, mesh: &TriangleMesh) -> Rc<GpuMesh> {
        let position_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Positions")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normal_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Normals")),
            contents: bytemuck::cast_slice(&mesh.normals),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Rc::new(GpuMesh {
            position_buffer,
            normal_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        })
    }

    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color.map(f64::from);
        self.clear_color = wgpu::Color { r, g, b, a };
    }

    fn set_raster_state(&mut self, state: RasterState) {
        self.raster = state;
    }

    fn use_program(&mut self, shader: ShaderVariant) {
        self.shader = shader;
    }

    fn write_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), RenderError> {
        check_uniform(self.shader, name, &value)?;
        self.current.set(name, value);
        Ok(())
    }

    fn draw_indexed(&mut self, mesh: &Rc<GpuMesh>) {
        self.pending.push(PendingDraw {
            mesh: Rc::clone(mesh),
            pipeline: (self.shader, self.raster),
            uniforms: self.current,
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 4 * 64 + 4 * 16);
        assert_eq!(std::mem::offset_of!(DrawUniforms, camera_position), 256);
        assert_eq!(std::mem::offset_of!(DrawUniforms, material_shininess), 268);
        assert_eq!(std::mem::offset_of!(DrawUniforms, material_ambient), 272);
        assert_eq!(std::mem::offset_of!(DrawUniforms, material_diffuse), 288);
        assert_eq!(std::mem::offset_of!(DrawUniforms, color), 304);
    }

    #[test]
    fn named_values_land_in_their_slot() {
        let mut uniforms = DrawUniforms::default();
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

        uniforms.set("M", model.into());
        uniforms.set("color", Vec3::new(1.0, 0.5, 0.0).into());
        uniforms.set("material_shininess", 32.0_f32.into());

        assert_eq!(uniforms.m, model.to_cols_array_2d());
        assert_eq!(uniforms.color, [1.0, 0.5, 0.0]);
        assert_eq!(uniforms.material_shininess, 32.0);
        assert_eq!(uniforms.p, [[0.0; 4]; 4]);
    }

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(align_to(320, 256), 512);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(1, 64), 64);
    }
}
