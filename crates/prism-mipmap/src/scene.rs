use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::render::{create_mipmapped_texture, PassAction, RenderCtx};

use crate::grid::{advance_angle, plan_frame, GridDraw};
use crate::mip_chain::{MipChain, BASE_SIZE, LEVEL_COUNT};
use crate::samplers::{sampler_configs, SAMPLER_COUNT};

/// The mipmap sampler-grid demo.
#[derive(Default)]
pub struct MipmapApp {
    angle: f32,
    gpu: Option<GridGpu>,
}

impl MipmapApp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for MipmapApp {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.gpu = Some(GridGpu::new(ctx));
        log::info!("mipmap demo ready: {LEVEL_COUNT} levels, {SAMPLER_COUNT} samplers");
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(gpu) = self.gpu.as_ref() else {
            return AppControl::Continue;
        };

        self.angle = advance_angle(self.angle, ctx.time.dt);
        let draws = plan_frame(self.angle, ctx.viewport().aspect());
        gpu.write_params(ctx.gpu.queue(), &draws);

        ctx.render(PassAction::default(), |_, target| {
            let mut pass = target.begin_scene_pass();
            gpu.draw(&mut pass, &draws);
        })
    }

    fn on_cleanup(&mut self) {
        self.gpu = None;
        log::info!("mipmap demo shut down");
    }
}

// ── GPU ────────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct VsParams {
    mvp: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    pos: [f32; 3],
    uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit quad as a triangle strip.
const QUAD: [Vertex; 4] = [
    Vertex { pos: [-1.0, -1.0, 0.0], uv: [0.0, 0.0] },
    Vertex { pos: [1.0, -1.0, 0.0], uv: [1.0, 0.0] },
    Vertex { pos: [-1.0, 1.0, 0.0], uv: [0.0, 1.0] },
    Vertex { pos: [1.0, 1.0, 0.0], uv: [1.0, 1.0] },
];

/// Byte stride between per-draw uniform slots.
fn uniform_stride(min_alignment: u32) -> u64 {
    let size = std::mem::size_of::<VsParams>() as u64;
    let align = u64::from(min_alignment.max(1));
    size.div_ceil(align) * align
}

struct GridGpu {
    pipeline: wgpu::RenderPipeline,
    vbo: wgpu::Buffer,
    params_ubo: wgpu::Buffer,
    params_stride: u64,
    params_bind_group: wgpu::BindGroup,
    /// One per sampler, all over the same texture.
    texture_bind_groups: Vec<wgpu::BindGroup>,
    _texture: wgpu::Texture,
}

impl GridGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let chain = MipChain::generate();
        let (texture, view) = create_mipmapped_texture(
            device,
            ctx.queue,
            "mipmap checkerboard",
            BASE_SIZE,
            LEVEL_COUNT,
            chain.as_bytes(),
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mipmap shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mipmap.wgsl").into()),
        });

        let params_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mipmap params bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<VsParams>() as u64),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mipmap texture bgl"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mipmap pipeline layout"),
            bind_group_layouts: &[&params_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mipmap pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: ctx.depth_stencil(true, wgpu::CompareFunction::LessEqual),
            multisample: ctx.multisample(),
            multiview_mask: None,
            cache: None,
        });

        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mipmap quad"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let params_stride = uniform_stride(device.limits().min_uniform_buffer_offset_alignment);
        let params_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mipmap params ubo"),
            size: params_stride * SAMPLER_COUNT as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mipmap params bind group"),
            layout: &params_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &params_ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<VsParams>() as u64),
                }),
            }],
        });

        let texture_bind_groups = sampler_configs()
            .iter()
            .enumerate()
            .map(|(i, cfg)| {
                let label = format!("mipmap sampler {i}");
                let sampler = device.create_sampler(&cfg.descriptor(Some(&label)));
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&label),
                    layout: &texture_bgl,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&sampler),
                        },
                    ],
                })
            })
            .collect();

        Self {
            pipeline,
            vbo,
            params_ubo,
            params_stride,
            params_bind_group,
            texture_bind_groups,
            _texture: texture,
        }
    }

    fn write_params(&self, queue: &wgpu::Queue, draws: &[GridDraw]) {
        let stride = self.params_stride as usize;
        let mut bytes = vec![0u8; stride * draws.len()];
        for (i, draw) in draws.iter().enumerate() {
            let params = VsParams { mvp: draw.mvp.to_cols_array_2d() };
            let start = i * stride;
            bytes[start..start + std::mem::size_of::<VsParams>()]
                .copy_from_slice(bytemuck::bytes_of(&params));
        }
        queue.write_buffer(&self.params_ubo, 0, &bytes);
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, draws: &[GridDraw]) {
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vbo.slice(..));

        for (i, draw) in draws.iter().enumerate() {
            let offset = (i as u64 * self.params_stride) as u32;
            pass.set_bind_group(0, &self.params_bind_group, &[offset]);
            pass.set_bind_group(1, &self.texture_bind_groups[draw.sampler], &[]);
            pass.draw(0..QUAD.len() as u32, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_slots_respect_alignment() {
        assert_eq!(uniform_stride(256), 256);
        assert_eq!(uniform_stride(64), 64);
        assert_eq!(uniform_stride(32), 64);
        assert_eq!(uniform_stride(0), 64);
    }

    #[test]
    fn quad_is_a_four_vertex_strip() {
        assert_eq!(QUAD.len(), 4);
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
    }
}
