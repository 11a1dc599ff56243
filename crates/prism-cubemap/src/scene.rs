use std::path::Path;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use prism_engine::camera::{CameraDesc, OrbitCamera};
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::fetch::{AssetDir, FetchDesc, FetchRequest, FetchResponse, Fetcher};
use prism_engine::input::InputEvent;
use prism_engine::render::{create_cube_texture, create_placeholder_cube, PassAction, RenderCtx};
use prism_engine::text::{DebugFont, DebugText};

use crate::face::{CubeFace, FaceBuffer};
use crate::loader::CubemapLoader;

/// Edge length of each face image, in pixels.
pub const DEFAULT_FACE_SIZE: u32 = 2048;

/// Largest accepted face size: wgpu's default `max_texture_dimension_2d`.
pub const MAX_FACE_SIZE: u32 = 8192;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[derive(Debug)]
pub struct CubemapConfig {
    pub assets: AssetDir,
    pub face_size: u32,
    pub font: Option<DebugFont>,
}

/// Picks the status overlay font: `explicit`, then `<assets>/fonts/debug.ttf`,
/// then the engine's built-in font. A font that fails to load is skipped.
pub fn overlay_font(explicit: Option<&Path>, assets: &AssetDir) -> Option<DebugFont> {
    let asset_font = assets.resolve("fonts/debug.ttf");
    let candidates = explicit
        .into_iter()
        .chain(Some(asset_font.as_path()).filter(|p| p.is_file()));

    for path in candidates {
        match DebugFont::from_file(path) {
            Ok(font) => {
                log::debug!("overlay font: {}", path.display());
                return Some(font);
            }
            Err(err) => log::warn!("{err}; trying the next font"),
        }
    }

    match DebugFont::builtin() {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("status overlay disabled: {err}");
            None
        }
    }
}

/// The cubemap demo.
pub struct CubemapApp {
    assets: AssetDir,
    loader: CubemapLoader,
    fetcher: Option<Fetcher>,
    camera: OrbitCamera,
    text: DebugText,
    skybox: Option<Skybox>,
}

impl CubemapApp {
    pub fn new(config: CubemapConfig) -> Self {
        Self {
            assets: config.assets,
            loader: CubemapLoader::new(config.face_size),
            fetcher: None,
            camera: OrbitCamera::new(CameraDesc {
                latitude: 0.0,
                longitude: 0.0,
                distance: 0.1,
                min_dist: 0.1,
                max_dist: 0.1,
                center: glam::Vec3::ZERO,
                ..CameraDesc::default()
            }),
            text: DebugText::new(config.font),
            skybox: None,
        }
    }
}

impl App for CubemapApp {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.skybox = Some(Skybox::new(ctx));

        let max_dim = ctx.device.limits().max_texture_dimension_2d;
        if self.loader.face_size() > max_dim {
            log::error!(
                "face size {} exceeds the device limit of {max_dim}px",
                self.loader.face_size()
            );
            self.loader.mark_failed();
            return Ok(());
        }

        let mut fetcher = Fetcher::new(FetchDesc {
            max_requests: CubeFace::COUNT,
            num_lanes: CubeFace::COUNT,
        })?;
        send_face_requests(&mut fetcher, &self.assets, &mut self.loader);
        self.fetcher = Some(fetcher);

        log::info!(
            "loading {}px cubemap faces from {}",
            self.loader.face_size(),
            self.assets.root().display()
        );
        Ok(())
    }

    fn on_event(&mut self, event: &InputEvent) -> AppControl {
        self.camera.handle_event(event);
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mut completed = None;
        if let Some(fetcher) = self.fetcher.as_mut() {
            let loader = &mut self.loader;
            fetcher.do_work(|response| {
                if let Some(faces) = apply_response(loader, response) {
                    completed = Some(faces);
                }
            });
        }

        let Some(skybox) = self.skybox.as_mut() else {
            return AppControl::Continue;
        };

        if let Some(faces) = completed {
            skybox.set_faces(ctx.gpu.device(), ctx.gpu.queue(), &faces);
            log::info!("cube texture created ({0}x{0} x 6)", faces.size());
        }

        let viewport = ctx.viewport();
        self.camera.update(viewport.width, viewport.height);
        skybox.write_params(ctx.gpu.queue(), &VsParams {
            mvp: self.camera.view_proj.to_cols_array_2d(),
        });

        self.text.canvas(viewport.width * 0.5, viewport.height * 0.5);
        self.text.origin(1.0, 1.0);
        self.text.puts(self.loader.status().message());

        let text = &mut self.text;
        ctx.render(PassAction::clear(wgpu::Color::BLACK), |rctx, target| {
            {
                let mut pass = target.begin_scene_pass();
                skybox.draw(&mut pass);
            }
            text.draw(rctx, target);
        })
    }

    fn on_cleanup(&mut self) {
        // Joins the fetch lanes.
        self.fetcher = None;
        self.skybox = None;
        log::info!("cubemap demo shut down");
    }
}

/// Queues one request per face. A refused request fails the load.
fn send_face_requests(fetcher: &mut Fetcher, assets: &AssetDir, loader: &mut CubemapLoader) {
    let capacity = FaceBuffer::face_bytes(loader.face_size());
    for face in CubeFace::ALL {
        let request = FetchRequest::new(assets.resolve(face.file_name()), capacity)
            .with_tag(face.index());
        if let Err(err) = fetcher.send(request) {
            log::error!("face {face}: request refused: {err}");
            loader.mark_failed();
        }
    }
}

/// Feeds one fetch response into the loader. Returns the staging buffer once
/// the cube is complete.
fn apply_response(loader: &mut CubemapLoader, response: FetchResponse) -> Option<FaceBuffer> {
    let Some(face) = CubeFace::from_index(response.tag) else {
        log::warn!("response with unknown face tag {}", response.tag);
        return None;
    };

    match &response.result {
        Ok(bytes) => {
            log::debug!(
                "face {face} fetched from {} ({} bytes, lane {})",
                response.path.display(),
                bytes.len(),
                response.lane
            );
            loader.on_fetched(face, bytes)
        }
        Err(err) => {
            log::error!("{}: {err}", response.path.display());
            loader.on_failed(face);
            None
        }
    }
}

// ── GPU ────────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct VsParams {
    mvp: [[f32; 4]; 4],
}

#[rustfmt::skip]
const CUBE_VERTICES: [[f32; 3]; 24] = [
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0],
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0],
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    0, 1, 2,    0, 2, 3,
    6, 5, 4,    7, 6, 4,
    8, 9, 10,   8, 10, 11,
    14, 13, 12, 15, 14, 12,
    16, 17, 18, 16, 18, 19,
    22, 21, 20, 23, 22, 20,
];

struct Skybox {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    params_ubo: wgpu::Buffer,
    sampler: wgpu::Sampler,
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    // Keeps the bound cube texture alive.
    _texture: wgpu::Texture,
}

impl Skybox {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cubemap shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cubemap.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cubemap bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<VsParams>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cubemap pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cubemap pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &ATTRS,
                }],
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
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: ctx.depth_stencil(true, wgpu::CompareFunction::LessEqual),
            multisample: ctx.multisample(),
            multiview_mask: None,
            cache: None,
        });

        let params_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cubemap params ubo"),
            size: std::mem::size_of::<VsParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("cubemap sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cubemap vertices"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cubemap indices"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let (texture, view) = create_placeholder_cube(device, ctx.queue);
        let bind_group = make_bind_group(device, &bind_group_layout, &params_ubo, &view, &sampler);

        Self {
            pipeline,
            bind_group_layout,
            bind_group,
            params_ubo,
            sampler,
            vbo,
            ibo,
            _texture: texture,
        }
    }

    /// Replaces the placeholder with the loaded faces.
    fn set_faces(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, faces: &FaceBuffer) {
        let (texture, view) =
            create_cube_texture(device, queue, "cubemap image", faces.size(), faces.as_bytes());
        self.bind_group = make_bind_group(
            device,
            &self.bind_group_layout,
            &self.params_ubo,
            &view,
            &self.sampler,
        );
        self._texture = texture;
    }

    fn write_params(&self, queue: &wgpu::Queue, params: &VsParams) {
        queue.write_buffer(&self.params_ubo, 0, bytemuck::bytes_of(params));
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vbo.slice(..));
        pass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..CUBE_INDICES.len() as u32, 0, 0..1);
    }
}

fn make_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    params_ubo: &wgpu::Buffer,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("cubemap bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: params_ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
