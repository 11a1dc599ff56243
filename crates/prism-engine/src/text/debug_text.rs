use std::collections::HashMap;
use std::fmt;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget, Viewport};

use super::DebugFont;

/// Edge length of one character cell, in canvas units.
pub const CELL_SIZE: f32 = 8.0;

const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

// ── queued text ────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct QueuedChar {
    ch: char,
    col: f32,
    row: f32,
    canvas: Option<(f32, f32)>,
    color: [f32; 4],
}

/// A queued character mapped to framebuffer pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
struct PlacedCell {
    ch: char,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: [f32; 4],
}

// ── renderer ───────────────────────────────────────────────────────────────

/// Immediate-mode text on a fixed character grid.
///
/// Positions are given in 8×8 cells of a virtual canvas that is stretched
/// over the framebuffer, so text scales with the window. Text is queued with
/// [`puts`](Self::puts) and rendered (then discarded) by
/// [`draw`](Self::draw).
///
/// Glyphs are rasterised on first use at the physical cell height and kept in
/// an R8 shelf-packed atlas for the renderer's lifetime.
pub struct DebugText {
    font: Option<DebugFont>,
    warned_no_font: bool,

    canvas: Option<(f32, f32)>,
    origin: (f32, f32),
    pos: (f32, f32),
    color: [f32; 4],
    queue: Vec<QueuedChar>,

    atlas: GlyphAtlas,
    gpu: Option<OverlayGpu>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl DebugText {
    pub fn new(font: Option<DebugFont>) -> Self {
        Self {
            font,
            warned_no_font: false,
            canvas: None,
            origin: (0.0, 0.0),
            pos: (0.0, 0.0),
            color: DEFAULT_COLOR,
            queue: Vec::new(),
            atlas: GlyphAtlas::default(),
            gpu: None,
            instance_vbo: None,
            instance_capacity: 0,
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Sets the virtual canvas size mapped onto the whole framebuffer.
    /// Resets origin and position.
    pub fn canvas(&mut self, width: f32, height: f32) {
        self.canvas = (width > 0.0 && height > 0.0).then_some((width, height));
        self.origin = (0.0, 0.0);
        self.pos = (0.0, 0.0);
    }

    /// Sets the origin, in cells. Line breaks return to the origin column.
    pub fn origin(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
    }

    /// Sets the cursor relative to the origin, in cells.
    pub fn pos(&mut self, x: f32, y: f32) {
        self.pos = (x, y);
    }

    pub fn home(&mut self) {
        self.pos = (0.0, 0.0);
    }

    pub fn color(&mut self, rgba: [f32; 4]) {
        self.color = rgba;
    }

    pub fn puts(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    self.pos.0 = 0.0;
                    self.pos.1 += 1.0;
                }
                '\r' => self.pos.0 = 0.0,
                _ => {
                    if !ch.is_whitespace() {
                        self.queue.push(QueuedChar {
                            ch,
                            col: self.origin.0 + self.pos.0,
                            row: self.origin.1 + self.pos.1,
                            canvas: self.canvas,
                            color: self.color,
                        });
                    }
                    self.pos.0 += 1.0;
                }
            }
        }
    }

    /// Renders all queued text in an overlay pass and clears the queue.
    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.queue.is_empty() {
            return;
        }

        let cells = place_cells(&self.queue, ctx.viewport);
        self.queue.clear();

        let Some(font) = self.font.as_ref() else {
            if !self.warned_no_font {
                log::warn!("debug text has no font; text is not rendered");
                self.warned_no_font = true;
            }
            return;
        };
        let font = font.fontdue();

        self.atlas.ensure_texture(ctx);
        let gpu = self.gpu.get_or_insert_with(|| OverlayGpu::new(ctx));
        let Some(atlas_view) = self.atlas.view.as_ref() else { return; };
        gpu.ensure_bind_group(ctx, atlas_view, self.atlas.generation);

        // ── build glyph instances ──────────────────────────────────────────
        let mut instances: Vec<GlyphInstance> = Vec::with_capacity(cells.len());

        for cell in &cells {
            let px = cell.height;
            let Some(glyph) = self.atlas.glyph(ctx, font, cell.ch, px) else { continue; };
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let ascent = font
                .horizontal_line_metrics(px)
                .map_or(px * 0.8, |m| m.ascent);
            let baseline = cell.y + ascent;

            let x = (cell.x + (cell.width - glyph.advance) * 0.5 + glyph.xmin).round();
            let y = (baseline - (glyph.height as f32 + glyph.ymin)).round();

            instances.push(GlyphInstance {
                dst_min: [x, y],
                dst_max: [x + glyph.width as f32, y + glyph.height as f32],
                uv_min: glyph.uv_min,
                uv_max: glyph.uv_max,
                color: cell.color,
            });
        }

        if instances.is_empty() {
            return;
        }

        gpu.write_viewport(ctx);
        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return; };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(gpu) = self.gpu.as_ref() else { return; };
        let Some(bind_group) = gpu.bind_group.as_ref() else { return; };

        let mut rpass = target.begin_overlay_pass("prism debug text pass");
        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(gpu.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism debug text instance vbo"),
            size: (new_cap * std::mem::size_of::<GlyphInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

impl fmt::Write for DebugText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.puts(s);
        Ok(())
    }
}

/// Maps queued cells onto framebuffer pixels. Without a canvas the canvas
/// equals the framebuffer.
fn place_cells(queue: &[QueuedChar], viewport: Viewport) -> Vec<PlacedCell> {
    let (vw, vh) = (viewport.width.max(1.0), viewport.height.max(1.0));

    queue
        .iter()
        .map(|q| {
            let (cw, ch) = q.canvas.unwrap_or((vw, vh));
            let (sx, sy) = (vw / cw, vh / ch);
            PlacedCell {
                ch: q.ch,
                x: q.col * CELL_SIZE * sx,
                y: q.row * CELL_SIZE * sy,
                width: CELL_SIZE * sx,
                height: CELL_SIZE * sy,
                color: q.color,
            }
        })
        .collect()
}

// ── glyph atlas ────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    width: u32,
    height: u32,
    xmin: f32,
    ymin: f32,
    advance: f32,
}

struct GlyphAtlas {
    texture: Option<wgpu::Texture>,
    view: Option<wgpu::TextureView>,
    generation: u64,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
    /// Keyed by character and pixel size bits.
    cache: HashMap<(char, u32), CachedGlyph>,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self {
            texture: None,
            view: None,
            generation: 0,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
            cache: HashMap::new(),
        }
    }
}

impl GlyphAtlas {
    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>) {
        if self.texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism debug text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.texture = Some(texture);
        self.generation += 1;
    }

    /// Returns the cached glyph, rasterising and uploading it on first use.
    fn glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        font: &fontdue::Font,
        ch: char,
        px: f32,
    ) -> Option<CachedGlyph> {
        let key = (ch, px.to_bits());
        if let Some(cached) = self.cache.get(&key) {
            return Some(*cached);
        }

        let (metrics, bitmap) = font.rasterize(ch, px);
        let (w, h) = (metrics.width as u32, metrics.height as u32);

        let (uv_min, uv_max) = if w == 0 || h == 0 {
            ([0.0; 2], [0.0; 2])
        } else {
            self.place(ctx, &bitmap, w, h)?
        };

        let glyph = CachedGlyph {
            uv_min,
            uv_max,
            width: w,
            height: h,
            xmin: metrics.xmin as f32,
            ymin: metrics.ymin as f32,
            advance: metrics.advance_width,
        };
        self.cache.insert(key, glyph);
        Some(glyph)
    }

    fn place(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<([f32; 2], [f32; 2])> {
        if self.full {
            return None;
        }

        // New shelf when the glyph doesn't fit horizontally.
        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!("debug text atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); dropping new glyphs");
            self.full = true;
            return None;
        }

        let (gx, gy) = (self.cursor_x, self.cursor_y);
        let atlas = self.texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);

        let size = ATLAS_SIZE as f32;
        Some((
            [gx as f32 / size, gy as f32 / size],
            [(gx + w) as f32 / size, (gy + h) as f32 / size],
        ))
    }
}

// ── GPU objects ────────────────────────────────────────────────────────────

struct OverlayGpu {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    viewport_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
    bind_group_generation: u64,
}

impl OverlayGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism debug text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/debug_text.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism debug text bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ViewportUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
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

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism debug text pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism debug text pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), GlyphInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Overlay passes target the resolved surface.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism debug text sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism debug text viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism debug text quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism debug text quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            viewport_ubo,
            quad_vbo,
            quad_ibo,
            bind_group: None,
            bind_group_generation: u64::MAX,
        }
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>, atlas_view: &wgpu::TextureView, generation: u64) {
        if self.bind_group.is_some() && self.bind_group_generation == generation {
            return;
        }

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism debug text bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        }));
        self.bind_group_generation = generation;
    }

    fn write_viewport(&self, ctx: &RenderCtx<'_>) {
        let w = ctx.viewport.width.max(1.0);
        let h = ctx.viewport.height.max(1.0);
        ctx.queue.write_buffer(
            &self.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform { size: [w, h], _pad: [0.0; 2] }),
        );
    }
}

// ── GPU types ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    fn cells(text: &DebugText, viewport: Viewport) -> Vec<PlacedCell> {
        place_cells(&text.queue, viewport)
    }

    // ── cursor ────────────────────────────────────────────────────────────

    #[test]
    fn puts_starts_at_origin() {
        let mut text = DebugText::new(None);
        text.origin(1.0, 1.0);
        text.puts("AB");

        let placed = cells(&text, Viewport::new(800.0, 600.0));
        assert_eq!(placed.len(), 2);
        assert_eq!((placed[0].x, placed[0].y), (8.0, 8.0));
        assert_eq!((placed[1].x, placed[1].y), (16.0, 8.0));
    }

    #[test]
    fn newline_returns_to_origin_column() {
        let mut text = DebugText::new(None);
        text.origin(2.0, 0.0);
        text.puts("A\nB");

        let placed = cells(&text, Viewport::new(800.0, 600.0));
        assert_eq!((placed[1].x, placed[1].y), (16.0, 8.0));
    }

    #[test]
    fn spaces_advance_without_emitting() {
        let mut text = DebugText::new(None);
        text.puts("A B");
        let placed = cells(&text, Viewport::new(100.0, 100.0));
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].x, 16.0);
    }

    #[test]
    fn pos_is_relative_to_origin() {
        let mut text = DebugText::new(None);
        text.origin(1.0, 1.0);
        text.pos(3.0, 2.0);
        text.puts("X");
        let placed = cells(&text, Viewport::new(800.0, 600.0));
        assert_eq!((placed[0].x, placed[0].y), (32.0, 24.0));
    }

    #[test]
    fn fmt_write_queues_text() {
        let mut text = DebugText::new(None);
        write!(text, "{}/{}", 3, 6).unwrap();
        assert_eq!(text.queue.len(), 3);
        assert_eq!(text.queue[1].ch, '/');
    }

    // ── canvas scale ──────────────────────────────────────────────────────

    #[test]
    fn half_canvas_doubles_cells() {
        let mut text = DebugText::new(None);
        text.canvas(400.0, 300.0);
        text.origin(1.0, 1.0);
        text.puts("L");

        let placed = cells(&text, Viewport::new(800.0, 600.0));
        assert_eq!(placed[0].x, 16.0);
        assert_eq!(placed[0].y, 16.0);
        assert_eq!(placed[0].height, 16.0);
        assert_eq!(placed[0].width, 16.0);
    }

    #[test]
    fn canvas_resets_origin_and_pos() {
        let mut text = DebugText::new(None);
        text.origin(5.0, 5.0);
        text.pos(2.0, 2.0);
        text.canvas(100.0, 100.0);
        text.puts("Q");
        let placed = cells(&text, Viewport::new(100.0, 100.0));
        assert_eq!((placed[0].x, placed[0].y), (0.0, 0.0));
    }

    #[test]
    fn color_is_captured_per_char() {
        let mut text = DebugText::new(None);
        text.puts("a");
        text.color([1.0, 0.0, 0.0, 1.0]);
        text.puts("b");
        assert_eq!(text.queue[0].color, DEFAULT_COLOR);
        assert_eq!(text.queue[1].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn instance_layout_is_48_bytes() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }
}
