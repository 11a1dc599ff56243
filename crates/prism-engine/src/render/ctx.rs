/// Framebuffer size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width / height, or 1.0 for a degenerate (minimized) viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }
}

/// How the scene pass initializes its attachments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassAction {
    pub clear_color: wgpu::Color,
    pub clear_depth: f32,
}

impl PassAction {
    pub const fn clear(color: wgpu::Color) -> Self {
        Self { clear_color: color, clear_depth: 1.0 }
    }
}

impl Default for PassAction {
    /// Mid-gray, far depth.
    fn default() -> Self {
        Self::clear(wgpu::Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 })
    }
}

/// Renderer-facing context (device/queue + attachment formats + viewport).
///
/// This is intentionally small and stable. Pipelines built against it must use
/// `sample_count` and `depth_format` to match the scene pass.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub sample_count: u32,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        depth_format: Option<wgpu::TextureFormat>,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            sample_count,
            depth_format,
            viewport,
        }
    }

    /// Depth state for a scene pipeline, or `None` when the pass has no depth
    /// attachment.
    pub fn depth_stencil(
        &self,
        write_enabled: bool,
        compare: wgpu::CompareFunction,
    ) -> Option<wgpu::DepthStencilState> {
        self.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: write_enabled,
            depth_compare: compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        })
    }

    /// Multisample state matching the scene pass.
    pub fn multisample(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count,
            ..Default::default()
        }
    }
}

/// Target for one frame: encoder, surface view and the scene attachments.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    msaa_view: Option<&'a wgpu::TextureView>,
    depth_view: Option<&'a wgpu::TextureView>,
    action: PassAction,
    scene_recorded: bool,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        msaa_view: Option<&'a wgpu::TextureView>,
        depth_view: Option<&'a wgpu::TextureView>,
        action: PassAction,
    ) -> Self {
        Self {
            encoder,
            color_view,
            msaa_view,
            depth_view,
            action,
            scene_recorded: false,
        }
    }

    /// Begins the scene pass: clears color and depth, renders into the MSAA
    /// target when present and resolves it into the surface.
    ///
    /// Call at most once per frame; later calls clear again.
    pub fn begin_scene_pass(&mut self) -> wgpu::RenderPass<'_> {
        if self.scene_recorded {
            log::debug!("scene pass begun twice in one frame");
        }
        self.scene_recorded = true;

        let (view, resolve_target) = match self.msaa_view {
            Some(msaa) => (msaa, Some(self.color_view)),
            None => (self.color_view, None),
        };

        let depth_stencil_attachment =
            self.depth_view
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.action.clear_depth),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                });

        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.action.clear_color),
                    store: if resolve_target.is_some() {
                        wgpu::StoreOp::Discard
                    } else {
                        wgpu::StoreOp::Store
                    },
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    /// Begins a load-only pass on the resolved surface (no MSAA, no depth).
    ///
    /// Records an empty scene pass first if the frame has none yet, so the
    /// surface is always cleared before overlays land on it.
    pub fn begin_overlay_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        if !self.scene_recorded {
            drop(self.begin_scene_pass());
        }

        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    /// Ensures the frame was cleared even if nothing was drawn.
    pub(crate) fn finish(&mut self) {
        if !self.scene_recorded {
            drop(self.begin_scene_pass());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_valid_viewport() {
        assert_eq!(Viewport::new(800.0, 600.0).aspect(), 800.0 / 600.0);
    }

    #[test]
    fn aspect_of_minimized_viewport_is_one() {
        assert_eq!(Viewport::new(0.0, 0.0).aspect(), 1.0);
        assert!(!Viewport::new(f32::NAN, 10.0).is_valid());
    }

    #[test]
    fn default_pass_action_clears_far_depth() {
        let action = PassAction::default();
        assert_eq!(action.clear_depth, 1.0);
        assert_eq!(action.clear_color.a, 1.0);
    }
}
