use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    let preferred: [wgpu::TextureFormat; 2] = if prefer_srgb {
        [wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
    } else {
        [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
    };

    Some(
        preferred
            .into_iter()
            .find(|f| formats.contains(f))
            .unwrap_or(first),
    )
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Picks the largest supported sample count that does not exceed `requested`.
pub(crate) fn choose_sample_count(requested: u32, flags: wgpu::TextureFormatFeatureFlags) -> u32 {
    let requested = requested.max(1);
    let mut count = 1 << (u32::BITS - 1 - requested.leading_zeros());
    while count > 1 && !flags.sample_count_supported(count) {
        count /= 2;
    }
    count
}

/// Creates a render attachment matching the surface size.
pub(crate) fn create_attachment(
    device: &wgpu::Device,
    label: &str,
    size: PhysicalSize<u32>,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

pub(crate) fn map_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    // ── surface format ────────────────────────────────────────────────────

    #[test]
    fn format_prefers_srgb_when_asked() {
        let formats = [F::Bgra8Unorm, F::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Bgra8UnormSrgb));
    }

    #[test]
    fn format_prefers_linear_when_srgb_off() {
        let formats = [F::Bgra8UnormSrgb, F::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Rgba8Unorm));
    }

    #[test]
    fn format_falls_back_to_first() {
        let formats = [F::Rgb10a2Unorm];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgb10a2Unorm));
    }

    #[test]
    fn format_none_when_empty() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha mode ────────────────────────────────────────────────────────

    #[test]
    fn alpha_mode_unsupported_request_uses_first() {
        let modes = [wgpu::CompositeAlphaMode::Opaque];
        let chosen = choose_alpha_mode(&modes, Some(wgpu::CompositeAlphaMode::PreMultiplied));
        assert_eq!(chosen, wgpu::CompositeAlphaMode::Opaque);
    }

    // ── sample count ──────────────────────────────────────────────────────

    #[test]
    fn sample_count_kept_when_supported() {
        let flags = wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X4;
        assert_eq!(choose_sample_count(4, flags), 4);
    }

    #[test]
    fn sample_count_steps_down_to_supported() {
        let flags = wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X2;
        assert_eq!(choose_sample_count(8, flags), 2);
    }

    #[test]
    fn sample_count_never_exceeds_request() {
        let flags = wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X2
            | wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X4;
        assert_eq!(choose_sample_count(3, flags), 2);
        assert_eq!(choose_sample_count(7, flags), 4);
    }

    #[test]
    fn sample_count_falls_back_to_one() {
        let flags = wgpu::TextureFormatFeatureFlags::empty();
        assert_eq!(choose_sample_count(4, flags), 1);
        assert_eq!(choose_sample_count(0, flags), 1);
    }

    // ── surface errors ────────────────────────────────────────────────────

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(map_surface_error(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
        assert_eq!(map_surface_error(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(map_surface_error(&wgpu::SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
    }
}
