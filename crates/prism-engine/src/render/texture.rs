use wgpu::util::{DeviceExt, TextureDataOrder};

/// Creates an RGBA8 cube texture from six tightly packed faces.
///
/// `faces` holds +X, -X, +Y, -Y, +Z, -Z back to back, each `size * size * 4`
/// bytes. Returns the texture and a cube view over all six layers.
pub fn create_cube_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    size: u32,
    faces: &[u8],
) -> (wgpu::Texture, wgpu::TextureView) {
    debug_assert_eq!(faces.len(), (size as usize).pow(2) * 4 * 6);

    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        faces,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some(label),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        array_layer_count: Some(6),
        ..Default::default()
    });

    (texture, view)
}

/// 1x1 opaque black cube, bound while the real faces are still loading.
pub fn create_placeholder_cube(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> (wgpu::Texture, wgpu::TextureView) {
    let black = [0u8, 0, 0, 255].repeat(6);
    create_cube_texture(device, queue, "prism placeholder cube", 1, &black)
}

/// Creates a square RGBA8 2D texture with a full, pre-computed mip chain.
///
/// `data` holds every level back to back, largest first.
pub fn create_mipmapped_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    size: u32,
    mip_level_count: u32,
    data: &[u8],
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        data,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
