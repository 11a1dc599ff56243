/// Texture filter, mapped onto wgpu's filter enums.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Filter {
    Nearest,
    Linear,
}

impl From<Filter> for wgpu::FilterMode {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => wgpu::FilterMode::Nearest,
            Filter::Linear => wgpu::FilterMode::Linear,
        }
    }
}

impl From<Filter> for wgpu::MipmapFilterMode {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => wgpu::MipmapFilterMode::Nearest,
            Filter::Linear => wgpu::MipmapFilterMode::Linear,
        }
    }
}

/// One sampler variant shown in the grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerConfig {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub mipmap_filter: Filter,
    pub lod_min: f32,
    pub lod_max: f32,
    pub max_anisotropy: u16,
    pub address_mode: wgpu::AddressMode,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            min_filter: Filter::Nearest,
            mag_filter: Filter::Linear,
            mipmap_filter: Filter::Nearest,
            lod_min: 0.0,
            lod_max: 32.0,
            max_anisotropy: 1,
            address_mode: wgpu::AddressMode::Repeat,
        }
    }
}

impl SamplerConfig {
    pub fn descriptor<'a>(&self, label: Option<&'a str>) -> wgpu::SamplerDescriptor<'a> {
        wgpu::SamplerDescriptor {
            label,
            address_mode_u: self.address_mode,
            address_mode_v: self.address_mode,
            address_mode_w: self.address_mode,
            mag_filter: self.mag_filter.into(),
            min_filter: self.min_filter.into(),
            mipmap_filter: self.mipmap_filter.into(),
            lod_min_clamp: self.lod_min,
            lod_max_clamp: self.lod_max,
            anisotropy_clamp: self.max_anisotropy,
            ..Default::default()
        }
    }
}

pub const SAMPLER_COUNT: usize = 12;

/// The twelve grid samplers, in draw order:
///
/// - 0..4: min filter × mip filter
/// - 4..8: the same with the LOD range clamped to [2, 4]
/// - 8..12: trilinear with anisotropy 1, 2, 4, 8, mirrored addressing
///
/// Mirrored addressing keeps sampler 8 distinct from sampler 3; on the
/// checkerboard it only flips the phase of alternate tiles.
pub fn sampler_configs() -> [SamplerConfig; SAMPLER_COUNT] {
    const FILTERS: [Filter; 2] = [Filter::Nearest, Filter::Linear];

    let mut out = [SamplerConfig::default(); SAMPLER_COUNT];
    let mut i = 0;

    for (lod_min, lod_max) in [(0.0, 32.0), (2.0, 4.0)] {
        for min_filter in FILTERS {
            for mipmap_filter in FILTERS {
                out[i] = SamplerConfig {
                    min_filter,
                    mipmap_filter,
                    lod_min,
                    lod_max,
                    ..SamplerConfig::default()
                };
                i += 1;
            }
        }
    }

    for shift in 0..4 {
        out[i] = SamplerConfig {
            min_filter: Filter::Linear,
            mipmap_filter: Filter::Linear,
            max_anisotropy: 1 << shift,
            address_mode: wgpu::AddressMode::MirrorRepeat,
            ..SamplerConfig::default()
        };
        i += 1;
    }

    debug_assert_eq!(i, SAMPLER_COUNT);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_distinct_configs() {
        let configs = sampler_configs();
        for (i, a) in configs.iter().enumerate() {
            for b in &configs[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(configs.iter().all(|c| c.mag_filter == Filter::Linear));
    }

    #[test]
    fn filter_cross_product_comes_first() {
        let c = sampler_configs();
        assert_eq!((c[0].min_filter, c[0].mipmap_filter), (Filter::Nearest, Filter::Nearest));
        assert_eq!((c[1].min_filter, c[1].mipmap_filter), (Filter::Nearest, Filter::Linear));
        assert_eq!((c[2].min_filter, c[2].mipmap_filter), (Filter::Linear, Filter::Nearest));
        assert_eq!((c[3].min_filter, c[3].mipmap_filter), (Filter::Linear, Filter::Linear));
    }

    #[test]
    fn lod_clamped_block() {
        let c = sampler_configs();
        for cfg in &c[4..8] {
            assert_eq!((cfg.lod_min, cfg.lod_max), (2.0, 4.0));
        }
        assert_eq!(c[5].mipmap_filter, Filter::Linear);
    }

    #[test]
    fn anisotropic_block_is_trilinear() {
        let c = sampler_configs();
        let levels: Vec<u16> = c[8..].iter().map(|s| s.max_anisotropy).collect();
        assert_eq!(levels, [1, 2, 4, 8]);
        assert!(c[8..].iter().all(|s| {
            s.min_filter == Filter::Linear && s.mipmap_filter == Filter::Linear
        }));
    }

    #[test]
    fn unclamped_anisotropy_one_differs_from_trilinear() {
        let c = sampler_configs();
        assert_eq!((c[3].max_anisotropy, c[8].max_anisotropy), (1, 1));
        assert_eq!((c[3].lod_min, c[3].lod_max), (c[8].lod_min, c[8].lod_max));
        assert_ne!(c[3].descriptor(None), c[8].descriptor(None));
        assert_eq!(c[8].descriptor(None).address_mode_u, wgpu::AddressMode::MirrorRepeat);
    }

    #[test]
    fn descriptor_maps_filters() {
        let desc = sampler_configs()[6].descriptor(Some("s6"));
        assert_eq!(desc.min_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.mipmap_filter, wgpu::MipmapFilterMode::Nearest);
        assert_eq!(desc.lod_min_clamp, 2.0);
        assert_eq!(desc.anisotropy_clamp, 1);
        assert_eq!(desc.address_mode_v, wgpu::AddressMode::Repeat);
    }
}
