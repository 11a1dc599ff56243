/// Edge length of the base level.
pub const BASE_SIZE: u32 = 256;

/// Levels from `BASE_SIZE` down to 1×1.
pub const LEVEL_COUNT: u32 = 9;

/// Opaque black, the "off" checker cell.
const BLACK: u32 = 0xFF00_0000;

/// Per-level checker colour as little-endian RGBA words.
pub const PALETTE: [u32; LEVEL_COUNT as usize] = [
    0xFF0000FF, // red
    0xFF00FF00, // green
    0xFFFF0000, // blue
    0xFFFF00FF, // magenta
    0xFFFFFF00, // cyan
    0xFF00FFFF, // yellow
    0xFFFF00A0, // violet
    0xFFFFA0FF, // orange
    0xFFA000FF, // purple
];

/// A full mip chain of checkerboards, levels stored back to back.
///
/// A single phase flag toggles after every texel and once more at the end of
/// every row, carried from one level into the next.
#[derive(Debug, Clone)]
pub struct MipChain {
    texels: Vec<u32>,
}

impl MipChain {
    pub fn generate() -> Self {
        let total: usize = (0..LEVEL_COUNT).map(level_len).sum();
        let mut texels = Vec::with_capacity(total);

        let mut even_odd = false;
        for level in 0..LEVEL_COUNT {
            let dim = level_size(level);
            let color = PALETTE[level as usize];
            for _y in 0..dim {
                for _x in 0..dim {
                    texels.push(if even_odd { color } else { BLACK });
                    even_odd = !even_odd;
                }
                even_odd = !even_odd;
            }
        }

        Self { texels }
    }

    pub fn level(&self, level: u32) -> &[u32] {
        let start: usize = (0..level).map(level_len).sum();
        &self.texels[start..start + level_len(level)]
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}

/// Edge length of `level`.
pub fn level_size(level: u32) -> u32 {
    BASE_SIZE >> level
}

fn level_len(level: u32) -> usize {
    let dim = level_size(level) as usize;
    dim * dim
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_levels_halving_to_one() {
        let sizes: Vec<u32> = (0..LEVEL_COUNT).map(level_size).collect();
        assert_eq!(sizes, [256, 128, 64, 32, 16, 8, 4, 2, 1]);

        let chain = MipChain::generate();
        let expected: usize = sizes.iter().map(|s| (s * s) as usize).sum();
        assert_eq!(chain.as_bytes().len(), expected * 4);
    }

    #[test]
    fn each_level_uses_its_palette_colour() {
        let chain = MipChain::generate();
        for level in 0..LEVEL_COUNT {
            assert!(chain
                .level(level)
                .iter()
                .all(|&t| t == BLACK || t == PALETTE[level as usize]));
        }
    }

    #[test]
    fn base_level_is_a_checkerboard() {
        let chain = MipChain::generate();
        let base = chain.level(0);
        assert_eq!(base[0], BLACK);
        assert_eq!(base[1], PALETTE[0]);
        // Second row starts on the opposite phase.
        assert_eq!(base[256], PALETTE[0]);
        assert_eq!(base.iter().filter(|&&t| t == PALETTE[0]).count(), 256 * 256 / 2);
    }

    #[test]
    fn phase_carries_into_the_last_level() {
        // Even-sized levels leave the phase where it started, so the single
        // 1×1 texel lands on the black phase.
        let chain = MipChain::generate();
        assert_eq!(chain.level(8), &[BLACK]);
        assert_eq!(chain.level(7), &[BLACK, PALETTE[7], PALETTE[7], BLACK]);
    }

    #[test]
    fn red_is_little_endian_rgba() {
        assert_eq!(PALETTE[0].to_le_bytes(), [0xFF, 0x00, 0x00, 0xFF]);
    }
}
