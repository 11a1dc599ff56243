use glam::{Mat4, Vec3};

use crate::samplers::SAMPLER_COUNT;

/// Rotation speed in degrees per 60 Hz frame.
const DEGREES_PER_FRAME: f32 = 0.1;

/// Draw for one grid cell: which sampler to bind and the quad's transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridDraw {
    pub sampler: usize,
    pub mvp: Mat4,
}

/// Advances the tilt angle (degrees) by a frame of `dt` seconds.
pub fn advance_angle(angle: f32, dt: f32) -> f32 {
    angle + DEGREES_PER_FRAME * 60.0 * dt
}

/// Centre of cell `i` on the 4×3 grid, top row first.
pub fn cell_offset(i: usize) -> Vec3 {
    let x = ((i & 3) as f32 - 1.5) * 2.0;
    let y = ((i / 4) as f32 - 1.0) * -2.0;
    Vec3::new(x, y, 0.0)
}

pub fn view_proj(aspect: f32) -> Mat4 {
    let proj = Mat4::perspective_rh(90f32.to_radians(), aspect, 0.01, 10.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    proj * view
}

/// The twelve draws of one frame, one per sampler, in sampler order.
pub fn plan_frame(angle: f32, aspect: f32) -> [GridDraw; SAMPLER_COUNT] {
    let view_proj = view_proj(aspect);
    let rotation = Mat4::from_rotation_x(angle.to_radians());

    std::array::from_fn(|i| GridDraw {
        sampler: i,
        mvp: view_proj * Mat4::from_translation(cell_offset(i)) * rotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_draw_per_sampler() {
        let draws = plan_frame(0.0, 800.0 / 600.0);
        assert_eq!(draws.len(), 12);
        for (i, d) in draws.iter().enumerate() {
            assert_eq!(d.sampler, i);
        }
    }

    #[test]
    fn grid_layout() {
        assert_eq!(cell_offset(0), Vec3::new(-3.0, 2.0, 0.0));
        assert_eq!(cell_offset(3), Vec3::new(3.0, 2.0, 0.0));
        assert_eq!(cell_offset(5), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(cell_offset(11), Vec3::new(3.0, -2.0, 0.0));
    }

    #[test]
    fn angle_advances_six_degrees_per_second() {
        let a = advance_angle(0.0, 1.0);
        assert!((a - 6.0).abs() < 1e-5);
        assert!((advance_angle(a, 1.0 / 60.0) - 6.1).abs() < 1e-5);
    }

    #[test]
    fn cells_project_left_to_right() {
        let draws = plan_frame(0.0, 1.0);
        let ndc_x = |d: &GridDraw| {
            let clip = d.mvp * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
            clip.x / clip.w
        };
        assert!(ndc_x(&draws[0]) < ndc_x(&draws[1]));
        assert!(ndc_x(&draws[2]) < ndc_x(&draws[3]));
    }
}
