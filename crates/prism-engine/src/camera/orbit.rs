use glam::{Mat4, Vec3};

use crate::input::{InputEvent, MouseButton, MouseButtonState};

const ORBIT_DEGREES_PER_PIXEL: f32 = 0.25;
const ZOOM_PER_LINE: f32 = 0.5;

/// Initial state and limits of an [`OrbitCamera`]. Angles are in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraDesc {
    pub latitude: f32,
    pub longitude: f32,
    pub distance: f32,
    pub min_dist: f32,
    pub max_dist: f32,
    pub min_lat: f32,
    pub max_lat: f32,
    pub center: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            distance: 5.0,
            min_dist: 2.0,
            max_dist: 30.0,
            min_lat: -85.0,
            max_lat: 85.0,
            center: Vec3::ZERO,
            fov_y: 60.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

/// Camera orbiting `center` on a sphere, steered by dragging with the left
/// mouse button and zoomed with the wheel.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    desc: CameraDesc,
    latitude: f32,
    longitude: f32,
    distance: f32,
    dragging: bool,

    pub eye: Vec3,
    pub view: Mat4,
    pub proj: Mat4,
    pub view_proj: Mat4,
}

impl OrbitCamera {
    pub fn new(desc: CameraDesc) -> Self {
        let mut cam = Self {
            desc,
            latitude: 0.0,
            longitude: 0.0,
            distance: desc.min_dist,
            dragging: false,
            eye: Vec3::ZERO,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            view_proj: Mat4::IDENTITY,
        };
        cam.latitude = desc.latitude.clamp(desc.min_lat, desc.max_lat);
        cam.longitude = wrap_degrees(desc.longitude);
        cam.distance = desc.distance.clamp(desc.min_dist, desc.max_dist);
        cam
    }

    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Rotates by the given deltas in degrees. Longitude wraps into
    /// `[0, 360)`, latitude is clamped.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.longitude = wrap_degrees(self.longitude - dx);
        self.latitude = (self.latitude + dy).clamp(self.desc.min_lat, self.desc.max_lat);
    }

    pub fn zoom(&mut self, d: f32) {
        self.distance = (self.distance + d).clamp(self.desc.min_dist, self.desc.max_dist);
    }

    pub fn handle_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerButton(b) if b.button == MouseButton::Left => {
                self.dragging = b.state == MouseButtonState::Pressed;
            }
            InputEvent::PointerMoved(m) if self.dragging => {
                self.orbit(m.dx * ORBIT_DEGREES_PER_PIXEL, m.dy * ORBIT_DEGREES_PER_PIXEL);
            }
            InputEvent::MouseWheel { delta, .. } => {
                self.zoom(delta.lines_y() * ZOOM_PER_LINE);
            }
            InputEvent::Focused(false) => self.dragging = false,
            _ => {}
        }
    }

    /// Recomputes eye position and matrices for a `width`×`height` framebuffer.
    pub fn update(&mut self, width: f32, height: f32) {
        let aspect = if width > 0.0 && height > 0.0 { width / height } else { 1.0 };

        self.eye = self.desc.center + orbit_offset(self.latitude, self.longitude) * self.distance;
        self.view = Mat4::look_at_rh(self.eye, self.desc.center, Vec3::Y);
        self.proj = Mat4::perspective_rh(
            self.desc.fov_y.to_radians(),
            aspect,
            self.desc.near,
            self.desc.far,
        );
        self.view_proj = self.proj * self.view;
    }
}

fn wrap_degrees(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

/// Unit vector pointing from the center to the eye.
fn orbit_offset(latitude: f32, longitude: f32) -> Vec3 {
    let (lat, lng) = (latitude.to_radians(), longitude.to_radians());
    Vec3::new(lat.cos() * lng.sin(), lat.sin(), lat.cos() * lng.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, MouseWheelDelta, PointerButtonEvent, PointerMoveEvent};

    fn press(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::default(),
        })
    }

    fn moved(dx: f32, dy: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0, dx, dy })
    }

    // ── orbit ─────────────────────────────────────────────────────────────

    #[test]
    fn latitude_is_clamped() {
        let mut cam = OrbitCamera::new(CameraDesc::default());
        cam.orbit(0.0, 200.0);
        assert_eq!(cam.latitude(), 85.0);
        cam.orbit(0.0, -500.0);
        assert_eq!(cam.latitude(), -85.0);
    }

    #[test]
    fn longitude_wraps() {
        let mut cam = OrbitCamera::new(CameraDesc::default());
        cam.orbit(10.0, 0.0);
        assert_eq!(cam.longitude(), 350.0);
        cam.orbit(-20.0, 0.0);
        assert_eq!(cam.longitude(), 10.0);
    }

    #[test]
    fn move_only_orbits_while_dragging() {
        let mut cam = OrbitCamera::new(CameraDesc::default());
        cam.handle_event(&moved(40.0, 40.0));
        assert_eq!(cam.latitude(), 0.0);

        cam.handle_event(&press(MouseButtonState::Pressed));
        cam.handle_event(&moved(0.0, 40.0));
        assert_eq!(cam.latitude(), 10.0);

        cam.handle_event(&press(MouseButtonState::Released));
        cam.handle_event(&moved(0.0, 40.0));
        assert_eq!(cam.latitude(), 10.0);
    }

    #[test]
    fn focus_loss_stops_drag() {
        let mut cam = OrbitCamera::new(CameraDesc::default());
        cam.handle_event(&press(MouseButtonState::Pressed));
        cam.handle_event(&InputEvent::Focused(false));
        assert!(!cam.is_dragging());
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut cam = OrbitCamera::new(CameraDesc::default());
        cam.handle_event(&InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: 2.0 },
            modifiers: Modifiers::default(),
        });
        assert_eq!(cam.distance(), 6.0);

        cam.zoom(-100.0);
        assert_eq!(cam.distance(), 2.0);
    }

    #[test]
    fn fixed_distance_never_changes() {
        let mut cam = OrbitCamera::new(CameraDesc {
            distance: 0.1,
            min_dist: 0.1,
            max_dist: 0.1,
            ..CameraDesc::default()
        });
        cam.zoom(3.0);
        assert_eq!(cam.distance(), 0.1);
    }

    // ── matrices ──────────────────────────────────────────────────────────

    #[test]
    fn eye_sits_on_positive_z_at_origin_angles() {
        let mut cam = OrbitCamera::new(CameraDesc::default());
        cam.update(800.0, 600.0);
        assert!((cam.eye - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);

        let center_clip = cam.view_proj * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(center_clip.x.abs() < 1e-5);
        assert!(center_clip.y.abs() < 1e-5);
    }
}
