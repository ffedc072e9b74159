//! First-person camera and its winit/GPU glue.
//!
//! [`Camera`] is the pure state machine: yaw/pitch orientation, a derived
//! orthonormal basis, discrete movement and the view matrix.
//! [`CameraController`] accumulates winit input and applies it once per
//! frame, and [`CameraUniform`]/[`CameraResources`] carry the resulting
//! transform to the GPU.

use instant::Duration;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::math::{Matrix4, Vector3};

/// Default yaw in degrees, looking down -z.
pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.0;

/// Pitch is kept just short of the poles to avoid a gimbal flip.
const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

/// Abstract movement commands, decoupled from the window system's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// A first-person camera.
///
/// Orientation is stored as yaw/pitch in degrees; the front/right/up basis is
/// recomputed whenever they change and is never mutated independently, so the
/// three vectors stay mutually orthogonal unit vectors.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vector3,
    pub speed: f32,
    pub sensitivity: f32,
    world_up: Vector3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    front: Vector3,
    right: Vector3,
    up: Vector3,
}

impl Camera {
    pub fn new(position: impl Into<Vector3>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position: position.into(),
            speed: SPEED,
            sensitivity: SENSITIVITY,
            world_up: Vector3::unit_y(),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: ZOOM,
            front: -Vector3::unit_z(),
            right: Vector3::unit_x(),
            up: Vector3::unit_y(),
        };
        camera.update_vectors();
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees for the projection.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn front(&self) -> Vector3 {
        self.front
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// Turn the camera by mouse-style deltas (scaled by the look
    /// sensitivity). Yaw accumulates unbounded; pitch clamps to ±89°.
    pub fn orient(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw * self.sensitivity;
        self.pitch = (self.pitch + delta_pitch * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Walk along the current basis. The travelled distance is
    /// `speed × delta_time`.
    pub fn translate(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Narrow or widen the field of view, clamped to [1°, 45°].
    pub fn adjust_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// The world-to-eye transform: rows are the right/up/−front basis,
    /// translated by `−dot(basis, position)`.
    pub fn view_matrix(&self) -> Matrix4 {
        let (r, u, f) = (self.right, self.up, self.front);
        let eye = self.position;
        Matrix4::new(
            r.x,
            r.y,
            r.z,
            -r.dot(eye),
            u.x,
            u.y,
            u.z,
            -u.dot(eye),
            -f.x,
            -f.y,
            -f.z,
            f.dot(eye),
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let front = Vector3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        );
        // The pitch clamp keeps cos(pitch) > 0, so neither normalization can
        // see a zero-length vector.
        self.front = front.normalize().expect("front vector is never zero");
        self.right = self
            .front
            .cross(self.world_up)
            .normalize()
            .expect("front is never parallel to world up");
        self.up = self
            .right
            .cross(self.front)
            .normalize()
            .expect("right and front are orthogonal unit vectors");
    }
}

/// Accumulates raw winit input and applies it to a [`Camera`] once per frame.
#[derive(Debug, Default)]
pub struct CameraController {
    amount_forward: f32,
    amount_backward: f32,
    amount_left: f32,
    amount_right: f32,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    scroll: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track WASD state. Returns whether the key was consumed.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let amount = if state.is_pressed() { 1.0 } else { 0.0 };
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => {
                self.amount_forward = amount;
                true
            }
            KeyCode::KeyS | KeyCode::ArrowDown => {
                self.amount_backward = amount;
                true
            }
            KeyCode::KeyA | KeyCode::ArrowLeft => {
                self.amount_left = amount;
                true
            }
            KeyCode::KeyD | KeyCode::ArrowRight => {
                self.amount_right = amount;
                true
            }
            _ => false,
        }
    }

    /// Mouse-motion deltas from `DeviceEvent::MouseMotion`.
    pub fn handle_mouse(&mut self, delta_x: f64, delta_y: f64) {
        self.rotate_horizontal += delta_x as f32;
        self.rotate_vertical += delta_y as f32;
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, lines) => *lines,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / 100.0,
        };
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                self.process_keyboard(*key, *state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.process_scroll(delta);
            }
            _ => {}
        }
    }

    /// Apply the input collected since the last frame.
    pub fn update(&mut self, camera: &mut Camera, dt: Duration) {
        let dt = dt.as_secs_f32();

        if self.amount_forward > 0.0 {
            camera.translate(CameraMovement::Forward, dt * self.amount_forward);
        }
        if self.amount_backward > 0.0 {
            camera.translate(CameraMovement::Backward, dt * self.amount_backward);
        }
        if self.amount_left > 0.0 {
            camera.translate(CameraMovement::Left, dt * self.amount_left);
        }
        if self.amount_right > 0.0 {
            camera.translate(CameraMovement::Right, dt * self.amount_right);
        }

        if self.rotate_horizontal != 0.0 || self.rotate_vertical != 0.0 {
            // Screen y grows downward, pitch grows upward.
            camera.orient(self.rotate_horizontal, -self.rotate_vertical);
            self.rotate_horizontal = 0.0;
            self.rotate_vertical = 0.0;
        }

        if self.scroll != 0.0 {
            camera.adjust_zoom(self.scroll);
            self.scroll = 0.0;
        }
    }
}

/// Perspective projection parameters tied to the surface size.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// The projection matrix for a vertical field of view in degrees
    /// (usually the camera's zoom).
    pub fn matrix(&self, fovy_degrees: f32) -> Matrix4 {
        Matrix4::perspective(fovy_degrees.to_radians(), self.aspect, self.znear, self.zfar)
    }
}

/// The camera transform in the layout the shader expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::IDENTITY.into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.matrix(camera.zoom()) * camera.view_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera state bundled with its GPU resources.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector4;

    fn assert_unit(v: Vector3) {
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_clamps_at_the_poles() {
        let mut camera = Camera::new([0.0, 0.0, 0.0], YAW, 0.0);
        camera.orient(0.0, 10_000.0);
        assert_eq!(camera.pitch(), 89.0);
        camera.orient(0.0, -100_000.0);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn yaw_accumulates_unbounded() {
        let mut camera = Camera::new([0.0, 0.0, 0.0], 0.0, 0.0);
        camera.orient(36_000.0, 0.0);
        assert_relative_eq!(camera.yaw(), 3_600.0);
    }

    #[test]
    fn basis_stays_orthonormal_after_arbitrary_orientation() {
        let mut camera = Camera::new([1.0, 2.0, 3.0], YAW, PITCH);
        for (dx, dy) in [
            (123.0, 45.0),
            (-310.0, 900.0),
            (77.7, -2000.0),
            (0.1, 0.1),
        ] {
            camera.orient(dx, dy);
            assert_unit(camera.front());
            assert_unit(camera.right());
            assert_unit(camera.up());
            assert_relative_eq!(camera.front().dot(camera.right()), 0.0, epsilon = 1e-5);
            assert_relative_eq!(camera.front().dot(camera.up()), 0.0, epsilon = 1e-5);
            assert_relative_eq!(camera.right().dot(camera.up()), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new([0.0, 0.0, 0.0], YAW, PITCH);
        assert_relative_eq!(camera.front().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.front().y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.front().z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn movement_follows_the_basis() {
        let mut camera = Camera::new([0.0, 0.0, 0.0], YAW, 0.0);
        camera.speed = 2.0;
        camera.translate(CameraMovement::Forward, 0.5);
        assert_relative_eq!(camera.position.z, -1.0, epsilon = 1e-5);
        camera.translate(CameraMovement::Right, 0.5);
        assert_relative_eq!(camera.position.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn zoom_clamps_to_its_range() {
        let mut camera = Camera::new([0.0, 0.0, 0.0], YAW, PITCH);
        camera.adjust_zoom(-100.0);
        assert_eq!(camera.zoom(), 45.0);
        camera.adjust_zoom(100.0);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn view_matrix_matches_the_generic_look_at() {
        let mut camera = Camera::new([3.0, 1.0, -2.0], 47.0, 0.0);
        camera.orient(200.0, -300.0);
        let reference = Matrix4::look_at(
            camera.position,
            camera.position + camera.front(),
            camera.up(),
        )
        .unwrap();
        let view = camera.view_matrix();
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(view[(i, j)], reference[(i, j)], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn view_matrix_maps_the_camera_position_to_the_origin() {
        let mut camera = Camera::new([5.0, -3.0, 9.0], 12.0, 34.0);
        camera.orient(99.0, -12.0);
        let eye = camera.view_matrix() * Vector4::from_vector3(camera.position, 1.0);
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn controller_applies_accumulated_input_once() {
        let mut camera = Camera::new([0.0, 0.0, 0.0], YAW, 0.0);
        let mut controller = CameraController::new();
        controller.handle_mouse(50.0, -30.0);
        controller.update(&mut camera, Duration::from_millis(16));
        assert_relative_eq!(camera.yaw(), YAW + 5.0);
        assert_relative_eq!(camera.pitch(), 3.0);

        // Deltas are consumed; a second update leaves orientation alone.
        controller.update(&mut camera, Duration::from_millis(16));
        assert_relative_eq!(camera.yaw(), YAW + 5.0);
    }
}
