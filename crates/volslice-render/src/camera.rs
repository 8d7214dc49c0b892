//! Orbit camera that supplies the per-frame view matrix.
//!
//! The camera is changed only through discrete commands (one key press worth
//! of movement or rotation) and queried once per frame for its view matrix.

use glam::{Mat4, Vec3};

/// Largest polar angle; keeps the turntable from flipping over the pole.
const MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// A discrete camera update, typically one per held key per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Translate the eye by this vector scaled by the move step.
    Move(Vec3),
    /// Turn the volume left around the pivot.
    RotateLeft,
    /// Turn the volume right around the pivot.
    RotateRight,
    /// Tilt the volume up around the pivot.
    RotateUp,
    /// Tilt the volume down around the pivot.
    RotateDown,
}

/// A turntable camera orbiting a pivot point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye offset in world space, applied after the orbit rotation.
    pub position: Vec3,
    /// Point the scene rotates around.
    pub pivot: Vec3,
    /// Rotation about the world up axis, in radians.
    pub azimuth: f32,
    /// Rotation about the horizontal axis, in radians.
    pub polar: f32,
    /// Angle added per rotation command, in radians.
    pub rotation_step: f32,
    /// Distance moved per move command.
    pub move_step: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a camera two units in front of the unit cube.
    ///
    /// Eye and pivot sit on the cube's centre line, so the default view
    /// looks straight down -z at the middle of the volume.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            pivot: Vec3::ZERO,
            azimuth: 0.0,
            polar: 0.0,
            rotation_step: 0.005,
            move_step: 0.01,
            fov: 0.78,
            aspect_ratio,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    ///
    /// Always a rigid transform: rotation about the pivot followed by a
    /// translation.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pivot - self.position)
            * Mat4::from_rotation_x(self.polar)
            * Mat4::from_rotation_y(self.azimuth)
            * Mat4::from_translation(-self.pivot)
    }

    /// Returns the right-handed perspective projection.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Applies one command.
    pub fn apply(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::Move(direction) => self.move_by(direction * self.move_step),
            CameraCommand::RotateLeft => self.rotate(-self.rotation_step, 0.0),
            CameraCommand::RotateRight => self.rotate(self.rotation_step, 0.0),
            CameraCommand::RotateUp => self.rotate(0.0, -self.rotation_step),
            CameraCommand::RotateDown => self.rotate(0.0, self.rotation_step),
        }
    }

    /// Moves the eye by `delta`.
    pub fn move_by(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Orbits around the pivot. The polar angle is clamped short of the poles.
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth = (self.azimuth + delta_azimuth) % std::f32::consts::TAU;
        self.polar = (self.polar + delta_polar).clamp(-MAX_POLAR, MAX_POLAR);
    }

    pub fn rotate_left(&mut self) {
        self.apply(CameraCommand::RotateLeft);
    }

    pub fn rotate_right(&mut self) {
        self.apply(CameraCommand::RotateRight);
    }

    pub fn rotate_up(&mut self) {
        self.apply(CameraCommand::RotateUp);
    }

    pub fn rotate_down(&mut self) {
        self.apply(CameraCommand::RotateDown);
    }

    /// Sets the per-command rotation and move increments.
    pub fn set_steps(&mut self, rotation_step: f32, move_step: f32) {
        self.rotation_step = rotation_step.max(0.0);
        self.move_step = move_step.max(0.0);
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0 / 600.0)
    }
}
