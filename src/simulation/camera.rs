//! Orbit camera: viewpoint state and view/projection derivation
//!
//! The eye orbits a look target on a sphere parameterised by yaw/pitch and
//! distance. Pointer deltas accumulate into the angles (inverted, so a drag
//! to the right swings the scene to the right); pitch is clamped short of
//! the poles so the basis never degenerates.

use std::f32::consts::FRAC_PI_2;

use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::configuration::config::CameraConfig;

/// Radians per pixel of pointer drag for orbiting
const ORBIT_SENSITIVITY: f32 = 0.008;
/// Pan speed per pixel at distance 1, scaled by distance-to-target
const PAN_SENSITIVITY: f32 = 0.0015;
/// Distance change per wheel notch
const ZOOM_SENSITIVITY: f32 = 0.9;
/// Pitch stays this far short of straight up/down
const POLE_MARGIN: f32 = 0.05;

pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    min_distance: f32,
}

impl OrbitCamera {
    pub fn new(cfg: &CameraConfig) -> Self {
        let mut cam = Self {
            target: Point3::from(Vector3::from(cfg.target)),
            yaw: cfg.yaw,
            pitch: cfg.pitch,
            distance: cfg.distance,
            fov_y: cfg.fov_deg.to_radians(),
            near: cfg.near,
            far: cfg.far,
            min_distance: cfg.min_distance,
        };
        cam.clamp();
        cam
    }

    /// Rotate the eye around the target by pointer deltas.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ORBIT_SENSITIVITY;
        self.pitch -= dy * ORBIT_SENSITIVITY;
        self.clamp();
    }

    /// Translate eye and target together along camera right/up.
    ///
    /// Scaled by distance so panning covers the same screen fraction at any
    /// zoom.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = self.forward();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward);

        let scale = self.distance * PAN_SENSITIVITY;
        self.target += (-right * dx + up * dy) * scale;
    }

    /// Move the eye along the view direction; floored at `min_distance`.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * ZOOM_SENSITIVITY).max(self.min_distance);
    }

    /// Restore the configured pose; the only absolute reset.
    pub fn reset(&mut self, cfg: &CameraConfig) {
        self.target = Point3::from(Vector3::from(cfg.target));
        self.yaw = cfg.yaw;
        self.pitch = cfg.pitch;
        self.distance = cfg.distance;
        self.clamp();
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Point3<f32> {
        let offset = Vector3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        self.target + offset
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.eye()).normalize()
    }

    /// Right-handed view matrix for the current pose.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::y()).to_homogeneous()
    }

    /// Perspective projection for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        Perspective3::new(aspect, self.fov_y, self.near, self.far).to_homogeneous()
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    fn clamp(&mut self) {
        let limit = FRAC_PI_2 - POLE_MARGIN;
        self.pitch = self.pitch.clamp(-limit, limit);
        self.distance = self.distance.max(self.min_distance);
    }
}
