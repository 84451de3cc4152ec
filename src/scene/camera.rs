use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::config::CameraSettings;

/// Camera pose once the solar system has been laid out, and after "reset view".
pub const HOME_POSITION: [f64; 3] = [0.0, 100.0, 200.0];
/// Pose before any data arrives.
pub const START_POSITION: [f64; 3] = [0.0, 80.0, 100.0];

const MIN_POLAR: f64 = 1e-6;
const IDLE_EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Perspective camera
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector3<f64>,
    pub fov_y: f64,               // rad, vertical
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
}

impl Camera {
    pub fn new(settings: &CameraSettings, aspect: f64) -> Self {
        Self {
            position: Vector3::from(START_POSITION),
            fov_y: settings.fov_deg.to_radians(),
            near: settings.near,
            far: settings.far,
            aspect,
        }
    }

    /// Track the viewport: aspect follows the full window, while the drawing
    /// surface is `fraction` of it. Returns the surface size.
    pub fn set_viewport(&mut self, width: f32, height: f32, fraction: f32) -> [f32; 2] {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f64;
        }
        surface_size(width, height, fraction)
    }
}

/// Drawing-surface size for a viewport.
pub fn surface_size(width: f32, height: f32, fraction: f32) -> [f32; 2] {
    [width.max(0.0) * fraction, height.max(0.0) * fraction]
}

// ---------------------------------------------------------------------------
// Damped orbit controls
// ---------------------------------------------------------------------------

/// Orbit-style controls around `target`. Rotation input is queued and
/// applied gradually by `update`, which must run once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vector3<f64>,
    pub damping: f64,
    pub rotate_speed: f64,        // rad per pixel of drag
    theta_delta: f64,
    phi_delta: f64,
    scale: f64,
}

impl OrbitControls {
    pub fn new(damping: f64) -> Self {
        Self {
            target: Vector3::zeros(),
            damping: damping.clamp(0.0, 1.0),
            rotate_speed: 2.0 * PI / 800.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }

    /// Queue a drag in screen pixels.
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        self.theta_delta -= dx * self.rotate_speed;
        self.phi_delta -= dy * self.rotate_speed;
    }

    /// Queue a dolly; `factor < 1` moves toward the target.
    pub fn dolly(&mut self, factor: f64) {
        if factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Drop any queued motion.
    pub fn stop(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.scale = 1.0;
    }

    pub fn is_idle(&self) -> bool {
        self.theta_delta.abs() < IDLE_EPS
            && self.phi_delta.abs() < IDLE_EPS
            && (self.scale - 1.0).abs() < IDLE_EPS
    }

    /// Advance one frame. Leaves the camera untouched when nothing is queued.
    pub fn update(&mut self, camera: &mut Camera) {
        if self.is_idle() {
            self.stop();
            return;
        }
        let offset = camera.position - self.target;
        let radius = offset.norm();
        if radius < IDLE_EPS {
            self.stop();
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.theta_delta * self.damping;
        phi = (phi + self.phi_delta * self.damping).clamp(MIN_POLAR, PI - MIN_POLAR);
        let radius = (radius * self.scale).clamp(camera.near, camera.far);

        let sin_phi = phi.sin();
        camera.position = self.target
            + Vector3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        self.theta_delta *= 1.0 - self.damping;
        self.phi_delta *= 1.0 - self.damping;
        self.scale = 1.0;
    }
}
