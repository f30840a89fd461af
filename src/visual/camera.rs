use glam::{Mat4, Vec3, Vec4};
use std::f32::consts::PI;

pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 20.0;
pub const MAX_POLAR: f32 = PI / 1.5;
// Looking straight down the up axis makes look_at degenerate.
const MIN_POLAR: f32 = 0.01;

/// Perspective camera orbiting a fixed target. No panning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around +Y, 0 = camera on +Z.
    pub yaw: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::new(0.0, 5.0, 10.0))
    }
}

impl OrbitCamera {
    pub fn looking_from(position: Vec3) -> Self {
        let distance = position.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let polar = (position.y / position.length().max(1e-6))
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(MIN_POLAR, MAX_POLAR);
        Self {
            target: Vec3::ZERO,
            distance,
            yaw: position.x.atan2(position.z),
            polar,
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let s = self.polar.sin();
        self.target
            + Vec3::new(s * self.yaw.sin(), self.polar.cos(), s * self.yaw.cos()) * self.distance
    }

    pub fn orbit(&mut self, d_yaw: f32, d_polar: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(2.0 * PI);
        self.polar = (self.polar + d_polar).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Multiply the distance to the target by `factor`.
    pub fn dolly(&mut self, factor: f32) {
        self.distance = (self.distance * factor.max(1e-3)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, aspect.max(1e-6), self.near, self.far);
        proj * view
    }

    pub fn projector(&self, w: usize, h: usize) -> Projector {
        let wf = w.max(1) as f32;
        let hf = h.max(1) as f32;
        Projector {
            view_proj: self.view_projection(wf / hf),
            w: wf,
            h: hf,
            focal_px: hf * 0.5 / (self.fov_y * 0.5).tan(),
            near: self.near,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Clip-space w, i.e. distance along the view axis.
    pub depth: f32,
}

/// World → pixel transform for one frame size.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view_proj: Mat4,
    w: f32,
    h: f32,
    focal_px: f32,
    near: f32,
}

impl Projector {
    /// Pixel position with y growing downwards; `None` behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * Vec4::new(p.x, p.y, p.z, 1.0);
        if clip.w <= self.near {
            return None;
        }
        let nx = clip.x / clip.w;
        let ny = clip.y / clip.w;
        Some(ScreenPoint {
            x: (nx * 0.5 + 0.5) * self.w,
            y: (1.0 - (ny * 0.5 + 0.5)) * self.h,
            depth: clip.w,
        })
    }

    /// On-screen size in pixels of a world length seen at `depth`.
    pub fn pixels_at(&self, world_len: f32, depth: f32) -> f32 {
        world_len * self.focal_px / depth.max(self.near)
    }
}
