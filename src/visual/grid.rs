//! Spacetime grid: a subdivided plane pulled down into a gravity well.
//!
//! The well depth blends a Newtonian `1/r` potential with an entropic term
//! that keeps growing logarithmically, which gives the wide "halo" basin at
//! high stiffness. Edges of the deformed mesh are shaded per fragment and
//! only the fixed-density grid lines are drawn.

use super::camera::ScreenPoint;
use super::mesh::PlaneMesh;
use super::raster::{Framebuffer, Rgb, add_rgb, fract, mix, mix_rgb, smoothstep, step};
use super::{DrawCtx, ShadingEngine};
use crate::params::ParamStore;
use crate::uniforms::{U_A0, U_MASS, U_STIFFNESS, U_TIME, UniformSet};
use glam::{Vec2, Vec3};

pub const GRID_SIZE: f32 = 20.0;
pub const DEFAULT_SUBDIVISIONS: usize = 128;
/// World height of the undeformed plane.
pub const GRID_BASE_Y: f32 = -1.0;

const MIN_WELL_RADIUS: f32 = 0.2;
const GRID_LINES: f32 = 40.0;

const COLOR_FLAT: Rgb = [0.0, 0.4, 0.8];
const COLOR_DEEP: Rgb = [1.0, 0.6, 0.1];
const COLOR_ENTROPIC: Rgb = [0.0, 1.0, 0.5];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridUniforms {
    pub time: f32,
    pub mass: f32,
    pub stiffness: f32,
    pub a0: f32,
}

impl GridUniforms {
    pub fn from_set(set: &UniformSet) -> Self {
        Self {
            time: set.value(U_TIME),
            mass: set.value(U_MASS),
            stiffness: set.value(U_STIFFNESS),
            a0: set.value(U_A0),
        }
    }
}

/// Radius guard so the potential is never evaluated at the singularity.
pub fn smooth_r(r: f32) -> f32 {
    r.max(MIN_WELL_RADIUS)
}

pub fn depth_newton(r: f32) -> f32 {
    1.0 / smooth_r(r)
}

pub fn depth_verlinde(r: f32, a0: f32) -> f32 {
    depth_newton(r) + a0.max(0.0).sqrt() * 1.5 * (smooth_r(r) + 1.0).ln()
}

pub fn final_depth(r: f32, a0: f32, stiffness: f32) -> f32 {
    mix(depth_newton(r), depth_verlinde(r, a0), stiffness)
}

/// Slow oscillation of the whole well, scaled by `a0`.
pub fn breathing(time: f32, a0: f32) -> f32 {
    1.0 + (time * 0.5).sin() * 0.02 * a0
}

/// Vertical displacement of plane point (x, y); negative is down.
pub fn well_elevation(x: f32, y: f32, u: &GridUniforms) -> f32 {
    let r = x.hypot(y);
    let z = -final_depth(r, u.a0, u.stiffness) * u.mass * 0.5;
    z * breathing(u.time, u.a0)
}

/// 1 on the thin band at the top of each grid cell, 0 elsewhere.
pub fn grid_line_mask(uv: Vec2) -> f32 {
    step(0.95, fract(uv.x * GRID_LINES)).max(step(0.95, fract(uv.y * GRID_LINES)))
}

/// Fragment colour and alpha for a point of the grid surface.
pub fn shade_fragment(elevation: f32, uv: Vec2, stiffness: f32) -> (Rgb, f32) {
    let depth = elevation.abs();
    let mut color = mix_rgb(COLOR_FLAT, COLOR_DEEP, (depth * 0.2).clamp(0.0, 1.0));
    color = add_rgb(color, COLOR_ENTROPIC, stiffness * 0.3);

    let dist = uv.distance(Vec2::splat(0.5));
    let alpha = (1.0 - smoothstep(0.4, 0.5, dist)) * grid_line_mask(uv);
    (color, alpha)
}

#[derive(Debug, Clone, Copy)]
struct ProjectedVertex {
    at: ScreenPoint,
    elevation: f32,
    uv: Vec2,
}

pub struct GridEngine {
    mesh: PlaneMesh,
    uniforms: UniformSet,
    projected: Vec<Option<ProjectedVertex>>,
}

impl GridEngine {
    pub fn new(store: &ParamStore, subdivisions: usize) -> Self {
        let p = store.params();
        let uniforms = UniformSet::declare(&[
            (U_TIME, 0.0),
            (U_MASS, p.mass),
            (U_STIFFNESS, p.stiffness),
            (U_A0, p.derived().a0),
        ]);
        let mesh = PlaneMesh::new(GRID_SIZE, subdivisions);
        let projected = Vec::with_capacity(mesh.vertices().len());
        Self {
            mesh,
            uniforms,
            projected,
        }
    }

    /// World position of a deformed plane point.
    pub fn world_position(pos: Vec2, elevation: f32) -> Vec3 {
        // Plane lies flat (rotated -90° about X) and sits at GRID_BASE_Y.
        Vec3::new(pos.x, elevation + GRID_BASE_Y, -pos.y)
    }
}

impl ShadingEngine for GridEngine {
    fn name(&self) -> &'static str {
        "spacetime-grid"
    }

    fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    fn uniforms_mut(&mut self) -> &mut UniformSet {
        &mut self.uniforms
    }

    fn draw(&mut self, ctx: &DrawCtx, target: &mut Framebuffer) {
        let u = GridUniforms::from_set(&self.uniforms);

        self.projected.clear();
        for v in self.mesh.vertices() {
            let elevation = well_elevation(v.pos.x, v.pos.y, &u);
            let world = Self::world_position(v.pos, elevation);
            self.projected.push(ctx.projector.project(world).map(|at| ProjectedVertex {
                at,
                elevation,
                uv: v.uv,
            }));
        }

        for &(a, b) in self.mesh.edges() {
            let (Some(va), Some(vb)) = (self.projected[a as usize], self.projected[b as usize])
            else {
                continue;
            };
            target.trace_segment((va.at.x, va.at.y), (vb.at.x, vb.at.y), |t| {
                let elevation = mix(va.elevation, vb.elevation, t);
                let uv = va.uv.lerp(vb.uv, t);
                let (rgb, alpha) = shade_fragment(elevation, uv, u.stiffness);
                (alpha > 0.0).then_some((rgb, alpha))
            });
        }
    }
}
