//! Background plane: a procedural starfield seen through the central mass.
//!
//! Every pixel looks up the starfield at a position pulled towards the
//! centre. The pull is a Newtonian `1/r` deflection multiplied by how much
//! stronger the entropic force law is than Newton's at that radius, blended
//! in by the stiffness.

use super::raster::{Framebuffer, Rgb, add_rgb, fract, mix, step};
use super::{DrawCtx, ShadingEngine};
use crate::params::ParamStore;
use crate::uniforms::{U_A0, U_LENS_STRENGTH, U_MASS, U_STIFFNESS, UniformSet};
use glam::Vec2;

const MIN_LENS_RADIUS: f32 = 0.01;
const MIN_FORCE_RADIUS: f32 = 0.05;
/// Screen radius → force-law radius.
const FORCE_RADIUS_SCALE: f32 = 10.0;
const STAR_DENSITY: f32 = 200.0;
const STAR_THRESHOLD: f32 = 0.98;
/// Stiffness above which the Einstein ring is drawn.
pub const RING_STIFFNESS_THRESHOLD: f32 = 0.5;

const GLOW_TINT: Rgb = [1.0, 0.8, 0.4];
const RING_TINT: Rgb = [0.0, 0.2, 0.5];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensUniforms {
    pub mass: f32,
    pub a0: f32,
    pub stiffness: f32,
    pub lens_strength: f32,
}

impl LensUniforms {
    pub fn from_set(set: &UniformSet) -> Self {
        Self {
            mass: set.value(U_MASS),
            a0: set.value(U_A0),
            stiffness: set.value(U_STIFFNESS),
            lens_strength: set.value(U_LENS_STRENGTH),
        }
    }
}

/// Screen-space displacement of a ray passing at distance `r` from the centre.
pub fn base_deflection(r: f32, mass: f32) -> f32 {
    mass * 0.02 / r.max(MIN_LENS_RADIUS)
}

/// Ratio of entropic to Newtonian acceleration at force-law radius `r`.
///
/// Uses `g = (gN + sqrt(gN² + 4 gN a0)) / 2`, which is never below `gN`.
pub fn entropic_correction(r: f32, mass: f32, a0: f32) -> f32 {
    let r_safe = r.max(MIN_FORCE_RADIUS);
    let g_newton = mass / (r_safe * r_safe);
    if g_newton.is_nan() || g_newton <= 0.0 {
        return 1.0;
    }
    let term = (g_newton * g_newton + 4.0 * g_newton * a0.max(0.0)).sqrt();
    let g_entropic = (g_newton + term) / 2.0;
    g_entropic / g_newton
}

/// Correction actually applied at screen radius `r`.
pub fn active_correction(r: f32, u: &LensUniforms) -> f32 {
    let correction = entropic_correction(r * FORCE_RADIUS_SCALE, u.mass, u.a0);
    mix(1.0, correction, u.stiffness)
}

/// Where the starfield is sampled for screen position `uv`.
pub fn distort_uv(uv: Vec2, u: &LensUniforms) -> Vec2 {
    let offset = uv - Vec2::splat(0.5);
    let r = offset.length();
    let dir = offset.normalize_or_zero();
    uv - dir * base_deflection(r, u.mass) * active_correction(r, u) * u.lens_strength
}

fn hash21(p: Vec2) -> f32 {
    fract((p.dot(Vec2::new(12.9898, 78.233))).sin() * 43_758.547)
}

/// Smoothly interpolated lattice noise in 0..1.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let a = hash21(i);
    let b = hash21(i + Vec2::new(1.0, 0.0));
    let c = hash21(i + Vec2::new(0.0, 1.0));
    let d = hash21(i + Vec2::new(1.0, 1.0));
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Star brightness at `uv`: the noise value where it clears the threshold, else 0.
pub fn star_field(uv: Vec2) -> f32 {
    let n = value_noise(uv * STAR_DENSITY);
    step(STAR_THRESHOLD, n) * n
}

pub fn accretion_glow(r: f32, mass: f32) -> f32 {
    let r = r.max(MIN_LENS_RADIUS);
    0.02 / (r * r) * mass * 0.5
}

/// Rough critical radius for the ring highlight.
pub fn ring_radius(mass: f32, a0: f32) -> f32 {
    (mass * a0).max(0.0).sqrt() * 0.2
}

/// Ring highlight intensity; a hard switch on stiffness, not a ramp.
pub fn einstein_ring(r: f32, u: &LensUniforms) -> f32 {
    if u.stiffness <= RING_STIFFNESS_THRESHOLD {
        return 0.0;
    }
    let ring_dist = (r - ring_radius(u.mass, u.a0)).abs();
    (-ring_dist * 20.0).exp() * u.stiffness * 0.2
}

/// Final colour of the background at `uv` (x right, y up).
pub fn shade_pixel(uv: Vec2, u: &LensUniforms) -> Rgb {
    let r = (uv - Vec2::splat(0.5)).length();
    let star = star_field(distort_uv(uv, u));
    let mut color = [star, star, star];
    color = add_rgb(color, GLOW_TINT, accretion_glow(r, u.mass));
    add_rgb(color, RING_TINT, einstein_ring(r, u))
}

/// Lens UV of pixel position (`px`, `py`), y growing downwards.
///
/// The frame height spans 0..1 and x is stretched by the aspect ratio, so
/// equal pixel distances from the centre give equal `r` and the ring stays round.
pub fn screen_uv(px: f32, py: f32, w: usize, h: usize) -> Vec2 {
    let wf = w.max(1) as f32;
    let hf = h.max(1) as f32;
    Vec2::new(0.5 + (px - wf * 0.5) / hf, 1.0 - py / hf)
}

pub struct LensingEngine {
    uniforms: UniformSet,
}

impl LensingEngine {
    pub fn new(store: &ParamStore) -> Self {
        let p = store.params();
        Self {
            uniforms: UniformSet::declare(&[
                (U_MASS, p.mass),
                (U_STIFFNESS, p.stiffness),
                (U_A0, p.derived().a0),
                (U_LENS_STRENGTH, p.lensing_strength),
            ]),
        }
    }
}

impl ShadingEngine for LensingEngine {
    fn name(&self) -> &'static str {
        "lensing-background"
    }

    fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    fn uniforms_mut(&mut self) -> &mut UniformSet {
        &mut self.uniforms
    }

    fn draw(&mut self, ctx: &DrawCtx, target: &mut Framebuffer) {
        let u = LensUniforms::from_set(&self.uniforms);
        let w = target.width();
        let h = target.height();
        if w == 0 || h == 0 {
            return;
        }
        let scale = ctx.scale.max(1);

        for by in (0..h).step_by(scale) {
            let cy = by as f32 + scale.min(h - by) as f32 * 0.5;
            for bx in (0..w).step_by(scale) {
                let cx = bx as f32 + scale.min(w - bx) as f32 * 0.5;
                let uv = screen_uv(cx, cy, w, h);
                target.fill_block(bx, by, scale, shade_pixel(uv, &u));
            }
        }
    }
}
