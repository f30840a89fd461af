use super::camera::Projector;
use super::raster::{Framebuffer, Rgb};
use glam::Vec3;

const CORE_GOLD: Rgb = [251.0 / 255.0, 191.0 / 255.0, 36.0 / 255.0];

/// The visible baryonic galaxy at the origin: an emissive gold disc with a
/// faint halo. Carries no uniforms; it reads the mass directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct GalaxyCore;

impl GalaxyCore {
    pub fn radius(mass: f32) -> f32 {
        mass.max(0.0) * 0.2
    }

    pub fn draw(&self, mass: f32, projector: &Projector, target: &mut Framebuffer) {
        let Some(c) = projector.project(Vec3::ZERO) else {
            return;
        };
        let radius_px = projector.pixels_at(Self::radius(mass), c.depth);
        if !radius_px.is_finite() || radius_px <= 0.0 {
            return;
        }
        // Halo reach grows with mass, the way the point light's intensity does.
        let halo_px = radius_px * (1.5 + mass * 0.5);

        let max_x = target.width() as isize - 1;
        let max_y = target.height() as isize - 1;
        let x0 = ((c.x - halo_px).floor() as isize).max(0);
        let x1 = ((c.x + halo_px).ceil() as isize).min(max_x);
        let y0 = ((c.y - halo_px).floor() as isize).max(0);
        let y1 = ((c.y + halo_px).ceil() as isize).min(max_y);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = (x as f32 + 0.5 - c.x).hypot(y as f32 + 0.5 - c.y);
                if d <= radius_px {
                    // Hot centre fading to the base gold at the limb.
                    let k = 1.0 - (d / radius_px).powi(2);
                    let rgb = [
                        CORE_GOLD[0] + (1.0 - CORE_GOLD[0]) * k * 0.8,
                        CORE_GOLD[1] + (1.0 - CORE_GOLD[1]) * k * 0.8,
                        CORE_GOLD[2] + (1.0 - CORE_GOLD[2]) * k * 0.8,
                    ];
                    target.blend(x, y, rgb, 1.0);
                } else if d <= halo_px {
                    let fall = 1.0 - (d - radius_px) / (halo_px - radius_px).max(1e-3);
                    target.blend(x, y, CORE_GOLD, fall * fall * 0.35);
                }
            }
        }
    }
}
