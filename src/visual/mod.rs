pub mod camera;
mod galaxy;
pub mod grid;
pub mod lensing;
pub mod mesh;
pub mod raster;
pub mod sync;

use crate::params::ParamStore;
use crate::uniforms::UniformSet;

pub use camera::{OrbitCamera, Projector};
pub use galaxy::GalaxyCore;
pub use grid::GridEngine;
pub use lensing::LensingEngine;
pub use raster::Framebuffer;
pub use sync::{FrameInputs, sync_uniforms};

/// Per-frame drawing context shared by all engines.
pub struct DrawCtx {
    pub projector: Projector,
    /// Block size for per-pixel work; 1 is full resolution.
    pub scale: usize,
}

/// A shading stage with its own fixed set of named uniforms.
pub trait ShadingEngine {
    fn name(&self) -> &'static str;
    fn uniforms(&self) -> &UniformSet;
    fn uniforms_mut(&mut self) -> &mut UniformSet;
    fn draw(&mut self, ctx: &DrawCtx, target: &mut Framebuffer);
}

#[derive(Debug, Clone, Copy)]
pub struct SceneSettings {
    pub grid_subdivisions: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            grid_subdivisions: grid::DEFAULT_SUBDIVISIONS,
        }
    }
}

/// Owns the two engines, the core sprite, the camera and the framebuffer,
/// and runs one tick per call to [`Visualizer::render_frame`].
pub struct Visualizer {
    lensing: LensingEngine,
    grid: GridEngine,
    core: GalaxyCore,
    camera: OrbitCamera,
    target: Framebuffer,
    scale: usize,
    frames: u64,
}

impl Visualizer {
    pub fn new(store: &ParamStore, settings: SceneSettings) -> Self {
        Self {
            lensing: LensingEngine::new(store),
            grid: GridEngine::new(store, settings.grid_subdivisions),
            core: GalaxyCore,
            camera: OrbitCamera::default(),
            target: Framebuffer::new(0, 0),
            scale: 1,
            frames: 0,
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        if w == self.target.width() && h == self.target.height() {
            return;
        }
        log::debug!("framebuffer resize to {w}x{h}");
        self.target.resize(w, h);
    }

    pub fn set_scale(&mut self, scale: usize) {
        self.scale = scale.max(1);
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn lensing(&self) -> &LensingEngine {
        &self.lensing
    }

    pub fn grid(&self) -> &GridEngine {
        &self.grid
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.target
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Derive, sync uniforms, then draw background, grid and core in that
    /// order. Returns the RGBA pixels of the finished frame.
    pub fn render_frame(&mut self, store: &ParamStore, elapsed: f32) -> &[u8] {
        let inputs = FrameInputs::capture(store, elapsed);
        let mut engines: [&mut dyn ShadingEngine; 2] = [&mut self.lensing, &mut self.grid];
        sync_uniforms(&inputs, &mut engines);

        let (w, h) = (self.target.width(), self.target.height());
        if w > 0 && h > 0 {
            let ctx = DrawCtx {
                projector: self.camera.projector(w, h),
                scale: self.scale,
            };
            self.target.clear();
            self.lensing.draw(&ctx, &mut self.target);
            self.grid.draw(&ctx, &mut self.target);
            self.core.draw(inputs.params.mass, &ctx.projector, &mut self.target);
        }

        self.frames += 1;
        self.target.pixels()
    }
}
