use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneVertex {
    /// Undeformed position in the plane's own XY.
    pub pos: Vec2,
    pub uv: Vec2,
}

/// Subdivided plane centred on the origin, rows top to bottom.
///
/// UVs run 0..1 left to right and 1..0 top to bottom, so `uv.y` points the
/// same way as `pos.y`.
#[derive(Debug, Clone)]
pub struct PlaneMesh {
    vertices: Vec<PlaneVertex>,
    edges: Vec<(u32, u32)>,
}

impl PlaneMesh {
    pub fn new(size: f32, segments: usize) -> Self {
        let segments = segments.max(1);
        let stride = segments + 1;
        let step = size / segments as f32;
        let half = size * 0.5;

        let mut vertices = Vec::with_capacity(stride * stride);
        for iy in 0..stride {
            for ix in 0..stride {
                vertices.push(PlaneVertex {
                    pos: Vec2::new(ix as f32 * step - half, half - iy as f32 * step),
                    uv: Vec2::new(
                        ix as f32 / segments as f32,
                        1.0 - iy as f32 / segments as f32,
                    ),
                });
            }
        }

        // Triangle edges of the two faces per quad, each listed once.
        let idx = |ix: usize, iy: usize| (iy * stride + ix) as u32;
        let mut edges = Vec::with_capacity(segments * segments * 3 + segments * 2);
        for iy in 0..stride {
            for ix in 0..stride {
                if ix < segments {
                    edges.push((idx(ix, iy), idx(ix + 1, iy)));
                }
                if iy < segments {
                    edges.push((idx(ix, iy), idx(ix, iy + 1)));
                }
                if ix < segments && iy < segments {
                    edges.push((idx(ix, iy + 1), idx(ix + 1, iy)));
                }
            }
        }

        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[PlaneVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }
}
