//! RGBA8 framebuffer plus the handful of shading helpers the engines share.

pub type Rgb = [f32; 3];

pub struct Framebuffer {
    w: usize,
    h: usize,
    pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn new(w: usize, h: usize) -> Self {
        let mut fb = Self {
            w: 0,
            h: 0,
            pixels: Vec::new(),
        };
        fb.resize(w, h);
        fb
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.pixels.resize(w.saturating_mul(h).saturating_mul(4), 0);
        self.clear();
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[0, 0, 0, 255]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.w || y >= self.h {
            return None;
        }
        let i = (y * self.w + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Write one colour into a `scale`×`scale` block anchored at (bx, by).
    pub fn fill_block(&mut self, bx: usize, by: usize, scale: usize, rgb: Rgb) {
        let c = to_rgb8(rgb);
        for y in by..(by + scale).min(self.h) {
            for x in bx..(bx + scale).min(self.w) {
                let i = (y * self.w + x) * 4;
                self.pixels[i] = c[0];
                self.pixels[i + 1] = c[1];
                self.pixels[i + 2] = c[2];
                self.pixels[i + 3] = 255;
            }
        }
    }

    /// Source-over blend; the destination stays opaque.
    pub fn blend(&mut self, x: isize, y: isize, rgb: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let i = (y as usize * self.w + x as usize) * 4;
        let src = to_rgb8(rgb);
        for ch in 0..3 {
            let dst = self.pixels[i + ch] as f32;
            self.pixels[i + ch] = (dst * (1.0 - a) + src[ch] as f32 * a).round() as u8;
        }
        self.pixels[i + 3] = 255;
    }

    /// Walk the segment a→b, call `shade` with the interpolation parameter and
    /// blend the strongest fragment that lands in each pixel.
    ///
    /// Sampling is several times denser than the pixel grid so that thin
    /// features in the fragment stage are not stepped over.
    pub fn trace_segment<F>(&mut self, a: (f32, f32), b: (f32, f32), mut shade: F)
    where
        F: FnMut(f32) -> Option<(Rgb, f32)>,
    {
        const OVERSAMPLE: f32 = 4.0;
        let len = (b.0 - a.0).hypot(b.1 - a.1);
        if !len.is_finite() {
            return;
        }
        let steps = ((len * OVERSAMPLE).ceil() as usize).max(1);

        let mut pending: Option<(isize, isize, Rgb, f32)> = None;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let px = (a.0 + (b.0 - a.0) * t).floor() as isize;
            let py = (a.1 + (b.1 - a.1) * t).floor() as isize;
            let frag = shade(t);

            match pending {
                Some((x, y, ref mut rgb, ref mut alpha)) if x == px && y == py => {
                    if let Some((c, al)) = frag {
                        if al > *alpha {
                            *rgb = c;
                            *alpha = al;
                        }
                    }
                }
                _ => {
                    if let Some((x, y, rgb, alpha)) = pending.take() {
                        self.blend(x, y, rgb, alpha);
                    }
                    let (rgb, alpha) = frag.unwrap_or(([0.0; 3], 0.0));
                    pending = Some((px, py, rgb, alpha));
                }
            }
        }
        if let Some((x, y, rgb, alpha)) = pending {
            self.blend(x, y, rgb, alpha);
        }
    }
}

pub fn to_rgb8(c: Rgb) -> [u8; 3] {
    [
        (c[0].clamp(0.0, 1.0) * 255.0) as u8,
        (c[1].clamp(0.0, 1.0) * 255.0) as u8,
        (c[2].clamp(0.0, 1.0) * 255.0) as u8,
    ]
}

/// `a*(1-t) + b*t`, exact at both ends.
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

pub fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [mix(a[0], b[0], t), mix(a[1], b[1], t), mix(a[2], b[2], t)]
}

pub fn add_rgb(a: Rgb, b: Rgb, k: f32) -> Rgb {
    [a[0] + b[0] * k, a[1] + b[1] * k, a[2] + b[2] * k]
}

pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
