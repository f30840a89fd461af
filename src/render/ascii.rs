use crate::render::{Frame, Renderer, close_paint, luma_u8, open_paint};
use std::io::Write;

// Sparse at the dark end: most of the sky is black with single bright stars.
const RAMP: &[u8] = b" .'`:-=+*o%#@";

/// One pixel per cell, brightness picked from a character ramp, tinted with
/// the pixel colour.
pub struct AsciiRenderer {
    fg: Option<(u8, u8, u8)>,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { fg: None }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn cell_pixels(&self) -> (usize, usize) {
        (1, 1)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, rows)) = open_paint(frame, self.cell_pixels(), out)? else {
            return Ok(());
        };
        self.fg = None;

        for y in 0..rows {
            for x in 0..cols {
                let px = frame.pixel_rgb(x, y);
                let l = luma_u8(px.0, px.1, px.2) as usize;
                let ch = RAMP[l * (RAMP.len() - 1) / 255];
                if self.fg != Some(px) {
                    write!(out, "\x1b[38;2;{};{};{}m", px.0, px.1, px.2)?;
                    self.fg = Some(px);
                }
                out.write_all(&[ch])?;
            }
            // A newline after the last row scrolls the screen.
            if y + 1 < rows {
                out.write_all(b"\r\n")?;
            }
        }

        close_paint(frame, cols, rows, out)
    }
}
