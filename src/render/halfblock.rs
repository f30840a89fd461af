use crate::render::{Frame, Renderer, close_paint, open_paint};
use std::io::Write;

/// Two vertically stacked pixels per cell: upper half block with the top
/// pixel as foreground and the bottom pixel as background.
pub struct HalfBlockRenderer {
    fg: Option<(u8, u8, u8)>,
    bg: Option<(u8, u8, u8)>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self { fg: None, bg: None }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn cell_pixels(&self) -> (usize, usize) {
        (1, 2)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, rows)) = open_paint(frame, self.cell_pixels(), out)? else {
            return Ok(());
        };
        self.fg = None;
        self.bg = None;

        for row in 0..rows {
            for x in 0..cols {
                let top = frame.pixel_rgb(x, row * 2);
                let bottom = frame.pixel_rgb(x, row * 2 + 1);
                if self.fg != Some(top) {
                    write!(out, "\x1b[38;2;{};{};{}m", top.0, top.1, top.2)?;
                    self.fg = Some(top);
                }
                if self.bg != Some(bottom) {
                    write!(out, "\x1b[48;2;{};{};{}m", bottom.0, bottom.1, bottom.2)?;
                    self.bg = Some(bottom);
                }
                out.write_all("\u{2580}".as_bytes())?;
            }
            // A newline after the last row scrolls the screen.
            if row + 1 < rows {
                out.write_all(b"\r\n")?;
            }
        }

        close_paint(frame, cols, rows, out)
    }
}
