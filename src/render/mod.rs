mod ascii;
mod halfblock;

pub use ascii::AsciiRenderer;
pub use halfblock::HalfBlockRenderer;

use std::io::Write;

/// One finished visual frame plus the text drawn around it.
pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    pub visual_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels_rgba: &'a [u8],
    pub hud: &'a str,
    pub hud_rows: u16,
    pub overlay: Option<&'a str>,
    pub sync_updates: bool,
}

impl Frame<'_> {
    fn pixel_rgb(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let i = (y * self.pixel_width + x) * 4;
        (
            self.pixels_rgba[i],
            self.pixels_rgba[i + 1],
            self.pixels_rgba[i + 2],
        )
    }
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    /// Pixels per terminal cell, (columns, rows).
    fn cell_pixels(&self) -> (usize, usize);
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

/// Validate the frame geometry and open the paint. `None` means there is
/// nothing sensible to draw and the caller should return quietly.
fn open_paint(
    frame: &Frame<'_>,
    cell: (usize, usize),
    out: &mut dyn Write,
) -> anyhow::Result<Option<(usize, usize)>> {
    let cols = frame.term_cols as usize;
    let rows = frame.visual_rows as usize;
    if cols == 0 || rows == 0 || frame.pixel_width == 0 || frame.pixel_height == 0 {
        return Ok(None);
    }
    if frame.pixel_width != cols * cell.0 || frame.pixel_height != rows * cell.1 {
        return Ok(None);
    }
    let need = frame.pixel_width * frame.pixel_height * 4;
    if frame.pixels_rgba.len() < need {
        return Ok(None);
    }

    if frame.sync_updates {
        out.write_all(b"\x1b[?2026h")?;
    }
    // Home, reset, autowrap off so full-width rows don't spill.
    out.write_all(b"\x1b[H\x1b[0m\x1b[?7l")?;
    Ok(Some((cols, rows)))
}

/// HUD rows, optional overlay, autowrap back on, end of synchronized update.
fn close_paint(frame: &Frame<'_>, cols: usize, rows: usize, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut lines = frame.hud.lines();
    for i in 0..frame.hud_rows as usize {
        write!(out, "\x1b[{};1H\x1b[0m\x1b[2K", rows + i + 1)?;
        if let Some(line) = lines.next() {
            let clipped: String = line.chars().take(cols).collect();
            out.write_all(clipped.as_bytes())?;
        }
    }

    if let Some(text) = frame.overlay {
        draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
    }

    out.write_all(b"\x1b[0m\x1b[?7h")?;
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026l")?;
    }
    out.flush()?;
    Ok(())
}

/// Centred text box over the visual. The first line is the title.
pub fn draw_overlay_popup(
    out: &mut dyn Write,
    term_cols: u16,
    term_rows: u16,
    text: &str,
) -> anyhow::Result<()> {
    let cols = term_cols as usize;
    let rows = term_rows as usize;
    if text.trim().is_empty() || cols < 8 || rows < 4 {
        return Ok(());
    }

    let max_inner = cols - 6;
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let chars: Vec<char> = raw.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(max_inner) {
            lines.push(chunk.iter().collect());
        }
    }

    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(1, max_inner);
    let body = lines.len().min(rows - 3);
    let box_w = inner + 4;
    let box_h = body + 2;
    let left = (cols - box_w) / 2 + 1;
    let top = (rows.saturating_sub(box_h)) / 2 + 1;
    let rule = "-".repeat(box_w - 2);

    out.write_all(b"\x1b[0m\x1b[38;2;226;236;250m\x1b[48;2;6;10;22m")?;
    write!(out, "\x1b[{top};{left}H+{rule}+")?;
    for (i, line) in lines.iter().take(body).enumerate() {
        let row = top + 1 + i;
        if i == 0 {
            write!(
                out,
                "\x1b[{row};{left}H| \x1b[1m\x1b[38;2;56;189;248m{line:<inner$}\x1b[22m\x1b[38;2;226;236;250m |"
            )?;
        } else {
            write!(out, "\x1b[{row};{left}H| {line:<inner$} |")?;
        }
    }
    write!(out, "\x1b[{};{left}H+{rule}+", top + box_h - 1)?;
    out.write_all(b"\x1b[0m")?;
    Ok(())
}

/// Rec. 601 luma.
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}
