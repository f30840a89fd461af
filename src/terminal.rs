//! The terminal as the visualizer sees it: the modes it switched on, the size
//! it last drew at, and whether frames go out as synchronized updates.

use anyhow::Context;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, ClearType},
};
use std::io::{Stdout, Write, stdout};

/// Smallest grid the visual plus one HUD row can be laid out in.
pub const MIN_COLS: u16 = 4;
pub const MIN_ROWS: u16 = 2;

/// Which terminal modes a session has turned on and must turn off again.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub raw: bool,
    pub alt_screen: bool,
    pub cursor_hidden: bool,
    pub sync_updates: bool,
}

impl Modes {
    /// Escape bytes that undo these modes, apart from raw mode which is a
    /// termios setting rather than a sequence.
    pub fn restore_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.sync_updates {
            // A frame may have been interrupted mid-paint.
            out.extend_from_slice(b"\x1b[?2026l");
        }
        if self.alt_screen {
            // Renderers turn autowrap off while painting.
            out.extend_from_slice(b"\x1b[?7h\x1b[0m");
        }
        out
    }
}

/// Last known terminal size, fed by resize events and a per-frame poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeTracker {
    cols: u16,
    rows: u16,
}

impl SizeTracker {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Record a size. Returns whether it differs from the previous one.
    pub fn observe(&mut self, cols: u16, rows: u16) -> bool {
        if (cols, rows) == (self.cols, self.rows) {
            return false;
        }
        log::debug!("terminal {}x{} -> {}x{}", self.cols, self.rows, cols, rows);
        self.cols = cols;
        self.rows = rows;
        true
    }

    pub fn fits(&self) -> bool {
        self.cols >= MIN_COLS && self.rows >= MIN_ROWS
    }
}

/// Owns the terminal from `enter` until drop.
pub struct TerminalSession {
    modes: Modes,
    size: SizeTracker,
}

impl TerminalSession {
    pub fn enter(sync_updates: bool) -> anyhow::Result<Self> {
        let (cols, rows) = terminal::size().context("query terminal size")?;
        let size = SizeTracker::new(cols, rows);
        if !size.fits() {
            anyhow::bail!(
                "terminal too small (need at least {MIN_COLS}x{MIN_ROWS}, got {cols}x{rows})"
            );
        }

        let mut session = Self {
            modes: Modes::default(),
            size,
        };
        terminal::enable_raw_mode().context("enable raw mode")?;
        session.modes.raw = true;

        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)
            .context("enter alternate screen")?;
        session.modes.alt_screen = true;
        out.execute(terminal::Clear(ClearType::All))
            .context("clear screen")?;
        out.execute(cursor::Hide).context("hide cursor")?;
        session.modes.cursor_hidden = true;
        session.modes.sync_updates = sync_updates;

        log::debug!("terminal session entered at {cols}x{rows}: {:?}", session.modes);
        Ok(session)
    }

    pub fn stdout() -> Stdout {
        stdout()
    }

    pub fn sync_updates(&self) -> bool {
        self.modes.sync_updates
    }

    /// Current (cols, rows) as last observed.
    pub fn size(&self) -> (u16, u16) {
        self.size.size()
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.size.observe(cols, rows);
    }

    /// Re-query the size; resize events are not delivered on every platform.
    pub fn refresh_size(&mut self) -> anyhow::Result<(u16, u16)> {
        let (cols, rows) = terminal::size().context("query terminal size")?;
        self.size.observe(cols, rows);
        Ok(self.size.size())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = out.write_all(&self.modes.restore_bytes());
        let _ = out.flush();
        if self.modes.cursor_hidden {
            let _ = out.execute(cursor::Show);
        }
        if self.modes.alt_screen {
            let _ = out.execute(terminal::LeaveAlternateScreen);
        }
        if self.modes.raw {
            let _ = terminal::disable_raw_mode();
        }
        log::debug!("terminal session restored: {:?}", self.modes);
    }
}
