use crate::config::{Config, RendererMode};
use crate::controls::ControlPanel;
use crate::params::{ParamStore, SimulationParams};
use crate::render::{AsciiRenderer, Frame, HalfBlockRenderer, Renderer};
use crate::terminal::TerminalSession;
use crate::visual::{SceneSettings, Visualizer, grid};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::BufWriter;
use std::time::{Duration, Instant};

const ORBIT_STEP: f32 = 0.08;
const DOLLY_STEP: f32 = 1.1;
const BAR_WIDTH: usize = 20;

/// What a key press asks the loop to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Mutable session state the key handler may touch.
pub struct Session {
    pub store: ParamStore,
    pub panel: ControlPanel,
    pub show_hud: bool,
    pub show_help: bool,
}

impl Session {
    pub fn new(params: SimulationParams, show_hud: bool) -> Self {
        Self {
            store: ParamStore::new(params),
            panel: ControlPanel::new(),
            show_hud,
            show_help: false,
        }
    }
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    if cfg.grid_subdivisions < grid::DEFAULT_SUBDIVISIONS {
        log::warn!(
            "grid subdivisions {} below {}; the well will look faceted",
            cfg.grid_subdivisions,
            grid::DEFAULT_SUBDIVISIONS
        );
    }

    let mut term = TerminalSession::enter(cfg.sync_updates)?;
    let mut out = BufWriter::new(TerminalSession::stdout());

    let mut renderer: Box<dyn Renderer> = match cfg.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
    };
    let (px_w_mul, px_h_mul) = renderer.cell_pixels();

    let mut session = Session::new(cfg.initial_params(), cfg.hud);
    let mut visualizer = Visualizer::new(
        &session.store,
        SceneSettings {
            grid_subdivisions: cfg.grid_subdivisions,
        },
    );

    let (cols, rows) = term.size();
    log::info!(
        "session start: {}x{} renderer={} grid={} fps={}",
        cols,
        rows,
        renderer.name(),
        cfg.grid_subdivisions,
        cfg.fps
    );

    let start = Instant::now();
    let mut fps = FpsCounter::new();
    let mut tuning = RuntimeTuning::new(cfg.adaptive_quality);
    let mut last_frame_ms = 0.0f32;

    loop {
        let now = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    let outcome =
                        handle_key(k.code, k.modifiers, &mut session, visualizer.camera_mut());
                    if outcome == KeyOutcome::Quit {
                        log::info!("session end after {} frames", visualizer.frames_rendered());
                        return Ok(());
                    }
                }
                Event::Resize(c, r) => term.on_resize(c, r),
                _ => {}
            }
        }

        let (term_cols, term_rows) = term.refresh_size()?;
        let params = session.store.params();
        let hud = if session.show_hud {
            build_hud(&session.panel, &params, fps.fps(), last_frame_ms, tuning.scale, renderer.name())
        } else {
            String::new()
        };
        let hud_rows = (hud.lines().count() as u16).min(term_rows.saturating_sub(1));
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);
        let w = term_cols as usize * px_w_mul;
        let h = visual_rows as usize * px_h_mul;

        visualizer.resize(w, h);
        visualizer.set_scale(tuning.scale);
        let pixels = visualizer.render_frame(&session.store, now.duration_since(start).as_secs_f32());

        let frame = Frame {
            term_cols,
            term_rows,
            visual_rows,
            pixel_width: w,
            pixel_height: h,
            pixels_rgba: pixels,
            hud: &hud,
            hud_rows,
            overlay: session.show_help.then_some(help_popup_text()),
            sync_updates: term.sync_updates(),
        };
        renderer.render(&frame, &mut out)?;

        fps.tick();
        last_frame_ms = now.elapsed().as_secs_f32() * 1000.0;
        tuning.update(last_frame_ms, 1000.0 / cfg.fps.max(1) as f32);

        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

/// Apply one key press to the session and camera.
pub fn handle_key(
    code: KeyCode,
    mods: KeyModifiers,
    session: &mut Session,
    camera: &mut crate::visual::OrbitCamera,
) -> KeyOutcome {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return KeyOutcome::Quit;
    }
    let coarse = if mods.contains(KeyModifiers::SHIFT) { 5 } else { 1 };

    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return KeyOutcome::Quit,
        KeyCode::Up => session.panel.focus_prev(),
        KeyCode::Down | KeyCode::Tab => session.panel.focus_next(),
        KeyCode::Left | KeyCode::Right => {
            let dir = if code == KeyCode::Right { 1 } else { -1 };
            let next = session.panel.nudge(session.store.params(), dir * coarse);
            session.store.set_params(next);
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            session.store.set_params(SimulationParams::default());
        }
        KeyCode::Char('a') => camera.orbit(-ORBIT_STEP, 0.0),
        KeyCode::Char('d') => camera.orbit(ORBIT_STEP, 0.0),
        KeyCode::Char('w') => camera.orbit(0.0, -ORBIT_STEP),
        KeyCode::Char('s') => camera.orbit(0.0, ORBIT_STEP),
        KeyCode::Char('+') | KeyCode::Char('=') => camera.dolly(1.0 / DOLLY_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => camera.dolly(DOLLY_STEP),
        KeyCode::Char('i') | KeyCode::Char('I') => session.show_hud = !session.show_hud,
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => {
            session.show_help = !session.show_help
        }
        _ => {}
    }
    KeyOutcome::Continue
}

pub fn build_hud(
    panel: &ControlPanel,
    params: &SimulationParams,
    fps: f32,
    frame_ms: f32,
    scale: usize,
    renderer_name: &str,
) -> String {
    let mut lines = panel.describe(params, BAR_WIDTH);
    lines.push(format!(
        "  THE REACTIVE VACUUM | FPS {:>4.1} | {:>4.1} ms | block {} | {} | ? help",
        fps,
        frame_ms,
        scale,
        renderer_name
    ));
    lines.join("\n")
}

fn help_popup_text() -> &'static str {
    "Reactive Vacuum Keys\n\
up/down or tab  choose slider\n\
left/right  move slider (shift: x5)\n\
r  reset parameters\n\
w/a/s/d  orbit camera\n\
+ / -  move camera in / out\n\
i  show/hide HUD\n\
? or h or F1  toggle this help\n\
q or esc  quit\n\
\n\
Raise stiffness to deepen the well at the edges (halo).\n\
Past 0.5 stiffness the Einstein ring switches on.\n\
Raise redshift to scale a0 with cosmic expansion."
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let dt = self.last.elapsed().as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.last = Instant::now();
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}

const MAX_SCALE: usize = 3;

/// Coarsens the background's pixel blocks when frames run long and refines
/// them again when there is headroom.
pub struct RuntimeTuning {
    pub scale: usize,
    adaptive: bool,
    ema_ms: f32,
}

impl RuntimeTuning {
    pub fn new(adaptive: bool) -> Self {
        Self {
            scale: 1,
            adaptive,
            ema_ms: 0.0,
        }
    }

    pub fn update(&mut self, frame_ms: f32, target_ms: f32) {
        if !self.adaptive {
            return;
        }
        self.ema_ms = if self.ema_ms == 0.0 {
            frame_ms
        } else {
            self.ema_ms * 0.95 + frame_ms * 0.05
        };

        let before = self.scale;
        if self.ema_ms > target_ms * 1.22 {
            self.scale = (self.scale + 1).min(MAX_SCALE);
        } else if self.ema_ms < target_ms * 0.72 {
            self.scale = self.scale.saturating_sub(1).max(1);
        }
        if self.scale != before {
            log::debug!(
                "block scale {} -> {} (ema {:.1} ms, budget {:.1} ms)",
                before,
                self.scale,
                self.ema_ms,
                target_ms
            );
        }
    }
}
