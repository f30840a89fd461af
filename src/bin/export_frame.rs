use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use reactive_vacuum::params::{
    ParamStore, SimulationParams, parse_lensing_strength, parse_mass, parse_redshift,
    parse_stiffness,
};
use reactive_vacuum::visual::{SceneSettings, Visualizer, grid};

const DEFAULT_OUTPUT: &str = "vacuum.ppm";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "export_frame",
    version,
    about = "Render one Reactive Vacuum frame offline and write it as a binary PPM"
)]
pub(crate) struct Cli {
    #[arg(long, value_name = "PPM", default_value = DEFAULT_OUTPUT)]
    pub(crate) out: PathBuf,

    #[arg(long, default_value_t = 640)]
    pub(crate) width: usize,

    #[arg(long, default_value_t = 360)]
    pub(crate) height: usize,

    /// Seconds since start; drives the grid's breathing.
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    pub(crate) time: f32,

    #[arg(long, default_value_t = 1.0, value_parser = parse_mass)]
    pub(crate) mass: f32,

    #[arg(long, default_value_t = 0.0, value_parser = parse_stiffness)]
    pub(crate) stiffness: f32,

    #[arg(long, default_value_t = 0.0, value_parser = parse_redshift)]
    pub(crate) redshift: f32,

    #[arg(long, default_value_t = 1.0, value_parser = parse_lensing_strength)]
    pub(crate) lensing_strength: f32,

    #[arg(long, default_value_t = grid::DEFAULT_SUBDIVISIONS)]
    pub(crate) grid_subdivisions: usize,
}

impl Cli {
    pub(crate) fn params(&self) -> SimulationParams {
        SimulationParams {
            mass: self.mass,
            stiffness: self.stiffness,
            redshift: self.redshift,
            lensing_strength: self.lensing_strength,
        }
    }
}

pub(crate) fn validate_args(args: &Cli) -> Result<()> {
    if args.width == 0 {
        bail!("--width must be >= 1");
    }
    if args.height == 0 {
        bail!("--height must be >= 1");
    }
    if !args.time.is_finite() || args.time < 0.0 {
        bail!("--time must be a finite, non-negative number of seconds");
    }
    if args.grid_subdivisions == 0 {
        bail!("--grid-subdivisions must be >= 1");
    }
    Ok(())
}

/// Binary PPM (`P6`) from RGBA8; alpha is dropped.
pub(crate) fn encode_ppm(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>> {
    let need = width * height * 4;
    if rgba.len() < need {
        bail!(
            "pixel buffer too short: {} bytes for {}x{} (need {})",
            rgba.len(),
            width,
            height,
            need
        );
    }
    let mut out = format!("P6\n{width} {height}\n255\n").into_bytes();
    out.reserve(width * height * 3);
    for px in rgba[..need].chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }
    Ok(out)
}

pub(crate) fn render(args: &Cli) -> Result<Vec<u8>> {
    let store = ParamStore::new(args.params());
    let mut visualizer = Visualizer::new(
        &store,
        SceneSettings {
            grid_subdivisions: args.grid_subdivisions,
        },
    );
    visualizer.resize(args.width, args.height);
    let pixels = visualizer.render_frame(&store, args.time);
    encode_ppm(args.width, args.height, pixels)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    validate_args(&args)?;

    let bytes = render(&args)?;
    fs::write(&args.out, &bytes).with_context(|| format!("write {}", args.out.display()))?;
    println!(
        "wrote {} ({}x{}, mass {:.2}, stiffness {:.2}, z {:.2})",
        args.out.display(),
        args.width,
        args.height,
        args.mass,
        args.stiffness,
        args.redshift
    );
    Ok(())
}
