use crate::params::{
    SimulationParams, parse_lensing_strength, parse_mass, parse_redshift, parse_stiffness,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "reactive-vacuum",
    version,
    about = "Entropic (Verlinde) gravity in the terminal: a deforming spacetime grid over a lensed starfield"
)]
pub struct Config {
    /// Baryonic mass of the central galaxy (0.1..=5).
    #[arg(long, default_value_t = 1.0, value_parser = parse_mass)]
    pub mass: f32,

    /// Blend from Newtonian (0) to entropic (1) gravity.
    #[arg(long, default_value_t = 0.0, value_parser = parse_stiffness)]
    pub stiffness: f32,

    /// Cosmological redshift; sets the acceleration scale a0 (0..=5).
    #[arg(long, default_value_t = 0.0, value_parser = parse_redshift)]
    pub redshift: f32,

    /// Multiplier on the background light bending (0..=2).
    #[arg(long, default_value_t = 1.0, value_parser = parse_lensing_strength)]
    pub lensing_strength: f32,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    /// Quads per side of the spacetime grid.
    #[arg(long, default_value_t = 128)]
    pub grid_subdivisions: usize,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub adaptive_quality: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub hud: bool,

    /// Write logs here (RUST_LOG still applies). Without it logging is off
    /// unless RUST_LOG is set.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
}

impl Config {
    pub fn initial_params(&self) -> SimulationParams {
        SimulationParams {
            mass: self.mass,
            stiffness: self.stiffness,
            redshift: self.redshift,
            lensing_strength: self.lensing_strength,
        }
    }
}
