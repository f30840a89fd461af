use crate::derived::DerivedState;
use std::fmt;

/// Inclusive slider range plus the step one key press moves it by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Position of `v` inside the range, 0..=1.
    pub fn fraction(&self, v: f32) -> f32 {
        let span = (self.max - self.min).max(1e-6);
        ((v - self.min) / span).clamp(0.0, 1.0)
    }
}

pub const MASS_RANGE: ParamRange = ParamRange::new(0.1, 5.0, 0.1);
pub const STIFFNESS_RANGE: ParamRange = ParamRange::new(0.0, 1.0, 0.01);
pub const REDSHIFT_RANGE: ParamRange = ParamRange::new(0.0, 5.0, 0.1);
pub const LENSING_RANGE: ParamRange = ParamRange::new(0.0, 2.0, 0.1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// Baryonic mass of the central galaxy.
    pub mass: f32,
    /// 0 = Newtonian, 1 = fully entropic.
    pub stiffness: f32,
    pub redshift: f32,
    pub lensing_strength: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 0.0,
            redshift: 0.0,
            lensing_strength: 1.0,
        }
    }
}

impl SimulationParams {
    /// Clamp every field into its slider range.
    pub fn clamped(self) -> Self {
        Self {
            mass: MASS_RANGE.clamp(self.mass),
            stiffness: STIFFNESS_RANGE.clamp(self.stiffness),
            redshift: REDSHIFT_RANGE.clamp(self.redshift),
            lensing_strength: LENSING_RANGE.clamp(self.lensing_strength),
        }
    }

    pub fn derived(&self) -> DerivedState {
        DerivedState::from_redshift(self.redshift)
    }

    /// Stiffness past the point where the Einstein ring switches on.
    pub fn emergent_regime(&self) -> bool {
        self.stiffness > 0.5
    }
}

/// The single parameter snapshot a session renders from.
///
/// Input handling writes it between frames; the render tick only reads it.
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    params: SimulationParams,
}

impl ParamStore {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> SimulationParams {
        self.params
    }

    /// Replace the whole snapshot. Values are taken as already validated.
    pub fn set_params(&mut self, params: SimulationParams) {
        if params != self.params {
            log::debug!(
                "params: mass={:.2} stiffness={:.2} redshift={:.2} lensing={:.2}",
                params.mass,
                params.stiffness,
                params.redshift,
                params.lensing_strength
            );
        }
        self.params = params;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    Parse {
        name: &'static str,
        raw: String,
    },
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { name, raw } => write!(f, "{name}: `{raw}` is not a number"),
            Self::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name}: {value} is outside {min}..={max}"),
        }
    }
}

impl std::error::Error for ParamError {}

fn parse_in_range(name: &'static str, range: ParamRange, raw: &str) -> Result<f32, ParamError> {
    let value = raw.trim().parse::<f32>().map_err(|_| ParamError::Parse {
        name,
        raw: raw.to_string(),
    })?;
    if !value.is_finite() || !range.contains(value) {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min: range.min,
            max: range.max,
        });
    }
    Ok(value)
}

pub fn parse_mass(raw: &str) -> Result<f32, ParamError> {
    parse_in_range("mass", MASS_RANGE, raw)
}

pub fn parse_stiffness(raw: &str) -> Result<f32, ParamError> {
    parse_in_range("stiffness", STIFFNESS_RANGE, raw)
}

pub fn parse_redshift(raw: &str) -> Result<f32, ParamError> {
    parse_in_range("redshift", REDSHIFT_RANGE, raw)
}

pub fn parse_lensing_strength(raw: &str) -> Result<f32, ParamError> {
    parse_in_range("lensing-strength", LENSING_RANGE, raw)
}
