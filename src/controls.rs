//! The slider panel: which parameter has focus and how a key press moves it.
//!
//! This is the UI side of the parameter store. It is the only place values
//! are clamped; the render path trusts what it is given.

use crate::params::{
    LENSING_RANGE, MASS_RANGE, ParamRange, REDSHIFT_RANGE, STIFFNESS_RANGE, SimulationParams,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    Stiffness,
    Mass,
    Redshift,
    LensingStrength,
}

impl Slider {
    /// Panel order, top to bottom.
    pub const fn all() -> [Self; 4] {
        [
            Self::Stiffness,
            Self::Mass,
            Self::Redshift,
            Self::LensingStrength,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stiffness => "ENTROPIC STIFFNESS",
            Self::Mass => "BARYONIC MASS",
            Self::Redshift => "REDSHIFT z -> a0",
            Self::LensingStrength => "LENSING STRENGTH",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Stiffness => "%",
            Self::Mass => "Msun",
            Self::Redshift => "z",
            Self::LensingStrength => "alpha",
        }
    }

    pub fn range(self) -> ParamRange {
        match self {
            Self::Stiffness => STIFFNESS_RANGE,
            Self::Mass => MASS_RANGE,
            Self::Redshift => REDSHIFT_RANGE,
            Self::LensingStrength => LENSING_RANGE,
        }
    }

    pub fn get(self, p: &SimulationParams) -> f32 {
        match self {
            Self::Stiffness => p.stiffness,
            Self::Mass => p.mass,
            Self::Redshift => p.redshift,
            Self::LensingStrength => p.lensing_strength,
        }
    }

    fn slot(self, p: &mut SimulationParams) -> &mut f32 {
        match self {
            Self::Stiffness => &mut p.stiffness,
            Self::Mass => &mut p.mass,
            Self::Redshift => &mut p.redshift,
            Self::LensingStrength => &mut p.lensing_strength,
        }
    }

    fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|&s| s == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    fn prev(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|&s| s == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

#[derive(Clone, Debug)]
pub struct ControlPanel {
    focus: Slider,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            focus: Slider::Stiffness,
        }
    }

    pub fn focus(&self) -> Slider {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Move the focused slider by `steps` slider steps and clamp. The result
    /// is snapped to the step grid so repeated presses don't drift.
    pub fn nudge(&self, params: SimulationParams, steps: i32) -> SimulationParams {
        let range = self.focus.range();
        let mut out = params;
        let slot = self.focus.slot(&mut out);
        let moved = *slot + range.step * steps as f32;
        *slot = range.min + ((moved - range.min) / range.step).round() * range.step;
        out.clamped()
    }

    /// Text block for the HUD: one bar per slider, then `a0` and the regime.
    pub fn describe(&self, params: &SimulationParams, bar_width: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(Slider::all().len() + 1);
        for s in Slider::all() {
            let v = s.get(params);
            let filled = (s.range().fraction(v) * bar_width as f32).round() as usize;
            let bar = format!(
                "{}{}",
                "#".repeat(filled.min(bar_width)),
                "-".repeat(bar_width.saturating_sub(filled))
            );
            let cursor = if s == self.focus { '>' } else { ' ' };
            lines.push(format!(
                "{cursor} {:<18} [{bar}] {:>5.2} {}",
                s.label(),
                v,
                s.unit()
            ));
        }
        lines.push(format!(
            "  a0 = {:.2} | {}",
            params.derived().a0,
            regime_label(params)
        ));
        lines
    }
}

pub fn regime_label(params: &SimulationParams) -> &'static str {
    if params.emergent_regime() {
        "EMERGENT GRAVITY ACTIVE"
    } else {
        "NEWTONIAN REGIME"
    }
}
