//! Per-frame push of the parameter snapshot into each engine's uniforms.

use super::ShadingEngine;
use crate::derived::DerivedState;
use crate::params::{ParamStore, SimulationParams};
use crate::uniforms::{U_A0, U_LENS_STRENGTH, U_MASS, U_STIFFNESS, U_TIME, UniformSet};

/// Everything a frame may hand to an engine, captured once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub elapsed: f32,
    pub params: SimulationParams,
    pub derived: DerivedState,
}

impl FrameInputs {
    pub fn capture(store: &ParamStore, elapsed: f32) -> Self {
        let params = store.params();
        Self {
            elapsed,
            params,
            derived: params.derived(),
        }
    }

    /// Every uniform this frame can supply, by name.
    pub fn entries(&self) -> [(&'static str, f32); 5] {
        [
            (U_TIME, self.elapsed),
            (U_MASS, self.params.mass),
            (U_STIFFNESS, self.params.stiffness),
            (U_A0, self.derived.a0),
            (U_LENS_STRENGTH, self.params.lensing_strength),
        ]
    }
}

/// Write the frame's values into one uniform set, skipping names the set
/// does not declare. Returns the number of writes.
pub fn sync_set(inputs: &FrameInputs, set: &mut UniformSet) -> usize {
    let mut written = 0;
    for (name, value) in inputs.entries() {
        if !set.declares(name) {
            continue;
        }
        set.set_if_declared(name, value);
        written += 1;
    }
    written
}

pub fn sync_uniforms(inputs: &FrameInputs, engines: &mut [&mut dyn ShadingEngine]) -> usize {
    let mut total = 0;
    for engine in engines.iter_mut() {
        let n = sync_set(inputs, engine.uniforms_mut());
        log::trace!("sync {}: {} of {} uniforms", engine.name(), n, inputs.entries().len());
        total += n;
    }
    total
}
