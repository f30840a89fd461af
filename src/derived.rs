/// Quantities computed from the simulation parameters once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedState {
    /// Entropic acceleration scale.
    pub a0: f32,
}

impl DerivedState {
    pub fn from_redshift(redshift: f32) -> Self {
        Self {
            a0: entropic_a0(redshift),
        }
    }
}

/// Higher redshift means a younger, faster-expanding universe and a larger `a0`.
pub fn entropic_a0(redshift: f32) -> f32 {
    0.5 + 0.5 * redshift
}
