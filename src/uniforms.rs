//! Named scalar parameters handed to a shading engine every frame.

pub const U_TIME: &str = "uTime";
pub const U_MASS: &str = "uMass";
pub const U_STIFFNESS: &str = "uStiffness";
pub const U_A0: &str = "uA0";
pub const U_LENS_STRENGTH: &str = "uLensStrength";

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    name: &'static str,
    value: f32,
}

/// Fixed-schema uniform table.
///
/// The set of names is decided at construction and never grows; writes to a
/// name outside the schema are refused.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSet {
    slots: Vec<Slot>,
}

impl UniformSet {
    /// Declare the schema with initial values. Repeated names keep the first entry.
    pub fn declare(entries: &[(&'static str, f32)]) -> Self {
        let mut slots: Vec<Slot> = Vec::with_capacity(entries.len());
        for &(name, value) in entries {
            if slots.iter().any(|s| s.name == name) {
                continue;
            }
            slots.push(Slot { name, value });
        }
        Self { slots }
    }

    pub fn declares(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.slots.iter().find(|s| s.name == name).map(|s| s.value)
    }

    /// Overwrite `name` if it is part of the schema. Returns whether a write happened.
    pub fn set_if_declared(&mut self, name: &str, value: f32) -> bool {
        match self.slots.iter_mut().find(|s| s.name == name) {
            Some(slot) => {
                slot.value = value;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read a declared value, 0 when absent.
    pub(crate) fn value(&self, name: &str) -> f32 {
        self.get(name).unwrap_or(0.0)
    }
}
