//! Variable storage for one interpreter session
//!
//! Names are case-sensitive. A slot is created by the first assignment and
//! overwritten by later ones; nothing removes a slot.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: FxHashMap<String, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Store `value` under `name`, returning the previous value if any
    pub fn set(&mut self, name: &str, value: f64) -> Option<f64> {
        match self.vars.get_mut(name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.vars.insert(name.to_string(), value);
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All variables, sorted by name
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .vars
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
