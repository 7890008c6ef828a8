//! Block-name bookkeeping for one flattening run.

use rustc_hash::FxHashSet;

/// Names already bound to a scheduled or produced block.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    registered: FxHashSet<String>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`. Returns false if it was already registered.
    pub fn try_register(&mut self, name: &str) -> bool {
        if self.registered.contains(name) {
            return false;
        }
        self.registered.insert(name.to_string())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    /// Number of names bound so far.
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}

/// Mints compiler-generated block names: `<prefix>0`, `<prefix>1`, ...
#[derive(Debug)]
pub struct AnonymousNames {
    prefix: String,
    counter: u32,
}

impl AnonymousNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    pub fn fresh(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.counter);
        self.counter += 1;
        name
    }

    /// Number of names minted so far.
    pub const fn minted(&self) -> u32 {
        self.counter
    }
}

#[cfg(test)]
#[path = "../tests/labels.rs"]
mod tests;
