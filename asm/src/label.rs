use indexmap::{IndexMap, IndexSet};

/// What a `LABEL` definition did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Define {
    /// Defined for the first time, after `n` forward references to it.
    Resolves(u64),
    /// Defined for the first time, never referenced before.
    New,
    /// Already defined earlier.
    Duplicate,
}

/// What a jump reference found in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refer {
    /// Target already defined.
    Backward,
    /// Target not defined yet; recorded as pending.
    Pending,
}

/// Defined labels plus references that still wait for their definition.
/// Both keep first-seen order so that reports are deterministic.
#[derive(Debug, Default, Clone)]
pub struct Labels {
    defined: IndexSet<String>,
    pending: IndexMap<String, u64>,
}

impl Labels {
    pub fn new() -> Self {
        Labels::default()
    }

    pub fn define(&mut self, name: &str) -> Define {
        if self.defined.contains(name) {
            return Define::Duplicate;
        }
        self.defined.insert(name.to_string());
        match self.pending.shift_remove(name) {
            Some(count) => Define::Resolves(count),
            None => Define::New,
        }
    }

    pub fn refer(&mut self, name: &str) -> Refer {
        if self.defined.contains(name) {
            Refer::Backward
        } else {
            *self.pending.entry(name.to_string()).or_insert(0) += 1;
            Refer::Pending
        }
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    pub fn defined(&self) -> impl Iterator<Item = &str> {
        self.defined.iter().map(String::as_str)
    }

    /// Targets referenced but not (yet) defined, with their reference counts.
    pub fn pending(&self) -> impl Iterator<Item = (&str, u64)> {
        self.pending.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn pending_total(&self) -> u64 {
        self.pending.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_references_resolve_on_definition() {
        let mut labels = Labels::new();
        assert_eq!(labels.refer("end"), Refer::Pending);
        assert_eq!(labels.refer("end"), Refer::Pending);
        assert_eq!(labels.pending_total(), 2);
        assert_eq!(labels.define("end"), Define::Resolves(2));
        assert_eq!(labels.pending_total(), 0);
        assert_eq!(labels.refer("end"), Refer::Backward);
    }

    #[test]
    fn duplicate_definition() {
        let mut labels = Labels::new();
        assert_eq!(labels.define("loop"), Define::New);
        assert_eq!(labels.define("loop"), Define::Duplicate);
        assert_eq!(labels.defined().collect::<Vec<_>>(), vec!["loop"]);
    }

    #[test]
    fn pending_keeps_first_seen_order() {
        let mut labels = Labels::new();
        labels.refer("b");
        labels.refer("a");
        labels.refer("b");
        let pending: Vec<_> = labels.pending().collect();
        assert_eq!(pending, vec![("b", 2), ("a", 1)]);
        assert!(!labels.is_defined("a"));
    }
}
