use std::collections::HashSet;

/// Snapshot of the key names stored in one project
///
/// Captured once per run; lookups are exact, case-sensitive matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredKeyInventory {
    keys: HashSet<String>,
}

impl StoredKeyInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StoredKeyInventory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
