//! Per-session layout table.

use indexmap::IndexMap;

/// A recorded layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub name: String,
    pub layout: String,
}

impl LayoutEntry {
    pub fn new(name: impl Into<String>, layout: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: layout.into(),
        }
    }
}

/// Result of [`LayoutTable::record_if_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The name was new and its layout was rendered and stored.
    Inserted,
    /// The name was already present; nothing was rendered.
    Duplicate,
    /// The name does not contain the filter.
    Filtered,
}

/// Qualified name to layout text, deduplicated by name.
///
/// The first layout recorded for a name wins. Entries keep insertion order.
#[derive(Debug, Default, Clone)]
pub struct LayoutTable {
    entries: IndexMap<String, String>,
}

impl LayoutTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` unless it is filtered out or already present.
    ///
    /// `layout` is called at most once, and only when the entry is inserted.
    pub fn record_if_new<F>(&mut self, name: &str, filter: &str, layout: F) -> RecordOutcome
    where
        F: FnOnce() -> String,
    {
        if !filter.is_empty() && !name.contains(filter) {
            return RecordOutcome::Filtered;
        }
        if self.entries.contains_key(name) {
            return RecordOutcome::Duplicate;
        }
        self.entries.insert(name.to_string(), layout());
        RecordOutcome::Inserted
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Consume the table, yielding every entry in insertion order.
    pub fn drain(self) -> Vec<LayoutEntry> {
        self.entries
            .into_iter()
            .map(|(name, layout)| LayoutEntry { name, layout })
            .collect()
    }
}
