//! # Entries
//!
//! An [`Entry`] is one graded unit (a course, a test section). Callers own
//! the list of entries; [`EntryList`] is a convenience container keyed by
//! UUID so a form can edit or remove rows without index bookkeeping. The
//! engine only ever borrows entries for the duration of one calculation.
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::entries::{Entry, EntryList};
//!
//! let mut list = EntryList::new();
//! let math = list.add(Entry::new("MATH101", "A", 4.0));
//! list.add(Entry::new("ENG101", "B+", 3.0));
//!
//! list.update(math, Entry::new("MATH101", "A-", 4.0)).unwrap();
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.get(math).unwrap().symbol, "A-");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GradeError, GradeResult};

/// One graded unit.
///
/// ## JSON Example
///
/// ```json
/// { "label": "MATH101", "symbol": "A", "weight": 4.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Free text for display (course code, section name)
    #[serde(default)]
    pub label: String,

    /// Grade symbol, resolved against the active scale
    pub symbol: String,

    /// Credit hours or section weight; must be > 0 and within the scale's bound
    pub weight: f64,
}

impl Entry {
    pub fn new(label: impl Into<String>, symbol: impl Into<String>, weight: f64) -> Self {
        Entry {
            label: label.into(),
            symbol: symbol.into(),
            weight,
        }
    }
}

/// Ordered, caller-owned list of entries with stable ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryList {
    entries: IndexMap<Uuid, Entry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning its id.
    pub fn add(&mut self, entry: Entry) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.insert(id, entry);
        id
    }

    /// Replace the entry stored under `id`, keeping its position.
    pub fn update(&mut self, id: Uuid, entry: Entry) -> GradeResult<()> {
        match self.entries.get_mut(&id) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(GradeError::EntryNotFound { id: id.to_string() }),
        }
    }

    /// Remove an entry, preserving the order of the rest.
    pub fn remove(&mut self, id: Uuid) -> GradeResult<Entry> {
        self.entries
            .shift_remove(&id)
            .ok_or_else(|| GradeError::EntryNotFound { id: id.to_string() })
    }

    pub fn get(&self, id: Uuid) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Ids paired with entries, in insertion order
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (Uuid, &Entry)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }
}

impl FromIterator<Entry> for EntryList {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut list = EntryList::new();
        for entry in iter {
            list.add(entry);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let list: EntryList = vec![
            Entry::new("MATH101", "A", 4.0),
            Entry::new("ENG101", "B+", 3.0),
            Entry::new("HIST101", "C", 3.0),
        ]
        .into_iter()
        .collect();

        let labels: Vec<&str> = list.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["MATH101", "ENG101", "HIST101"]);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut list = EntryList::new();
        list.add(Entry::new("one", "A", 3.0));
        let two = list.add(Entry::new("two", "B", 3.0));
        list.add(Entry::new("three", "C", 3.0));

        let removed = list.remove(two).unwrap();
        assert_eq!(removed.label, "two");
        let labels: Vec<&str> = list.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["one", "three"]);
    }

    #[test]
    fn test_update_by_listed_id() {
        let mut list = EntryList::new();
        list.add(Entry::new("one", "A", 3.0));
        let two = list.add(Entry::new("two", "B", 3.0));

        let (id, _) = list.iter_with_ids().find(|(_, e)| e.label == "two").unwrap();
        assert_eq!(id, two);
        list.update(id, Entry::new("two", "A-", 4.0)).unwrap();

        let ids: Vec<Uuid> = list.iter_with_ids().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1], two);
        assert_eq!(list.get(two).unwrap().symbol, "A-");
    }

    #[test]
    fn test_missing_id() {
        let mut list = EntryList::new();
        let id = Uuid::new_v4();
        assert!(matches!(list.remove(id), Err(GradeError::EntryNotFound { .. })));
        assert!(list.update(id, Entry::new("x", "A", 1.0)).is_err());
    }

    #[test]
    fn test_clear() {
        let mut list = EntryList::new();
        list.add(Entry::new("one", "A", 3.0));
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_entry_label_defaults_when_missing() {
        let entry: Entry = serde_json::from_str(r#"{"symbol": "A", "weight": 3}"#).unwrap();
        assert_eq!(entry.label, "");
        assert_eq!(entry.weight, 3.0);
    }
}
