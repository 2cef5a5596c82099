//! Diff output types.
//!
//! A [`Diff`] keeps its entries in insertion order and indexes them by
//! [`RecordId`]; iteration order is the order the engine emitted them.

use crate::diff::equivalence::{equivalent, values_equivalent};
use crate::diff::record_id::RecordId;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

static NULL: Value = Value::Null;

/// Change classification for a whole record or a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeOfChange {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl TypeOfChange {
    /// All classifications, in report order.
    pub const ALL: [TypeOfChange; 4] = [
        TypeOfChange::Added,
        TypeOfChange::Removed,
        TypeOfChange::Modified,
        TypeOfChange::Unchanged,
    ];

    /// Upper-case label as used in serialized output.
    pub fn label(&self) -> &'static str {
        match self {
            TypeOfChange::Added => "ADDED",
            TypeOfChange::Removed => "REMOVED",
            TypeOfChange::Modified => "MODIFIED",
            TypeOfChange::Unchanged => "UNCHANGED",
        }
    }
}

impl std::fmt::Display for TypeOfChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Comparison result for one id.
///
/// Constructed only through [`DiffEntry::added`], [`DiffEntry::removed`] and
/// [`DiffEntry::compared`], so an `ADDED` entry never has a base item, a
/// `REMOVED` entry never has a main item, and both sides are present for
/// `MODIFIED`/`UNCHANGED`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffEntry {
    id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_item: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_item: Option<Value>,
    type_of_change: TypeOfChange,
}

impl DiffEntry {
    /// Entry for a record that exists only in the main collection.
    pub fn added(id: RecordId, main_item: Value) -> Self {
        Self {
            id,
            main_item: Some(main_item),
            base_item: None,
            type_of_change: TypeOfChange::Added,
        }
    }

    /// Entry for a record that exists only in the base collection.
    pub fn removed(id: RecordId, base_item: Value) -> Self {
        Self {
            id,
            main_item: None,
            base_item: Some(base_item),
            type_of_change: TypeOfChange::Removed,
        }
    }

    /// Entry for a record present on both sides, classified by deep equivalence.
    pub fn compared(id: RecordId, main_item: Value, base_item: Value) -> Self {
        let type_of_change = if values_equivalent(&base_item, &main_item) {
            TypeOfChange::Unchanged
        } else {
            TypeOfChange::Modified
        };
        Self {
            id,
            main_item: Some(main_item),
            base_item: Some(base_item),
            type_of_change,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn main_item(&self) -> Option<&Value> {
        self.main_item.as_ref()
    }

    pub fn base_item(&self) -> Option<&Value> {
        self.base_item.as_ref()
    }

    pub fn type_of_change(&self) -> TypeOfChange {
        self.type_of_change
    }

    /// The effective record: the main side, or the base side when removed.
    pub fn item(&self) -> &Value {
        match (&self.main_item, &self.base_item) {
            (Some(main), _) => main,
            (None, Some(base)) => base,
            (None, None) => &NULL,
        }
    }

    /// Effective value of a property: main side's, or base side's if the
    /// whole record was removed.
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.item().get(property)
    }

    /// Change classification of a single property.
    ///
    /// Returns `None` when neither side has the property at all. Otherwise the
    /// whole-record classification wins for `UNCHANGED`, `REMOVED` and
    /// `ADDED`; a `MODIFIED` record compares the two property values, where a
    /// property missing on the main side is `REMOVED` and one missing on the
    /// base side is `ADDED` regardless of what the other side holds.
    pub fn property_change(&self, property: &str) -> Option<TypeOfChange> {
        let main_value = self.main_item.as_ref().and_then(|m| m.get(property));
        let base_value = self.base_item.as_ref().and_then(|b| b.get(property));

        if main_value.is_none() && base_value.is_none() {
            return None;
        }

        let change = match self.type_of_change {
            TypeOfChange::Unchanged => TypeOfChange::Unchanged,
            TypeOfChange::Removed => TypeOfChange::Removed,
            TypeOfChange::Added => TypeOfChange::Added,
            TypeOfChange::Modified => {
                if equivalent(main_value, base_value) {
                    TypeOfChange::Unchanged
                } else if main_value.is_none() {
                    TypeOfChange::Removed
                } else if base_value.is_none() {
                    TypeOfChange::Added
                } else {
                    TypeOfChange::Modified
                }
            }
        };
        Some(change)
    }

    /// True when `property` is classified as `kind`.
    pub fn has_property_change(&self, property: &str, kind: TypeOfChange) -> bool {
        self.property_change(property) == Some(kind)
    }

    /// Own property names of both sides: main side's order first, then any
    /// names only the base side has, in base order.
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for item in [&self.main_item, &self.base_item].into_iter().flatten() {
            if let Some(obj) = item.as_object() {
                for key in obj.keys() {
                    if !names.contains(&key.as_str()) {
                        names.push(key.as_str());
                    }
                }
            }
        }
        names
    }

    /// Every property whose classification is not `UNCHANGED`.
    pub fn changed_properties(&self) -> Vec<(&str, TypeOfChange)> {
        self.property_names()
            .into_iter()
            .filter_map(|name| match self.property_change(name) {
                Some(TypeOfChange::Unchanged) | None => None,
                Some(change) => Some((name, change)),
            })
            .collect()
    }
}

/// Ordered collection of diff entries, unique by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff {
    entries: Vec<DiffEntry>,
    index: HashMap<RecordId, usize>,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An entry with an id already present replaces the
    /// existing one in place, keeping its position.
    pub fn add(&mut self, entry: DiffEntry) {
        match self.index.get(entry.id()) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.id().clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Look up the entry for an id.
    pub fn get(&self, id: impl Into<RecordId>) -> Option<&DiffEntry> {
        let id = id.into();
        self.index.get(&id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, id: impl Into<RecordId>) -> bool {
        self.index.contains_key(&id.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry> {
        self.entries.iter()
    }

    /// Ids in emission order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.entries.iter().map(DiffEntry::id)
    }

    /// Entries with the given whole-record classification, in emission order.
    pub fn entries_of(&self, kind: TypeOfChange) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(move |e| e.type_of_change() == kind)
    }

    /// Per-classification counts.
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for entry in &self.entries {
            match entry.type_of_change() {
                TypeOfChange::Added => summary.added += 1,
                TypeOfChange::Removed => summary.removed += 1,
                TypeOfChange::Modified => summary.modified += 1,
                TypeOfChange::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a DiffEntry;
    type IntoIter = std::slice::Iter<'a, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Diff {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

/// Counts of entries per whole-record classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified + self.unchanged
    }

    /// Count for a single classification.
    pub fn count(&self, kind: TypeOfChange) -> usize {
        match kind {
            TypeOfChange::Added => self.added,
            TypeOfChange::Removed => self.removed,
            TypeOfChange::Modified => self.modified,
            TypeOfChange::Unchanged => self.unchanged,
        }
    }

    /// True when every entry is unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }
}
