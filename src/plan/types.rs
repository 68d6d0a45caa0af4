//! Plan data types.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{DecodeError, Result};

/// Root plan document.
///
/// Only `resource_changes` is read; other top-level keys are ignored.
#[derive(Debug, Deserialize)]
pub struct Plan {
    /// Resource change entries in input order, still undecoded.
    #[serde(deserialize_with = "nullable_entries")]
    pub resource_changes: Vec<Box<RawValue>>,
}

/// One decoded resource change entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceChange {
    /// Resource address, e.g. `module.app.aws_instance.web[0]`.
    pub address: String,
    /// The before/after pair. A missing or `null` change has both sides `null`.
    #[serde(default, deserialize_with = "nullable_change")]
    pub change: Change,
}

/// Before and after documents of a resource.
///
/// Both are kept as the exact JSON text of the input; `None` stands for a
/// missing or `null` member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Change {
    /// State prior to the change.
    #[serde(default)]
    pub before: Option<Box<RawValue>>,
    /// State following the change.
    #[serde(default)]
    pub after: Option<Box<RawValue>>,
}

/// Shape of a change, judged only by which side is `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// No prior state.
    Create,
    /// Both sides present.
    Update,
    /// No subsequent state.
    Delete,
    /// Neither side present.
    Empty,
}

impl Plan {
    /// Returns the number of resource change entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resource_changes.len()
    }

    /// Returns true if the plan has no resource changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource_changes.is_empty()
    }

    /// Iterates over the undecoded entries with their positions.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &RawValue)> {
        self.resource_changes.iter().map(|entry| &**entry).enumerate()
    }
}

impl ResourceChange {
    /// Decodes a raw entry found at position `index`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the entry lacks `address` or `change`, or
    /// if either has the wrong type.
    pub fn decode(index: usize, raw: &RawValue) -> Result<Self> {
        serde_json::from_str(raw.get())
            .map_err(|source| DecodeError::Entry { index, source }.into())
    }

    /// Returns the change kind of this entry.
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        self.change.kind()
    }
}

impl Change {
    /// Classifies the pair by which side is `null`.
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match (self.before.is_none(), self.after.is_none()) {
            (true, true) => ChangeKind::Empty,
            (true, false) => ChangeKind::Create,
            (false, true) => ChangeKind::Delete,
            (false, false) => ChangeKind::Update,
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Empty => "empty",
        };
        f.write_str(label)
    }
}

/// A `null` entry list behaves like an empty one.
fn nullable_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<Box<RawValue>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Box<RawValue>>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` change behaves like a missing one.
fn nullable_change<'de, D>(deserializer: D) -> std::result::Result<Change, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Change>::deserialize(deserializer)?.unwrap_or_default())
}
