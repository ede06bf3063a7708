use crate::contact_actor::ContactError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Saved phone numbers of a session plus the one currently selected.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for ContactDirectory`](#impl-ActorEntity-for-ContactDirectory) for details on:
/// - Creation parameters ([`DirectoryCreate`])
/// - Custom actions ([`ContactAction`](crate::contact_actor::ContactAction))
///
/// The selection is kept as an id and resolved against `entries` on every read,
/// so editing the selected entry is visible through [`ContactDirectory::selected`]
/// without any extra bookkeeping.
#[derive(Debug, Clone)]
pub struct ContactDirectory {
    pub id: DirectoryId,
    entries: Vec<PhoneEntry>,
    selected: Option<PhoneId>,
    last_issued: i64,
}

/// Type-safe identifier for contact directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectoryId(pub u32);

impl From<u32> for DirectoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DirectoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "directory_{}", self.0)
    }
}

/// Identifier of a saved phone: its creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneId(pub i64);

impl Display for PhoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "phone_{}", self.0)
    }
}

/// Number of digits of a complete phone number.
pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEntry {
    pub id: PhoneId,
    pub alias: String,
    pub number: String,
}

/// Payload for opening a directory. The saved entries come from the store.
#[derive(Debug, Clone, Default)]
pub struct DirectoryCreate;

/// What gets persisted: every saved entry and the selected one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSnapshot {
    pub entries: Vec<PhoneEntry>,
    pub selected: Option<PhoneEntry>,
}

/// Keeps only the digits of user input ("555 123-4567" → "5551234567").
pub fn normalize_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn validated(raw: &str) -> Result<String, ContactError> {
    let digits = normalize_number(raw);
    if digits.len() == PHONE_DIGITS {
        Ok(digits)
    } else {
        Err(ContactError::InvalidNumber {
            digits: digits.len(),
        })
    }
}

fn non_blank(alias: Option<String>) -> Option<String> {
    alias
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

impl ContactDirectory {
    pub fn new(id: DirectoryId) -> Self {
        Self {
            id,
            entries: Vec::new(),
            selected: None,
            last_issued: 0,
        }
    }

    pub fn entries(&self) -> &[PhoneEntry] {
        &self.entries
    }

    pub fn entry(&self, id: PhoneId) -> Option<&PhoneEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn selected(&self) -> Option<&PhoneEntry> {
        self.selected.and_then(|id| self.entry(id))
    }

    /// Replaces the contents with persisted state.
    ///
    /// Entries with a duplicated id keep their first occurrence, and a
    /// persisted selection that names no loaded entry is dropped.
    pub fn restore(&mut self, snapshot: ContactSnapshot) {
        let mut entries: Vec<PhoneEntry> = Vec::with_capacity(snapshot.entries.len());
        for entry in snapshot.entries {
            if !entries.iter().any(|e| e.id == entry.id) {
                entries.push(entry);
            }
        }
        self.entries = entries;
        self.selected = snapshot
            .selected
            .map(|s| s.id)
            .filter(|id| self.entries.iter().any(|e| e.id == *id));
        self.last_issued = self
            .entries
            .iter()
            .map(|e| e.id.0)
            .max()
            .unwrap_or(0)
            .max(self.last_issued);
    }

    pub fn snapshot(&self) -> ContactSnapshot {
        ContactSnapshot {
            entries: self.entries.clone(),
            selected: self.selected().cloned(),
        }
    }

    /// Saves a new number.
    ///
    /// `now_millis` seeds the id; it is bumped past the last issued id when the
    /// clock has not moved. A blank alias becomes "Teléfono N". The first entry
    /// of an empty directory is selected.
    pub fn add_entry(
        &mut self,
        alias: Option<String>,
        number: &str,
        now_millis: i64,
    ) -> Result<PhoneId, ContactError> {
        let number = validated(number)?;
        let alias =
            non_blank(alias).unwrap_or_else(|| format!("Teléfono {}", self.entries.len() + 1));

        let id = PhoneId(now_millis.max(self.last_issued + 1));
        self.last_issued = id.0;
        self.entries.push(PhoneEntry { id, alias, number });

        if self.entries.len() == 1 {
            self.selected = Some(id);
        }
        Ok(id)
    }

    /// Replaces the number (and the alias, unless blank) of an entry.
    ///
    /// Returns `Ok(false)` when there is no such entry.
    pub fn update_entry(
        &mut self,
        id: PhoneId,
        alias: Option<String>,
        number: &str,
    ) -> Result<bool, ContactError> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.number = validated(number)?;
        if let Some(alias) = non_blank(alias) {
            entry.alias = alias;
        }
        Ok(true)
    }

    /// Removes an entry. A removed selection falls back to the first remaining entry.
    pub fn delete_entry(&mut self, id: PhoneId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = self.entries.first().map(|e| e.id);
        }
        true
    }

    /// Selects an entry. Unknown ids are ignored.
    pub fn select_entry(&mut self, id: PhoneId) -> bool {
        if self.entry(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }
}
