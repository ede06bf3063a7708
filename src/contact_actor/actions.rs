//! Custom actions for the Contact Directory actor.
//!
//! Mutating actions are persisted through the directory's
//! [`ContactStore`](super::ContactStore) once they succeed.

use crate::model::{PhoneEntry, PhoneId};

#[derive(Debug, Clone)]
pub enum ContactAction {
    /// Saves a number. A blank or missing alias gets a generated one.
    Add {
        alias: Option<String>,
        number: String,
    },
    /// Replaces the number of an entry, and its alias unless blank.
    Update {
        id: PhoneId,
        alias: Option<String>,
        number: String,
    },
    Delete(PhoneId),
    Select(PhoneId),
    /// Reads the selected entry.
    Selected,
    /// Reads every entry in insertion order.
    List,
}

/// Results from ContactActions - variants match 1:1 with ContactAction
#[derive(Debug, Clone, PartialEq)]
pub enum ContactActionResult {
    Add(PhoneId),
    /// `false` when there is no such entry.
    Update(bool),
    Delete(bool),
    Select(bool),
    Selected(Option<PhoneEntry>),
    List(Vec<PhoneEntry>),
}
