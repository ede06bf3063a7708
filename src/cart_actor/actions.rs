//! Custom actions for the Cart actor.
//!
//! Every mutation of a [`Cart`](crate::model::Cart) goes through one of these
//! actions. Reads use the framework `Get`, which returns a snapshot of the cart.

use crate::model::{Category, LineId, MenuItem, QuantityChange};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of a menu item, merging with an existing line for the same item.
    AddItem { item: MenuItem, category: Category },
    /// Changes a line's quantity by a signed delta.
    UpdateQuantity { line: LineId, delta: i32 },
    RemoveLine(LineId),
    /// Sets the note of the unit at `unit` (0-based).
    SetUnitNote {
        line: LineId,
        unit: usize,
        text: String,
    },
    ApplyNoteToAll { line: LineId, text: String },
    /// Returns `(total, item_count)`.
    Totals,
    Clear,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    AddItem(LineId),
    UpdateQuantity(QuantityChange),
    /// `false` when the line was already gone.
    RemoveLine(bool),
    /// `false` when the line does not exist.
    SetUnitNote(bool),
    ApplyNoteToAll(bool),
    Totals { total: Decimal, item_count: u32 },
    /// Number of lines dropped.
    Clear(usize),
}
