use crate::cart_actor::CartError;
use crate::model::{Category, MenuItem};
use rust_decimal::Decimal;
use std::fmt::Display;

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// Most units a single line may hold.
pub const MAX_QUANTITY: u32 = 99;

/// Identifier of a line, unique for the lifetime of its cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub u32);

impl Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

/// One distinct product in the cart.
///
/// `unit_notes` holds one note per physical unit; its length always equals
/// `quantity`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub line_id: LineId,
    pub item: MenuItem,
    pub category: Category,
    quantity: u32,
    unit_notes: Vec<String>,
}

impl CartLine {
    fn new(line_id: LineId, item: MenuItem, category: Category) -> Self {
        Self {
            line_id,
            item,
            category,
            quantity: 1,
            unit_notes: vec![String::new()],
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_notes(&self) -> &[String] {
        &self.unit_notes
    }

    pub fn subtotal(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }

    fn resize(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.unit_notes.resize(quantity as usize, String::new());
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this many units.
    Updated(u32),
    /// The quantity reached zero and the line was dropped.
    Removed,
    /// The change would have gone below zero or above [`MAX_QUANTITY`];
    /// nothing changed.
    Rejected,
    /// No line with that id.
    Missing,
}

/// Payload for opening a cart. Carts always start empty.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

/// The order being built in one session.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Cart`](#impl-ActorEntity-for-Cart) for details on:
/// - Creation parameters ([`CartCreate`])
/// - Custom actions ([`CartAction`](crate::cart_actor::CartAction))
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    lines: Vec<CartLine>,
    next_line: u32,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            next_line: 1,
        }
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `item`.
    ///
    /// Re-adding a product already in the cart bumps its line in place and
    /// appends an empty note for the new unit; a new product is appended at the end.
    /// A line already at [`MAX_QUANTITY`] stays as it is.
    pub fn add_item(&mut self, item: MenuItem, category: Category) -> LineId {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            if line.quantity < MAX_QUANTITY {
                let quantity = line.quantity + 1;
                line.resize(quantity);
            }
            return line.line_id;
        }

        let line_id = LineId(self.next_line);
        self.next_line += 1;
        self.lines.push(CartLine::new(line_id, item, category));
        line_id
    }

    /// Changes the quantity of a line by `delta`.
    ///
    /// Reaching exactly zero removes the line. Going below zero or above
    /// [`MAX_QUANTITY`] is rejected. Notes of surviving units keep their index;
    /// dropped units lose theirs.
    pub fn update_quantity(&mut self, line_id: LineId, delta: i32) -> QuantityChange {
        let Some(pos) = self.position(line_id) else {
            return QuantityChange::Missing;
        };

        let new_quantity = i64::from(self.lines[pos].quantity) + i64::from(delta);
        match u32::try_from(new_quantity) {
            Ok(0) => {
                self.lines.remove(pos);
                QuantityChange::Removed
            }
            Ok(q) if q <= MAX_QUANTITY => {
                self.lines[pos].resize(q);
                QuantityChange::Updated(q)
            }
            _ => QuantityChange::Rejected,
        }
    }

    /// Removes a line regardless of quantity. Returns `false` if it was not there.
    pub fn remove_line(&mut self, line_id: LineId) -> bool {
        match self.position(line_id) {
            Some(pos) => {
                self.lines.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Sets the note of one unit.
    ///
    /// Returns `Ok(false)` when the line does not exist. An index outside
    /// `0..quantity` is an error and leaves the notes untouched.
    pub fn set_unit_note(
        &mut self,
        line_id: LineId,
        unit_index: usize,
        text: impl Into<String>,
    ) -> Result<bool, CartError> {
        let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) else {
            return Ok(false);
        };
        match line.unit_notes.get_mut(unit_index) {
            Some(note) => {
                *note = text.into();
                Ok(true)
            }
            None => Err(CartError::UnitOutOfRange {
                line: line_id.to_string(),
                index: unit_index,
                quantity: line.quantity,
            }),
        }
    }

    /// Overwrites the note of every unit of a line.
    pub fn apply_note_to_all_units(&mut self, line_id: LineId, text: impl Into<String>) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) else {
            return false;
        };
        let text = text.into();
        line.unit_notes.iter_mut().for_each(|n| n.clone_from(&text));
        true
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Empties the cart, returning how many lines were dropped.
    /// Line ids keep counting up so they are never reused.
    pub fn clear(&mut self) -> usize {
        let dropped = self.lines.len();
        self.lines.clear();
        dropped
    }

    fn position(&self, line_id: LineId) -> Option<usize> {
        self.lines.iter().position(|l| l.line_id == line_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, price: u32) -> MenuItem {
        MenuItem::new(id, format!("Item {id}"), "", price)
    }

    fn notes(cart: &Cart, line_id: LineId) -> Vec<&str> {
        cart.line(line_id)
            .unwrap()
            .unit_notes()
            .iter()
            .map(String::as_str)
            .collect()
    }

    fn assert_notes_match_quantity(cart: &Cart) {
        for line in cart.lines() {
            assert_eq!(line.unit_notes().len(), line.quantity() as usize);
            assert!(line.quantity() >= 1);
        }
    }

    #[test]
    fn test_add_same_item_merges_into_one_line() {
        let mut cart = Cart::new(CartId(1));
        let first = cart.add_item(item(1, 50), Category::Tortas);
        let second = cart.add_item(item(1, 50), Category::Tortas);

        assert_eq!(first, second);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(first).unwrap().quantity(), 2);
        assert_eq!(notes(&cart, first), vec!["", ""]);
    }

    #[test]
    fn test_readding_keeps_display_order_and_notes() {
        let mut cart = Cart::new(CartId(1));
        let a = cart.add_item(item(1, 45), Category::Tortas);
        let b = cart.add_item(item(9, 20), Category::Bebidas);
        cart.set_unit_note(a, 0, "sin cebolla").unwrap();

        cart.add_item(item(1, 45), Category::Tortas);

        let order: Vec<LineId> = cart.lines().iter().map(|l| l.line_id).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(notes(&cart, a), vec!["sin cebolla", ""]);
    }

    #[test]
    fn test_truncation_discards_notes_for_good() {
        let mut cart = Cart::new(CartId(1));
        let line = cart.add_item(item(1, 45), Category::Tortas);
        cart.update_quantity(line, 2);
        cart.set_unit_note(line, 0, "a").unwrap();
        cart.set_unit_note(line, 1, "b").unwrap();
        cart.set_unit_note(line, 2, "c").unwrap();

        assert_eq!(cart.update_quantity(line, -2), QuantityChange::Updated(1));
        assert_eq!(notes(&cart, line), vec!["a"]);

        assert_eq!(cart.update_quantity(line, 2), QuantityChange::Updated(3));
        assert_eq!(notes(&cart, line), vec!["a", "", ""]);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = Cart::new(CartId(1));
        let line = cart.add_item(item(1, 45), Category::Tortas);
        assert_eq!(cart.update_quantity(line, -1), QuantityChange::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.update_quantity(line, 1), QuantityChange::Missing);
    }

    #[test]
    fn test_decrement_below_zero_is_rejected() {
        let mut cart = Cart::new(CartId(1));
        let line = cart.add_item(item(1, 45), Category::Tortas);
        cart.update_quantity(line, 1);
        cart.set_unit_note(line, 1, "dorada").unwrap();

        assert_eq!(cart.update_quantity(line, -5), QuantityChange::Rejected);
        assert_eq!(cart.line(line).unwrap().quantity(), 2);
        assert_eq!(notes(&cart, line), vec!["", "dorada"]);
    }

    #[test]
    fn test_increment_past_max_is_rejected() {
        let mut cart = Cart::new(CartId(1));
        let line = cart.add_item(item(1, 45), Category::Tortas);
        cart.set_unit_note(line, 0, "dorada").unwrap();

        assert_eq!(cart.update_quantity(line, i32::MAX), QuantityChange::Rejected);
        assert_eq!(cart.update_quantity(line, MAX_QUANTITY as i32), QuantityChange::Rejected);
        assert_eq!(cart.line(line).unwrap().quantity(), 1);
        assert_eq!(notes(&cart, line), vec!["dorada"]);

        let to_max = (MAX_QUANTITY - 1) as i32;
        assert_eq!(cart.update_quantity(line, to_max), QuantityChange::Updated(MAX_QUANTITY));
        cart.add_item(item(1, 45), Category::Tortas);
        assert_eq!(cart.line(line).unwrap().quantity(), MAX_QUANTITY);
        assert_eq!(cart.update_quantity(line, i32::MIN), QuantityChange::Rejected);
        assert_notes_match_quantity(&cart);
    }

    #[test]
    fn test_notes_invariant_holds_over_mixed_operations() {
        let mut cart = Cart::new(CartId(1));
        let a = cart.add_item(item(1, 45), Category::Tortas);
        let b = cart.add_item(item(5, 50), Category::Tacos);
        let deltas = [3, -1, 2, -4, 1, -10, 5, -2];
        for (i, delta) in deltas.iter().enumerate() {
            let target = if i % 2 == 0 { a } else { b };
            cart.update_quantity(target, *delta);
            cart.add_item(item(5, 50), Category::Tacos);
            assert_notes_match_quantity(&cart);
        }
    }

    #[test]
    fn test_out_of_range_note_leaves_notes_untouched() {
        let mut cart = Cart::new(CartId(1));
        let line = cart.add_item(item(1, 45), Category::Tortas);
        cart.set_unit_note(line, 0, "bien dorada").unwrap();

        let err = cart.set_unit_note(line, 1, "extra").unwrap_err();
        assert!(matches!(err, CartError::UnitOutOfRange { index: 1, quantity: 1, .. }));
        assert_eq!(notes(&cart, line), vec!["bien dorada"]);
    }

    #[test]
    fn test_note_on_missing_line_is_noop() {
        let mut cart = Cart::new(CartId(1));
        assert_eq!(cart.set_unit_note(LineId(42), 0, "x").unwrap(), false);
        assert!(!cart.apply_note_to_all_units(LineId(42), "x"));
    }

    #[test]
    fn test_apply_note_to_all_units_overwrites_everything() {
        let mut cart = Cart::new(CartId(1));
        let line = cart.add_item(item(5, 50), Category::Tacos);
        cart.update_quantity(line, 2);
        cart.set_unit_note(line, 1, "con todo").unwrap();

        assert!(cart.apply_note_to_all_units(line, "sin cilantro"));
        assert_eq!(notes(&cart, line), vec!["sin cilantro"; 3]);
    }

    #[test]
    fn test_total_and_item_count() {
        let mut cart = Cart::new(CartId(1));
        cart.add_item(item(1, 45), Category::Tortas);
        cart.add_item(item(1, 45), Category::Tortas);
        cart.add_item(item(10, 30), Category::Bebidas);

        assert_eq!(cart.total(), Decimal::from(120));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_line_ids_are_not_reused_after_clear() {
        let mut cart = Cart::new(CartId(1));
        let first = cart.add_item(item(1, 45), Category::Tortas);
        cart.remove_line(first);
        assert!(!cart.remove_line(first));
        let second = cart.add_item(item(1, 45), Category::Tortas);
        assert_eq!(cart.clear(), 1);
        let third = cart.add_item(item(1, 45), Category::Tortas);

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
    }
}
