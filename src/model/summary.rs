//! The order ticket handed to the messaging channel.
//!
//! An [`OrderSummary`] is captured when a submission starts, so the text sent to
//! the vendor stays available after the cart has been cleared.

use crate::model::{normalize_number, Cart, Category, PhoneEntry};
use rust_decimal::Decimal;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub unit_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total: Decimal,
    pub item_count: u32,
    pub contact: PhoneEntry,
}

impl OrderSummary {
    pub fn from_cart(cart: &Cart, contact: &PhoneEntry) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| SummaryLine {
                name: line.item.name.clone(),
                category: line.category,
                quantity: line.quantity(),
                unit_price: line.item.price,
                subtotal: line.subtotal(),
                unit_notes: line.unit_notes().to_vec(),
            })
            .collect();

        Self {
            lines,
            total: cart.total(),
            item_count: cart.item_count(),
            contact: contact.clone(),
        }
    }

    /// Human-readable ticket. Unit notes are listed 1-based and only when set.
    pub fn to_message(&self) -> String {
        let mut out = String::from("🛒 *Nuevo pedido - La Calzadita*\n\n");
        for line in &self.lines {
            // writing into a String cannot fail
            let _ = writeln!(
                out,
                "{} {}x {} (${})",
                line.category.emoji(),
                line.quantity,
                line.name,
                line.subtotal
            );
            for (unit, note) in line.unit_notes.iter().enumerate() {
                let note = note.trim();
                if !note.is_empty() {
                    let _ = writeln!(out, "   #{}: {}", unit + 1, note);
                }
            }
        }
        let _ = write!(
            out,
            "\n*Total: ${}*\nContacto: {} ({})",
            self.total, self.contact.alias, self.contact.number
        );
        out
    }

    /// `wa.me` link that opens a chat with the vendor pre-filled with the ticket.
    pub fn whatsapp_link(&self, vendor_number: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            normalize_number(vendor_number),
            urlencoding::encode(&self.to_message())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartId, MenuItem, PhoneId};

    fn contact() -> PhoneEntry {
        PhoneEntry {
            id: PhoneId(1),
            alias: "Casa".into(),
            number: "5551234567".into(),
        }
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new(CartId(1));
        let torta = cart.add_item(MenuItem::new(1, "Torta de Jamón", "", 45), Category::Tortas);
        cart.add_item(MenuItem::new(1, "Torta de Jamón", "", 45), Category::Tortas);
        cart.add_item(MenuItem::new(10, "Refresco", "", 25), Category::Bebidas);
        cart.set_unit_note(torta, 1, "sin cebolla").unwrap();
        cart
    }

    #[test]
    fn test_summary_copies_cart_state() {
        let summary = OrderSummary::from_cart(&sample_cart(), &contact());
        assert_eq!(summary.total, Decimal::from(115));
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].subtotal, Decimal::from(90));
        assert_eq!(summary.lines[0].unit_notes, vec!["".to_string(), "sin cebolla".to_string()]);
    }

    #[test]
    fn test_message_lists_only_filled_notes() {
        let message = OrderSummary::from_cart(&sample_cart(), &contact()).to_message();
        assert!(message.contains("2x Torta de Jamón ($90)"));
        assert!(message.contains("   #2: sin cebolla"));
        assert!(!message.contains("#1:"));
        assert!(message.contains("*Total: $115*"));
        assert!(message.ends_with("Contacto: Casa (5551234567)"));
    }

    #[test]
    fn test_whatsapp_link_is_encoded() {
        let link = OrderSummary::from_cart(&sample_cart(), &contact()).whatsapp_link("+52 443 555 0000");
        assert!(link.starts_with("https://wa.me/524435550000?text="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }
}
