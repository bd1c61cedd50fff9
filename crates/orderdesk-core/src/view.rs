//! # View Projections
//!
//! Pure projections of session state into displayable strings. The terminal
//! front end renders these verbatim; keeping them here means the exact text
//! an operator sees (row indexes, grouped amounts, the "no price info"
//! caption) is testable without a rendering surface.

use crate::cart::Cart;
use crate::keypad::Quote;
use crate::money::group_thousands;

// =============================================================================
// Cart Rows
// =============================================================================

/// One rendered cart row.
///
/// The index is 1-based and recomputed from the current position, not
/// stored on the item, so it stays contiguous under any future removal
/// support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// 1-based position in the cart.
    pub index: usize,
    /// Product name.
    pub name: String,
    /// Quantity with its unit suffix ("5kg").
    pub quantity: String,
    /// Grouped unit price ("2,000").
    pub unit_price: String,
    /// Grouped line total ("10,000").
    pub line_total: String,
}

/// Projects the cart into display rows, in insertion order.
pub fn cart_rows(cart: &Cart) -> Vec<CartRow> {
    cart.items
        .iter()
        .enumerate()
        .map(|(i, item)| CartRow {
            index: i + 1,
            name: item.name.clone(),
            quantity: format!("{}{}", item.quantity, item.unit),
            unit_price: item.unit_price.grouped(),
            line_total: item.line_total().grouped(),
        })
        .collect()
}

/// The totals line under the cart table: (total quantity, grouped amount).
///
/// Both values are recomputed through [`Cart::totals`]; rendering can never
/// drift from the cart contents.
pub fn cart_totals_line(cart: &Cart) -> (String, String) {
    let totals = cart.totals();
    (group_thousands(totals.quantity), totals.amount.grouped())
}

// =============================================================================
// Keypad Captions
// =============================================================================

/// Caption shown when a lookup failed or returned no price.
pub const NO_PRICE_INFO: &str = "no price info";

/// The price caption on the keypad modal.
///
/// Empty before any lookup, "no price info" after a failed one, and the
/// grouped unit price after a successful one.
pub fn price_caption(quote: Quote) -> String {
    match quote {
        Quote::None => String::new(),
        Quote::Unavailable => NO_PRICE_INFO.to_string(),
        Quote::Price(price) => format!("Unit price: {}", price.grouped()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
