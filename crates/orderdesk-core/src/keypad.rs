//! # Keypad / Quantity-Entry Modal
//!
//! The in-progress quantity entry behind the keypad modal: a single text
//! buffer plus the most recent price quote.
//!
//! ## Entry Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quantity Entry Flow                                  │
//! │                                                                         │
//! │  Product selected ──► open(product)          buffer: ""                │
//! │                                                                         │
//! │  [5] pressed ───────► press_digit(5)         buffer: "5"               │
//! │  [00] pressed ──────► press_double_zero()    buffer: "500"             │
//! │  [kg] pressed ──────► press_unit("kg")       buffer: "500kg"           │
//! │                          │                                              │
//! │                          └──► caller fetches GET /api/price            │
//! │                               and reports back via quote_received      │
//! │                                                                         │
//! │  [confirm] ─────────► confirm()              parses quantity + unit,   │
//! │                                              reads the cached price    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Buffer Parsing
//! The entry is one string: digits followed by a unit suffix ("500kg").
//! Quantity and unit are recovered by character class, exactly as the
//! original entry surface did. This is fragile if a unit symbol ever
//! contains digits; the parsing is deliberately confined to this module.

use serde::{Deserialize, Serialize};

use crate::cart::MAX_QUANTITY;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Quote State
// =============================================================================

/// The price quote cached on the modal.
///
/// A failed lookup is remembered as [`Quote::Unavailable`], which renders as
/// "no price info" and yields a zero cached price, so a later confirm fails
/// validation instead of silently pricing the line at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quote {
    /// No lookup performed since the buffer was last cleared.
    None,
    /// The lookup failed or returned no price.
    Unavailable,
    /// A usable unit price.
    Price(Money),
}

impl Quote {
    /// The price a confirm reads: zero unless a real quote arrived.
    #[inline]
    pub fn cached_price(&self) -> Money {
        match self {
            Quote::Price(p) => *p,
            Quote::None | Quote::Unavailable => Money::zero(),
        }
    }
}

// =============================================================================
// Confirmed Entry
// =============================================================================

/// The parsed result of a successful confirm: a complete
/// quantity/unit/price triple ready for [`crate::Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedEntry {
    pub quantity: i64,
    pub unit: String,
    pub unit_price: Money,
}

// =============================================================================
// Keypad Entry
// =============================================================================

/// The open keypad modal: the product being entered, the text buffer, and
/// the cached quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadEntry {
    product: Product,
    buffer: String,
    quote: Quote,
}

impl KeypadEntry {
    /// Opens the modal for a product with an empty buffer and no quote.
    pub fn open(product: Product) -> Self {
        KeypadEntry {
            product,
            buffer: String::new(),
            quote: Quote::None,
        }
    }

    /// The product this entry is for.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The raw display buffer (digits, then unit suffix once chosen).
    #[inline]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The cached quote.
    #[inline]
    pub fn quote(&self) -> Quote {
        self.quote
    }

    /// Appends a single digit (0-9) to the buffer.
    pub fn press_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        self.buffer.push((b'0' + digit.min(9)) as char);
    }

    /// Appends the combined "00" key.
    pub fn press_double_zero(&mut self) {
        self.buffer.push_str("00");
    }

    /// Chooses a unit: finalizes the numeric portion and appends the suffix.
    ///
    /// Returns `true` when the caller must fetch a price quote for
    /// (product, unit). Pressing a unit with no digits in the buffer is a
    /// no-op and returns `false`; no lookup is performed.
    pub fn press_unit(&mut self, unit: &str) -> bool {
        let digits: String = self.buffer.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return false;
        }
        self.buffer = format!("{digits}{unit}");
        true
    }

    /// Records the outcome of a price lookup.
    ///
    /// `None` means the lookup failed or returned no price; the quote is
    /// cached as unavailable so the entry cannot be confirmed.
    pub fn quote_received(&mut self, price: Option<Money>) {
        self.quote = match price {
            Some(p) => Quote::Price(p),
            None => Quote::Unavailable,
        };
    }

    /// Clears the buffer and any displayed price.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.quote = Quote::None;
    }

    /// Removes the last character of the buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Parses the entry and validates the quantity/unit/price triple.
    ///
    /// Quantity is the buffer's digit characters, unit its non-digit
    /// characters, price the cached quote. Any missing piece rejects the
    /// confirm; the modal stays open and nothing is added to the cart.
    ///
    /// Quantities above [`MAX_QUANTITY`] are rejected here, including digit
    /// strings too long for an i64, so no oversized entry ever reaches the
    /// cart arithmetic.
    pub fn confirm(&self) -> Result<ConfirmedEntry, ValidationError> {
        let digits: String = self.buffer.chars().filter(char::is_ascii_digit).collect();
        let unit: String = self
            .buffer
            .chars()
            .filter(|c| !c.is_ascii_digit())
            .collect();

        let quantity = match digits.parse::<i64>() {
            Ok(q) if q > MAX_QUANTITY => return Err(ValidationError::QuantityTooLarge),
            Ok(q) if q > 0 => q,
            Ok(_) => return Err(ValidationError::MissingQuantity),
            // Non-empty digits that overflow i64 are an oversized entry,
            // not a missing one.
            Err(_) if !digits.is_empty() => return Err(ValidationError::QuantityTooLarge),
            Err(_) => return Err(ValidationError::MissingQuantity),
        };
        if unit.is_empty() {
            return Err(ValidationError::MissingUnit);
        }

        let unit_price = self.quote.cached_price();
        if !unit_price.is_positive() {
            return Err(ValidationError::MissingPrice);
        }

        Ok(ConfirmedEntry {
            quantity,
            unit,
            unit_price,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_entry() -> KeypadEntry {
        KeypadEntry::open(Product {
            id: "P-01".to_string(),
            name: "Apple".to_string(),
        })
    }

    #[test]
    fn test_digits_and_double_zero_append() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        entry.press_double_zero();
        assert_eq!(entry.buffer(), "500");
    }

    #[test]
    fn test_unit_on_empty_buffer_is_noop() {
        let mut entry = apple_entry();
        assert!(!entry.press_unit("kg"));
        assert_eq!(entry.buffer(), "");
        assert_eq!(entry.quote(), Quote::None);
    }

    #[test]
    fn test_unit_finalizes_digits_and_requests_lookup() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        assert!(entry.press_unit("kg"));
        assert_eq!(entry.buffer(), "5kg");
    }

    #[test]
    fn test_second_unit_press_replaces_suffix() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        assert!(entry.press_unit("kg"));
        assert!(entry.press_unit("g"));
        assert_eq!(entry.buffer(), "5g");
    }

    #[test]
    fn test_confirm_happy_path() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        assert!(entry.press_unit("kg"));
        entry.quote_received(Some(Money::from_minor(2000)));

        let confirmed = entry.confirm().unwrap();
        assert_eq!(confirmed.quantity, 5);
        assert_eq!(confirmed.unit, "kg");
        assert_eq!(confirmed.unit_price.minor(), 2000);
    }

    #[test]
    fn test_failed_lookup_blocks_confirm() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        assert!(entry.press_unit("kg"));
        entry.quote_received(None);

        assert_eq!(entry.quote(), Quote::Unavailable);
        assert_eq!(entry.quote().cached_price(), Money::zero());
        assert_eq!(entry.confirm(), Err(ValidationError::MissingPrice));
    }

    #[test]
    fn test_oversized_quantity_is_rejected() {
        // One more digit than i64 can hold.
        let mut entry = apple_entry();
        for _ in 0..19 {
            entry.press_digit(9);
        }
        assert!(entry.press_unit("kg"));
        entry.quote_received(Some(Money::from_minor(2000)));
        assert_eq!(entry.confirm(), Err(ValidationError::QuantityTooLarge));

        // Parseable but beyond the per-line bound.
        let mut entry = apple_entry();
        entry.press_digit(2);
        for _ in 0..3 {
            entry.press_double_zero();
        }
        assert_eq!(entry.buffer(), "2000000");
        assert!(entry.press_unit("kg"));
        entry.quote_received(Some(Money::from_minor(2000)));
        assert_eq!(entry.confirm(), Err(ValidationError::QuantityTooLarge));
    }

    #[test]
    fn test_confirm_without_unit_is_rejected() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        assert_eq!(entry.confirm(), Err(ValidationError::MissingUnit));
    }

    #[test]
    fn test_confirm_without_quantity_is_rejected() {
        let entry = apple_entry();
        assert_eq!(entry.confirm(), Err(ValidationError::MissingQuantity));
    }

    #[test]
    fn test_clear_resets_buffer_and_quote() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        entry.press_unit("kg");
        entry.quote_received(Some(Money::from_minor(2000)));

        entry.clear();

        assert_eq!(entry.buffer(), "");
        assert_eq!(entry.quote(), Quote::None);
    }

    #[test]
    fn test_backspace_drops_last_char() {
        let mut entry = apple_entry();
        entry.press_digit(5);
        entry.press_unit("kg");
        entry.backspace();
        assert_eq!(entry.buffer(), "5k");

        entry.backspace();
        entry.backspace();
        assert_eq!(entry.buffer(), "");
        entry.backspace(); // already empty, stays empty
        assert_eq!(entry.buffer(), "");
    }
}
