//! # Cart Model
//!
//! The ordered list of confirmed line items and its derived totals.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│ Submitted│       │
//! │  │  Cart    │     │          │     │  Screen  │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_item (keypad confirm)          clear() ──► empty  │
//! │                                                                         │
//! │  Line items are append-only: no in-place mutation, no partial removal. │
//! │  The only way back to empty is a full clear after a successful order.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Insertion order is display order
//! - Displayed totals always equal the recomputed sums (`totals()` never
//!   caches; there is no stored aggregate to drift)
//! - An invalid entry (zero quantity, empty unit, zero price) never mutates
//!   the cart

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Upper bound on a single line item's quantity.
///
/// Anything beyond a million units on one line is an entry mistake, and the
/// bound keeps `quantity × unit_price` well inside the i64 range.
pub const MAX_QUANTITY: i64 = 1_000_000;

// =============================================================================
// Line Item
// =============================================================================

/// One confirmed product-quantity-price entry.
///
/// ## Design Notes
/// - Product id and name are frozen copies taken at confirmation time, so the
///   cart stays consistent even if the product grid is re-fetched afterwards.
/// - The line total is derived (`quantity × unit_price`), never stored, so it
///   cannot disagree with its factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product business id at confirmation time (frozen).
    pub product_id: String,

    /// Product name at confirmation time (frozen).
    pub name: String,

    /// Quantity entered on the keypad. Always positive.
    pub quantity: i64,

    /// Unit symbol the price quote was fetched for (e.g. "kg").
    pub unit: String,

    /// Unit price in minor units at confirmation time (frozen).
    pub unit_price: Money,

    /// When this item was confirmed into the cart.
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The order-entry cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Confirmed line items, in insertion order.
    pub items: Vec<LineItem>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends a confirmed entry as a new line item.
    ///
    /// ## Behavior
    /// Every confirmation appends its own row, even for a product already in
    /// the cart: re-ordering Apple twice yields two rows, matching how the
    /// order slip is printed.
    ///
    /// ## Errors
    /// Rejects without mutating the cart when the entry is incomplete:
    /// - `MissingQuantity` for `quantity <= 0`
    /// - `QuantityTooLarge` for `quantity > MAX_QUANTITY`
    /// - `MissingUnit` for an empty unit symbol
    /// - `MissingPrice` for a non-positive unit price (a failed price lookup
    ///   caches zero, which must fail here)
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        unit: &str,
        unit_price: Money,
    ) -> Result<(), ValidationError> {
        if quantity <= 0 {
            return Err(ValidationError::MissingQuantity);
        }
        if quantity > MAX_QUANTITY {
            return Err(ValidationError::QuantityTooLarge);
        }
        if unit.is_empty() {
            return Err(ValidationError::MissingUnit);
        }
        if !unit_price.is_positive() {
            return Err(ValidationError::MissingPrice);
        }

        self.items.push(LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit: unit.to_string(),
            unit_price,
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Clears all items from the cart. Used after successful order completion.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Recomputes the cart totals from current contents.
    ///
    /// Always recomputed, never cached, so the rendered totals cannot drift
    /// from the line items.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            quantity: self.items.iter().map(|i| i.quantity).sum(),
            amount: self.items.iter().map(LineItem::line_total).sum(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived cart totals: sum of quantities and sum of line totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Total quantity across all line items.
    pub quantity: i64,

    /// Total amount across all line items.
    pub amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
