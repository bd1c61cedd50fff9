//! # Domain Types
//!
//! Core domain types used throughout Orderdesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │   PriceQuote    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  id (business)  │   │  unit           │       │
//! │  │                 │   │  name           │   │  price (Money)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  All three are sourced from the backend and immutable for the          │
//! │  duration of a session.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The serde shapes match the order API exactly (`{ name }`, `{ id, name }`),
//! so these types double as wire types for the GET endpoints.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A customer the order is placed for.
///
/// Fetched once at startup from `GET /api/customers`. The name is also the
/// identifier the order submission carries; the backend has no separate
/// customer key on this surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Display name, shown on the customer grid and the order header.
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for order entry.
///
/// Fetched from `GET /api/products` each time the product grid is entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier, echoed back on order submission.
    pub id: String,

    /// Display name shown on the product grid and cart rows.
    pub name: String,
}

// =============================================================================
// Price Quote
// =============================================================================

/// A unit price for one product+unit combination.
///
/// Fetched per keypad unit press from `GET /api/price`. The absence of a
/// quote (non-success response) is represented by `Option<PriceQuote>` at the
/// call site, never by a zero-priced quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Unit symbol the quote applies to (e.g. "kg").
    pub unit: String,

    /// Unit price in minor units.
    pub price: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_wire_shape() {
        let customer: Customer = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        assert_eq!(customer.name, "Alice");
    }

    #[test]
    fn test_product_wire_shape() {
        let product: Product = serde_json::from_str(r#"{"id":"P-01","name":"Apple"}"#).unwrap();
        assert_eq!(product.id, "P-01");
        assert_eq!(product.name, "Apple");
    }

    #[test]
    fn test_price_quote_roundtrip() {
        let quote = PriceQuote {
            unit: "kg".to_string(),
            price: Money::from_minor(2000),
        };
        let json = serde_json::to_string(&quote).unwrap();
        assert_eq!(json, r#"{"unit":"kg","price":2000}"#);
    }
}
