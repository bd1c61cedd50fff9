//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderdesk-core errors (this file)                                     │
//! │  └── ValidationError  - Keypad/cart input validation failures          │
//! │                                                                         │
//! │  orderdesk-api errors (separate crate)                                 │
//! │  └── ApiError         - Transport / HTTP status / decode failures      │
//! │                                                                         │
//! │  Flow: ValidationError → Notice::InvalidEntry → blocking notice        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each error variant maps to a user-facing notice

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when a keypad confirmation or a direct cart insertion does not
/// carry a complete quantity/unit/price triple. The cart is never mutated
/// when one of these is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Quantity is zero or could not be parsed from the entry buffer.
    #[error("quantity is missing or zero")]
    MissingQuantity,

    /// Quantity exceeds the per-line bound ([`crate::cart::MAX_QUANTITY`]).
    /// Keeps every line total comfortably inside the i64 range.
    #[error("quantity is too large")]
    QuantityTooLarge,

    /// No unit suffix was chosen before confirming.
    #[error("unit is missing")]
    MissingUnit,

    /// No usable price quote: the lookup failed, returned no price, or was
    /// never performed. A zero cached price lands here.
    #[error("price is missing or zero")]
    MissingPrice,
}

// =============================================================================
// Unit Tests
// =============================================================================
