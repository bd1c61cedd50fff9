//! # orderdesk-core: Pure Business Logic for Orderdesk
//!
//! This crate is the **heart** of the order-entry front end. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Orderdesk Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal Front End (ratatui)                    │   │
//! │  │    Customer Grid ──► Product Grid ──► Keypad ──► Payment        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ key events → intents                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orderdesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────────────┐   │   │
//! │  │   │  money   │ │   cart   │ │  keypad  │ │    session      │   │   │
//! │  │   │  Money   │ │   Cart   │ │  Entry   │ │ Intent/Effect   │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └─────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ effects                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 orderdesk-api (Remote Data Client)              │   │
//! │  │       GET /api/customers, /api/products, /api/price             │   │
//! │  │       POST /api/order                                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, PriceQuote)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`cart`] - Cart and line-item accumulation
//! - [`keypad`] - Quantity-entry buffer for the keypad modal
//! - [`session`] - Screen state machine: intents in, effects out
//! - [`view`] - Pure projections of state into displayable rows
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: The reducer is deterministic - same intent sequence,
//!    same session state
//! 2. **No I/O**: Network and rendering are FORBIDDEN here; the reducer
//!    returns [`session::Effect`] values describing the I/O the caller must do
//! 3. **Integer Money**: All monetary values are integer minor units (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod keypad;
pub mod money;
pub mod session;
pub mod types;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use orderdesk_core::Money` instead of
// `use orderdesk_core::money::Money`

pub use cart::{Cart, CartTotals, LineItem, MAX_QUANTITY};
pub use error::ValidationError;
pub use keypad::{ConfirmedEntry, KeypadEntry, Quote};
pub use money::Money;
pub use session::{Effect, Intent, Notice, OrderDraft, Screen, Session};
pub use types::{Customer, PriceQuote, Product};
