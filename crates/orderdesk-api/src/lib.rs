//! # orderdesk-api: Remote Data Client
//!
//! JSON-over-HTTP client for the order API. This crate is the only place in
//! the workspace that performs network I/O.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order API Surface                               │
//! │                                                                         │
//! │  GET  /api/customers                      → [{ name }]                 │
//! │  GET  /api/products                       → [{ id, name }]             │
//! │  GET  /api/price?productId=..&unit=..     → { price }                  │
//! │       (non-success status = "no price info", not an error)             │
//! │  POST /api/order                          → { slip_number }            │
//! │       body { customer, items: [...], totalAmount }                     │
//! │                                                                         │
//! │  No retries, no request coalescing: one user action, one request.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{OrderApi, OrderReceipt};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
