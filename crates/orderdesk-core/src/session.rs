//! # Session State Machine
//!
//! The explicit session state and its reducer. Every user action and every
//! completed network call is an [`Intent`]; applying an intent mutates the
//! [`Session`] and returns the [`Effect`]s the caller must perform. No
//! rendering and no I/O happen here, which is what makes the screen flow
//! testable without a terminal or a server.
//!
//! ## Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Screen Transitions                               │
//! │                                                                         │
//! │  ┌────────────────┐  SelectCustomer(i)  ┌────────────────┐             │
//! │  │ SelectCustomer │────────────────────►│ SelectProduct  │             │
//! │  │   (initial)    │   + FetchProducts   │                │             │
//! │  └────────────────┘                     └───────┬────────┘             │
//! │                                          ▲      │ GoToPayment          │
//! │                                          │      │ (customer required)  │
//! │                         BackToProducts / │      ▼                      │
//! │                         OrderAccepted ┌──┴─────────┐                   │
//! │                                       │  Payment   │                   │
//! │                                       └────────────┘                   │
//! │                                                                         │
//! │  SelectProduct(i) opens the keypad modal WITHOUT changing screens.     │
//! │  No path reaches Payment without a customer, and none reaches          │
//! │  SelectProduct without passing through SelectCustomer first.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, LineItem};
use crate::error::ValidationError;
use crate::keypad::KeypadEntry;
use crate::money::Money;
use crate::types::{Customer, Product};

// =============================================================================
// Screen
// =============================================================================

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Customer grid (initial screen).
    SelectCustomer,
    /// Product grid; the keypad modal opens on top of this screen.
    SelectProduct,
    /// Payment controls; the product grid is hidden.
    Payment,
}

// =============================================================================
// Intents
// =============================================================================

/// Everything that can happen to a session.
///
/// User actions and network completions go through the same funnel, so the
/// whole front end is one transition function over this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Session start: request the customer grid.
    Start,
    /// `GET /api/customers` finished.
    CustomersLoaded(Vec<Customer>),
    /// `GET /api/customers` failed.
    CustomersUnavailable,
    /// A customer button on the grid was pressed (grid index).
    SelectCustomer(usize),
    /// `GET /api/products` finished.
    ProductsLoaded(Vec<Product>),
    /// `GET /api/products` failed.
    ProductsUnavailable,
    /// A product button on the grid was pressed (grid index).
    SelectProduct(usize),
    /// Keypad digit key 0-9.
    KeypadDigit(u8),
    /// Keypad combined "00" key.
    KeypadDoubleZero,
    /// Keypad unit key (unit symbol, e.g. "kg").
    KeypadUnit(String),
    /// `GET /api/price` finished; `None` means no price info.
    QuoteArrived(Option<Money>),
    /// Keypad clear key.
    KeypadClear,
    /// Keypad backspace key.
    KeypadBackspace,
    /// Keypad confirm key.
    KeypadConfirm,
    /// Keypad close/cancel key.
    KeypadClose,
    /// "Go to payment" control.
    GoToPayment,
    /// "Back" control on the payment screen.
    BackToProducts,
    /// "Complete" control on the payment screen.
    CompleteOrder,
    /// `POST /api/order` succeeded with a slip number.
    OrderAccepted { slip_number: String },
    /// `POST /api/order` failed.
    OrderRejected,
    /// The operator dismissed the blocking notice.
    DismissNotice,
}

// =============================================================================
// Effects
// =============================================================================

/// I/O the caller must perform after applying an intent.
///
/// The reducer never performs network calls itself; it hands these back and
/// the event loop reports results as new intents
/// ([`Intent::CustomersLoaded`], [`Intent::QuoteArrived`], ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the customer grid (`GET /api/customers`).
    FetchCustomers,
    /// Fetch the product grid (`GET /api/products`).
    FetchProducts,
    /// Fetch a unit price (`GET /api/price?productId=..&unit=..`).
    LookupPrice { product_id: String, unit: String },
    /// Submit the finished order (`POST /api/order`).
    SubmitOrder(OrderDraft),
}

/// A finished order, ready for submission.
///
/// The total is recomputed from the line items at build time, never read
/// from any stored aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Customer identifier (the name, on this API surface).
    pub customer: String,
    /// All confirmed line items, in cart order.
    pub items: Vec<LineItem>,
    /// Sum of the line totals.
    pub total_amount: Money,
}

// =============================================================================
// Notices
// =============================================================================

/// A blocking user-facing notice.
///
/// Exactly one notice can be pending; the event loop renders it over
/// everything else until the operator dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Keypad confirm rejected: incomplete quantity/unit/price.
    InvalidEntry(ValidationError),
    /// Complete pressed with an empty cart.
    EmptyCart,
    /// A grid fetch failed.
    FetchFailed { what: &'static str },
    /// Order submission failed; the cart is kept for retry.
    OrderFailed,
    /// Order accepted; carries the server-issued slip number.
    OrderComplete { slip_number: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidEntry(err) => {
                write!(f, "Quantity, unit, or price is not valid: {err}")
            }
            Notice::EmptyCart => write!(f, "There are no items in the order"),
            Notice::FetchFailed { what } => write!(f, "Could not load {what} from the server"),
            Notice::OrderFailed => write!(f, "An error occurred while processing the order"),
            Notice::OrderComplete { slip_number } => {
                write!(f, "Order complete! Slip number: {slip_number}")
            }
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The whole client-side state of one order-entry session.
///
/// ## Design Notes
/// This is a plain value object; the previous generation of this front end
/// kept all of this in module-level mutable variables, which made the screen
/// flow untestable. Reducer in, effects out.
#[derive(Debug, Clone)]
pub struct Session {
    /// Active screen.
    pub screen: Screen,
    /// Customer grid contents (fetched once at startup).
    pub customers: Vec<Customer>,
    /// Product grid contents (re-fetched when the product screen is entered).
    pub products: Vec<Product>,
    /// The selected customer, set on the first transition.
    pub customer: Option<Customer>,
    /// The open keypad modal, if any.
    pub keypad: Option<KeypadEntry>,
    /// Accumulated line items.
    pub cart: Cart,
    /// Slip number of the most recently completed order.
    pub last_slip_number: Option<String>,
    /// Pending blocking notice, if any.
    pub notice: Option<Notice>,
}

impl Session {
    /// Creates a fresh session on the customer-selection screen.
    pub fn new() -> Self {
        Session {
            screen: Screen::SelectCustomer,
            customers: Vec::new(),
            products: Vec::new(),
            customer: None,
            keypad: None,
            cart: Cart::new(),
            last_slip_number: None,
            notice: None,
        }
    }

    /// Applies one intent, returning the effects the caller must perform.
    ///
    /// Intents that are impossible in the current state (a keypad key with
    /// no modal open, payment without a customer, ...) are ignored rather
    /// than panicking: a terminal keeps delivering key events regardless of
    /// what is on screen.
    pub fn apply(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Start => vec![Effect::FetchCustomers],

            Intent::CustomersLoaded(customers) => {
                self.customers = customers;
                Vec::new()
            }

            Intent::CustomersUnavailable => {
                self.notice = Some(Notice::FetchFailed { what: "customers" });
                Vec::new()
            }

            Intent::SelectCustomer(index) => self.select_customer(index),

            Intent::ProductsLoaded(products) => {
                self.products = products;
                Vec::new()
            }

            Intent::ProductsUnavailable => {
                self.notice = Some(Notice::FetchFailed { what: "products" });
                Vec::new()
            }

            Intent::SelectProduct(index) => {
                self.open_keypad(index);
                Vec::new()
            }

            Intent::KeypadDigit(digit) => {
                if let Some(entry) = self.keypad.as_mut() {
                    entry.press_digit(digit);
                }
                Vec::new()
            }

            Intent::KeypadDoubleZero => {
                if let Some(entry) = self.keypad.as_mut() {
                    entry.press_double_zero();
                }
                Vec::new()
            }

            Intent::KeypadUnit(unit) => self.press_unit(&unit),

            Intent::QuoteArrived(price) => {
                if let Some(entry) = self.keypad.as_mut() {
                    entry.quote_received(price);
                }
                Vec::new()
            }

            Intent::KeypadClear => {
                if let Some(entry) = self.keypad.as_mut() {
                    entry.clear();
                }
                Vec::new()
            }

            Intent::KeypadBackspace => {
                if let Some(entry) = self.keypad.as_mut() {
                    entry.backspace();
                }
                Vec::new()
            }

            Intent::KeypadConfirm => {
                self.confirm_entry();
                Vec::new()
            }

            Intent::KeypadClose => {
                self.keypad = None;
                Vec::new()
            }

            Intent::GoToPayment => {
                // Payment is only reachable from the product grid once a
                // customer has been chosen and no modal is open.
                if self.screen == Screen::SelectProduct
                    && self.customer.is_some()
                    && self.keypad.is_none()
                {
                    self.screen = Screen::Payment;
                }
                Vec::new()
            }

            Intent::BackToProducts => {
                // Cart stays intact.
                if self.screen == Screen::Payment {
                    self.screen = Screen::SelectProduct;
                }
                Vec::new()
            }

            Intent::CompleteOrder => self.complete_order(),

            Intent::OrderAccepted { slip_number } => {
                self.last_slip_number = Some(slip_number.clone());
                self.notice = Some(Notice::OrderComplete { slip_number });
                self.cart.clear();
                self.screen = Screen::SelectProduct;
                Vec::new()
            }

            Intent::OrderRejected => {
                // Cart and screen untouched so the operator may retry.
                self.notice = Some(Notice::OrderFailed);
                Vec::new()
            }

            Intent::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    /// Stores the chosen customer and moves to the product grid.
    fn select_customer(&mut self, index: usize) -> Vec<Effect> {
        if self.screen != Screen::SelectCustomer {
            return Vec::new();
        }
        let Some(customer) = self.customers.get(index) else {
            return Vec::new();
        };
        self.customer = Some(customer.clone());
        self.screen = Screen::SelectProduct;
        vec![Effect::FetchProducts]
    }

    /// Opens the keypad modal for a product on the grid.
    fn open_keypad(&mut self, index: usize) {
        if self.screen != Screen::SelectProduct || self.keypad.is_some() {
            return;
        }
        if let Some(product) = self.products.get(index) {
            self.keypad = Some(KeypadEntry::open(product.clone()));
        }
    }

    /// Finalizes the numeric portion of the entry and requests a quote.
    fn press_unit(&mut self, unit: &str) -> Vec<Effect> {
        let Some(entry) = self.keypad.as_mut() else {
            return Vec::new();
        };
        if !entry.press_unit(unit) {
            // Empty buffer: no-op, no lookup.
            return Vec::new();
        }
        vec![Effect::LookupPrice {
            product_id: entry.product().id.clone(),
            unit: unit.to_string(),
        }]
    }

    /// Confirms the keypad entry into the cart, or raises a notice.
    fn confirm_entry(&mut self) {
        let Some(entry) = self.keypad.as_ref() else {
            return;
        };
        let confirmed = match entry.confirm() {
            Ok(confirmed) => confirmed,
            Err(err) => {
                // Modal stays open; nothing was added.
                self.notice = Some(Notice::InvalidEntry(err));
                return;
            }
        };
        let product = entry.product().clone();
        match self.cart.add_item(
            &product,
            confirmed.quantity,
            &confirmed.unit,
            confirmed.unit_price,
        ) {
            Ok(()) => self.keypad = None,
            Err(err) => self.notice = Some(Notice::InvalidEntry(err)),
        }
    }

    /// Builds and submits the order, or raises the empty-cart notice.
    fn complete_order(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Payment {
            return Vec::new();
        }
        if self.cart.is_empty() {
            // No network call may be issued for an empty cart.
            self.notice = Some(Notice::EmptyCart);
            return Vec::new();
        }
        let Some(customer) = self.customer.as_ref() else {
            // Unreachable through the screen flow.
            return Vec::new();
        };
        let draft = OrderDraft {
            customer: customer.name.clone(),
            items: self.cart.items.clone(),
            total_amount: self.cart.totals().amount,
        };
        vec![Effect::SubmitOrder(draft)]
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> Vec<Customer> {
        vec![
            Customer {
                name: "Alice".to_string(),
            },
            Customer {
                name: "Bob".to_string(),
            },
        ]
    }

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: "P-01".to_string(),
                name: "Apple".to_string(),
            },
            Product {
                id: "P-02".to_string(),
                name: "Pear".to_string(),
            },
        ]
    }

    /// Drives a session to the product grid with "Alice" selected.
    fn session_on_product_grid() -> Session {
        let mut session = Session::new();
        assert_eq!(session.apply(Intent::Start), vec![Effect::FetchCustomers]);
        session.apply(Intent::CustomersLoaded(customers()));
        let effects = session.apply(Intent::SelectCustomer(0));
        assert_eq!(effects, vec![Effect::FetchProducts]);
        session.apply(Intent::ProductsLoaded(products()));
        session
    }

    /// Adds one confirmed line item through the keypad.
    fn add_item_via_keypad(session: &mut Session, index: usize, digits: &[u8], price: i64) {
        session.apply(Intent::SelectProduct(index));
        for &d in digits {
            session.apply(Intent::KeypadDigit(d));
        }
        let effects = session.apply(Intent::KeypadUnit("kg".to_string()));
        assert_eq!(effects.len(), 1);
        session.apply(Intent::QuoteArrived(Some(Money::from_minor(price))));
        session.apply(Intent::KeypadConfirm);
        assert!(session.keypad.is_none());
    }

    #[test]
    fn test_initial_screen_is_customer_selection() {
        let session = Session::new();
        assert_eq!(session.screen, Screen::SelectCustomer);
        assert!(session.customer.is_none());
        assert!(session.cart.is_empty());
    }

    #[test]
    fn test_customer_selection_fetches_products() {
        let session = session_on_product_grid();
        assert_eq!(session.screen, Screen::SelectProduct);
        assert_eq!(session.customer.as_ref().unwrap().name, "Alice");
    }

    #[test]
    fn test_product_selection_requires_customer_first() {
        let mut session = Session::new();
        session.apply(Intent::CustomersLoaded(customers()));
        // Product selection and payment are unreachable before a customer
        // is chosen.
        session.apply(Intent::SelectProduct(0));
        assert!(session.keypad.is_none());
        session.apply(Intent::GoToPayment);
        assert_eq!(session.screen, Screen::SelectCustomer);
    }

    #[test]
    fn test_payment_requires_product_screen() {
        let mut session = session_on_product_grid();
        session.apply(Intent::SelectProduct(0));
        // Modal open: payment control does nothing.
        session.apply(Intent::GoToPayment);
        assert_eq!(session.screen, Screen::SelectProduct);

        session.apply(Intent::KeypadClose);
        session.apply(Intent::GoToPayment);
        assert_eq!(session.screen, Screen::Payment);
    }

    #[test]
    fn test_back_from_payment_keeps_cart() {
        let mut session = session_on_product_grid();
        add_item_via_keypad(&mut session, 0, &[5], 2000);
        session.apply(Intent::GoToPayment);
        session.apply(Intent::BackToProducts);

        assert_eq!(session.screen, Screen::SelectProduct);
        assert_eq!(session.cart.item_count(), 1);
    }

    #[test]
    fn test_keypad_scenario_alice_apple_5kg() {
        let mut session = session_on_product_grid();

        session.apply(Intent::SelectProduct(0));
        session.apply(Intent::KeypadDigit(5));
        let effects = session.apply(Intent::KeypadUnit("kg".to_string()));
        assert_eq!(
            effects,
            vec![Effect::LookupPrice {
                product_id: "P-01".to_string(),
                unit: "kg".to_string(),
            }]
        );
        session.apply(Intent::QuoteArrived(Some(Money::from_minor(2000))));
        session.apply(Intent::KeypadConfirm);

        assert!(session.keypad.is_none());
        assert_eq!(session.cart.item_count(), 1);
        let item = &session.cart.items[0];
        assert_eq!(item.name, "Apple");
        assert_eq!(item.quantity, 5);
        assert_eq!(item.unit, "kg");
        assert_eq!(item.unit_price.minor(), 2000);
        assert_eq!(item.line_total().minor(), 10_000);

        let totals = session.cart.totals();
        assert_eq!(totals.quantity, 5);
        assert_eq!(totals.amount.grouped(), "10,000");
    }

    #[test]
    fn test_failed_quote_blocks_confirm() {
        let mut session = session_on_product_grid();

        session.apply(Intent::SelectProduct(0));
        session.apply(Intent::KeypadDigit(5));
        session.apply(Intent::KeypadUnit("kg".to_string()));
        session.apply(Intent::QuoteArrived(None));
        session.apply(Intent::KeypadConfirm);

        // Modal stays open, notice raised, cart unchanged.
        assert!(session.keypad.is_some());
        assert!(matches!(session.notice, Some(Notice::InvalidEntry(_))));
        assert!(session.cart.is_empty());
    }

    #[test]
    fn test_oversized_entry_never_reaches_the_cart() {
        let mut session = session_on_product_grid();
        session.apply(Intent::SelectProduct(0));
        // More digits than an i64 holds; every other validation input is
        // legitimate (positive quote, real unit).
        for _ in 0..19 {
            session.apply(Intent::KeypadDigit(9));
        }
        session.apply(Intent::KeypadUnit("kg".to_string()));
        session.apply(Intent::QuoteArrived(Some(Money::from_minor(2000))));
        session.apply(Intent::KeypadConfirm);

        assert!(session.keypad.is_some());
        assert_eq!(
            session.notice,
            Some(Notice::InvalidEntry(ValidationError::QuantityTooLarge))
        );
        assert!(session.cart.is_empty());

        // Totals stay computable and zeroed.
        let totals = session.cart.totals();
        assert_eq!(totals.quantity, 0);
        assert_eq!(totals.amount, Money::zero());
    }

    #[test]
    fn test_unit_on_empty_buffer_issues_no_lookup() {
        let mut session = session_on_product_grid();
        session.apply(Intent::SelectProduct(0));
        let effects = session.apply(Intent::KeypadUnit("kg".to_string()));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_keypad_close_discards_entry() {
        let mut session = session_on_product_grid();
        session.apply(Intent::SelectProduct(0));
        session.apply(Intent::KeypadDigit(5));
        session.apply(Intent::KeypadClose);

        assert!(session.keypad.is_none());
        assert!(session.cart.is_empty());
    }

    #[test]
    fn test_empty_cart_never_submits() {
        let mut session = session_on_product_grid();
        session.apply(Intent::GoToPayment);
        let effects = session.apply(Intent::CompleteOrder);

        assert!(effects.is_empty());
        assert_eq!(session.notice, Some(Notice::EmptyCart));
        assert_eq!(session.screen, Screen::Payment);
    }

    #[test]
    fn test_order_submission_round_trip() {
        let mut session = session_on_product_grid();
        add_item_via_keypad(&mut session, 0, &[5], 2000); // 10,000
        add_item_via_keypad(&mut session, 1, &[2], 12_500); // 25,000
        session.apply(Intent::GoToPayment);

        let effects = session.apply(Intent::CompleteOrder);
        let Some(Effect::SubmitOrder(draft)) = effects.first() else {
            panic!("expected SubmitOrder effect, got {effects:?}");
        };
        assert_eq!(draft.customer, "Alice");
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.total_amount.minor(), 35_000);

        session.apply(Intent::OrderAccepted {
            slip_number: "A-001".to_string(),
        });

        // Confirmation carries the slip number; cart resets; screen returns
        // to the product grid with payment hidden.
        let notice = session.notice.clone().unwrap();
        assert!(notice.to_string().contains("A-001"));
        assert!(session.cart.is_empty());
        assert_eq!(session.screen, Screen::SelectProduct);
        assert_eq!(session.last_slip_number.as_deref(), Some("A-001"));
    }

    #[test]
    fn test_order_failure_preserves_state() {
        let mut session = session_on_product_grid();
        add_item_via_keypad(&mut session, 0, &[5], 2000);
        session.apply(Intent::GoToPayment);
        session.apply(Intent::CompleteOrder);

        session.apply(Intent::OrderRejected);

        assert_eq!(session.notice, Some(Notice::OrderFailed));
        assert_eq!(session.screen, Screen::Payment);
        assert_eq!(session.cart.item_count(), 1);
    }

    #[test]
    fn test_fetch_failures_raise_notices() {
        let mut session = Session::new();
        session.apply(Intent::CustomersUnavailable);
        assert_eq!(
            session.notice,
            Some(Notice::FetchFailed { what: "customers" })
        );

        session.apply(Intent::DismissNotice);
        assert!(session.notice.is_none());
    }
}
