//! # Order API Client
//!
//! The concrete HTTP client for the order API.
//!
//! ## Call Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              One user action, one outstanding request                   │
//! │                                                                         │
//! │  Session reducer emits Effect ──► event loop awaits ONE client call    │
//! │       FetchCustomers          ──► customers()                           │
//! │       FetchProducts           ──► products()                            │
//! │       LookupPrice             ──► unit_price()                          │
//! │       SubmitOrder             ──► submit_order()                        │
//! │                                                                         │
//! │  A missing price is Ok(None), not an error: the keypad renders         │
//! │  "no price info" and validation rejects the confirm later.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use orderdesk_core::{Money, OrderDraft, PriceQuote};
use orderdesk_core::{Customer, Product};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Wire Types
// =============================================================================

/// `GET /api/price` response body.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: Money,
}

/// `POST /api/order` request body.
///
/// ## Why a DTO?
/// The wire shape is not the domain shape: line items drop their internal
/// timestamps, carry a flattened `total`, and the envelope uses the
/// server's `totalAmount` casing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderPayload {
    customer: String,
    items: Vec<OrderLine>,
    total_amount: Money,
}

/// One line item on the wire.
#[derive(Debug, Clone, Serialize)]
struct OrderLine {
    id: String,
    name: String,
    quantity: i64,
    unit: String,
    price: Money,
    total: Money,
}

impl From<&OrderDraft> for OrderPayload {
    fn from(draft: &OrderDraft) -> Self {
        OrderPayload {
            customer: draft.customer.clone(),
            items: draft
                .items
                .iter()
                .map(|item| OrderLine {
                    id: item.product_id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit: item.unit.clone(),
                    price: item.unit_price,
                    total: item.line_total(),
                })
                .collect(),
            total_amount: draft.total_amount,
        }
    }
}

/// `POST /api/order` success response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReceipt {
    /// Server-issued slip number, shown to the operator as the receipt
    /// reference.
    pub slip_number: String,
}

// =============================================================================
// Order Api
// =============================================================================

/// HTTP client for the order API.
///
/// Cloning is cheap: `reqwest::Client` is a shared handle, so the event
/// loop can hand a clone to each spawned request task.
#[derive(Debug, Clone)]
pub struct OrderApi {
    http: Client,
    base_url: String,
}

impl OrderApi {
    /// Builds the client from a normalized config.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client {
                message: e.to_string(),
            })?;
        Ok(OrderApi {
            http,
            base_url: config.base_url,
        })
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the customer grid (`GET /api/customers`).
    pub async fn customers(&self) -> ApiResult<Vec<Customer>> {
        self.get_json("/api/customers").await
    }

    /// Fetches the product grid (`GET /api/products`).
    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.get_json("/api/products").await
    }

    /// Looks up the unit price for one product+unit combination.
    ///
    /// A non-success status is `Ok(None)` ("no price info"), by the API
    /// contract; only transport and decode failures are errors.
    pub async fn unit_price(&self, product_id: &str, unit: &str) -> ApiResult<Option<PriceQuote>> {
        let url = format!("{}/api/price", self.base_url);
        debug!(product_id, unit, "price lookup");

        let resp = self
            .http
            .get(&url)
            .query(&[("productId", product_id), ("unit", unit)])
            .send()
            .await
            .map_err(|e| ApiError::transport(&self.base_url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            debug!(%status, product_id, unit, "no price info");
            return Ok(None);
        }

        let body: PriceResponse = resp.json().await.map_err(ApiError::decode)?;
        Ok(Some(PriceQuote {
            unit: unit.to_string(),
            price: body.price,
        }))
    }

    /// Submits a finished order (`POST /api/order`).
    pub async fn submit_order(&self, draft: &OrderDraft) -> ApiResult<OrderReceipt> {
        let url = format!("{}/api/order", self.base_url);
        let payload = OrderPayload::from(draft);
        info!(
            customer = %payload.customer,
            items = payload.items.len(),
            total = %payload.total_amount,
            "submitting order"
        );

        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::transport(&self.base_url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::status(status));
        }

        let receipt: OrderReceipt = resp.json().await.map_err(ApiError::decode)?;
        info!(slip_number = %receipt.slip_number, "order accepted");
        Ok(receipt)
    }

    /// Shared GET-and-decode path for the two grid endpoints.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::transport(&self.base_url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::status(status));
        }

        resp.json::<T>().await.map_err(ApiError::decode)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use orderdesk_core::Cart;
    use serde_json::json;

    fn api_for(server: &MockServer) -> OrderApi {
        OrderApi::new(ApiConfig::new(server.base_url())).expect("client builds")
    }

    fn draft_with_two_items() -> OrderDraft {
        let mut cart = Cart::new();
        let apple = Product {
            id: "P-01".to_string(),
            name: "Apple".to_string(),
        };
        let pear = Product {
            id: "P-02".to_string(),
            name: "Pear".to_string(),
        };
        cart.add_item(&apple, 5, "kg", Money::from_minor(2000)).unwrap();
        cart.add_item(&pear, 2, "box", Money::from_minor(12_500))
            .unwrap();
        OrderDraft {
            customer: "Alice".to_string(),
            items: cart.items.clone(),
            total_amount: cart.totals().amount,
        }
    }

    #[test]
    fn test_order_payload_wire_shape() {
        let payload = OrderPayload::from(&draft_with_two_items());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "customer": "Alice",
                "items": [
                    {"id": "P-01", "name": "Apple", "quantity": 5, "unit": "kg",
                     "price": 2000, "total": 10000},
                    {"id": "P-02", "name": "Pear", "quantity": 2, "unit": "box",
                     "price": 12500, "total": 25000},
                ],
                "totalAmount": 35000,
            })
        );
    }

    #[tokio::test]
    async fn test_customers_fetch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/customers");
                then.status(200)
                    .json_body(json!([{"name": "Alice"}, {"name": "Bob"}]));
            })
            .await;

        let customers = api_for(&server).customers().await.unwrap();

        mock.assert_async().await;
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_products_fetch() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products");
                then.status(200)
                    .json_body(json!([{"id": "P-01", "name": "Apple"}]));
            })
            .await;

        let products = api_for(&server).products().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "P-01");
    }

    #[tokio::test]
    async fn test_grid_fetch_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/customers");
                then.status(500);
            })
            .await;

        let err = api_for(&server).customers().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unit_price_found() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/price")
                    .query_param("productId", "P-01")
                    .query_param("unit", "kg");
                then.status(200).json_body(json!({"price": 2000}));
            })
            .await;

        let quote = api_for(&server).unit_price("P-01", "kg").await.unwrap();

        mock.assert_async().await;
        let quote = quote.expect("price exists");
        assert_eq!(quote.unit, "kg");
        assert_eq!(quote.price.minor(), 2000);
    }

    #[tokio::test]
    async fn test_unit_price_missing_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/price");
                then.status(404).json_body(json!({"error": "Price not found"}));
            })
            .await;

        let quote = api_for(&server).unit_price("P-99", "kg").await.unwrap();
        assert!(quote.is_none());
    }

    #[tokio::test]
    async fn test_submit_order_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/order")
                    .json_body_partial(r#"{"customer": "Alice", "totalAmount": 35000}"#);
                then.status(200).json_body(json!({"slip_number": "A-001"}));
            })
            .await;

        let receipt = api_for(&server)
            .submit_order(&draft_with_two_items())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(receipt.slip_number, "A-001");
    }

    #[tokio::test]
    async fn test_submit_order_failure_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/order");
                then.status(400).json_body(json!({"error": "Missing order data"}));
            })
            .await;

        let err = api_for(&server)
            .submit_order(&draft_with_two_items())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/customers");
                then.status(200).body("not json");
            })
            .await;

        let err = api_for(&server).customers().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
