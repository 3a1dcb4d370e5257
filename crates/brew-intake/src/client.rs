//! # Order Sinks
//!
//! Where a placed order's payload ends up.
//!
//! ## Sink Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          OrderSink (trait)                              │
//! │                                                                         │
//! │   ┌─────────────────────────────┐    ┌─────────────────────────────┐   │
//! │   │       HttpOrderSink         │    │         MemorySink          │   │
//! │   │                             │    │                             │   │
//! │   │  POST <endpoint>            │    │  Records payloads in a Vec  │   │
//! │   │  Content-Type: JSON         │    │  Optionally fails every     │   │
//! │   │  2xx → Ok                   │    │  delivery with a status     │   │
//! │   │  else → Rejected{status}    │    │                             │   │
//! │   └─────────────────────────────┘    └─────────────────────────────┘   │
//! │          production                         tests, offline demo        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the response status is consumed; the body is read solely to
//! enrich the error message of a rejected order.

use async_trait::async_trait;
use brew_core::OrderPayload;
use reqwest::Client;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};
use url::Url;

use crate::config::EndpointSettings;
use crate::error::{IntakeError, IntakeResult};

// =============================================================================
// Sink Trait
// =============================================================================

/// Destination for order payloads.
///
/// Implementations perform exactly one delivery attempt per call. Retrying
/// is never the sink's business.
#[async_trait]
pub trait OrderSink: Send + Sync {
    async fn deliver(&self, payload: &OrderPayload) -> IntakeResult<()>;

    /// Short name for log fields.
    fn name(&self) -> &'static str;
}

// =============================================================================
// HTTP Sink
// =============================================================================

/// Posts orders to the order-intake HTTP service.
#[derive(Debug, Clone)]
pub struct HttpOrderSink {
    client: Client,
    endpoint: Url,
}

impl HttpOrderSink {
    /// Builds a sink from endpoint settings.
    ///
    /// ## Errors
    /// - `InvalidUrl` if the endpoint does not parse
    /// - `Client` if the HTTP client cannot be constructed
    pub fn new(settings: &EndpointSettings) -> IntakeResult<Self> {
        let endpoint = settings.parsed_url()?;
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!("brew-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpOrderSink { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderSink for HttpOrderSink {
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint))]
    async fn deliver(&self, payload: &OrderPayload) -> IntakeResult<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

            return Err(IntakeError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = status.as_u16(), "Order accepted by intake service");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

// =============================================================================
// In-Memory Sink
// =============================================================================

/// Records payloads instead of sending them.
///
/// Used by tests and by the storefront when it runs without a network.
#[derive(Debug, Default)]
pub struct MemorySink {
    received: Mutex<Vec<OrderPayload>>,
    reject_with: Option<u16>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records each attempt, then rejects it with `status`.
    pub fn failing(status: u16) -> Self {
        MemorySink {
            received: Mutex::new(Vec::new()),
            reject_with: Some(status),
        }
    }

    /// Every payload passed to [`deliver`](OrderSink::deliver), in order.
    pub fn received(&self) -> Vec<OrderPayload> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn attempts(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl OrderSink for MemorySink {
    async fn deliver(&self, payload: &OrderPayload) -> IntakeResult<()> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.clone());

        match self.reject_with {
            Some(status) => Err(IntakeError::Rejected {
                status,
                message: "rejected by memory sink".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use brew_core::{FulfillmentMode, Money, PickupLocation};
    use serde_json::Value;
    use std::sync::Arc;

    type Inbox = Arc<Mutex<Vec<Value>>>;

    fn payload() -> OrderPayload {
        OrderPayload {
            name: "Иван".to_string(),
            phone: "+7 900 000 00 00".to_string(),
            email: String::new(),
            address: String::new(),
            comment: String::new(),
            product: "Гватемала x1 - 130 ₽".to_string(),
            total: Money::from_units(130),
            delivery_type: FulfillmentMode::Pickup,
            selected_cafe: Some(PickupLocation::Rizhskiy),
        }
    }

    async fn accept(State(inbox): State<Inbox>, Json(body): Json<Value>) -> StatusCode {
        inbox.lock().unwrap().push(body);
        StatusCode::OK
    }

    async fn explode() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "intake is down")
    }

    /// Starts an intake server on an ephemeral port, returns its base URL.
    async fn spawn_intake(inbox: Inbox) -> String {
        let app = Router::new()
            .route("/order", post(accept))
            .route("/broken", post(explode))
            .with_state(inbox);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn settings(url: String) -> EndpointSettings {
        EndpointSettings {
            url,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_http_sink_posts_camel_case_json() {
        let inbox = Inbox::default();
        let base = spawn_intake(inbox.clone()).await;
        let sink = HttpOrderSink::new(&settings(format!("{base}/order"))).unwrap();

        sink.deliver(&payload()).await.unwrap();

        let received = inbox.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["deliveryType"], "pickup");
        assert_eq!(received[0]["selectedCafe"], "rizhskiy");
        assert_eq!(received[0]["total"], 130);
        assert_eq!(received[0]["product"], "Гватемала x1 - 130 ₽");
    }

    #[tokio::test]
    async fn test_http_sink_reports_non_2xx() {
        let base = spawn_intake(Inbox::default()).await;
        let sink = HttpOrderSink::new(&settings(format!("{base}/broken"))).unwrap();

        let err = sink.deliver(&payload()).await.unwrap_err();
        match err {
            IntakeError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "intake is down");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_sink_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sink = HttpOrderSink::new(&settings(format!("http://{addr}/order"))).unwrap();
        let err = sink.deliver(&payload()).await.unwrap_err();
        assert!(err.is_delivery_error());
    }

    #[test]
    fn test_http_sink_rejects_bad_url() {
        let err = HttpOrderSink::new(&settings("::not-a-url::".to_string())).unwrap_err();
        assert!(err.is_config_error());
    }

    #[tokio::test]
    async fn test_memory_sink_records_attempts() {
        let sink = MemorySink::new();
        sink.deliver(&payload()).await.unwrap();
        assert_eq!(sink.received(), vec![payload()]);

        let failing = MemorySink::failing(503);
        assert!(failing.deliver(&payload()).await.is_err());
        assert_eq!(failing.attempts(), 1);
    }
}
