//! # Order Dispatcher
//!
//! Sends placed orders to an [`OrderSink`] on a detached task.
//!
//! ## Fire-and-Forget Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  checkout ──► Dispatcher::dispatch(&order)                              │
//! │                    │                                                    │
//! │                    ├── runtime.spawn ──► sink.deliver(payload)          │
//! │                    │                         │                          │
//! │                    │                         ├── Ok  → info!            │
//! │                    │                         └── Err → error!           │
//! │                    │                                                    │
//! │                    └── DeliveryTicket (may be dropped)                  │
//! │                                                                         │
//! │  One attempt per order. The checkout state never waits on the ticket   │
//! │  and never learns how delivery went.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::money::CURRENCY_SIGN;
use brew_core::Order;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::client::OrderSink;

/// How a single delivery attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Handle to an in-flight delivery.
///
/// Dropping the ticket does not cancel the delivery.
#[derive(Debug)]
pub struct DeliveryTicket {
    order_id: Uuid,
    handle: JoinHandle<DeliveryOutcome>,
}

impl DeliveryTicket {
    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the attempt to finish.
    pub async fn outcome(self) -> DeliveryOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(join_err) => DeliveryOutcome::Failed {
                reason: format!("delivery task aborted: {join_err}"),
            },
        }
    }
}

/// Spawns one delivery task per placed order.
#[derive(Clone)]
pub struct Dispatcher {
    sink: Arc<dyn OrderSink>,
    currency_sign: String,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("sink", &self.sink.name())
            .field("currency_sign", &self.currency_sign)
            .finish()
    }
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn OrderSink>) -> Self {
        Dispatcher {
            sink,
            currency_sign: CURRENCY_SIGN.to_string(),
        }
    }

    /// Sets the sign printed after each line total in the order summary.
    pub fn with_currency_sign(mut self, currency_sign: impl Into<String>) -> Self {
        self.currency_sign = currency_sign.into();
        self
    }

    pub fn currency_sign(&self) -> &str {
        &self.currency_sign
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    /// Starts delivering `order` on the current runtime and returns
    /// immediately.
    ///
    /// Panics outside a tokio runtime; callers that cannot guarantee one
    /// use [`Dispatcher::dispatch_on`].
    pub fn dispatch(&self, order: &Order) -> DeliveryTicket {
        self.dispatch_on(&Handle::current(), order)
    }

    /// Starts delivering `order` on `runtime` and returns immediately.
    pub fn dispatch_on(&self, runtime: &Handle, order: &Order) -> DeliveryTicket {
        let order_id = order.id();
        let total = order.total();
        let payload = order.to_payload_with_sign(&self.currency_sign);
        let sink = Arc::clone(&self.sink);

        let handle = runtime.spawn(async move {
            match sink.deliver(&payload).await {
                Ok(()) => {
                    info!(
                        order_id = %order_id,
                        sink = sink.name(),
                        total = total.units(),
                        mode = %payload.delivery_type,
                        "Order delivered to intake service"
                    );
                    DeliveryOutcome::Delivered
                }
                Err(err) => {
                    error!(
                        order_id = %order_id,
                        sink = sink.name(),
                        error = %err,
                        "Order delivery failed"
                    );
                    DeliveryOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            }
        });

        DeliveryTicket { order_id, handle }
    }
}
