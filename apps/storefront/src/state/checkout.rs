//! # Checkout State
//!
//! The checkout dialog: its form, its phase, and the timers that walk a
//! placed order back to a clean dialog.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            submit (invalid)                                             │
//! │          ┌──────────────────┐                                           │
//! │          ▼                  │                                           │
//! │       ┌──────┐  submit   ┌────────────┐  at once  ┌─────────┐           │
//! │  ────►│ Idle │──────────►│ Submitting │──────────►│ Success │           │
//! │       └──────┘           └────────────┘           └────┬────┘           │
//! │          ▲                                             │                │
//! │          │        auto-close (3500 ms) + reset (500 ms)│                │
//! │          └─────────────────────────────────────────────┘                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two-Phase Submit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0. Find the tokio runtime; without one nothing changes                │
//! │                                                                         │
//! │  1. Local commit (under the checkout lock, never waits on the network) │
//! │     • refuse unless Idle                                               │
//! │     • validate form + cart snapshot, build the Order                   │
//! │     • Submitting → Success                                             │
//! │     • schedule: clear cart, auto-close, reset                          │
//! │                                                                         │
//! │  2. Remote acknowledgment (detached)                                   │
//! │     • Dispatcher spawns the single POST                                │
//! │     • outcome is logged; the phase never changes because of it         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use brew_core::{CheckoutForm, Money, Order, ValidationError};
use brew_intake::{CheckoutTimings, DeliveryTicket, Dispatcher};
use serde::Serialize;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cart::CartState;

// =============================================================================
// Phase & Errors
// =============================================================================

/// Where the checkout dialog is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Submitting,
    Success,
}

/// Why a checkout operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The form or cart failed a precondition. The phase is still Idle.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An order was already placed and the dialog has not reset yet.
    #[error("Checkout is busy: an order was just placed")]
    Busy,

    /// Submit was called outside a tokio runtime, so the delivery and the
    /// timers could not be started. The phase is still Idle.
    #[error("No async runtime available to place the order")]
    NoRuntime,
}

/// Snapshot of the checkout dialog for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutStatus {
    pub phase: CheckoutPhase,
    pub open: bool,
    pub form: CheckoutForm,
}

/// What a successful submit hands back.
///
/// All handles may be dropped; the tasks run to completion regardless.
#[derive(Debug)]
pub struct SubmitReceipt {
    pub order_id: Uuid,
    pub total: Money,
    pub delivery: DeliveryTicket,
    pub cart_cleared: JoinHandle<()>,
    pub reset: JoinHandle<()>,
}

// =============================================================================
// Checkout State
// =============================================================================

#[derive(Debug, Default)]
struct Dialog {
    phase: CheckoutPhase,
    open: bool,
    form: CheckoutForm,
}

/// Shared checkout state.
#[derive(Debug, Clone)]
pub struct CheckoutState {
    dialog: Arc<Mutex<Dialog>>,
    dispatcher: Dispatcher,
    timings: CheckoutTimings,
}

impl CheckoutState {
    pub fn new(dispatcher: Dispatcher, timings: CheckoutTimings) -> Self {
        CheckoutState {
            dialog: Arc::new(Mutex::new(Dialog::default())),
            dispatcher,
            timings,
        }
    }

    fn dialog(&self) -> MutexGuard<'_, Dialog> {
        self.dialog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> CheckoutStatus {
        let dialog = self.dialog();
        CheckoutStatus {
            phase: dialog.phase,
            open: dialog.open,
            form: dialog.form.clone(),
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.dialog().phase
    }

    pub fn open(&self) {
        self.dialog().open = true;
    }

    /// Closes the dialog. A pending reset still runs.
    pub fn close(&self) {
        self.dialog().open = false;
    }

    /// Replaces the form.
    ///
    /// Refused with [`CheckoutError::Busy`] outside Idle, when the dialog
    /// shows the success message instead of the form.
    pub fn update_form(&self, form: CheckoutForm) -> Result<(), CheckoutError> {
        let mut dialog = self.dialog();
        if dialog.phase != CheckoutPhase::Idle {
            return Err(CheckoutError::Busy);
        }
        dialog.form = form;
        Ok(())
    }

    /// Places an order from the current form and cart.
    ///
    /// Delivery and the timers run on the tokio runtime of the caller.
    ///
    /// ## Errors
    /// - `NoRuntime` when called outside a tokio runtime
    /// - `Busy` unless the phase is Idle
    /// - `Validation` for the first failing checkout precondition
    ///
    /// On any error the phase is unchanged, no timer is started and
    /// nothing is sent.
    pub fn submit(&self, cart: &CartState) -> Result<SubmitReceipt, CheckoutError> {
        let runtime = Handle::try_current().map_err(|err| {
            warn!(error = %err, "Submit refused, no tokio runtime");
            CheckoutError::NoRuntime
        })?;

        let order = self.commit_locally(cart)?;

        let cart_cleared = self.schedule_cart_clear(&runtime, cart.clone());
        let reset = self.schedule_reset(&runtime);
        let delivery = self.acknowledge_remotely(&runtime, &order);

        Ok(SubmitReceipt {
            order_id: order.id(),
            total: order.total(),
            delivery,
            cart_cleared,
            reset,
        })
    }

    /// Local phase: validate, build the order, flip to Success.
    fn commit_locally(&self, cart: &CartState) -> Result<Order, CheckoutError> {
        let mut dialog = self.dialog();
        if dialog.phase != CheckoutPhase::Idle {
            debug!(phase = ?dialog.phase, "Submit refused, checkout not idle");
            return Err(CheckoutError::Busy);
        }

        let snapshot = cart.with_cart(|c| c.snapshot());
        let order = Order::place(&dialog.form, snapshot).map_err(|err| {
            debug!(reason = err.reason(), "Checkout rejected");
            err
        })?;

        dialog.phase = CheckoutPhase::Submitting;
        debug!(order_id = %order.id(), "Checkout submitting");

        dialog.phase = CheckoutPhase::Success;
        info!(
            order_id = %order.id(),
            total = order.total().units(),
            lines = order.lines().len(),
            mode = %order.fulfillment().mode(),
            "Order placed"
        );

        Ok(order)
    }

    /// Remote phase: hand the order to the dispatcher and move on.
    fn acknowledge_remotely(&self, runtime: &Handle, order: &Order) -> DeliveryTicket {
        self.dispatcher.dispatch_on(runtime, order)
    }

    fn schedule_cart_clear(&self, runtime: &Handle, cart: CartState) -> JoinHandle<()> {
        let delay = self.timings.clear_cart_delay();
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            cart.with_cart_mut(|c| c.clear());
            debug!("Cart cleared after order");
        })
    }

    fn schedule_reset(&self, runtime: &Handle) -> JoinHandle<()> {
        let state = self.clone();
        let close_after = self.timings.auto_close_delay();
        let reset_after = self.timings.reset_delay();

        runtime.spawn(async move {
            tokio::time::sleep(close_after).await;
            state.close();
            debug!("Checkout closed after order");

            tokio::time::sleep(reset_after).await;
            let mut dialog = state.dialog();
            dialog.phase = CheckoutPhase::Idle;
            dialog.form = CheckoutForm::default();
            debug!("Checkout reset to idle");
        })
    }
}
