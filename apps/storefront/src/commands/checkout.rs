//! # Checkout Commands
//!
//! Commands behind the order dialog.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart view: "Оформить заказ"                                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  open_checkout()        cart view closes, dialog opens                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  update_checkout_form() as the customer types                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  submit_order() ──► ApiError (alert)            if a check fails        │
//! │        │                                                                │
//! │        └────────► SubmitResponse, dialog shows "Спасибо за заказ!"      │
//! │                   cart empties, dialog closes and resets on its own     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{CheckoutForm, Money};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{CartState, CheckoutState, CheckoutStatus};

/// Returned by a successful [`submit_order`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub order_id: Uuid,
    pub total: Money,
    pub status: CheckoutStatus,
}

/// Opens the order dialog and closes the cart view behind it.
pub fn open_checkout(cart: &CartState, checkout: &CheckoutState) -> CheckoutStatus {
    debug!("open_checkout command");
    cart.set_view_open(false);
    checkout.open();
    checkout.status()
}

pub fn close_checkout(checkout: &CheckoutState) -> CheckoutStatus {
    debug!("close_checkout command");
    checkout.close();
    checkout.status()
}

pub fn update_checkout_form(
    checkout: &CheckoutState,
    form: CheckoutForm,
) -> Result<CheckoutStatus, ApiError> {
    checkout.update_form(form)?;
    Ok(checkout.status())
}

/// Places the order.
///
/// Returns as soon as the order is committed locally. Delivery, cart
/// clearing and the dialog reset carry on in the background; their
/// handles are dropped here.
///
/// Outside a tokio runtime the order is refused with `INTERNAL` and the
/// dialog stays as it was.
pub fn submit_order(cart: &CartState, checkout: &CheckoutState) -> Result<SubmitResponse, ApiError> {
    debug!("submit_order command");

    let receipt = checkout.submit(cart)?;
    info!(order_id = %receipt.order_id, "submit_order accepted");

    Ok(SubmitResponse {
        order_id: receipt.order_id,
        total: receipt.total,
        status: checkout.status(),
    })
}

pub fn checkout_status(checkout: &CheckoutState) -> CheckoutStatus {
    checkout.status()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, buy_click, get_cart};
    use crate::error::ErrorCode;
    use crate::state::CheckoutPhase;
    use brew_core::{Catalog, FulfillmentMode};
    use brew_intake::{CheckoutTimings, Dispatcher, MemorySink};
    use std::sync::Arc;
    use std::time::Duration;

    fn setup() -> (Catalog, CartState, CheckoutState, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let checkout = CheckoutState::new(Dispatcher::new(sink.clone()), CheckoutTimings::default());
        (Catalog::storefront(), CartState::new(), checkout, sink)
    }

    fn delivery_form(address: &str) -> CheckoutForm {
        CheckoutForm {
            fulfillment_mode: FulfillmentMode::Delivery,
            name: "Мария".to_string(),
            phone: "+7 921 000 00 00".to_string(),
            email: "maria@example.com".to_string(),
            address: address.to_string(),
            consent: true,
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_open_checkout_closes_cart_view() {
        let (catalog, cart, checkout, _) = setup();
        add_to_cart(&catalog, &cart, "drip-ethiopia", None).unwrap();
        buy_click(&cart);
        assert!(cart.is_view_open());

        let status = open_checkout(&cart, &checkout);
        assert!(status.open);
        assert!(!cart.is_view_open());

        assert!(!close_checkout(&checkout).open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_without_address_is_rejected() {
        let (catalog, cart, checkout, sink) = setup();
        add_to_cart(&catalog, &cart, "colombia-manzana", None).unwrap();
        update_checkout_form(&checkout, delivery_form("  ")).unwrap();

        let err = submit_order(&cart, &checkout).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.reason.as_deref(), Some("address_required"));
        assert_eq!(checkout_status(&checkout).phase, CheckoutPhase::Idle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sink.attempts(), 0);
        assert_eq!(get_cart(&cart).totals.item_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_order_end_to_end() {
        let (catalog, cart, checkout, sink) = setup();
        add_to_cart(&catalog, &cart, "colombia-manzana", Some("turkish")).unwrap();
        add_to_cart(&catalog, &cart, "drip-guatemala", None).unwrap();
        open_checkout(&cart, &checkout);
        update_checkout_form(&checkout, delivery_form("Невский проспект, 1")).unwrap();

        let response = submit_order(&cart, &checkout).unwrap();
        assert_eq!(response.total, Money::from_units(980));
        assert_eq!(response.status.phase, CheckoutPhase::Success);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(get_cart(&cart).totals.item_count, 0);

        let sent = sink.received();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].address, "Невский проспект, 1");
        assert_eq!(sent[0].email, "maria@example.com");
        assert_eq!(sent[0].selected_cafe, None);
        assert_eq!(
            sent[0].product,
            "Колумбия Манзана (Турка) x1 - 850 ₽\nГватемала x1 - 130 ₽"
        );

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let status = checkout_status(&checkout);
        assert_eq!(status.phase, CheckoutPhase::Idle);
        assert!(!status.open);
    }

    #[test]
    fn test_submit_outside_runtime_is_refused() {
        let (catalog, cart, checkout, sink) = setup();
        add_to_cart(&catalog, &cart, "drip-guatemala", None).unwrap();
        open_checkout(&cart, &checkout);
        update_checkout_form(&checkout, delivery_form("Литейный, 10")).unwrap();

        let err = submit_order(&cart, &checkout).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);

        let status = checkout_status(&checkout);
        assert_eq!(status.phase, CheckoutPhase::Idle);
        assert!(status.open);
        assert_eq!(status.form.address, "Литейный, 10");
        assert_eq!(get_cart(&cart).totals.item_count, 1);
        assert_eq!(sink.attempts(), 0);

        // Not stuck: edits are still accepted
        assert!(update_checkout_form(&checkout, delivery_form("Литейный, 12")).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_form_locked_until_reset() {
        let (catalog, cart, checkout, _) = setup();
        add_to_cart(&catalog, &cart, "advent-calendar", None).unwrap();
        update_checkout_form(&checkout, delivery_form("Улица, 5")).unwrap();
        submit_order(&cart, &checkout).unwrap();

        let err = update_checkout_form(&checkout, CheckoutForm::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutBusy);

        let err = submit_order(&cart, &checkout).unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutBusy);

        tokio::time::sleep(Duration::from_millis(4001)).await;
        assert!(update_checkout_form(&checkout, CheckoutForm::default()).is_ok());
    }
}
