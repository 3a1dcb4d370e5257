//! # Order Module
//!
//! The checkout form, the immutable order built from it, and the JSON
//! payload sent to the order-intake service.
//!
//! ## From Form to Wire
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CheckoutForm (mutable, edited by the customer)                        │
//! │       │                                                                 │
//! │       │  + cart snapshot                                               │
//! │       ▼                                                                 │
//! │  Order::place() ── validate_checkout() ── ValidationError ──► UI       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order (immutable: id, lines, total, contact, fulfillment)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderPayload (camelCase JSON, sent exactly once)                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartLineItem;
use crate::error::{CoreError, ValidationError};
use crate::money::{Money, CURRENCY_SIGN};
use crate::validation::{is_blank, validate_checkout};

// =============================================================================
// Fulfillment
// =============================================================================

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMode {
    #[default]
    Delivery,
    Pickup,
}

impl FulfillmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentMode::Delivery => "delivery",
            FulfillmentMode::Pickup => "pickup",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FulfillmentMode::Delivery => "Доставка",
            FulfillmentMode::Pickup => "Самовывоз",
        }
    }
}

impl fmt::Display for FulfillmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Ok(FulfillmentMode::Delivery),
            "pickup" => Ok(FulfillmentMode::Pickup),
            other => Err(CoreError::UnknownFulfillmentMode(other.to_string())),
        }
    }
}

/// Coffee shops that hand out pickup orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PickupLocation {
    #[default]
    Rizhskiy,
    Maly,
}

impl PickupLocation {
    pub const ALL: [PickupLocation; 2] = [PickupLocation::Rizhskiy, PickupLocation::Maly];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickupLocation::Rizhskiy => "rizhskiy",
            PickupLocation::Maly => "maly",
        }
    }

    pub fn address(&self) -> &'static str {
        match self {
            PickupLocation::Rizhskiy => "Рижский проспект, 2",
            PickupLocation::Maly => "Малый проспект П.С., 60/19",
        }
    }

    pub fn opening_hours(&self) -> &'static str {
        match self {
            PickupLocation::Rizhskiy => "Пн–Пт: 9:00–20:00, Сб–Вс: 10:00–20:00",
            PickupLocation::Maly => "Пн–Пт: 9:00–21:00, Сб–Вс: 10:00–21:00",
        }
    }
}

impl fmt::Display for PickupLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickupLocation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PickupLocation::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownPickupLocation(s.to_string()))
    }
}

/// Resolved fulfillment of a placed order.
///
/// Unlike the form, which always carries both an address and a location,
/// an order only keeps what its mode needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Fulfillment {
    Delivery { address: String },
    Pickup { location: PickupLocation },
}

impl Fulfillment {
    pub fn mode(&self) -> FulfillmentMode {
        match self {
            Fulfillment::Delivery { .. } => FulfillmentMode::Delivery,
            Fulfillment::Pickup { .. } => FulfillmentMode::Pickup,
        }
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// What the customer has typed into the checkout dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub fulfillment_mode: FulfillmentMode,
    pub pickup_location: PickupLocation,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub comment: String,
    /// Consent to personal data processing.
    pub consent: bool,
}

/// Contact details copied from the form when the order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerContact {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub comment: Option<String>,
}

fn optional(value: &str) -> Option<String> {
    (!is_blank(value)).then(|| value.trim().to_string())
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Built once, at submission time, from a validated form and a cart
/// snapshot. All fields are private: an order is never modified after
/// [`Order::place`] returns.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    id: Uuid,
    placed_at: DateTime<Utc>,
    lines: Vec<CartLineItem>,
    total: Money,
    contact: CustomerContact,
    fulfillment: Fulfillment,
}

impl Order {
    /// Validates the form against the cart snapshot and builds the order.
    ///
    /// ## Errors
    /// The first failing checkout precondition, see
    /// [`validate_checkout`](crate::validation::validate_checkout).
    pub fn place(form: &CheckoutForm, lines: Vec<CartLineItem>) -> Result<Order, ValidationError> {
        validate_checkout(form, &lines)?;

        let fulfillment = match form.fulfillment_mode {
            FulfillmentMode::Delivery => Fulfillment::Delivery {
                address: form.address.trim().to_string(),
            },
            FulfillmentMode::Pickup => Fulfillment::Pickup {
                location: form.pickup_location,
            },
        };

        let total = lines.iter().map(CartLineItem::line_total).sum();

        Ok(Order {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            lines,
            total,
            contact: CustomerContact {
                name: form.name.trim().to_string(),
                phone: form.phone.trim().to_string(),
                email: optional(&form.email),
                comment: optional(&form.comment),
            },
            fulfillment,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn contact(&self) -> &CustomerContact {
        &self.contact
    }

    pub fn fulfillment(&self) -> &Fulfillment {
        &self.fulfillment
    }

    /// Human-readable line summary, one `name xQty - lineTotal ₽` per line.
    ///
    /// ```text
    /// Эфиопия Буле Хора (Зерно) x2 - 1700 ₽
    /// Гватемала x1 - 130 ₽
    /// ```
    pub fn summary(&self) -> String {
        self.summary_with_sign(CURRENCY_SIGN)
    }

    /// Same as [`Order::summary`] with a store-specific currency sign.
    pub fn summary_with_sign(&self, currency_sign: &str) -> String {
        self.lines
            .iter()
            .map(|l| {
                format!(
                    "{} x{} - {} {}",
                    l.name,
                    l.quantity(),
                    l.line_total().units(),
                    currency_sign
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Builds the JSON body for the order-intake service.
    pub fn to_payload(&self) -> OrderPayload {
        self.to_payload_with_sign(CURRENCY_SIGN)
    }

    /// Builds the JSON body with `currency_sign` in the product summary.
    pub fn to_payload_with_sign(&self, currency_sign: &str) -> OrderPayload {
        let (address, selected_cafe) = match &self.fulfillment {
            Fulfillment::Delivery { address } => (address.clone(), None),
            Fulfillment::Pickup { location } => (String::new(), Some(*location)),
        };

        OrderPayload {
            name: self.contact.name.clone(),
            phone: self.contact.phone.clone(),
            email: self.contact.email.clone().unwrap_or_default(),
            address,
            comment: self.contact.comment.clone().unwrap_or_default(),
            product: self.summary_with_sign(currency_sign),
            total: self.total,
            delivery_type: self.fulfillment.mode(),
            selected_cafe,
        }
    }
}

// =============================================================================
// Wire Payload
// =============================================================================

/// Body of the POST to the order-intake endpoint.
///
/// ## Wire Format
/// ```json
/// {
///   "name": "Иван",
///   "phone": "+7 900 000 00 00",
///   "email": "",
///   "address": "",
///   "comment": "",
///   "product": "Эфиопия Буле Хора (Зерно) x2 - 1700 ₽",
///   "total": 1700,
///   "deliveryType": "pickup",
///   "selectedCafe": "maly"
/// }
/// ```
/// Absent optional fields go out as empty strings, which is what the
/// intake service expects. `selectedCafe` is omitted for deliveries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub comment: String,
    /// Newline-joined line summary.
    pub product: String,
    pub total: Money,
    pub delivery_type: FulfillmentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub selected_cafe: Option<PickupLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, CartKey};
    use crate::catalog::{Grind, ProductId};

    fn cart_snapshot() -> Vec<CartLineItem> {
        let mut cart = Cart::new();
        let beans = CartKey::new(ProductId::new("ethiopia-bule-hora"), Some(Grind::Whole));
        cart.add(beans.clone(), "Эфиопия Буле Хора (Зерно)", Money::from_units(850));
        cart.add(beans, "Эфиопия Буле Хора (Зерно)", Money::from_units(850));
        cart.add(
            CartKey::plain(ProductId::new("drip-guatemala")),
            "Гватемала",
            Money::from_units(130),
        );
        cart.snapshot()
    }

    fn pickup_form() -> CheckoutForm {
        CheckoutForm {
            fulfillment_mode: FulfillmentMode::Pickup,
            pickup_location: PickupLocation::Maly,
            name: " Иван ".to_string(),
            phone: "+7 900 000 00 00".to_string(),
            address: "ignored for pickup".to_string(),
            consent: true,
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_place_pickup_order() {
        let order = Order::place(&pickup_form(), cart_snapshot()).unwrap();

        assert_eq!(order.total(), Money::from_units(1830));
        assert_eq!(order.contact().name, "Иван");
        assert_eq!(order.contact().email, None);
        assert_eq!(
            order.fulfillment(),
            &Fulfillment::Pickup {
                location: PickupLocation::Maly
            }
        );
    }

    #[test]
    fn test_place_rejects_invalid_form() {
        let err = Order::place(&pickup_form(), Vec::new()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCart);
    }

    #[test]
    fn test_summary_format() {
        let order = Order::place(&pickup_form(), cart_snapshot()).unwrap();
        assert_eq!(
            order.summary(),
            "Эфиопия Буле Хора (Зерно) x2 - 1700 ₽\nГватемала x1 - 130 ₽"
        );
    }

    #[test]
    fn test_bindings_go_to_workspace_dir() {
        use std::ffi::OsStr;
        use std::path::Path;

        let export_dir = option_env!("TS_RS_EXPORT_DIR").map(Path::new);
        let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2);

        assert_eq!(export_dir.and_then(Path::parent), workspace_root);
        assert_eq!(export_dir.and_then(Path::file_name), Some(OsStr::new("bindings")));
    }

    #[test]
    fn test_payload_with_store_currency_sign() {
        let order = Order::place(&pickup_form(), cart_snapshot()).unwrap();
        let payload = order.to_payload_with_sign("руб.");
        assert_eq!(
            payload.product,
            "Эфиопия Буле Хора (Зерно) x2 - 1700 руб.\nГватемала x1 - 130 руб."
        );
        assert_eq!(payload.total, Money::from_units(1830));
    }

    #[test]
    fn test_pickup_payload_json() {
        let order = Order::place(&pickup_form(), cart_snapshot()).unwrap();
        let json = serde_json::to_value(order.to_payload()).unwrap();

        assert_eq!(json["deliveryType"], "pickup");
        assert_eq!(json["selectedCafe"], "maly");
        assert_eq!(json["total"], 1830);
        assert_eq!(json["address"], "");
        assert_eq!(json["email"], "");
        assert_eq!(json["name"], "Иван");
    }

    #[test]
    fn test_delivery_payload_omits_cafe() {
        let form = CheckoutForm {
            fulfillment_mode: FulfillmentMode::Delivery,
            address: "  Невский проспект, 1  ".to_string(),
            comment: "позвонить заранее".to_string(),
            ..pickup_form()
        };
        let order = Order::place(&form, cart_snapshot()).unwrap();
        let json = serde_json::to_value(order.to_payload()).unwrap();

        assert_eq!(json["deliveryType"], "delivery");
        assert_eq!(json["address"], "Невский проспект, 1");
        assert_eq!(json["comment"], "позвонить заранее");
        assert!(json.get("selectedCafe").is_none());
    }

    #[test]
    fn test_mode_and_location_parsing() {
        assert_eq!(
            "Pickup".parse::<FulfillmentMode>().unwrap(),
            FulfillmentMode::Pickup
        );
        assert!("courier".parse::<FulfillmentMode>().is_err());
        assert_eq!(
            "rizhskiy".parse::<PickupLocation>().unwrap(),
            PickupLocation::Rizhskiy
        );
        assert!("nevsky".parse::<PickupLocation>().is_err());
    }
}
