//! # Store Commands
//!
//! Static store information: name, currency, pickup shops.

use brew_core::{FulfillmentMode, PickupLocation};
use serde::Serialize;

use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupInfo {
    pub location: PickupLocation,
    pub address: String,
    pub opening_hours: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOption {
    pub mode: FulfillmentMode,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub currency_sign: String,
    pub fulfillment: Vec<FulfillmentOption>,
    pub pickup_locations: Vec<PickupInfo>,
}

pub fn get_store_info(config: &ConfigState) -> StoreInfo {
    StoreInfo {
        name: config.store_name().to_string(),
        currency_sign: config.currency_sign().to_string(),
        fulfillment: [FulfillmentMode::Delivery, FulfillmentMode::Pickup]
            .into_iter()
            .map(|mode| FulfillmentOption {
                mode,
                label: mode.label().to_string(),
            })
            .collect(),
        pickup_locations: PickupLocation::ALL
            .into_iter()
            .map(|location| PickupInfo {
                location,
                address: location.address().to_string(),
                opening_hours: location.opening_hours().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_info() {
        let info = get_store_info(&ConfigState::default());
        assert_eq!(info.name, "Brew Coffee");
        assert_eq!(info.pickup_locations.len(), 2);
        assert_eq!(info.pickup_locations[1].address, "Малый проспект П.С., 60/19");

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["pickupLocations"][0]["location"], "rizhskiy");
        assert_eq!(json["fulfillment"][1]["label"], "Самовывоз");
    }
}
