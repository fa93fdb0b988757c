//! Store records and the distance/availability filter applied to them.

use serde::{Deserialize, Serialize};

use crate::geo::compute_distance_meters;
use crate::location::LocationData;
use crate::CoreError;

/// Search radius used when the caller does not supply one.
pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreItem {
    pub name: String,
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters from the user's location at query time. Not authoritative
    /// outside the query that produced it.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub available_items: Vec<StoreItem>,
}

impl Store {
    #[must_use]
    pub fn coordinate(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// True when any in-stock item matches one of `wanted` ignoring case.
    /// An empty `wanted` list matches every store.
    #[must_use]
    pub fn stocks_any(&self, wanted: &[String]) -> bool {
        if wanted.is_empty() {
            return true;
        }
        let wanted: Vec<String> = wanted.iter().map(|w| w.to_lowercase()).collect();
        self.available_items
            .iter()
            .filter(|item| item.in_stock)
            .any(|item| wanted.contains(&item.name.to_lowercase()))
    }
}

/// Keep the stores within `radius_meters` of `user_location` that stock at
/// least one wanted item, preserving catalog order.
///
/// Each returned store carries a freshly computed `distance`, rounded to the
/// nearest meter before the radius comparison. `radius_meters` defaults to
/// [`DEFAULT_SEARCH_RADIUS_METERS`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidArgument`] if the radius is negative or not
/// finite, or if the user location is not a valid coordinate.
pub fn filter_nearby(
    stores: Vec<Store>,
    user_location: &LocationData,
    radius_meters: Option<f64>,
    wanted_item_names: &[String],
) -> Result<Vec<Store>, CoreError> {
    let radius = radius_meters.unwrap_or(DEFAULT_SEARCH_RADIUS_METERS);
    if !radius.is_finite() || radius < 0.0 {
        return Err(CoreError::InvalidArgument {
            name: "radius_meters",
            reason: format!("{radius} must be a finite, non-negative number"),
        });
    }
    user_location.validate()?;

    let origin = user_location.coordinate();
    Ok(stores
        .into_iter()
        .map(|mut store| {
            store.distance = compute_distance_meters(origin, store.coordinate()).round();
            store
        })
        .filter(|store| store.distance <= radius && store.stocks_any(wanted_item_names))
        .collect())
}

/// Order stores nearest first. Stable for equal distances.
pub fn sort_by_distance(stores: &mut [Store]) {
    stores.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// The built-in demo catalog: two stores a block apart in lower Manhattan.
#[must_use]
pub fn mock_stores() -> Vec<Store> {
    vec![
        Store {
            id: "1".to_string(),
            name: "Grocery Store".to_string(),
            address: "123 Main St".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
            distance: 50.0,
            available_items: vec![
                item("Milk", true, Some(3.99)),
                item("Bread", true, Some(2.49)),
                item("Eggs", false, None),
            ],
        },
        Store {
            id: "2".to_string(),
            name: "Supermarket".to_string(),
            address: "456 Oak Ave".to_string(),
            latitude: 40.7138,
            longitude: -74.007,
            distance: 75.0,
            available_items: vec![
                item("Coffee", true, Some(8.99)),
                item("Tea", true, Some(4.99)),
                item("Sugar", true, Some(2.99)),
            ],
        },
    ]
}

fn item(name: &str, in_stock: bool, price: Option<f64>) -> StoreItem {
    StoreItem {
        name: name.to_string(),
        in_stock,
        price,
    }
}
