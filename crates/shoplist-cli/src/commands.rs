use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Subcommand};
use serde::Serialize;

use shoplist_core::{
    sort_by_distance, AppConfig, LocationAccuracy, LocationData, NewListItem,
    NotificationSettings, PositionOptions, SettingsPatch, ShoppingListBook,
};
use shoplist_locator::{
    build_catalog, current_location_with_timeout, FixedLocationProvider, LocationProvider,
    NearbyStoresTracker, NearbyUpdate, StoreFinder,
};
use shoplist_settings::{KeyValueStorage, SettingsRepository};

#[derive(Debug, Subcommand)]
pub enum StoresCommand {
    /// Stores within the search radius that stock any of the given items.
    Nearby(NearbyArgs),
    /// Full catalog entry for one store.
    Show { id: String },
}

#[derive(Debug, Args)]
pub struct NearbyArgs {
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
    /// Overrides the saved search radius for this query (meters). Location
    /// sharing must still be enabled.
    #[arg(long)]
    pub radius: Option<f64>,
    /// Item to look for; repeat for several.
    #[arg(long = "item")]
    pub items: Vec<String>,
    /// Order results nearest first instead of catalog order.
    #[arg(long)]
    pub sort: bool,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set(SetArgs),
    /// Restore the default settings.
    Reset,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(long)]
    pub location_sharing: Option<bool>,
    /// One of: high, balanced, low.
    #[arg(long)]
    pub accuracy: Option<LocationAccuracy>,
    /// Search radius in meters (50-500).
    #[arg(long)]
    pub radius: Option<f64>,
    #[arg(long)]
    pub new_stores: Option<bool>,
    #[arg(long)]
    pub item_availability: Option<bool>,
    #[arg(long)]
    pub price_alerts: Option<bool>,
}

/// Collapse repeated `--item` flags into the wanted names of a one-off list.
pub(crate) fn wanted_items(items: &[String]) -> anyhow::Result<Vec<String>> {
    let mut book = ShoppingListBook::new();
    if !items.is_empty() {
        book.create(
            "command line",
            items.iter().map(|name| NewListItem::new(name.as_str(), 1)).collect(),
        )?;
    }
    Ok(book.wanted_item_names())
}

pub async fn run_stores<S: KeyValueStorage>(
    command: StoresCommand,
    config: &AppConfig,
    settings: Arc<SettingsRepository<S>>,
) -> anyhow::Result<()> {
    let finder = StoreFinder::new(build_catalog(config)?);

    match command {
        StoresCommand::Show { id } => {
            let store = finder
                .store_details(&id)
                .await?
                .with_context(|| format!("no store with id '{id}'"))?;
            print_json(&store)
        }
        StoresCommand::Nearby(args) => {
            let location = match (args.lat, args.lon) {
                (Some(lat), Some(lon)) => LocationData::now(lat, lon, 0.0),
                _ => default_location(config, settings.get_settings().location_accuracy).await?,
            };
            let wanted = wanted_items(&args.items)?;

            let mut tracker = NearbyStoresTracker::new(finder, settings);
            tracker.set_wanted_items(wanted);
            let update = tracker.refresh_within(&location, args.radius).await?;

            match update {
                NearbyUpdate::Stores { mut stores, .. } => {
                    if args.sort {
                        sort_by_distance(&mut stores);
                    }
                    print_json(&stores)
                }
                NearbyUpdate::SharingDisabled => {
                    println!("location sharing is disabled; enable it with `settings set --location-sharing true`");
                    Ok(())
                }
                NearbyUpdate::LocationError(error) => Err(error.into()),
            }
        }
    }
}

async fn default_location(
    config: &AppConfig,
    accuracy: LocationAccuracy,
) -> anyhow::Result<LocationData> {
    let provider = FixedLocationProvider::new(config.default_latitude, config.default_longitude);
    if !provider.request_permission().await {
        anyhow::bail!("location permission denied");
    }
    let options = PositionOptions::for_accuracy(accuracy)
        .with_timeout(Duration::from_millis(config.location_timeout_ms));
    Ok(current_location_with_timeout(&provider, options).await?)
}

pub fn run_settings<S: KeyValueStorage>(
    command: SettingsCommand,
    settings: &SettingsRepository<S>,
) -> anyhow::Result<()> {
    let result = match command {
        SettingsCommand::Show => settings.get_settings(),
        SettingsCommand::Reset => settings.reset_settings()?,
        SettingsCommand::Set(args) => {
            let current = settings.get_settings().notifications;
            let notifications = if args.new_stores.is_some()
                || args.item_availability.is_some()
                || args.price_alerts.is_some()
            {
                // The stored object is replaced whole, so rebuild it from the current one.
                Some(NotificationSettings {
                    new_stores: args.new_stores.unwrap_or(current.new_stores),
                    item_availability: args
                        .item_availability
                        .unwrap_or(current.item_availability),
                    price_alerts: args.price_alerts.unwrap_or(current.price_alerts),
                })
            } else {
                None
            };
            let patch = SettingsPatch {
                location_sharing: args.location_sharing,
                location_accuracy: args.accuracy,
                notifications,
                search_radius: args.radius,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to change; pass at least one setting flag");
            }
            settings.update_settings(&patch)?
        }
    };
    print_json(&result)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wanted_items_dedupes_ignoring_case() {
        let items = vec!["Milk".to_string(), "milk".to_string(), "Tea".to_string()];
        assert_eq!(wanted_items(&items).unwrap(), vec!["Milk", "Tea"]);
    }

    #[test]
    fn no_items_means_no_filter() {
        assert!(wanted_items(&[]).unwrap().is_empty());
    }

    #[test]
    fn blank_item_is_rejected() {
        assert!(wanted_items(&[" ".to_string()]).is_err());
    }
}
